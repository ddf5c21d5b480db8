//! Filtered search driven by the URL query string

use std::sync::Arc;
use tokio::sync::RwLock;

use super::sequence::RequestSequencer;
use crate::api::{ApiError, TourBackend};
use crate::filter::{filter_from_query, QueryParams};
use crate::models::ContentRecord;

/// Placeholder shown instead of issuing an unfiltered search
pub const PROMPT_MESSAGE: &str = "검색 조건을 입력해주세요.";

/// What the result area currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum SearchView {
    Idle,
    /// No recognized filter key in the URL
    Prompt(String),
    Loading,
    Results(Vec<ContentRecord>),
    /// Inline error message
    Failed(String),
}

impl SearchView {
    pub fn results(&self) -> &[ContentRecord] {
        match self {
            SearchView::Results(items) => items,
            _ => &[],
        }
    }
}

/// Result list of the type-filter page
pub struct SearchResults {
    backend: Arc<dyn TourBackend>,
    sequencer: RequestSequencer,
    view: RwLock<SearchView>,
}

impl SearchResults {
    pub fn new(backend: Arc<dyn TourBackend>) -> Self {
        Self {
            backend,
            sequencer: RequestSequencer::new(),
            view: RwLock::new(SearchView::Idle),
        }
    }

    pub async fn view(&self) -> SearchView {
        self.view.read().await.clone()
    }

    /// React to a new query string: derive the backend filter from its keys,
    /// search, and replace the displayed list.
    ///
    /// Responses to requests that were superseded while in flight are dropped.
    pub async fn on_query_change(&self, params: &QueryParams) -> SearchView {
        let seq = self.sequencer.issue();

        let Some(filter) = filter_from_query(params) else {
            log::debug!("No filter criteria in query, skipping search");
            return self.apply(seq, SearchView::Prompt(PROMPT_MESSAGE.to_string())).await;
        };

        self.apply(seq, SearchView::Loading).await;
        log::info!("Searching with {:?}", filter);

        let next = match self.backend.search_filter(&filter).await {
            Ok(response) if response.is_success() => {
                SearchView::Results(response.data.unwrap_or_default())
            }
            Ok(response) => {
                let err = ApiError::Envelope {
                    code: response.code,
                    message: response.message,
                };
                log::warn!("Search rejected: {}", err);
                SearchView::Failed(err.user_message())
            }
            Err(e) => {
                log::error!("Search failed: {}", e);
                SearchView::Failed(e.user_message())
            }
        };

        self.apply(seq, next).await
    }

    async fn apply(&self, seq: u64, next: SearchView) -> SearchView {
        let mut view = self.view.write().await;
        if self.sequencer.is_latest(seq) {
            *view = next;
        } else {
            log::debug!("Discarding stale search response #{}", seq);
        }
        view.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::content::tests::{record, FakeTourBackend};
    use tokio::sync::Notify;

    fn backend() -> FakeTourBackend {
        FakeTourBackend {
            search_results: vec![
                record("126508", "12", "경복궁"),
                record("126509", "12", "창덕궁"),
                record("264337", "12", "남산서울타워"),
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_prompt_without_criteria() {
        let backend = Arc::new(backend());
        let results = SearchResults::new(backend.clone());

        let view = results.on_query_change(&QueryParams::parse("category=spots")).await;
        assert_eq!(view, SearchView::Prompt(PROMPT_MESSAGE.to_string()));
        assert!(backend.searches().is_empty());
    }

    #[tokio::test]
    async fn test_results_replace_view() {
        let backend = Arc::new(backend());
        let results = SearchResults::new(backend.clone());

        let view = results
            .on_query_change(&QueryParams::parse("cat1=A01&areacode=1&title=%EA%B6%81"))
            .await;
        assert_eq!(view.results().len(), 2);

        let view = results.on_query_change(&QueryParams::parse("title=%ED%83%80%EC%9B%8C")).await;
        assert_eq!(view.results().len(), 1);
        assert_eq!(results.view().await.results()[0].content_id, "264337");
    }

    #[tokio::test]
    async fn test_errors_are_inline_messages() {
        let mut offline = backend();
        offline.offline.insert("search_filter");
        let results = SearchResults::new(Arc::new(offline));
        let view = results.on_query_change(&QueryParams::parse("areacode=1")).await;
        assert!(matches!(view, SearchView::Failed(msg) if !msg.is_empty()));

        let mut rejecting = backend();
        rejecting.rejecting.insert("search_filter");
        let results = SearchResults::new(Arc::new(rejecting));
        let view = results.on_query_change(&QueryParams::parse("areacode=1")).await;
        assert!(matches!(view, SearchView::Failed(msg) if msg.contains("데이터가 없습니다")));
    }

    #[tokio::test]
    async fn test_stale_response_discarded() {
        let gate = Arc::new(Notify::new());
        let backend = Arc::new(FakeTourBackend {
            gate: Some(gate.clone()),
            ..backend()
        });
        let results = Arc::new(SearchResults::new(backend.clone()));

        let slow = {
            let results = results.clone();
            tokio::spawn(async move { results.on_query_change(&QueryParams::parse("title=slow")).await })
        };
        while backend.searches().is_empty() {
            tokio::task::yield_now().await;
        }

        let fresh = results.on_query_change(&QueryParams::parse("title=%EA%B6%81")).await;
        assert_eq!(fresh.results().len(), 2);

        gate.notify_waiters();
        slow.await.unwrap();

        assert_eq!(results.view().await.results().len(), 2);
    }
}
