use std::sync::Arc;
use tokio::sync::RwLock;

use super::aggregator::get_detail_by_id;
use crate::api::{ApiError, TourBackend};
use crate::models::ContentRecord;
use crate::search::RequestSequencer;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Idle,
    Loading,
    Loaded(Box<ContentRecord>),
    /// "정보를 찾을 수 없습니다."
    NotFound,
    Failed(String),
}

/// Detail page state. Only the most recently requested id may update it.
pub struct DetailLoader {
    backend: Arc<dyn TourBackend>,
    sequencer: RequestSequencer,
    view: RwLock<DetailView>,
}

impl DetailLoader {
    pub fn new(backend: Arc<dyn TourBackend>) -> Self {
        Self {
            backend,
            sequencer: RequestSequencer::new(),
            view: RwLock::new(DetailView::Idle),
        }
    }

    pub async fn view(&self) -> DetailView {
        self.view.read().await.clone()
    }

    pub async fn load(&self, content_id: &str) -> DetailView {
        let seq = self.sequencer.issue();
        self.apply(seq, DetailView::Loading).await;

        let next = match get_detail_by_id(self.backend.as_ref(), content_id).await {
            Ok(record) => DetailView::Loaded(Box::new(record)),
            Err(ApiError::NotFound(_)) => DetailView::NotFound,
            Err(e) => {
                log::error!("Failed to load content {}: {}", content_id, e);
                DetailView::Failed(e.user_message())
            }
        };

        self.apply(seq, next).await
    }

    async fn apply(&self, seq: u64, next: DetailView) -> DetailView {
        let mut view = self.view.write().await;
        if self.sequencer.is_latest(seq) {
            *view = next;
        } else {
            log::debug!("Discarding stale detail response #{}", seq);
        }
        view.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::content::tests::{record, FakeTourBackend};

    #[tokio::test]
    async fn test_load_states() {
        let backend = Arc::new(FakeTourBackend {
            base: Some(record("126508", "12", "경복궁")),
            ..Default::default()
        });
        let loader = DetailLoader::new(backend);
        assert_eq!(loader.view().await, DetailView::Idle);

        match loader.load("126508").await {
            DetailView::Loaded(record) => {
                assert_eq!(record.title, "경복궁");
                assert!(record.tour_spot_info.is_some());
            }
            other => panic!("unexpected view {:?}", other),
        }

        assert_eq!(loader.load("1").await, DetailView::NotFound);
    }

    #[tokio::test]
    async fn test_transport_error_is_message() {
        let mut backend = FakeTourBackend::default();
        backend.offline.insert("content");
        let loader = DetailLoader::new(Arc::new(backend));
        assert!(matches!(loader.load("1").await, DetailView::Failed(_)));
    }
}
