use std::sync::Arc;

use crate::api::TourBackend;
use crate::codes::CodeSource;
use crate::filter::{FilterField, FilterPanel, TypePageController};
use crate::models::{CategoryTab, SearchFilterRequest};
use crate::search::{SearchResults, SearchView};

/// The type-filter page.
///
/// Every write goes through the URL: the panel is re-seeded from it and the
/// result list re-derives its search from it.
pub struct TypePage {
    controller: TypePageController,
    panel: FilterPanel,
    results: SearchResults,
}

impl TypePage {
    /// Open the page at `location` and run the initial load
    pub async fn open(backend: Arc<dyn TourBackend>, codes: Arc<dyn CodeSource>, location: &str) -> Self {
        let controller = TypePageController::from_location(location);
        let panel = FilterPanel::new(codes, controller.selected_tab(), &controller.initial_conditions());
        let results = SearchResults::new(backend);

        let page = Self { controller, panel, results };
        page.panel.sync_facets().await;
        page.results.on_query_change(page.controller.query()).await;
        page
    }

    pub fn location(&self) -> String {
        self.controller.location()
    }

    pub fn selected_tab(&self) -> CategoryTab {
        self.controller.selected_tab()
    }

    pub fn panel(&self) -> &FilterPanel {
        &self.panel
    }

    pub async fn view(&self) -> SearchView {
        self.results.view().await
    }

    pub async fn select_tab(&mut self, tab: CategoryTab) -> SearchView {
        self.controller.select_tab(tab);
        self.refresh().await
    }

    /// Edit the draft; nothing is searched until [`TypePage::submit`]
    pub async fn set_field(&mut self, field: FilterField, value: impl Into<String>) -> Vec<FilterField> {
        self.panel.set_field(field, value).await
    }

    /// Submit the panel's draft
    pub async fn submit(&mut self) -> SearchView {
        let filter = self.panel.submit();
        self.submit_filter(&filter).await
    }

    pub async fn submit_filter(&mut self, filter: &SearchFilterRequest) -> SearchView {
        self.controller.submit(filter);
        self.refresh().await
    }

    pub async fn navigate(&mut self, location: &str) -> SearchView {
        self.controller.navigate(location);
        self.refresh().await
    }

    async fn refresh(&mut self) -> SearchView {
        let tab = self.controller.selected_tab();
        let initial = self.controller.initial_conditions();
        self.panel.reset(tab, &initial).await;
        self.results.on_query_change(self.controller.query()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::content::tests::{record, FakeTourBackend};
    use crate::codes::provider::tests::sample_source;
    use crate::models::ALL_CODE;
    use crate::search::PROMPT_MESSAGE;

    fn backend() -> Arc<FakeTourBackend> {
        Arc::new(FakeTourBackend {
            search_results: vec![
                record("126508", "12", "경복궁"),
                record("126512", "12", "광화문"),
                record("2733967", "15", "궁중문화축전"),
            ],
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_submitted_filter_round_trip() {
        let backend = backend();
        let mut page = TypePage::open(backend.clone(), Arc::new(sample_source()), "/type-filter?areacode=6").await;
        assert_eq!(page.view().await.results().len(), 3);
        assert_eq!(backend.searches().len(), 1);

        let filter = SearchFilterRequest {
            cat1: Some("A01".into()),
            cat2: Some(ALL_CODE.into()),
            area_code: Some("1".into()),
            title: Some("궁".into()),
            ..Default::default()
        };
        let view = page.submit_filter(&filter).await;

        assert_eq!(page.location(), "/type-filter?cat1=A01&areacode=1&title=%EA%B6%81");

        let searches = backend.searches();
        assert_eq!(searches.len(), 2);
        let issued = &searches[1];
        assert_eq!(issued.cat1.as_deref(), Some("A01"));
        assert_eq!(issued.area_code.as_deref(), Some("1"));
        assert_eq!(issued.title.as_deref(), Some("궁"));
        assert_eq!(issued.cat2, None);
        assert_eq!(issued.content_type_id, None);

        assert_eq!(view.results().len(), 2);
        assert_eq!(page.view().await, view);
    }

    #[tokio::test]
    async fn test_tab_only_url_prompts() {
        let backend = backend();
        let page = TypePage::open(backend.clone(), Arc::new(sample_source()), "/type-filter").await;
        assert_eq!(page.view().await, SearchView::Prompt(PROMPT_MESSAGE.to_string()));
        assert!(backend.searches().is_empty());
        assert_eq!(page.selected_tab().value, "spots");
    }

    #[tokio::test]
    async fn test_panel_submit_carries_content_type() {
        let backend = backend();
        let mut page = TypePage::open(backend.clone(), Arc::new(sample_source()), "/type-filter?category=festivals").await;

        page.set_field(FilterField::Title, "궁").await;
        assert!(backend.searches().is_empty());

        page.submit().await;
        assert_eq!(page.location(), "/type-filter?contentTypeid=15&title=%EA%B6%81");
        assert_eq!(page.selected_tab().value, "festivals");
        assert_eq!(page.panel().draft().get(FilterField::Title), "궁");
        assert_eq!(backend.searches().len(), 1);
    }

    #[tokio::test]
    async fn test_tab_change_resets_filter() {
        let backend = backend();
        let mut page = TypePage::open(
            backend.clone(),
            Arc::new(sample_source()),
            "/type-filter?contentTypeid=12&cat1=A01&areacode=1",
        )
        .await;
        assert_eq!(page.panel().draft().get(FilterField::Cat1), "A01");

        page.select_tab(CategoryTab::by_value("courses").unwrap()).await;
        assert_eq!(page.location(), "/type-filter?category=courses&contentTypeid=25");
        assert_eq!(page.panel().draft().get(FilterField::Cat1), ALL_CODE);
        assert_eq!(page.panel().draft().get(FilterField::ContentType), "25");
        assert_eq!(backend.searches().last().unwrap().content_type_id.as_deref(), Some("25"));
    }
}
