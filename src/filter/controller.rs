//! URL-synchronized page controller
//!
//! The query string is the single source of truth for the type-filter page.
//! Tab changes and filter submissions never merge into the existing
//! parameters: each writes a brand-new set.

use super::query::{to_query_pairs, QueryParams};
use crate::models::{CategoryTab, SearchFilterRequest, FILTER_QUERY_KEYS, KEYWORD_QUERY_KEY};

/// Route of the type-filter page
pub const TYPE_FILTER_PATH: &str = "/type-filter";

/// Query key selecting the category tab
pub const CATEGORY_QUERY_KEY: &str = "category";

#[derive(Debug, Clone, Default)]
pub struct TypePageController {
    query: QueryParams,
    /// Bumped on every write to the query string
    revision: u64,
}

impl TypePageController {
    pub fn from_location(location: &str) -> Self {
        Self {
            query: QueryParams::parse(location),
            revision: 0,
        }
    }

    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current location, e.g. `/type-filter?cat1=A01&areacode=1`
    pub fn location(&self) -> String {
        if self.query.is_empty() {
            TYPE_FILTER_PATH.to_string()
        } else {
            format!("{}?{}", TYPE_FILTER_PATH, self.query.to_query_string())
        }
    }

    /// Tab from `category`, else from `contentTypeid`, else the default tab
    pub fn selected_tab(&self) -> CategoryTab {
        self.query
            .get(CATEGORY_QUERY_KEY)
            .and_then(CategoryTab::by_value)
            .or_else(|| {
                self.query
                    .get("contentTypeid")
                    .and_then(CategoryTab::by_content_type_code)
            })
            .unwrap_or_else(CategoryTab::default_tab)
    }

    /// Conditions the filter draft is seeded with, read off the URL as-is
    pub fn initial_conditions(&self) -> SearchFilterRequest {
        let mut conditions = SearchFilterRequest::default();
        for key in FILTER_QUERY_KEYS {
            if let Some(value) = self.query.get(key) {
                conditions.set_field(key, Some(value.to_string()));
            }
        }
        if conditions.title.is_none() {
            conditions.title = self.query.get(KEYWORD_QUERY_KEY).map(str::to_string);
        }
        conditions
    }

    /// Switch tabs, discarding every other parameter
    pub fn select_tab(&mut self, tab: CategoryTab) -> &QueryParams {
        self.write(QueryParams::from_pairs([
            (CATEGORY_QUERY_KEY, tab.value),
            ("contentTypeid", tab.content_type_id()),
        ]))
    }

    /// Replace the query string with the submitted filter; ALL and empty
    /// values are left out
    pub fn submit(&mut self, filter: &SearchFilterRequest) -> &QueryParams {
        self.write(QueryParams::from_pairs(to_query_pairs(filter)))
    }

    /// External navigation (back/forward, typed URL)
    pub fn navigate(&mut self, location: &str) -> &QueryParams {
        self.write(QueryParams::parse(location))
    }

    fn write(&mut self, query: QueryParams) -> &QueryParams {
        self.query = query;
        self.revision += 1;
        log::debug!("Navigated to {}", self.location());
        &self.query
    }
}
