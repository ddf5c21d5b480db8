//! Faceted filter
//!
//! - `query`: URL query-string parsing and the single serialization point that
//!   turns ALL/empty values into absence
//! - `draft`: the in-progress filter selection with cascade resets
//! - `panel`: the draft plus the dependent option lists (facets)
//! - `controller`: keeps the URL query string as the canonical filter state

pub mod query;
pub mod draft;
pub mod panel;
pub mod controller;

pub use query::{filter_from_query, to_query_pairs, to_query_string, QueryParams};
pub use draft::{FilterDraft, FilterField};
pub use panel::FilterPanel;
pub use controller::{TypePageController, CATEGORY_QUERY_KEY, TYPE_FILTER_PATH};
