//! Search result fetching
//!
//! - `sequence`: monotonic request numbering so stale responses are dropped
//! - `fetcher`: turns query-string changes into filtered searches
//! - `page`: client-side pagination of the result list

pub mod sequence;
pub mod fetcher;
pub mod page;

pub use sequence::RequestSequencer;
pub use fetcher::{SearchResults, SearchView, PROMPT_MESSAGE};
pub use page::{Pagination, DEFAULT_ITEMS_PER_PAGE};
