//! Type-filter page: tabs, filter panel and result list wired to one URL

pub mod page;

pub use page::TypePage;
