//! Content detail
//!
//! - `aggregator`: base record plus the one type-specific record its
//!   discriminator selects (two for tour courses)
//! - `loader`: detail view state with stale-response protection

pub mod aggregator;
pub mod loader;

pub use aggregator::get_detail_by_id;
pub use loader::{DetailLoader, DetailView};
