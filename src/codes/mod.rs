//! Region and category code providers
//!
//! Code lists come from the government open-data tour API. Lookups never fail
//! from the caller's point of view: any error is logged and yields an empty list.

pub mod provider;
pub mod open_data;

pub use provider::{CodeProvider, CodeSource};
pub use open_data::{OneOrMany, OpenDataCodeSource};
