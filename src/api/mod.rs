//! REST API layer
//!
//! - `envelope`: the `{code, message, data}` wrapper and its success predicate
//! - `client`: reqwest-based transport shared by every backend
//! - `content`: tourism content endpoints (search, details, recommendations)
//! - `auth`: account endpoints (register, login, tokens, email verification)

pub mod error;
pub mod envelope;
pub mod client;
pub mod content;
pub mod auth;

pub use error::ApiError;
pub use envelope::{ApiResponse, SUCCESS_CODES};
pub use client::HttpClient;
pub use content::{TourBackend, HttpTourBackend};
pub use auth::{AuthBackend, HttpAuthBackend};
