//! Authentication
//!
//! - `token`: JWT payload decoding (user id, expiry); no signature checks
//! - `store`: persisted access/refresh tokens
//! - `session`: the session context handed to the rest of the app

pub mod token;
pub mod store;
pub mod session;

pub use token::{decode_claims, extract_user_id, is_token_valid, TokenClaims, TokenError};
pub use store::{TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
pub use session::{AuthState, Session, SessionContext};
