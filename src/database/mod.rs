// Database module for tour-explorer
// Provides SQLite persistence for the client's key/value storage (session tokens)

pub mod manager;
pub mod migrations;
pub mod storage_repo;

pub use manager::DatabaseManager;
