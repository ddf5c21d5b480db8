use anyhow::Result;

use crate::database::DatabaseManager;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Persistent key/value storage for the token pair
pub trait TokenStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;

    fn save_tokens(&self, access_token: &str, refresh_token: &str) -> Result<()> {
        self.set(ACCESS_TOKEN_KEY, access_token)?;
        self.set(REFRESH_TOKEN_KEY, refresh_token)
    }

    /// Remove both tokens; attempts the second even if the first fails
    fn clear_tokens(&self) -> Result<()> {
        let access = self.remove(ACCESS_TOKEN_KEY);
        let refresh = self.remove(REFRESH_TOKEN_KEY);
        access.and(refresh)
    }

    fn access_token(&self) -> Result<Option<String>> {
        self.get(ACCESS_TOKEN_KEY)
    }

    fn refresh_token(&self) -> Result<Option<String>> {
        self.get(REFRESH_TOKEN_KEY)
    }
}

impl TokenStore for DatabaseManager {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.get_value(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_value(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.remove_value(key)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// In-memory store for session tests
    #[derive(Default)]
    pub struct MemoryTokenStore {
        values: Mutex<HashMap<String, String>>,
    }

    impl TokenStore for MemoryTokenStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.values.lock().unwrap().insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.values.lock().unwrap().remove(key);
            Ok(())
        }
    }

    #[test]
    fn test_database_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let db = DatabaseManager::init_in_dir(temp_dir.path()).unwrap();

        db.save_tokens("access-1", "refresh-1").unwrap();
        assert_eq!(db.access_token().unwrap().as_deref(), Some("access-1"));
        assert_eq!(db.refresh_token().unwrap().as_deref(), Some("refresh-1"));

        db.clear_tokens().unwrap();
        assert_eq!(db.access_token().unwrap(), None);
        assert_eq!(db.refresh_token().unwrap(), None);
    }

    #[test]
    fn test_tokens_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let db = DatabaseManager::init_in_dir(temp_dir.path()).unwrap();
            db.save_tokens("a", "r").unwrap();
        }
        let db = DatabaseManager::init_in_dir(temp_dir.path()).unwrap();
        assert_eq!(db.access_token().unwrap().as_deref(), Some("a"));
    }
}
