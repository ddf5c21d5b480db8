// State management for tour-explorer

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::api::{HttpAuthBackend, HttpClient, HttpTourBackend, TourBackend};
use crate::auth::SessionContext;
use crate::browse::TypePage;
use crate::codes::{CodeProvider, OpenDataCodeSource};
use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::detail::DetailLoader;
use crate::planner::{GeminiProvider, Planner};

/// Everything the front end needs, built once at startup
pub struct AppState {
    pub config: AppConfig,
    /// SQLite storage holding the session tokens
    database: Arc<DatabaseManager>,
    pub tour: Arc<dyn TourBackend>,
    pub codes: CodeProvider,
    pub session: SessionContext,
    pub planner: Planner,
}

impl AppState {
    /// Open storage and construct every backend from `config`
    pub fn init(config: AppConfig) -> Result<Self> {
        let database = Arc::new(
            DatabaseManager::init_in_dir(&config.session.data_dir)
                .context("Failed to initialize storage")?,
        );
        log::info!("Storage ready at {:?}", database.db_path());

        let timeout = config.backend.timeout_secs;
        let tour_http = HttpClient::new(&config.backend.api_base_url, timeout)
            .context("Invalid content API URL")?;
        let auth_http = HttpClient::new(&config.backend.auth_base_url, timeout)
            .context("Invalid auth API URL")?;
        let code_source = OpenDataCodeSource::new(config.open_data.clone(), timeout)
            .context("Invalid open-data API URL")?;

        if config.open_data.service_key.is_empty() {
            log::warn!("TOUR_API_KEY is not set; region and category lookups will fail");
        }

        let session = SessionContext::new(
            Arc::new(HttpAuthBackend::new(auth_http)),
            database.clone(),
            config.session.token_check_interval,
        );

        Ok(Self {
            tour: Arc::new(HttpTourBackend::new(tour_http)),
            codes: CodeProvider::new(Arc::new(code_source)),
            session,
            planner: Planner::new(Arc::new(GeminiProvider::new(config.planner.clone()))),
            database,
            config,
        })
    }

    pub fn database(&self) -> &DatabaseManager {
        &self.database
    }

    /// Open the type-filter page at `location`
    pub async fn type_page(&self, location: &str) -> TypePage {
        TypePage::open(self.tour.clone(), self.codes.source(), location).await
    }

    pub fn detail_loader(&self) -> DetailLoader {
        DetailLoader::new(self.tour.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenStore;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> AppConfig {
        let mut config = AppConfig::default();
        config.session.data_dir = dir.path().to_path_buf();
        config
    }

    #[tokio::test]
    async fn test_init_and_restore_empty_session() {
        let temp_dir = TempDir::new().unwrap();
        let state = AppState::init(test_config(&temp_dir)).unwrap();

        assert!(state.database().db_path().starts_with(temp_dir.path()));
        assert!(!state.session.check_auth_status().await);
        assert!(state.session.current_session().is_none());
    }

    #[test]
    fn test_session_shares_storage() {
        let temp_dir = TempDir::new().unwrap();
        let state = AppState::init(test_config(&temp_dir)).unwrap();
        state.session.login_with_tokens("not.a-jwt.x", "r").unwrap();
        assert_eq!(state.database().access_token().unwrap().as_deref(), Some("not.a-jwt.x"));
    }

    #[test]
    fn test_bad_url_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = test_config(&temp_dir);
        config.backend.api_base_url = "not a url".into();
        assert!(AppState::init(config).is_err());
    }
}
