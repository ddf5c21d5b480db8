//! Application configuration
//!
//! Every section has a `Default`; `AppConfig::from_env` overlays `TOUR_*`
//! environment variables on top of the defaults.

use std::path::PathBuf;
use std::time::Duration;

/// Tourism content + account backend
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the content endpoints (`/search`, `/tourspots`, ...)
    pub api_base_url: String,
    /// Base URL of the account endpoints (`/auth/...`)
    pub auth_base_url: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8085/api".to_string(),
            auth_base_url: "http://localhost:8085/api/user/v1".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Government open-data tour API used for region/category codes
#[derive(Debug, Clone)]
pub struct OpenDataConfig {
    pub base_url: String,
    pub service_key: String,
    pub mobile_app: String,
    pub rows_per_page: u32,
}

impl Default for OpenDataConfig {
    fn default() -> Self {
        Self {
            base_url: "http://apis.data.go.kr/B551011/KorService2".to_string(),
            service_key: String::new(),
            mobile_app: "TourExplorer".to_string(),
            rows_per_page: 100,
        }
    }
}

/// Itinerary generation endpoint
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash-latest".to_string(),
            api_key: String::new(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How often the stored access token is checked for expiry
    pub token_check_interval: Duration,
    /// Directory holding the storage database
    pub data_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tour-explorer");

        Self {
            token_check_interval: Duration::from_secs(60),
            data_dir,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub open_data: OpenDataConfig,
    pub planner: PlannerConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    /// Defaults overlaid with the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`; blank values are ignored
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(v) = get("TOUR_API_URL") {
            config.backend.api_base_url = v;
        }
        if let Some(v) = get("TOUR_AUTH_URL") {
            config.backend.auth_base_url = v;
        }
        if let Some(v) = get("TOUR_HTTP_TIMEOUT_SECS") {
            match v.parse() {
                Ok(secs) => config.backend.timeout_secs = secs,
                Err(_) => log::warn!("Ignoring invalid TOUR_HTTP_TIMEOUT_SECS: {}", v),
            }
        }
        if let Some(v) = get("TOUR_OPEN_DATA_URL") {
            config.open_data.base_url = v;
        }
        if let Some(v) = get("TOUR_API_KEY") {
            config.open_data.service_key = v;
        }
        if let Some(v) = get("TOUR_MOBILE_APP") {
            config.open_data.mobile_app = v;
        }
        if let Some(v) = get("TOUR_AI_API_KEY") {
            config.planner.api_key = v;
        }
        if let Some(v) = get("TOUR_AI_MODEL") {
            config.planner.model = v;
        }
        if let Some(v) = get("TOUR_DATA_DIR") {
            config.session.data_dir = PathBuf::from(v);
        }
        if let Some(v) = get("TOUR_TOKEN_CHECK_SECS") {
            match v.parse::<u64>() {
                Ok(secs) if secs > 0 => config.session.token_check_interval = Duration::from_secs(secs),
                _ => log::warn!("Ignoring invalid TOUR_TOKEN_CHECK_SECS: {}", v),
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.session.token_check_interval, Duration::from_secs(60));
        assert_eq!(config.open_data.rows_per_page, 100);
        assert!(config.session.data_dir.ends_with("tour-explorer"));
    }

    #[test]
    fn test_env_overlay() {
        let env: HashMap<&str, &str> = [
            ("TOUR_API_URL", "https://tour.example.com/api"),
            ("TOUR_API_KEY", "secret"),
            ("TOUR_TOKEN_CHECK_SECS", "5"),
            ("TOUR_AI_MODEL", "  "),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.backend.api_base_url, "https://tour.example.com/api");
        assert_eq!(config.open_data.service_key, "secret");
        assert_eq!(config.session.token_check_interval, Duration::from_secs(5));
        assert_eq!(config.planner.model, PlannerConfig::default().model);
    }

    #[test]
    fn test_invalid_interval_ignored() {
        let config = AppConfig::from_lookup(|key| {
            (key == "TOUR_TOKEN_CHECK_SECS").then(|| "0".to_string())
        });
        assert_eq!(config.session.token_check_interval, Duration::from_secs(60));
    }
}
