//! Session context
//!
//! One `SessionContext` is created at startup and cloned into whatever needs
//! it. While signed in, a background watcher checks the stored access token
//! on a fixed interval and logs out once it has expired. The watcher is
//! replaced on every login and cancelled on every logout.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, RwLock, Weak};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::store::{TokenStore, ACCESS_TOKEN_KEY};
use super::token::{decode_claims, is_token_valid};
use crate::api::{ApiError, AuthBackend};
use crate::models::{LoginRequest, RegisterRequest, UserInfo};

/// Authentication state held in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub is_authenticated: bool,
    pub access_token: Option<String>,
    pub user_id: Option<String>,
}

/// A signed-in session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Option<String>,
    pub access_token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

struct SessionInner {
    backend: Arc<dyn AuthBackend>,
    store: Arc<dyn TokenStore>,
    state: RwLock<AuthState>,
    check_interval: Duration,
    watcher: Mutex<Option<CancellationToken>>,
}

/// Cloneable handle to the process-wide session
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<SessionInner>,
}

fn read_state(lock: &RwLock<AuthState>) -> AuthState {
    match lock.read() {
        Ok(state) => state.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

fn write_state(lock: &RwLock<AuthState>, next: AuthState) {
    match lock.write() {
        Ok(mut state) => *state = next,
        Err(poisoned) => *poisoned.into_inner() = next,
    }
}

impl SessionContext {
    pub fn new(backend: Arc<dyn AuthBackend>, store: Arc<dyn TokenStore>, check_interval: Duration) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                backend,
                store,
                state: RwLock::new(AuthState::default()),
                check_interval,
                watcher: Mutex::new(None),
            }),
        }
    }

    pub fn state(&self) -> AuthState {
        read_state(&self.inner.state)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated
    }

    pub fn current_session(&self) -> Option<Session> {
        let state = self.state();
        if !state.is_authenticated {
            return None;
        }
        let access_token = state.access_token?;
        let expires_at = decode_claims(&access_token).ok().and_then(|c| c.expires_at());

        Some(Session {
            user_id: state.user_id,
            access_token,
            expires_at,
        })
    }

    /// Password login. On a success envelope both tokens are stored and the
    /// session becomes active.
    pub async fn login(&self, request: &LoginRequest) -> Result<Session> {
        let tokens = self.inner.backend.login(request).await?.into_data()?;
        log::info!("Login succeeded for {}", request.user_id);
        self.login_with_tokens(&tokens.access.token, &tokens.refresh.token)
    }

    /// Kakao login. The backend issues a single JWT used as both tokens.
    pub async fn kakao_login(&self, kakao_access_token: &str) -> Result<Session> {
        let response = self.inner.backend.kakao_login(kakao_access_token).await?;
        self.login_with_tokens(&response.token, &response.token)
    }

    /// Store the token pair and mark the session active
    pub fn login_with_tokens(&self, access_token: &str, refresh_token: &str) -> Result<Session> {
        self.inner
            .store
            .save_tokens(access_token, refresh_token)
            .context("Failed to persist tokens")?;

        self.activate(access_token);
        self.current_session()
            .ok_or_else(|| anyhow::anyhow!("Session was not activated"))
    }

    fn activate(&self, access_token: &str) {
        let user_id = super::token::extract_user_id(access_token);
        write_state(
            &self.inner.state,
            AuthState {
                is_authenticated: true,
                access_token: Some(access_token.to_string()),
                user_id,
            },
        );
        self.start_watcher();
    }

    /// Clear tokens and state, then tell the backend on a best-effort basis.
    ///
    /// Local state is cleared before the request is awaited, so a login that
    /// lands while the request is pending is left untouched.
    pub async fn logout(&self) {
        self.stop_watcher();
        let user_id = self.state().user_id;

        if let Err(e) = self.inner.store.clear_tokens() {
            log::error!("Failed to clear stored tokens: {:#}", e);
        }
        write_state(&self.inner.state, AuthState::default());

        if let Some(user_id) = user_id {
            match self.inner.backend.logout(&user_id).await {
                Ok(response) if response.is_success() => log::info!("Backend logout succeeded"),
                Ok(response) => log::warn!("Backend logout rejected: {} ({})", response.message, response.code),
                Err(e) => log::error!("Backend logout failed: {}", e),
            }
        }
    }

    /// Restore the session from storage. Expired tokens are logged out.
    pub async fn check_auth_status(&self) -> bool {
        let token = match self.inner.store.access_token() {
            Ok(token) => token,
            Err(e) => {
                log::error!("Failed to read stored access token: {:#}", e);
                None
            }
        };

        let Some(token) = token else {
            write_state(&self.inner.state, AuthState::default());
            return false;
        };

        if !is_token_valid(&token, Utc::now()) {
            log::info!("Stored access token has expired");
            self.logout().await;
            return false;
        }

        self.activate(&token);
        true
    }

    /// Exchange the stored refresh token for a new access token
    pub async fn refresh(&self) -> Result<Session> {
        let refresh_token = self
            .inner
            .store
            .refresh_token()?
            .ok_or(ApiError::NotAuthenticated)?;

        let info = self.inner.backend.refresh(&refresh_token).await?.into_data()?;
        self.inner
            .store
            .set(ACCESS_TOKEN_KEY, &info.token)
            .context("Failed to persist refreshed access token")?;

        self.activate(&info.token);
        log::info!("Access token refreshed");
        self.current_session()
            .ok_or_else(|| anyhow::anyhow!("Session was not activated"))
    }

    /// Sign up; returns the backend's message
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, ApiError> {
        let response = self.inner.backend.register(request).await?.ensure_success()?;
        Ok(response.message)
    }

    pub async fn request_email_auth(&self, email: &str) -> Result<(), ApiError> {
        self.inner.backend.request_email_auth(email).await?.ensure_success()?;
        Ok(())
    }

    /// `data` of a success envelope, `false` otherwise
    pub async fn verify_email_auth(&self, email: &str, code: &str) -> Result<bool, ApiError> {
        let response = self.inner.backend.verify_email_auth(email, code).await?;
        Ok(response.is_success() && response.data.unwrap_or(false))
    }

    pub async fn user_info(&self) -> Result<UserInfo, ApiError> {
        let user_id = self.state().user_id.ok_or(ApiError::NotAuthenticated)?;
        self.inner.backend.user_info(&user_id).await
    }

    fn lock_watcher(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        match self.inner.watcher.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn stop_watcher(&self) {
        if let Some(token) = self.lock_watcher().take() {
            token.cancel();
        }
    }

    fn start_watcher(&self) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                log::warn!("No async runtime, token expiry will not be watched");
                return;
            }
        };

        let token = CancellationToken::new();
        if let Some(previous) = self.lock_watcher().replace(token.clone()) {
            previous.cancel();
        }

        let weak = Arc::downgrade(&self.inner);
        let period = self.inner.check_interval;
        handle.spawn(watch_expiry(weak, period, token));
    }
}

/// Log out once the stored access token has expired
async fn watch_expiry(weak: Weak<SessionInner>, period: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(period);
    // the first tick completes immediately
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let Some(inner) = weak.upgrade() else { break };
        let ctx = SessionContext { inner };

        let token = match ctx.inner.store.access_token() {
            Ok(token) => token,
            Err(e) => {
                log::warn!("Failed to read stored access token: {:#}", e);
                ctx.state().access_token
            }
        };
        let valid = token.map(|t| is_token_valid(&t, Utc::now())).unwrap_or(false);

        if !valid && !cancel.is_cancelled() {
            log::info!("Access token expired, logging out");
            ctx.logout().await;
            break;
        }
    }
    log::debug!("Token expiry watcher stopped");
}
