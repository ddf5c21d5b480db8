//! Account backend

use async_trait::async_trait;

use super::{ApiError, ApiResponse, HttpClient};
use crate::models::{
    EmailAuthRequest, EmailVerifyRequest, KakaoLoginRequest, KakaoLoginResponse, LoginRequest,
    LoginResponse, RefreshRequest, RegisterRequest, TokenInfo, UserInfo,
};

/// Auth endpoints of the account backend
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse<String>, ApiError>;

    async fn login(&self, request: &LoginRequest) -> Result<ApiResponse<LoginResponse>, ApiError>;

    /// Exchange a refresh token for a new access token
    async fn refresh(&self, refresh_token: &str) -> Result<ApiResponse<TokenInfo>, ApiError>;

    /// Server-side session invalidation (form-encoded `userId`)
    async fn logout(&self, user_id: &str) -> Result<ApiResponse<String>, ApiError>;

    /// Ask the backend to mail a verification code
    async fn request_email_auth(&self, email: &str) -> Result<ApiResponse<serde_json::Value>, ApiError>;

    /// Check a mailed verification code
    async fn verify_email_auth(&self, email: &str, code: &str) -> Result<ApiResponse<bool>, ApiError>;

    /// Exchange a Kakao access token for a backend JWT
    async fn kakao_login(&self, kakao_access_token: &str) -> Result<KakaoLoginResponse, ApiError>;

    async fn user_info(&self, user_id: &str) -> Result<UserInfo, ApiError>;
}

/// reqwest implementation of [`AuthBackend`]
pub struct HttpAuthBackend {
    http: HttpClient,
}

impl HttpAuthBackend {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse<String>, ApiError> {
        self.http.post_json(&["auth", "register"], request).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<ApiResponse<LoginResponse>, ApiError> {
        self.http.post_json(&["auth", "login"], request).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<ApiResponse<TokenInfo>, ApiError> {
        let body = RefreshRequest {
            token: refresh_token.to_string(),
        };
        self.http.post_json(&["auth", "refresh"], &body).await
    }

    async fn logout(&self, user_id: &str) -> Result<ApiResponse<String>, ApiError> {
        self.http.post_form(&["auth", "logout"], &[("userId", user_id)]).await
    }

    async fn request_email_auth(&self, email: &str) -> Result<ApiResponse<serde_json::Value>, ApiError> {
        let body = EmailAuthRequest {
            email: email.to_string(),
        };
        self.http.post_json(&["auth", "email"], &body).await
    }

    async fn verify_email_auth(&self, email: &str, code: &str) -> Result<ApiResponse<bool>, ApiError> {
        let body = EmailVerifyRequest {
            email: email.to_string(),
            code: code.to_string(),
        };
        self.http.post_json(&["auth", "email", "verify"], &body).await
    }

    async fn kakao_login(&self, kakao_access_token: &str) -> Result<KakaoLoginResponse, ApiError> {
        let body = KakaoLoginRequest {
            access_token: kakao_access_token.to_string(),
        };
        self.http.post_json_raw(&["auth", "kakao"], &body).await
    }

    async fn user_info(&self, user_id: &str) -> Result<UserInfo, ApiError> {
        self.http
            .get_raw(&["auth", "user", "info"], &[("userId", user_id.to_string())])
            .await
    }
}
