// Models - Accounts and tokens
use serde::{Deserialize, Serialize};

/// Sign-up payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub user_id: String,
    pub user_pwd: String,
    pub user_name: String,
    pub user_email: String,
    pub phone: String,
}

/// Credential pair for password login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
}

/// A token and its lifetime in seconds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub token: String,
    #[serde(default)]
    pub expires_in: i64,
}

/// Token pair issued on login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub access: TokenInfo,
    pub refresh: TokenInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailAuthRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailVerifyRequest {
    pub email: String,
    pub code: String,
}

/// Kakao OAuth access token handed to the backend for exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KakaoLoginRequest {
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KakaoLoginResponse {
    pub token: String,
}

/// Public profile of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: String,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}
