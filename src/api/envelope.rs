//! Backend response envelope

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApiError;

/// Codes the backend uses to signal success. Call sites disagree on which one
/// is canonical, so both are accepted here and nowhere else.
pub const SUCCESS_CODES: [&str; 2] = ["OK", "SUCCESS"];

/// The `{code, message, data}` wrapper every backend response uses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(code: impl Into<String>, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data,
        }
    }

    /// Successful envelope carrying `data`
    pub fn ok(data: T) -> Self {
        Self::new("OK", "", Some(data))
    }

    /// Envelope substituted for an empty response body
    pub fn empty_ok() -> Self {
        Self::new("OK", "요청이 성공하였습니다.", None)
    }

    pub fn is_success(&self) -> bool {
        SUCCESS_CODES.contains(&self.code.as_str())
    }

    /// Fail with `ApiError::Envelope` unless the code is a success code
    pub fn ensure_success(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Envelope {
                code: self.code,
                message: self.message,
            })
        }
    }

    /// Success data, treating a missing `data` as malformed
    pub fn into_data(self) -> Result<T, ApiError> {
        let code = self.code.clone();
        self.ensure_success()?
            .data
            .ok_or_else(|| ApiError::Malformed(format!("response {} carried no data", code)))
    }

    pub fn map<U, F>(self, f: F) -> ApiResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiResponse {
            code: self.code,
            message: self.message,
            data: self.data.map(f),
        }
    }
}

impl ApiResponse<Value> {
    /// Decode the untyped `data` into `T`; `null` becomes `None`
    pub fn decode<T: DeserializeOwned>(self) -> Result<ApiResponse<T>, ApiError> {
        let data = match self.data {
            None | Some(Value::Null) => None,
            Some(value) => Some(serde_json::from_value(value)?),
        };
        Ok(ApiResponse {
            code: self.code,
            message: self.message,
            data,
        })
    }
}
