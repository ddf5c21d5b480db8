//! Open-data tour API client (`/areaCode2`, `/categoryCode2`)
//!
//! Response envelope:
//! `{response:{header:{resultCode,resultMsg}, body:{items:{item: T | T[]}}}}`.
//! A single result comes back as a bare object and no result may come back
//! with `items` missing or set to an empty string.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::CodeSource;
use crate::api::{ApiError, HttpClient};
use crate::config::OpenDataConfig;
use crate::models::CodeItem;

/// Header code the open-data API uses for success
const RESULT_OK: &str = "0000";

/// A JSON value that is either a single object or a list of them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenDataEnvelope {
    response: OpenDataResponse,
}

#[derive(Debug, Deserialize)]
struct OpenDataResponse {
    header: OpenDataHeader,
    #[serde(default)]
    body: Option<OpenDataBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OpenDataHeader {
    result_code: String,
    #[serde(default)]
    result_msg: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OpenDataBody {
    #[serde(default)]
    items: Option<ItemsField>,
    #[serde(default)]
    #[allow(dead_code)]
    total_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ItemsField {
    Items {
        #[serde(default)]
        item: Option<OneOrMany<CodeItem>>,
    },
    /// The API sends `"items": ""` when nothing matched
    Empty(String),
}

/// Extract the code list from a raw open-data response
pub(crate) fn normalize_code_response(raw: Value) -> Result<Vec<CodeItem>, ApiError> {
    let envelope: OpenDataEnvelope = serde_json::from_value(raw)?;
    let header = envelope.response.header;

    if header.result_code != RESULT_OK {
        return Err(ApiError::Envelope {
            code: header.result_code,
            message: header.result_msg,
        });
    }

    let items = match envelope.response.body.and_then(|body| body.items) {
        Some(ItemsField::Items { item: Some(item) }) => item.into(),
        _ => Vec::new(),
    };

    Ok(items)
}

/// [`CodeSource`] backed by the open-data tour API
pub struct OpenDataCodeSource {
    http: HttpClient,
    config: OpenDataConfig,
}

impl OpenDataCodeSource {
    pub fn new(config: OpenDataConfig, timeout_secs: u64) -> Result<Self, ApiError> {
        let http = HttpClient::new(&config.base_url, timeout_secs)?;
        Ok(Self { http, config })
    }

    fn base_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("serviceKey", self.config.service_key.clone()),
            ("numOfRows", self.config.rows_per_page.to_string()),
            ("pageNo", "1".to_string()),
            ("MobileOS", "ETC".to_string()),
            ("MobileApp", self.config.mobile_app.clone()),
            ("_type", "json".to_string()),
        ]
    }

    async fn fetch(&self, operation: &str, query: Vec<(&'static str, String)>) -> Result<Vec<CodeItem>, ApiError> {
        let raw: Value = self.http.get_raw(&[operation], &query).await?;
        normalize_code_response(raw).map_err(|e| {
            log::warn!("{} returned an unusable response: {}", operation, e);
            e
        })
    }
}

#[async_trait]
impl CodeSource for OpenDataCodeSource {
    async fn fetch_area_codes(&self, parent: Option<&str>) -> Result<Vec<CodeItem>, ApiError> {
        let mut query = self.base_query();
        if let Some(parent) = parent {
            query.push(("areaCode", parent.to_string()));
        }
        self.fetch("areaCode2", query).await
    }

    async fn fetch_category_codes(
        &self,
        content_type_id: &str,
        cat1: Option<&str>,
        cat2: Option<&str>,
    ) -> Result<Vec<CodeItem>, ApiError> {
        let mut query = self.base_query();
        query.push(("contentTypeId", content_type_id.to_string()));
        if let Some(cat1) = cat1.filter(|c| !c.is_empty()) {
            query.push(("cat1", cat1.to_string()));
        }
        if let Some(cat2) = cat2.filter(|c| !c.is_empty()) {
            query.push(("cat2", cat2.to_string()));
        }
        self.fetch("categoryCode2", query).await
    }
}
