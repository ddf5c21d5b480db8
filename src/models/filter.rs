// Models - Search filter
use serde::{Deserialize, Serialize};

/// Query-string keys understood by `/search/filter`, in serialization order
pub const FILTER_QUERY_KEYS: [&str; 8] = [
    "contentTypeid",
    "cat1",
    "cat2",
    "cat3",
    "areacode",
    "lDongRegnCd",
    "lDongSigunguCd",
    "title",
];

/// Free-text key written by the main page search box; an alias for `title`
pub const KEYWORD_QUERY_KEY: &str = "keyword";

/// Filter conditions for a faceted search.
///
/// Values may hold the ALL sentinel or be empty; they are only dropped when
/// the request is serialized into a query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchFilterRequest {
    #[serde(rename = "contentTypeid", skip_serializing_if = "Option::is_none")]
    pub content_type_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat3: Option<String>,
    #[serde(rename = "areacode", alias = "areaCode", skip_serializing_if = "Option::is_none")]
    pub area_code: Option<String>,
    #[serde(rename = "lDongRegnCd", skip_serializing_if = "Option::is_none")]
    pub l_dong_regn_cd: Option<String>,
    #[serde(rename = "lDongSigunguCd", skip_serializing_if = "Option::is_none")]
    pub l_dong_sigungu_cd: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SearchFilterRequest {
    /// Look up a field by its query-string key
    pub fn field(&self, key: &str) -> Option<&str> {
        let value = match key {
            "contentTypeid" => &self.content_type_id,
            "cat1" => &self.cat1,
            "cat2" => &self.cat2,
            "cat3" => &self.cat3,
            "areacode" => &self.area_code,
            "lDongRegnCd" => &self.l_dong_regn_cd,
            "lDongSigunguCd" => &self.l_dong_sigungu_cd,
            "title" => &self.title,
            _ => return None,
        };
        value.as_deref()
    }

    /// Set a field by its query-string key. Returns false for unknown keys.
    pub fn set_field(&mut self, key: &str, value: Option<String>) -> bool {
        let slot = match key {
            "contentTypeid" => &mut self.content_type_id,
            "cat1" => &mut self.cat1,
            "cat2" => &mut self.cat2,
            "cat3" => &mut self.cat3,
            "areacode" => &mut self.area_code,
            "lDongRegnCd" => &mut self.l_dong_regn_cd,
            "lDongSigunguCd" => &mut self.l_dong_sigungu_cd,
            "title" => &mut self.title,
            _ => return false,
        };
        *slot = value;
        true
    }
}
