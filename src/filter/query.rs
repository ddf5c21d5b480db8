//! Query-string handling for the type-filter page

use url::form_urlencoded;

use crate::models::{is_unset, SearchFilterRequest, FILTER_QUERY_KEYS, KEYWORD_QUERY_KEY};

/// Ordered query parameters of a page location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `a=1&b=2`, `?a=1` or a full `/path?a=1` location
    pub fn parse(input: &str) -> Self {
        let query = match input.find('?') {
            Some(idx) => &input[idx + 1..],
            None if input.starts_with('/') => "",
            None => input,
        };
        let query = query.split('#').next().unwrap_or("");

        Self(form_urlencoded::parse(query.as_bytes()).into_owned().collect())
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish()
    }
}

/// Filter fields that carry a constraint, in canonical key order.
///
/// This is the one place where the ALL sentinel and empty strings become
/// absence: both the page URL and the backend request are built from it.
pub fn to_query_pairs(filter: &SearchFilterRequest) -> Vec<(&'static str, String)> {
    FILTER_QUERY_KEYS
        .iter()
        .filter_map(|&key| {
            let value = filter.field(key);
            if is_unset(value) {
                None
            } else {
                value.map(|v| (key, v.to_string()))
            }
        })
        .collect()
}

pub fn to_query_string(filter: &SearchFilterRequest) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(to_query_pairs(filter))
        .finish()
}

/// Backend filter read straight off the query string.
///
/// `None` when no recognized key carries a value, in which case the caller
/// must not issue an unfiltered search. `keyword` fills `title` when no
/// explicit title is present.
pub fn filter_from_query(params: &QueryParams) -> Option<SearchFilterRequest> {
    let mut filter = SearchFilterRequest::default();
    let mut recognized = false;

    for key in FILTER_QUERY_KEYS {
        if let Some(value) = params.get(key).filter(|v| !is_unset(Some(v))) {
            filter.set_field(key, Some(value.to_string()));
            recognized = true;
        }
    }

    if filter.title.is_none() {
        if let Some(keyword) = params.get(KEYWORD_QUERY_KEY).map(str::trim).filter(|k| !k.is_empty()) {
            filter.title = Some(keyword.to_string());
            recognized = true;
        }
    }

    recognized.then_some(filter)
}
