//! Code source trait and the never-failing provider wrapper

use async_trait::async_trait;
use std::sync::Arc;

use crate::api::ApiError;
use crate::models::CodeItem;

/// A backend that can list region and category codes
#[async_trait]
pub trait CodeSource: Send + Sync {
    /// Top-level regions when `parent` is `None`, otherwise the sub-regions of `parent`
    async fn fetch_area_codes(&self, parent: Option<&str>) -> Result<Vec<CodeItem>, ApiError>;

    /// Category codes for a content type, narrowed by the parent tiers that are set
    async fn fetch_category_codes(
        &self,
        content_type_id: &str,
        cat1: Option<&str>,
        cat2: Option<&str>,
    ) -> Result<Vec<CodeItem>, ApiError>;
}

/// Wraps a [`CodeSource`] so that lookups always produce a list
#[derive(Clone)]
pub struct CodeProvider {
    source: Arc<dyn CodeSource>,
}

impl CodeProvider {
    pub fn new(source: Arc<dyn CodeSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> Arc<dyn CodeSource> {
        self.source.clone()
    }

    /// Region codes; with `include_all` the ALL sentinel is placed first
    pub async fn area_codes(&self, parent: Option<&str>, include_all: bool) -> Vec<CodeItem> {
        let mut codes = match self.source.fetch_area_codes(parent).await {
            Ok(codes) => codes,
            Err(e) => {
                log::error!("Failed to load area codes (parent {:?}): {}", parent, e);
                Vec::new()
            }
        };

        if include_all {
            codes.insert(0, CodeItem::all());
        }
        codes
    }

    /// Category codes; callers add the ALL option themselves
    pub async fn category_codes(
        &self,
        content_type_id: &str,
        cat1: Option<&str>,
        cat2: Option<&str>,
    ) -> Vec<CodeItem> {
        match self.source.fetch_category_codes(content_type_id, cat1, cat2).await {
            Ok(codes) => codes,
            Err(e) => {
                log::error!(
                    "Failed to load category codes (type {}, cat1 {:?}, cat2 {:?}): {}",
                    content_type_id, cat1, cat2, e
                );
                Vec::new()
            }
        }
    }
}
