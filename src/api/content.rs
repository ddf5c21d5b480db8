//! Tourism content backend
//!
//! Every call returns the backend envelope untouched so callers decide how a
//! non-success code is handled (the detail aggregator tolerates it for
//! secondary records, the search view turns it into a message).

use async_trait::async_trait;

use super::{ApiError, ApiResponse, HttpClient};
use crate::filter::query::to_query_pairs;
use crate::models::{
    ContentRecord, ContentType, CulturalFacilityInfo, FestivalInfo, SearchFilterRequest,
    TourCourseInfo, TourCourseItem, TourSpotInfo,
};

/// Content endpoints of the tourism backend
#[async_trait]
pub trait TourBackend: Send + Sync {
    /// `GET /search/filter` with ALL/empty fields stripped from the query string
    async fn search_filter(
        &self,
        filter: &SearchFilterRequest,
    ) -> Result<ApiResponse<Vec<ContentRecord>>, ApiError>;

    /// `GET /search/{id}`
    async fn content(&self, content_id: &str) -> Result<ApiResponse<ContentRecord>, ApiError>;

    /// `GET /tourspots/{id}`
    async fn tour_spot(&self, content_id: &str) -> Result<ApiResponse<TourSpotInfo>, ApiError>;

    /// `GET /culturalfacilities/{id}`
    async fn cultural_facility(
        &self,
        content_id: &str,
    ) -> Result<ApiResponse<CulturalFacilityInfo>, ApiError>;

    /// `GET /festivals/{id}`
    async fn festival(&self, content_id: &str) -> Result<ApiResponse<FestivalInfo>, ApiError>;

    /// `GET /tourcourses/{id}`
    async fn tour_course(&self, content_id: &str) -> Result<ApiResponse<TourCourseInfo>, ApiError>;

    /// `GET /touritems/{id}`
    async fn tour_items(&self, content_id: &str) -> Result<ApiResponse<Vec<TourCourseItem>>, ApiError>;

    /// `GET /search/random?contentTypeId=&limit=`
    async fn random(
        &self,
        content_type: ContentType,
        limit: u32,
    ) -> Result<ApiResponse<Vec<ContentRecord>>, ApiError>;
}

/// reqwest implementation of [`TourBackend`]
pub struct HttpTourBackend {
    http: HttpClient,
}

impl HttpTourBackend {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl TourBackend for HttpTourBackend {
    async fn search_filter(
        &self,
        filter: &SearchFilterRequest,
    ) -> Result<ApiResponse<Vec<ContentRecord>>, ApiError> {
        let query = to_query_pairs(filter);
        self.http.get(&["search", "filter"], &query).await
    }

    async fn content(&self, content_id: &str) -> Result<ApiResponse<ContentRecord>, ApiError> {
        self.http.get(&["search", content_id], &[]).await
    }

    async fn tour_spot(&self, content_id: &str) -> Result<ApiResponse<TourSpotInfo>, ApiError> {
        self.http.get(&["tourspots", content_id], &[]).await
    }

    async fn cultural_facility(
        &self,
        content_id: &str,
    ) -> Result<ApiResponse<CulturalFacilityInfo>, ApiError> {
        self.http.get(&["culturalfacilities", content_id], &[]).await
    }

    async fn festival(&self, content_id: &str) -> Result<ApiResponse<FestivalInfo>, ApiError> {
        self.http.get(&["festivals", content_id], &[]).await
    }

    async fn tour_course(&self, content_id: &str) -> Result<ApiResponse<TourCourseInfo>, ApiError> {
        self.http.get(&["tourcourses", content_id], &[]).await
    }

    async fn tour_items(&self, content_id: &str) -> Result<ApiResponse<Vec<TourCourseItem>>, ApiError> {
        let envelope: ApiResponse<crate::codes::OneOrMany<TourCourseItem>> =
            self.http.get(&["touritems", content_id], &[]).await?;
        Ok(envelope.map(Vec::from))
    }

    async fn random(
        &self,
        content_type: ContentType,
        limit: u32,
    ) -> Result<ApiResponse<Vec<ContentRecord>>, ApiError> {
        let query = [
            ("contentTypeId", content_type.code().to_string()),
            ("limit", limit.to_string()),
        ];
        self.http.get(&["search", "random"], &query).await
    }
}
