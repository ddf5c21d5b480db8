use crate::api::{ApiError, ApiResponse, TourBackend};
use crate::models::{ContentRecord, ContentType, TypeDetail};

/// Unwrap a secondary record, logging and skipping it on any failure
fn secondary<T>(field: &str, content_id: &str, result: Result<ApiResponse<T>, ApiError>) -> Option<T> {
    match result {
        Ok(response) if response.is_success() => {
            if response.data.is_none() {
                log::warn!("{} for {} came back without data", field, content_id);
            }
            response.data
        }
        Ok(response) => {
            log::warn!(
                "Skipping {} for {}: {} ({})",
                field, content_id, response.message, response.code
            );
            None
        }
        Err(e) => {
            log::warn!("Skipping {} for {}: {}", field, content_id, e);
            None
        }
    }
}

/// Fetch a content record with its type-specific details merged in.
///
/// A non-success base response is `ApiError::NotFound`; secondary records
/// that fail are left out and the base record is still returned.
pub async fn get_detail_by_id(backend: &dyn TourBackend, content_id: &str) -> Result<ContentRecord, ApiError> {
    let base = backend.content(content_id).await?;
    if !base.is_success() {
        log::info!("Content {} not found: {} ({})", content_id, base.message, base.code);
        return Err(ApiError::NotFound(content_id.to_string()));
    }
    let mut record = base
        .data
        .ok_or_else(|| ApiError::NotFound(content_id.to_string()))?;
    record.clear_type_details();

    let detail = match record.content_type() {
        Some(ContentType::TourSpot) => {
            secondary("tourSpotInfo", content_id, backend.tour_spot(content_id).await)
                .map(TypeDetail::TourSpot)
        }
        Some(ContentType::CulturalFacility) => secondary(
            "culturalFacilityInfo",
            content_id,
            backend.cultural_facility(content_id).await,
        )
        .map(TypeDetail::CulturalFacility),
        Some(ContentType::Festival) => {
            secondary("festivalInfo", content_id, backend.festival(content_id).await)
                .map(TypeDetail::Festival)
        }
        Some(ContentType::TourCourse) => {
            let (info, items) = tokio::join!(backend.tour_course(content_id), backend.tour_items(content_id));
            Some(TypeDetail::TourCourse {
                info: secondary("tourCourseInfo", content_id, info),
                items: secondary("tourCourseItem", content_id, items),
            })
        }
        None => {
            log::debug!(
                "No type-specific details for {} (type {:?})",
                content_id, record.content_type_id
            );
            None
        }
    };

    if let Some(detail) = detail {
        record.attach(detail);
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::content::tests::{record, FakeTourBackend};

    fn backend_for(content_type_id: &str) -> FakeTourBackend {
        FakeTourBackend {
            base: Some(record("100", content_type_id, "기록")),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_spot_detail_merged() {
        let backend = backend_for("12");
        let detail = get_detail_by_id(&backend, "100").await.unwrap();
        assert!(detail.tour_spot_info.is_some());
        assert!(detail.festival_info.is_none());
        assert_eq!(backend.calls(), vec!["content", "tour_spot"]);
    }

    #[tokio::test]
    async fn test_each_type_fetches_its_own_record() {
        for (ty, endpoint) in [("14", "cultural_facility"), ("15", "festival")] {
            let backend = backend_for(ty);
            get_detail_by_id(&backend, "100").await.unwrap();
            assert_eq!(backend.calls(), vec!["content", endpoint]);
        }
    }

    #[tokio::test]
    async fn test_course_merges_both_records() {
        let backend = backend_for("25");
        let detail = get_detail_by_id(&backend, "100").await.unwrap();

        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("tourCourseInfo").is_some());
        assert_eq!(json["tourCourseItem"].as_array().unwrap().len(), 2);
        assert!(json.get("tourSpotInfo").is_none());
    }

    #[tokio::test]
    async fn test_course_keeps_the_successful_half() {
        let mut backend = backend_for("25");
        backend.rejecting.insert("tour_items");

        let detail = get_detail_by_id(&backend, "100").await.unwrap();
        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("tourCourseInfo").is_some());
        assert!(json.get("tourCourseItem").is_none());

        let mut backend = backend_for("25");
        backend.offline.insert("tour_course");
        let detail = get_detail_by_id(&backend, "100").await.unwrap();
        assert!(detail.tour_course_info.is_none());
        assert!(detail.tour_course_item.is_some());
    }

    #[tokio::test]
    async fn test_secondary_failure_keeps_base() {
        let mut backend = backend_for("15");
        backend.rejecting.insert("festival");
        let detail = get_detail_by_id(&backend, "100").await.unwrap();
        assert_eq!(detail.title, "기록");
        assert!(detail.festival_info.is_none());
    }

    #[tokio::test]
    async fn test_unknown_type_has_no_second_fetch() {
        let backend = backend_for("39");
        let detail = get_detail_by_id(&backend, "100").await.unwrap();
        assert_eq!(detail.content_id, "100");
        assert_eq!(backend.calls(), vec!["content"]);
    }

    #[tokio::test]
    async fn test_missing_base_is_not_found() {
        let backend = backend_for("12");
        let err = get_detail_by_id(&backend, "999").await.unwrap_err();
        assert_eq!(err, ApiError::NotFound("999".into()));
        assert_eq!(backend.calls(), vec!["content"]);
    }

    #[tokio::test]
    async fn test_base_transport_error_propagates() {
        let mut backend = backend_for("12");
        backend.offline.insert("content");
        let err = get_detail_by_id(&backend, "100").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
