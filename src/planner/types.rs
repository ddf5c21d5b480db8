//! Planner types and errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest trip a plan can be generated for
pub const MAX_DURATION_DAYS: u32 = 7;

/// Interest tags offered by the planner form
pub const AVAILABLE_INTERESTS: [&str; 4] = ["관광지", "문화시설", "축제", "행사"];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("AI API key is not configured")]
    MissingApiKey,
    #[error("API 요청 실패 (Day {day}): {message}")]
    RequestFailed { day: u32, message: String },
    #[error("Day {day} 계획 생성 실패: 차단됨({reason})")]
    Blocked { day: u32, reason: String },
    #[error("Day {day} 계획 생성 실패: 유효한 콘텐츠 없음")]
    EmptyResponse { day: u32 },
    #[error("Day {day} 계획을 해석할 수 없습니다: {message}")]
    InvalidPlan { day: u32, message: String },
}

/// What the traveller asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub destination: String,
    pub duration_days: u32,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl PlanRequest {
    pub fn new(destination: impl Into<String>, duration_days: u32, interests: Vec<String>) -> Self {
        Self {
            destination: destination.into(),
            duration_days,
            interests,
        }
    }

    /// Reject requests that must not reach the generation backend
    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.destination.trim().is_empty() {
            return Err(PlannerError::InvalidRequest("목적지를 입력해주세요.".to_string()));
        }
        if !(1..=MAX_DURATION_DAYS).contains(&self.duration_days) {
            return Err(PlannerError::InvalidRequest(format!(
                "여행 기간은 1일에서 {}일 사이여야 합니다.",
                MAX_DURATION_DAYS
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Activity {
    pub activity: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meal {
    pub recommendation: String,
    pub description: String,
}

/// One day of a generated itinerary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub day: u32,
    pub title: String,
    pub morning: Activity,
    pub lunch: Meal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub afternoon: Option<Activity>,
    pub dinner: Meal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(PlanRequest::new("부산", 3, vec![]).validate().is_ok());
        assert!(matches!(
            PlanRequest::new("  ", 3, vec![]).validate(),
            Err(PlannerError::InvalidRequest(_))
        ));
        assert!(PlanRequest::new("부산", 0, vec![]).validate().is_err());
        assert!(PlanRequest::new("부산", 8, vec![]).validate().is_err());
    }

    #[test]
    fn test_day_plan_without_afternoon() {
        let plan: DayPlan = serde_json::from_str(
            r#"{"day":1,"title":"도착","morning":{"activity":"해운대","description":"산책"},
                "lunch":{"recommendation":"밀면","description":""},
                "dinner":{"recommendation":"회","description":"광안리"}}"#,
        )
        .unwrap();
        assert_eq!(plan.afternoon, None);
        assert_eq!(plan.lunch.recommendation, "밀면");
    }
}
