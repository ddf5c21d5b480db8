//! Gemini `generateContent` provider
//!
//! Each request carries a JSON response schema so the model answers with a
//! single `DayPlan` object as text in the first candidate.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::provider::ItineraryProvider;
use super::types::{DayPlan, PlanRequest, PlannerError};
use crate::config::PlannerConfig;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: String,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

fn build_prompt(request: &PlanRequest, day: u32) -> String {
    let interests = if request.interests.is_empty() {
        "특별히 없음".to_string()
    } else {
        request.interests.join(", ")
    };
    format!(
        "{dest}으로 떠나는 {days}일 여행 중 {day}일차 하루 동안의 여행 계획만 세워줘. \
         주요 관심사는 {interests}이야. 아침, 점심, 저녁 활동을 추천하고 간단한 설명을 포함해줘. \
         응답은 주어진 JSON 스키마에 맞춰 한국어로 작성해줘.",
        dest = request.destination.trim(),
        days = request.duration_days,
        day = day,
        interests = interests,
    )
}

fn day_schema(day: u32) -> Value {
    let activity = json!({
        "type": "OBJECT",
        "properties": { "activity": { "type": "STRING" }, "description": { "type": "STRING" } }
    });
    let meal = json!({
        "type": "OBJECT",
        "properties": { "recommendation": { "type": "STRING" }, "description": { "type": "STRING" } }
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "day": { "type": "NUMBER", "description": format!("여행 계획의 날짜. 반드시 {}로 설정해야 함", day) },
            "title": { "type": "STRING" },
            "morning": activity,
            "lunch": meal,
            "afternoon": activity,
            "dinner": meal,
        },
        "required": ["day", "title", "morning", "lunch", "dinner"]
    })
}

/// Pull the day plan out of a `generateContent` response
pub(crate) fn parse_generate_response(response: GenerateResponse, day: u32) -> Result<DayPlan, PlannerError> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.trim().is_empty());

    let Some(text) = text else {
        return Err(match response.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => PlannerError::Blocked { day, reason },
            None => PlannerError::EmptyResponse { day },
        });
    };

    let mut plan: DayPlan = serde_json::from_str(text.trim()).map_err(|e| PlannerError::InvalidPlan {
        day,
        message: e.to_string(),
    })?;

    if plan.day != day {
        log::debug!("Model numbered day {} as {}, correcting", day, plan.day);
        plan.day = day;
    }
    Ok(plan)
}

pub struct GeminiProvider {
    config: PlannerConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: PlannerConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl ItineraryProvider for GeminiProvider {
    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    async fn generate_day(&self, request: &PlanRequest, day: u32) -> Result<DayPlan, PlannerError> {
        if self.config.api_key.is_empty() {
            return Err(PlannerError::MissingApiKey);
        }

        let body = GenerateRequest {
            contents: vec![RequestContent {
                role: "user".to_string(),
                parts: vec![RequestPart { text: build_prompt(request, day) }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: day_schema(day),
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| PlannerError::RequestFailed { day, message: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            let message = status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_u16().to_string());
            return Err(PlannerError::RequestFailed { day, message });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| PlannerError::RequestFailed { day, message: format!("Invalid response: {}", e) })?;

        parse_generate_response(parsed, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(value: Value) -> GenerateResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_plan_text() {
        let plan_json = json!({
            "day": 2,
            "title": "바다와 시장",
            "morning": { "activity": "해동용궁사", "description": "일출" },
            "lunch": { "recommendation": "돼지국밥", "description": "서면" },
            "afternoon": { "activity": "감천문화마을", "description": "골목 산책" },
            "dinner": { "recommendation": "자갈치시장 회", "description": "" }
        });
        let raw = response(json!({
            "candidates": [{ "content": { "parts": [{ "text": plan_json.to_string() }] } }]
        }));

        let plan = parse_generate_response(raw, 2).unwrap();
        assert_eq!(plan.title, "바다와 시장");
        assert_eq!(plan.afternoon.unwrap().activity, "감천문화마을");
    }

    #[test]
    fn test_day_number_forced() {
        let text = r#"{"day":1,"title":"t","morning":{},"lunch":{},"dinner":{}}"#;
        let raw = response(json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] }));
        assert_eq!(parse_generate_response(raw, 3).unwrap().day, 3);
    }

    #[test]
    fn test_blocked_and_empty() {
        let blocked = response(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
        assert_eq!(
            parse_generate_response(blocked, 1),
            Err(PlannerError::Blocked { day: 1, reason: "SAFETY".into() })
        );

        let empty = response(json!({ "candidates": [] }));
        assert_eq!(parse_generate_response(empty, 4), Err(PlannerError::EmptyResponse { day: 4 }));
    }

    #[test]
    fn test_invalid_plan_text() {
        let raw = response(json!({ "candidates": [{ "content": { "parts": [{ "text": "{\"day\": 1" }] } }] }));
        assert!(matches!(parse_generate_response(raw, 1), Err(PlannerError::InvalidPlan { .. })));
    }

    #[test]
    fn test_request_shape() {
        let request = PlanRequest::new("제주", 3, vec!["관광지".into(), "축제".into()]);
        let prompt = build_prompt(&request, 2);
        assert!(prompt.contains("제주"));
        assert!(prompt.contains("2일차"));
        assert!(prompt.contains("관광지, 축제"));

        let schema = day_schema(2);
        assert_eq!(schema["required"].as_array().unwrap().len(), 5);
        assert!(schema["properties"]["afternoon"].is_object());

        let provider = GeminiProvider::new(PlannerConfig::default());
        assert!(provider.endpoint().ends_with("/models/gemini-1.5-flash-latest:generateContent"));
    }

    #[tokio::test]
    async fn test_missing_key_rejected_before_request() {
        let provider = GeminiProvider::new(PlannerConfig::default());
        let result = provider.generate_day(&PlanRequest::new("부산", 1, vec![]), 1).await;
        assert_eq!(result, Err(PlannerError::MissingApiKey));
    }
}
