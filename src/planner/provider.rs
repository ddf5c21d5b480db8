use async_trait::async_trait;

use super::types::{DayPlan, PlanRequest, PlannerError};

/// Generates a single day of an itinerary
#[async_trait]
pub trait ItineraryProvider: Send + Sync {
    /// Short provider name for logs
    fn provider_name(&self) -> &'static str;

    /// Plan day `day` (1-based) of `request`
    async fn generate_day(&self, request: &PlanRequest, day: u32) -> Result<DayPlan, PlannerError>;
}
