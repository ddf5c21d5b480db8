use std::sync::Arc;

use super::provider::ItineraryProvider;
use super::types::{DayPlan, PlanRequest, PlannerError};

/// Builds a multi-day itinerary from per-day generations
#[derive(Clone)]
pub struct Planner {
    provider: Arc<dyn ItineraryProvider>,
}

impl Planner {
    pub fn new(provider: Arc<dyn ItineraryProvider>) -> Self {
        Self { provider }
    }

    /// Generate every day in order. The first failing day aborts the plan.
    pub async fn generate(&self, request: &PlanRequest) -> Result<Vec<DayPlan>, PlannerError> {
        request.validate()?;
        log::info!(
            "Generating {}-day plan for {} with {}",
            request.duration_days,
            request.destination,
            self.provider.provider_name()
        );

        let mut days = Vec::with_capacity(request.duration_days as usize);
        for day in 1..=request.duration_days {
            match self.provider.generate_day(request, day).await {
                Ok(plan) => days.push(plan),
                Err(e) => {
                    log::error!("Plan generation failed on day {}: {}", day, e);
                    return Err(e);
                }
            }
        }
        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::types::{Activity, Meal};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct ScriptedProvider {
        fail_on: Option<u32>,
        requested: Mutex<Vec<u32>>,
    }

    #[async_trait]
    impl ItineraryProvider for ScriptedProvider {
        fn provider_name(&self) -> &'static str {
            "scripted"
        }

        async fn generate_day(&self, request: &PlanRequest, day: u32) -> Result<DayPlan, PlannerError> {
            self.requested.lock().unwrap().push(day);
            if self.fail_on == Some(day) {
                return Err(PlannerError::EmptyResponse { day });
            }
            Ok(DayPlan {
                day,
                title: format!("{} {}일차", request.destination, day),
                morning: Activity::default(),
                lunch: Meal::default(),
                afternoon: None,
                dinner: Meal::default(),
            })
        }
    }

    #[tokio::test]
    async fn test_days_generated_in_order() {
        let provider = Arc::new(ScriptedProvider::default());
        let planner = Planner::new(provider.clone());

        let plan = planner.generate(&PlanRequest::new("강릉", 3, vec![])).await.unwrap();
        assert_eq!(plan.iter().map(|d| d.day).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(plan[1].title, "강릉 2일차");
        assert_eq!(*provider.requested.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_days() {
        let provider = Arc::new(ScriptedProvider { fail_on: Some(2), ..Default::default() });
        let planner = Planner::new(provider.clone());

        let err = planner.generate(&PlanRequest::new("강릉", 5, vec![])).await.unwrap_err();
        assert_eq!(err, PlannerError::EmptyResponse { day: 2 });
        assert_eq!(*provider.requested.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_empty_destination_sends_nothing() {
        let provider = Arc::new(ScriptedProvider::default());
        let planner = Planner::new(provider.clone());

        assert!(planner.generate(&PlanRequest::new("", 2, vec![])).await.is_err());
        assert!(provider.requested.lock().unwrap().is_empty());
    }
}
