//! AI itinerary planner
//!
//! A plan is generated one day at a time: each day is a separate request to
//! the generation backend, issued sequentially, and the whole plan fails if
//! any day fails.

pub mod types;
pub mod provider;
pub mod gemini;
pub mod itinerary;

pub use types::{Activity, DayPlan, Meal, PlanRequest, PlannerError, AVAILABLE_INTERESTS, MAX_DURATION_DAYS};
pub use provider::ItineraryProvider;
pub use gemini::GeminiProvider;
pub use itinerary::Planner;
