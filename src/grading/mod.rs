//! Grade probability model
//!
//! Estimates the chance of each PSA outcome from condition subscores

mod model;
mod types;

pub use model::grade_probabilities;
pub use types::{ConditionMetrics, Grade, GradeProbabilities, PROBABILITY_TOLERANCE};
