//! Decision policy module
//!
//! Fuses market stats, grade odds and ROI into one recommendation with a
//! confidence score, a risk band and a short explanation trail.

mod policy;
mod types;

pub use policy::{
    clamp_confidence, comps_floor, decide, risk_band, Rule, RuleContext, RuleOutcome,
    MAX_EXPLANATION_LINES, RULES,
};
pub use types::{Decision, DecisionInput, DecisionResult, Risk, RiskTolerance};
