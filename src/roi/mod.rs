//! ROI calculator module
//!
//! Prices a grading submission from the grade distribution and fee schedule

mod calculator;

pub use calculator::{expected_value, roi_summary};

use crate::grading::Grade;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grade -> multiplier applied to the raw market median
pub type GradeMultipliers = BTreeMap<Grade, Decimal>;

/// Outcome of [`roi_summary`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    /// Probability-weighted profit after every fee, in cents
    pub expected_net: Decimal,
    /// Expected net relative to grading + shipping cost, in percent
    pub roi_pct: f64,
    /// Best grade, scanning from PSA10 down, whose sale covers the fees
    pub breakeven_grade: Grade,
}
