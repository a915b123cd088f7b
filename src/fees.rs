//! Fee schedule and decision thresholds
//!
//! Loaded once from JSON with the layout
//! `grading.{grading_fee,shipping_insurance}`, `platform.platform_fee_pct`,
//! `risk.risk_discount_pct`, `grade_multipliers.<GRADE>`,
//! `decision_thresholds.<name>`.

use crate::error::ValuationError;
use crate::grading::{Grade, GradeProbabilities};
use crate::market::MAX_MONEY;
use crate::roi::{self, GradeMultipliers, RoiResult};
use anyhow::Context;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted grade multiplier
pub const MAX_GRADE_MULTIPLIER: Decimal = Decimal::ONE_HUNDRED;

/// Root fee schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub grading: GradingFees,
    pub platform: PlatformFees,
    pub risk: RiskAdjustment,
    pub grade_multipliers: GradeMultipliers,
    pub decision_thresholds: DecisionThresholds,
}

/// Flat costs of one grading submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingFees {
    pub grading_fee: Decimal,
    pub shipping_insurance: Decimal,
}

/// Marketplace selling fee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformFees {
    /// Fraction of the sale price, e.g. 0.1325
    pub platform_fee_pct: Decimal,
}

/// Haircut for sale-price uncertainty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAdjustment {
    pub risk_discount_pct: Decimal,
}

/// Knobs of the decision policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionThresholds {
    /// Comps needed for a Low risk band
    pub min_comps_count: usize,
    /// Widest spread ratio still considered Low risk
    pub max_price_spread_ratio_for_low_risk: f64,
    /// Discount to p25 a listing needs for BUY
    pub buy_undervalue_margin: Decimal,
    /// Expected net needed for GRADE
    pub min_expected_net_profit: Decimal,
    /// P(PSA10) + P(PSA9) needed for GRADE
    pub min_psa9_plus_prob: f64,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            min_comps_count: 5,
            max_price_spread_ratio_for_low_risk: 0.35,
            buy_undervalue_margin: dec!(0.15),
            min_expected_net_profit: dec!(40),
            min_psa9_plus_prob: 0.70,
        }
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            grading: GradingFees {
                grading_fee: dec!(19),
                shipping_insurance: dec!(18),
            },
            platform: PlatformFees {
                platform_fee_pct: dec!(0.1325),
            },
            risk: RiskAdjustment {
                risk_discount_pct: dec!(0.05),
            },
            grade_multipliers: [
                (Grade::Psa10, dec!(2.0)),
                (Grade::Psa9, dec!(1.35)),
                (Grade::Psa8, dec!(1.1)),
                (Grade::Psa7, dec!(0.95)),
                (Grade::Lt7, dec!(0.8)),
            ]
            .into_iter()
            .collect(),
            decision_thresholds: DecisionThresholds::default(),
        }
    }
}

impl FeeSchedule {
    /// Load and validate a fee schedule from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading fee schedule {}", path.display()))?;
        let schedule = Self::from_json(&content)?;
        Ok(schedule)
    }

    /// Parse and validate a fee schedule from JSON text
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let schedule: FeeSchedule = serde_json::from_str(json)?;
        schedule.validate()?;
        Ok(schedule)
    }

    /// Check money is non-negative and percentages are fractions in [0,1)
    pub fn validate(&self) -> Result<(), ValuationError> {
        let invalid = |msg: String| Err(ValuationError::InvalidFeeSchedule(msg));

        for (name, fee) in [
            ("grading_fee", self.grading.grading_fee),
            ("shipping_insurance", self.grading.shipping_insurance),
        ] {
            if fee < Decimal::ZERO || fee > MAX_MONEY {
                return invalid(format!("{name} must be in [0, {MAX_MONEY}], got {fee}"));
            }
        }

        for (name, pct) in [
            ("platform_fee_pct", self.platform.platform_fee_pct),
            ("risk_discount_pct", self.risk.risk_discount_pct),
            (
                "buy_undervalue_margin",
                self.decision_thresholds.buy_undervalue_margin,
            ),
        ] {
            if pct < Decimal::ZERO || pct >= Decimal::ONE {
                return invalid(format!("{name} must be in [0,1), got {pct}"));
            }
        }

        if let Some((grade, m)) = self
            .grade_multipliers
            .iter()
            .find(|(_, m)| **m < Decimal::ZERO || **m > MAX_GRADE_MULTIPLIER)
        {
            return invalid(format!(
                "multiplier for {grade} must be in [0, {MAX_GRADE_MULTIPLIER}], got {m}"
            ));
        }

        let t = &self.decision_thresholds;
        if !t.max_price_spread_ratio_for_low_risk.is_finite()
            || t.max_price_spread_ratio_for_low_risk < 0.0
        {
            return invalid(format!(
                "max_price_spread_ratio_for_low_risk must be non-negative, got {}",
                t.max_price_spread_ratio_for_low_risk
            ));
        }
        if !(0.0..=1.0).contains(&t.min_psa9_plus_prob) {
            return invalid(format!(
                "min_psa9_plus_prob must be in [0,1], got {}",
                t.min_psa9_plus_prob
            ));
        }

        Ok(())
    }

    /// Total out-of-pocket cost of one submission
    pub fn submission_cost(&self) -> Decimal {
        self.grading.grading_fee + self.grading.shipping_insurance
    }

    /// [`roi::roi_summary`] with this schedule's fees and multipliers
    pub fn roi_summary(&self, median: Decimal, probs: &GradeProbabilities) -> RoiResult {
        roi::roi_summary(
            median,
            probs,
            &self.grade_multipliers,
            self.grading.grading_fee,
            self.grading.shipping_insurance,
            self.platform.platform_fee_pct,
            self.risk.risk_discount_pct,
        )
    }
}
