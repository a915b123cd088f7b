//! Decision policy types

use crate::grading::GradeProbabilities;
use crate::market::MarketStats;
use crate::roi::RoiResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recommended action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    /// Listing is cheap relative to the market
    Buy,
    /// Submit the card for grading
    Grade,
    /// Keep the card raw for now
    Hold,
    /// Sell raw
    Sell,
    /// Not enough evidence
    Pass,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Buy => "BUY",
            Decision::Grade => "GRADE",
            Decision::Hold => "HOLD",
            Decision::Sell => "SELL",
            Decision::Pass => "PASS",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk band of a market read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Risk {
    Low,
    Medium,
    High,
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Risk::Low => "Low",
            Risk::Medium => "Medium",
            Risk::High => "High",
        };
        f.write_str(s)
    }
}

/// Caller's appetite for risk
///
/// Carried through to the result and logs; the rule cascade treats every
/// tolerance the same way today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Standard,
    Aggressive,
}

/// Everything [`decide`](super::decide) needs besides the fee schedule
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionInput {
    pub market_p25: Decimal,
    pub market_median: Decimal,
    pub market_p75: Decimal,
    pub comps_count: usize,
    pub grade_probs: GradeProbabilities,
    /// Asking price of a listing under consideration
    pub listed_price: Option<Decimal>,
    pub risk_tolerance: RiskTolerance,
}

/// Final recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub decision: Decision,
    /// 0-100
    pub confidence: u8,
    pub risk: Risk,
    /// At most four lines, the matched rule's line first
    pub explanation: Vec<String>,
    pub market: MarketStats,
    pub grade_probabilities: GradeProbabilities,
    pub roi: RoiResult,
    pub risk_tolerance: RiskTolerance,
}
