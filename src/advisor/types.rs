//! Advisor request and response types

use crate::comps::{CardIdentity, MAX_QUERY_LEN};
use crate::decision::{Decision, DecisionResult, Risk, RiskTolerance};
use crate::error::{Result, ValuationError};
use crate::grading::{ConditionMetrics, GradeProbabilities};
use crate::market::MAX_MONEY;
use crate::roi::RoiResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A request for a recommendation on one card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRequest {
    /// Free-text card description
    pub query: String,
    /// Asking price when evaluating a listing
    #[serde(default)]
    pub listed_price: Option<Decimal>,
    pub metrics: ConditionMetrics,
    #[serde(default)]
    pub risk_tolerance: RiskTolerance,
}

impl DecisionRequest {
    pub fn new(query: impl Into<String>, metrics: ConditionMetrics) -> Self {
        Self {
            query: query.into(),
            listed_price: None,
            metrics,
            risk_tolerance: RiskTolerance::default(),
        }
    }

    pub fn with_listed_price(mut self, price: Decimal) -> Self {
        self.listed_price = Some(price);
        self
    }

    pub fn with_risk_tolerance(mut self, tolerance: RiskTolerance) -> Self {
        self.risk_tolerance = tolerance;
        self
    }

    /// Reject malformed requests before any work is done
    pub fn validate(&self) -> Result<()> {
        let len = self.query.trim().chars().count();
        if len == 0 || len > MAX_QUERY_LEN {
            return Err(ValuationError::invalid(format!(
                "query must be 1..={MAX_QUERY_LEN} characters, got {len}"
            )));
        }

        if let Some(price) = self.listed_price {
            if price <= Decimal::ZERO || price > MAX_MONEY {
                return Err(ValuationError::invalid(format!(
                    "listed_price must be in (0, {MAX_MONEY}], got {price}"
                )));
            }
            if price.normalize().scale() > 2 {
                return Err(ValuationError::invalid(format!(
                    "listed_price must have at most 2 decimal places, got {price}"
                )));
            }
        }

        self.metrics.validate()
    }
}

/// Raw market value band
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketValueOut {
    pub p25: Decimal,
    pub median: Decimal,
    pub p75: Decimal,
    pub currency: String,
}

/// Recommendation returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub card: CardIdentity,
    pub decision: Decision,
    pub confidence: u8,
    pub risk: Risk,
    pub comps_count: usize,
    pub market_value: MarketValueOut,
    pub grade_probabilities: GradeProbabilities,
    pub roi: RoiResult,
    pub explanation: Vec<String>,
}

impl DecisionResponse {
    pub fn from_result(card: CardIdentity, result: DecisionResult) -> Self {
        Self {
            card,
            decision: result.decision,
            confidence: result.confidence,
            risk: result.risk,
            comps_count: result.market.comps_count,
            market_value: MarketValueOut {
                p25: result.market.p25,
                median: result.market.median,
                p75: result.market.p75,
                currency: result.market.currency,
            },
            grade_probabilities: result.grade_probabilities,
            roi: result.roi,
            explanation: result.explanation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn metrics() -> ConditionMetrics {
        ConditionMetrics::new(9.0, 9.0, 9.0, 9.0, false).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let request = DecisionRequest::new("Charizard Base Set", metrics()).with_listed_price(dec!(45.50));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_query_length_bounds() {
        assert!(DecisionRequest::new("   ", metrics()).validate().is_err());
        let long = "x".repeat(MAX_QUERY_LEN + 1);
        assert!(DecisionRequest::new(long, metrics()).validate().is_err());
        let max = "x".repeat(MAX_QUERY_LEN);
        assert!(DecisionRequest::new(max, metrics()).validate().is_ok());
    }

    #[test]
    fn test_listed_price_rules() {
        let base = DecisionRequest::new("Pikachu Illustrator", metrics());
        assert!(base.clone().with_listed_price(dec!(0)).validate().is_err());
        assert!(base.clone().with_listed_price(dec!(-5)).validate().is_err());
        assert!(base.clone().with_listed_price(dec!(9.999)).validate().is_err());
        // trailing zeros are not extra precision
        assert!(base.clone().with_listed_price(dec!(9.500)).validate().is_ok());
        assert!(base.clone().with_listed_price(MAX_MONEY).validate().is_ok());
        assert!(base.with_listed_price(dec!(100000000)).validate().is_err());
    }

    #[test]
    fn test_metrics_out_of_range() {
        let mut request = DecisionRequest::new("Lugia Neo Genesis", metrics());
        request.metrics.surface = 11.0;
        assert!(matches!(
            request.validate(),
            Err(ValuationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_request_json_defaults() {
        let json = r#"{
            "query": "Mew Promo",
            "metrics": {"centering": 8.5, "corners": 9, "edges": 9, "surface": 8}
        }"#;
        let request: DecisionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.listed_price, None);
        assert!(!request.metrics.issue_flag);
        assert_eq!(request.risk_tolerance, RiskTolerance::Standard);
    }
}
