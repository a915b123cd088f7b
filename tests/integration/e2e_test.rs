//! End-to-end tests of the decision path

use card_king::config::Config;
use card_king::decision::{decide, Decision, DecisionInput, Risk, RiskTolerance};
use card_king::fees::FeeSchedule;
use card_king::grading::{grade_probabilities, Grade, GradeProbabilities};
use card_king::market::compute_market_stats;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn scenario_probs() -> GradeProbabilities {
    GradeProbabilities::from_pairs([
        (Grade::Psa10, 0.25),
        (Grade::Psa9, 0.5),
        (Grade::Psa8, 0.15),
        (Grade::Psa7, 0.07),
        (Grade::Lt7, 0.03),
    ])
    .unwrap()
}

fn scenario_input() -> DecisionInput {
    DecisionInput {
        market_p25: dec!(90),
        market_median: dec!(110),
        market_p75: dec!(130),
        comps_count: 10,
        grade_probs: scenario_probs(),
        listed_price: None,
        risk_tolerance: RiskTolerance::Standard,
    }
}

#[test]
fn test_grade_scenario_end_to_end() {
    let result = decide(&scenario_input(), &FeeSchedule::default());

    assert_eq!(result.decision, Decision::Grade);
    assert_eq!(result.confidence, 68);
    assert_eq!(result.risk, Risk::Medium);
    assert_eq!(result.market.confidence, 64);
    assert!((result.market.spread_ratio - 0.3636).abs() < 1e-4);
    assert_eq!(result.roi.expected_net, dec!(91.64));
    assert!((result.roi.roi_pct - 247.67).abs() < 0.01);
    assert_eq!(result.roi.breakeven_grade, Grade::Psa10);
    assert_eq!(
        result.explanation,
        vec![
            "High upside after grading fees with strong PSA 9+ odds.".to_string(),
            "Comps: 10 recent sales; market confidence 64/100.".to_string(),
            "Market range: $90.00–$130.00 (median $110.00).".to_string(),
            "PSA 9+ probability: 75%.".to_string(),
        ]
    );
}

#[test]
fn test_same_input_same_output() {
    let fees = FeeSchedule::default();
    let first = decide(&scenario_input(), &fees);
    for _ in 0..10 {
        assert_eq!(decide(&scenario_input(), &fees), first);
    }
}

#[test]
fn test_risk_tolerance_is_carried_not_applied() {
    let fees = FeeSchedule::default();
    let mut conservative = scenario_input();
    conservative.risk_tolerance = RiskTolerance::Conservative;

    let a = decide(&scenario_input(), &fees);
    let b = decide(&conservative, &fees);
    assert_eq!(a.decision, b.decision);
    assert_eq!(a.confidence, b.confidence);
    assert_eq!(b.risk_tolerance, RiskTolerance::Conservative);
}

#[test]
fn test_comps_to_decision_pipeline() {
    let prices: Vec<Decimal> = [80, 85, 90, 95, 100, 110, 115, 120, 130, 140]
        .iter()
        .map(|p| Decimal::from(*p))
        .collect();
    let stats = compute_market_stats(&prices).unwrap();
    let probs = grade_probabilities(9.5, 9.5, 9.5, 9.5, false).unwrap();

    let input = DecisionInput {
        market_p25: stats.p25,
        market_median: stats.median,
        market_p75: stats.p75,
        comps_count: stats.comps_count,
        grade_probs: probs.clone(),
        listed_price: None,
        risk_tolerance: RiskTolerance::default(),
    };
    let result = decide(&input, &FeeSchedule::default());

    assert_eq!(result.market, stats);
    assert_eq!(result.grade_probabilities, probs);
    assert!(result.confidence <= 100);
    assert!(!result.explanation.is_empty() && result.explanation.len() <= 4);
}

#[test]
fn test_thin_comps_always_pass() {
    let fees = FeeSchedule::default();
    for comps in 0..3 {
        let mut input = scenario_input();
        input.comps_count = comps;
        input.listed_price = Some(dec!(1));
        let result = decide(&input, &fees);
        assert_eq!(result.decision, Decision::Pass);
        assert_eq!(result.risk, Risk::High);
    }
}

#[test]
fn test_custom_fee_schedule_changes_outcome() {
    let mut fees = FeeSchedule::default();
    fees.decision_thresholds.min_psa9_plus_prob = 0.9;
    let result = decide(&scenario_input(), &fees);
    assert_ne!(result.decision, Decision::Grade);
}

#[test]
fn test_config_example_loads() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.comps.sample_size, 10);
    assert_eq!(config.comps.lookback_days, 45);
}

#[test]
fn test_bundled_fee_schedule_matches_default() {
    let fees = FeeSchedule::from_json(include_str!("../../data/fees_default.json")).unwrap();
    assert_eq!(fees, FeeSchedule::default());
}
