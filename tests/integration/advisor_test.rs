//! Advisor service tests

use async_trait::async_trait;
use card_king::advisor::{Advisor, DecisionRequest};
use card_king::comps::{identify, CardIdentity, CompsProvider, CompsSnapshot, StubCompsProvider};
use card_king::config::Config;
use card_king::data::DecisionLog;
use card_king::decision::{decide, Decision, DecisionInput, RiskTolerance};
use card_king::fees::FeeSchedule;
use card_king::grading::ConditionMetrics;
use card_king::market::MarketStats;
use card_king::ValuationError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Provider that returns the same market for every card
struct FixedMarket {
    stats: MarketStats,
}

impl FixedMarket {
    fn new(p25: Decimal, median: Decimal, p75: Decimal, count: usize) -> Self {
        Self {
            stats: MarketStats::from_quantiles(p25, median, p75, count),
        }
    }
}

#[async_trait]
impl CompsProvider for FixedMarket {
    async fn recent_sold_comps(&self, _identity: &CardIdentity) -> anyhow::Result<CompsSnapshot> {
        Ok(CompsSnapshot {
            comps: vec![],
            stats: self.stats.clone(),
        })
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Provider whose upstream is down
struct Unavailable;

#[async_trait]
impl CompsProvider for Unavailable {
    async fn recent_sold_comps(&self, _identity: &CardIdentity) -> anyhow::Result<CompsSnapshot> {
        anyhow::bail!("comps source unavailable")
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}

fn gem_metrics() -> ConditionMetrics {
    ConditionMetrics::new(9.5, 9.5, 9.5, 9.5, false).unwrap()
}

#[tokio::test]
async fn test_response_matches_policy() {
    let advisor = Advisor::new(
        FeeSchedule::default(),
        FixedMarket::new(dec!(90), dec!(110), dec!(130), 10),
    );
    let request = DecisionRequest::new("Charizard Base Set Holo", gem_metrics());
    let response = advisor.decide(&request).await.unwrap();

    let input = DecisionInput {
        market_p25: dec!(90),
        market_median: dec!(110),
        market_p75: dec!(130),
        comps_count: 10,
        grade_probs: gem_metrics().grade_probabilities().unwrap(),
        listed_price: None,
        risk_tolerance: RiskTolerance::Standard,
    };
    let expected = decide(&input, &FeeSchedule::default());

    assert_eq!(response.decision, expected.decision);
    assert_eq!(response.confidence, expected.confidence);
    assert_eq!(response.risk, expected.risk);
    assert_eq!(response.roi, expected.roi);
    assert_eq!(response.explanation, expected.explanation);
    assert_eq!(response.market_value.median, dec!(110.00));
    assert_eq!(response.market_value.currency, "USD");
    assert_eq!(response.comps_count, 10);
    assert_eq!(response.card, identify("Charizard Base Set Holo").unwrap());
}

#[tokio::test]
async fn test_cheap_listing_is_a_buy() {
    let advisor = Advisor::new(
        FeeSchedule::default(),
        FixedMarket::new(dec!(100), dec!(120), dec!(140), 10),
    );
    let request =
        DecisionRequest::new("Lugia Neo Genesis", gem_metrics()).with_listed_price(dec!(75));
    let response = advisor.decide(&request).await.unwrap();
    assert_eq!(response.decision, Decision::Buy);
}

#[tokio::test]
async fn test_invalid_request_rejected() {
    let advisor = Advisor::new(FeeSchedule::default(), StubCompsProvider::default());
    let request = DecisionRequest::new("Mew", gem_metrics()).with_listed_price(dec!(10.005));

    let err = advisor.decide(&request).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ValuationError>(),
        Some(ValuationError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn test_provider_failure_propagates() {
    let advisor = Advisor::new(FeeSchedule::default(), Unavailable);
    let request = DecisionRequest::new("Mew", gem_metrics());
    let err = advisor.decide(&request).await.unwrap_err();
    assert!(err.to_string().contains("unavailable"));
}

#[tokio::test]
async fn test_decisions_are_logged() {
    let dir = tempfile::tempdir().unwrap();
    let log = DecisionLog::open(dir.path()).await.unwrap();
    let advisor = Advisor::new(
        FeeSchedule::default(),
        FixedMarket::new(dec!(90), dec!(110), dec!(130), 10),
    )
    .with_log(log);

    let first = DecisionRequest::new("Gengar Fossil", gem_metrics());
    let second = DecisionRequest::new("Snorlax Jungle", gem_metrics()).with_listed_price(dec!(40));
    let r1 = advisor.decide(&first).await.unwrap();
    let r2 = advisor.decide(&second).await.unwrap();

    let log = advisor.log().unwrap();
    let records = log.read_decisions().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].request.query, "Gengar Fossil");
    assert_eq!(records[0].response.decision, r1.decision);
    assert_eq!(records[1].request.listed_price, Some(dec!(40)));
    assert_eq!(records[1].response.decision, r2.decision);
    assert_ne!(records[0].id, records[1].id);

    let stats = log.stats().await;
    assert_eq!(stats.decisions_written, 2);
    assert_eq!(stats.comps_written, 2);
    assert!(log
        .cached_comps(&r1.card.card_key)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_comps_lookup() {
    let advisor = Advisor::new(FeeSchedule::default(), StubCompsProvider::new(8, 30));
    let (identity, snapshot) = advisor.comps("Topps Chrome Rookie").await.unwrap();
    assert_eq!(identity.card_key.len(), 16);
    assert_eq!(snapshot.comps.len(), 8);
    assert!(advisor.comps("").await.is_err());
}

#[tokio::test]
async fn test_from_config_respects_log_switch() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.data.output_dir = dir.path().join("log");

    config.data.decision_log_enabled = false;
    let advisor = Advisor::from_config(&config).await.unwrap();
    assert!(advisor.log().is_none());

    config.data.decision_log_enabled = true;
    let advisor = Advisor::from_config(&config).await.unwrap();
    assert!(advisor.log().is_some());
    assert_eq!(advisor.fees(), &FeeSchedule::default());
}
