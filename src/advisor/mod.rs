//! Advisor service
//!
//! Composes card identification, comps, the grade model and the decision
//! policy into a single request/response call, logging every decision.

mod types;

pub use types::{DecisionRequest, DecisionResponse, MarketValueOut};

use crate::comps::{identify, CardIdentity, CompsProvider, CompsSnapshot, StubCompsProvider};
use crate::config::Config;
use crate::data::DecisionLog;
use crate::decision::{decide, DecisionInput};
use crate::fees::FeeSchedule;
use crate::telemetry::{self, CounterMetric, LatencyMetric};
use std::time::Instant;

/// Recommendation service over a comps provider
pub struct Advisor<P: CompsProvider> {
    fees: FeeSchedule,
    provider: P,
    log: Option<DecisionLog>,
}

impl<P: CompsProvider> Advisor<P> {
    pub fn new(fees: FeeSchedule, provider: P) -> Self {
        Self {
            fees,
            provider,
            log: None,
        }
    }

    /// Record decisions and comps to `log`
    pub fn with_log(mut self, log: DecisionLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn fees(&self) -> &FeeSchedule {
        &self.fees
    }

    pub fn log(&self) -> Option<&DecisionLog> {
        self.log.as_ref()
    }

    pub fn identify(&self, query: &str) -> anyhow::Result<CardIdentity> {
        Ok(identify(query)?)
    }

    /// Identify a card and fetch its recent sold comps
    pub async fn comps(&self, query: &str) -> anyhow::Result<(CardIdentity, CompsSnapshot)> {
        let identity = self.identify(query)?;
        self.fetch_comps(identity).await
    }

    /// Full pipeline for one request
    pub async fn decide(&self, request: &DecisionRequest) -> anyhow::Result<DecisionResponse> {
        let start = Instant::now();
        request.validate()?;

        let identity = self.identify(&request.query)?;
        let (identity, snapshot) = self.fetch_comps(identity).await?;
        let grade_probs = request.metrics.grade_probabilities()?;

        let input = DecisionInput {
            market_p25: snapshot.stats.p25,
            market_median: snapshot.stats.median,
            market_p75: snapshot.stats.p75,
            comps_count: snapshot.stats.comps_count,
            grade_probs,
            listed_price: request.listed_price,
            risk_tolerance: request.risk_tolerance,
        };
        let result = decide(&input, &self.fees);
        let response = DecisionResponse::from_result(identity, result);

        telemetry::record_decision(response.decision, response.confidence);
        telemetry::record_latency(LatencyMetric::Decision, start.elapsed());
        tracing::info!(
            card_key = %response.card.card_key,
            decision = %response.decision,
            confidence = response.confidence,
            risk = %response.risk,
            risk_tolerance = ?request.risk_tolerance,
            "Decision made"
        );

        if let Some(log) = &self.log {
            if let Err(e) = log.record_decision(request, &response).await {
                telemetry::increment(CounterMetric::LogWriteFailures);
                tracing::warn!(error = %e, "Failed to log decision");
            }
        }

        Ok(response)
    }

    async fn fetch_comps(
        &self,
        identity: CardIdentity,
    ) -> anyhow::Result<(CardIdentity, CompsSnapshot)> {
        let start = Instant::now();
        let snapshot = self.provider.recent_sold_comps(&identity).await?;
        telemetry::increment(CounterMetric::CompsRequests);
        telemetry::record_latency(LatencyMetric::CompsFetch, start.elapsed());
        tracing::debug!(
            provider = self.provider.name(),
            card_key = %identity.card_key,
            comps = snapshot.stats.comps_count,
            "Fetched comps"
        );

        if let Some(log) = &self.log {
            if let Err(e) = log.cache_comps(&identity, &snapshot).await {
                telemetry::increment(CounterMetric::LogWriteFailures);
                tracing::warn!(error = %e, "Failed to cache comps");
            }
        }

        Ok((identity, snapshot))
    }
}

impl Advisor<StubCompsProvider> {
    /// Build the stub-backed advisor described by `config`
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let fees = config.fee_schedule()?;
        let advisor = Self::new(fees, StubCompsProvider::from_config(&config.comps));
        if config.data.decision_log_enabled {
            let log = DecisionLog::open(&config.data.output_dir).await?;
            Ok(advisor.with_log(log))
        } else {
            Ok(advisor)
        }
    }
}
