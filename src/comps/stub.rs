//! Deterministic stand-in for a sold-listings source
//!
//! The same card key always produces the same comps, so decisions for a
//! card are reproducible without network access.

use super::identity::{sha256_prefix, CardIdentity, Category};
use super::{CompsProvider, CompsSnapshot};
use crate::config::CompsConfig;
use crate::market::{compute_market_stats, quantize_money, SoldComp};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// Noise band applied to the base price of each comp
const NOISE_LOW: f64 = -0.22;
const NOISE_HIGH: f64 = 0.28;

/// Synthetic comps seeded from the card key
#[derive(Debug, Clone)]
pub struct StubCompsProvider {
    sample_size: usize,
    lookback_days: i64,
    /// Fixed clock for sold dates; `None` uses the current time
    as_of: Option<DateTime<Utc>>,
}

impl StubCompsProvider {
    pub fn new(sample_size: usize, lookback_days: i64) -> Self {
        Self {
            sample_size,
            lookback_days,
            as_of: None,
        }
    }

    pub fn from_config(config: &CompsConfig) -> Self {
        Self::new(config.sample_size, config.lookback_days)
    }

    /// Pin sold dates relative to a fixed instant
    pub fn with_reference_time(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Base price before noise for a card
    pub fn base_price(identity: &CardIdentity) -> f64 {
        let seed = u64::from_be_bytes(sha256_prefix(&identity.card_key));
        let base = match identity.category {
            Category::Tcg => 20.0,
            Category::Sports => 35.0,
        };
        base + (seed % 7000) as f64 / 100.0
    }

    /// Generate comps without computing stats
    pub fn generate(&self, identity: &CardIdentity) -> Vec<SoldComp> {
        let seed = u64::from_be_bytes(sha256_prefix(&identity.card_key));
        let mut rng = StdRng::seed_from_u64(seed);
        let base = Self::base_price(identity);
        let now = self.as_of.unwrap_or_else(Utc::now);
        let max_days = self.lookback_days.max(2);

        (1..=self.sample_size)
            .map(|i| {
                let noise: f64 = rng.gen_range(NOISE_LOW..NOISE_HIGH);
                let price = (base * (1.0 + noise)).max(1.0);
                let days_ago = rng.gen_range(1..max_days);
                SoldComp {
                    sold_price: quantize_money(Decimal::try_from(price).unwrap_or(Decimal::ONE)),
                    sold_date_utc: now - Duration::days(days_ago),
                    title: format!("{} - Sold comp {i}", identity.display_name),
                }
            })
            .collect()
    }
}

impl Default for StubCompsProvider {
    fn default() -> Self {
        Self::from_config(&CompsConfig::default())
    }
}

#[async_trait]
impl CompsProvider for StubCompsProvider {
    async fn recent_sold_comps(&self, identity: &CardIdentity) -> anyhow::Result<CompsSnapshot> {
        let comps = self.generate(identity);
        let prices: Vec<Decimal> = comps.iter().map(|c| c.sold_price).collect();
        let stats = compute_market_stats(&prices)?;

        tracing::debug!(
            card_key = %identity.card_key,
            comps = comps.len(),
            median = %stats.median,
            confidence = stats.confidence,
            "Generated stub comps"
        );

        Ok(CompsSnapshot { comps, stats })
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
