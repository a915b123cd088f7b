//! Comparable sales module
//!
//! Card identification and the sources of recent sold comps

mod identity;
mod stub;

pub use identity::{identify, stable_card_key, CardIdentity, Category, MAX_QUERY_LEN};
pub use stub::StubCompsProvider;

use crate::market::{MarketStats, SoldComp};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Recent comps for one card plus their summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompsSnapshot {
    pub comps: Vec<SoldComp>,
    pub stats: MarketStats,
}

/// Trait for sold-comps sources
#[async_trait]
pub trait CompsProvider: Send + Sync {
    /// Fetch recent sold comps for a card
    async fn recent_sold_comps(&self, identity: &CardIdentity) -> anyhow::Result<CompsSnapshot>;
    /// Short provider name for logs
    fn name(&self) -> &'static str;
}
