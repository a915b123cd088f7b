//! Market data types

use super::stats::{comps_confidence, quantize_money, spread_ratio};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_currency() -> String {
    "USD".to_string()
}

/// A completed sale of a comparable card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoldComp {
    /// Final sale price
    pub sold_price: Decimal,
    /// When the sale closed
    pub sold_date_utc: DateTime<Utc>,
    /// Listing title
    pub title: String,
}

/// Summary of the comparable-sale market for one card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStats {
    /// 25th percentile, in cents
    pub p25: Decimal,
    /// Median, in cents
    pub median: Decimal,
    /// 75th percentile, in cents
    pub p75: Decimal,
    /// Number of comps behind the numbers
    pub comps_count: usize,
    /// (p75 - p25) / median
    pub spread_ratio: f64,
    /// 0-100 trust score
    pub confidence: u8,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl MarketStats {
    /// Build stats from already-known quantiles
    ///
    /// Spread and confidence come from the quantiles as given; the stored
    /// monetary fields are quantized to cents.
    pub fn from_quantiles(p25: Decimal, median: Decimal, p75: Decimal, comps_count: usize) -> Self {
        let spread = spread_ratio(p25, p75, median);
        Self {
            p25: quantize_money(p25),
            median: quantize_money(median),
            p75: quantize_money(p75),
            comps_count,
            spread_ratio: spread,
            confidence: comps_confidence(comps_count, spread),
            currency: default_currency(),
        }
    }
}
