//! Market statistics module
//!
//! Turns a noisy list of comparable sale prices into quantiles, a spread
//! ratio and a confidence score.

mod stats;
mod types;

pub use stats::{
    comps_confidence, median, percentile, quantize_money, spread_ratio, trimmed_mean, MAX_MONEY,
};
pub use types::{MarketStats, SoldComp};

use crate::error::{Result, ValuationError};
use rust_decimal::Decimal;

/// Summarize raw sale prices into [`MarketStats`]
///
/// Quantiles are quantized to cents first; spread and confidence are
/// computed from the quantized values.
pub fn compute_market_stats(prices: &[Decimal]) -> Result<MarketStats> {
    if let Some(bad) = prices.iter().find(|p| **p <= Decimal::ZERO || **p > MAX_MONEY) {
        return Err(ValuationError::invalid(format!(
            "sale prices must be in (0, {MAX_MONEY}], got {bad}"
        )));
    }

    let p25 = quantize_money(percentile(prices, 25.0)?);
    let med = quantize_money(median(prices)?);
    let p75 = quantize_money(percentile(prices, 75.0)?);

    Ok(MarketStats::from_quantiles(p25, med, p75, prices.len()))
}
