//! Robust summary statistics over comparable sale prices
//!
//! Prices are exact decimals. Ratios and scores are plain floats.

use crate::error::{Result, ValuationError};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Largest accepted monetary amount, ten digits with two after the point
pub const MAX_MONEY: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

fn overflow(what: &str) -> ValuationError {
    ValuationError::invalid(format!("{what} overflows"))
}

/// Round a monetary amount to cents, ties away from zero
pub fn quantize_money(x: Decimal) -> Decimal {
    x.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn sorted(values: &[Decimal]) -> Result<Vec<Decimal>> {
    if values.is_empty() {
        return Err(ValuationError::invalid("values empty"));
    }
    let mut vals = values.to_vec();
    vals.sort();
    Ok(vals)
}

/// Linear interpolation percentile (R-7)
///
/// `p` is in percent, 0..=100. `percentile(v, 0)` is the minimum and
/// `percentile(v, 100)` the maximum.
pub fn percentile(values: &[Decimal], p: f64) -> Result<Decimal> {
    if !p.is_finite() || !(0.0..=100.0).contains(&p) {
        return Err(ValuationError::invalid(format!("p must be 0..100, got {p}")));
    }
    let vals = sorted(values)?;
    let last = vals.len() - 1;
    if last == 0 {
        return Ok(vals[0]);
    }

    let p = Decimal::try_from(p).map_err(|e| ValuationError::invalid(e.to_string()))?;
    let k = Decimal::from(last) * p / Decimal::ONE_HUNDRED;
    let f = k.floor().to_usize().unwrap_or(0).min(last);
    let c = (f + 1).min(last);
    if f == c {
        return Ok(vals[f]);
    }

    let lower = vals[f] * (Decimal::from(c) - k);
    let upper = vals[c] * (k - Decimal::from(f));
    lower.checked_add(upper).ok_or_else(|| overflow("percentile"))
}

/// Middle element, or the mean of the two middle elements
pub fn median(values: &[Decimal]) -> Result<Decimal> {
    let vals = sorted(values)?;
    let mid = vals.len() / 2;
    if vals.len() % 2 == 1 {
        return Ok(vals[mid]);
    }
    let sum = vals[mid - 1]
        .checked_add(vals[mid])
        .ok_or_else(|| overflow("sum of middle values"))?;
    Ok(sum / Decimal::TWO)
}

/// Mean after dropping `floor(n * trim_ratio)` values from each end
///
/// Falls back to the untrimmed mean if trimming would leave nothing.
pub fn trimmed_mean(values: &[Decimal], trim_ratio: f64) -> Result<Decimal> {
    if !trim_ratio.is_finite() || trim_ratio < 0.0 {
        return Err(ValuationError::invalid(format!(
            "trim_ratio must be a non-negative number, got {trim_ratio}"
        )));
    }
    let vals = sorted(values)?;
    let n = vals.len();
    let k = (n as f64 * trim_ratio).floor() as usize;

    // A huge ratio saturates k
    let core = if k.saturating_mul(2) < n { &vals[k..n - k] } else { &vals[..] };
    let sum = core
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
        .ok_or_else(|| overflow("sum of values"))?;
    Ok(sum / Decimal::from(core.len()))
}

/// Width of the interquartile range relative to the median
///
/// Returns 0 when the median is zero or negative.
pub fn spread_ratio(p25: Decimal, p75: Decimal, median: Decimal) -> f64 {
    if median <= Decimal::ZERO {
        return 0.0;
    }
    ((p75 - p25) / median).to_f64().unwrap_or(0.0)
}

/// Heuristic 0-100 trust score for a set of comps
///
/// More comps raise the score (up to 6 count), wider spreads lower it.
pub fn comps_confidence(count: usize, spread_ratio: f64) -> u8 {
    let base = count.saturating_mul(10).min(60) as i64;
    // f64::max drops NaN
    let penalty = (spread_ratio.max(0.0) * 100.0).min(50.0) as i64;
    (base + 40 - penalty).clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn quartet() -> Vec<Decimal> {
        vec![dec!(10), dec!(20), dec!(30), dec!(40)]
    }

    #[test]
    fn test_percentiles_basic() {
        let vals = quartet();
        assert_eq!(percentile(&vals, 25.0).unwrap(), dec!(17.5));
        assert_eq!(percentile(&vals, 50.0).unwrap(), dec!(25));
        assert_eq!(percentile(&vals, 75.0).unwrap(), dec!(32.5));
    }

    #[test]
    fn test_percentile_unsorted_input() {
        let vals = vec![dec!(40), dec!(10), dec!(30), dec!(20)];
        assert_eq!(percentile(&vals, 25.0).unwrap(), dec!(17.5));
    }

    #[test]
    fn test_percentile_extremes() {
        let vals = vec![dec!(12.5), dec!(3), dec!(99.99), dec!(47)];
        assert_eq!(percentile(&vals, 0.0).unwrap(), dec!(3));
        assert_eq!(percentile(&vals, 100.0).unwrap(), dec!(99.99));
    }

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile(&[dec!(42)], 73.0).unwrap(), dec!(42));
    }

    #[test]
    fn test_percentile_rejects_bad_input() {
        assert!(matches!(
            percentile(&[], 50.0),
            Err(ValuationError::InvalidArgument(_))
        ));
        assert!(percentile(&quartet(), -1.0).is_err());
        assert!(percentile(&quartet(), 100.5).is_err());
        assert!(percentile(&quartet(), f64::NAN).is_err());
    }

    #[test]
    fn test_median_even() {
        assert_eq!(median(&quartet()).unwrap(), dec!(25));
    }

    #[test]
    fn test_median_odd() {
        let vals = vec![dec!(5), dec!(1), dec!(3)];
        assert_eq!(median(&vals).unwrap(), dec!(3));
    }

    #[test]
    fn test_median_empty() {
        assert!(median(&[]).is_err());
    }

    #[test]
    fn test_trimmed_mean() {
        let vals = vec![dec!(1), dec!(2), dec!(3), dec!(100)];
        // Drops 1 and 100
        assert_eq!(trimmed_mean(&vals, 0.25).unwrap(), dec!(2.5));
    }

    #[test]
    fn test_trimmed_mean_falls_back_when_everything_trimmed() {
        let vals = vec![dec!(1), dec!(2), dec!(3), dec!(100)];
        assert_eq!(trimmed_mean(&vals, 0.5).unwrap(), dec!(26.5));
    }

    #[test]
    fn test_trimmed_mean_rejects_bad_input() {
        assert!(trimmed_mean(&[], 0.1).is_err());
        assert!(trimmed_mean(&quartet(), -0.1).is_err());
        assert!(trimmed_mean(&quartet(), f64::INFINITY).is_err());
    }

    #[test]
    fn test_trimmed_mean_huge_ratio_falls_back() {
        assert_eq!(trimmed_mean(&quartet(), 1e30).unwrap(), dec!(25));
        let vals = vec![dec!(1), dec!(2), dec!(3), dec!(100)];
        assert_eq!(trimmed_mean(&vals, 1e30).unwrap(), dec!(26.5));
    }

    #[test]
    fn test_overflowing_sums_are_errors() {
        let huge = [Decimal::MAX, Decimal::MAX];
        assert!(matches!(median(&huge), Err(ValuationError::InvalidArgument(_))));
        assert!(matches!(
            trimmed_mean(&huge, 0.0),
            Err(ValuationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_max_money() {
        assert_eq!(MAX_MONEY, dec!(99999999.99));
    }

    #[test]
    fn test_spread_ratio() {
        assert_eq!(spread_ratio(dec!(80), dec!(120), dec!(100)), 0.4);
    }

    #[test]
    fn test_spread_ratio_degenerate_median() {
        assert_eq!(spread_ratio(dec!(80), dec!(120), dec!(0)), 0.0);
        assert_eq!(spread_ratio(dec!(80), dec!(120), dec!(-5)), 0.0);
    }

    #[test]
    fn test_comps_confidence_values() {
        // base 60, penalty 40
        assert_eq!(comps_confidence(8, 0.4), 60);
        // base 30, penalty truncated to 36
        assert_eq!(comps_confidence(3, 0.3636), 34);
        assert_eq!(comps_confidence(0, 5.0), 0);
        assert_eq!(comps_confidence(100, 0.0), 100);
        assert_eq!(comps_confidence(10, -1.0), 100);
    }

    #[test]
    fn test_quantize_money_half_up() {
        assert_eq!(quantize_money(dec!(1.005)), dec!(1.01));
        assert_eq!(quantize_money(dec!(1.004)), dec!(1.00));
        assert_eq!(quantize_money(dec!(-1.005)), dec!(-1.01));
        assert_eq!(quantize_money(dec!(91.6377125)), dec!(91.64));
    }

    proptest! {
        #[test]
        fn prop_confidence_monotonic_in_count(count in 0usize..50, spread in 0.0f64..2.0) {
            prop_assert!(comps_confidence(count + 1, spread) >= comps_confidence(count, spread));
        }

        #[test]
        fn prop_confidence_antitone_in_spread(count in 0usize..50, a in 0.0f64..2.0, b in 0.0f64..2.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(comps_confidence(count, hi) <= comps_confidence(count, lo));
        }

        #[test]
        fn prop_percentile_bounds(cents in proptest::collection::vec(1i64..1_000_000, 1..40)) {
            let vals: Vec<Decimal> = cents.iter().map(|c| Decimal::new(*c, 2)).collect();
            let min = vals.iter().min().copied().unwrap();
            let max = vals.iter().max().copied().unwrap();
            prop_assert_eq!(percentile(&vals, 0.0).unwrap(), min);
            prop_assert_eq!(percentile(&vals, 100.0).unwrap(), max);
        }

        #[test]
        fn prop_quantize_is_idempotent(cents in -10_000_000i64..10_000_000, scale in 0u32..6) {
            let x = Decimal::new(cents, scale);
            let q = quantize_money(x);
            prop_assert_eq!(quantize_money(q), q);
        }
    }
}
