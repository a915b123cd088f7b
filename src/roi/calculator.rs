//! Expected value and breakeven math for a grading submission

use super::{GradeMultipliers, RoiResult};
use crate::grading::{Grade, GradeProbabilities};
use crate::market::quantize_money;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

fn multiplier(multipliers: &GradeMultipliers, grade: Grade) -> Decimal {
    multipliers.get(&grade).copied().unwrap_or(Decimal::ONE)
}

/// Shortest round-trip text keeps 0.07 as 0.07 rather than its binary expansion
fn probability(p: f64) -> Decimal {
    p.to_string()
        .parse::<Decimal>()
        .or_else(|_| Decimal::try_from(p))
        .unwrap_or(Decimal::ZERO)
}

/// Net after platform fee, grading costs and risk haircut, unquantized
fn net_after_fees(
    sale: Decimal,
    grading_fee: Decimal,
    shipping_insurance: Decimal,
    platform_fee_pct: Decimal,
    risk_discount_pct: Decimal,
) -> Decimal {
    sale - sale * platform_fee_pct - grading_fee - shipping_insurance - sale * risk_discount_pct
}

/// Probability-weighted post-grade sale price
///
/// A grade with no configured multiplier sells at the raw median.
pub fn expected_value(
    median: Decimal,
    probs: &GradeProbabilities,
    multipliers: &GradeMultipliers,
) -> Decimal {
    probs
        .iter()
        .map(|(grade, p)| probability(p) * median * multiplier(multipliers, grade))
        .sum()
}

/// Expected net profit, ROI and breakeven grade for grading a card
///
/// `roi_pct` is measured against grading plus shipping cost only, so it does
/// not move with the card's market value.
pub fn roi_summary(
    median: Decimal,
    probs: &GradeProbabilities,
    multipliers: &GradeMultipliers,
    grading_fee: Decimal,
    shipping_insurance: Decimal,
    platform_fee_pct: Decimal,
    risk_discount_pct: Decimal,
) -> RoiResult {
    let expected_sale = expected_value(median, probs, multipliers);
    let expected_net = net_after_fees(
        expected_sale,
        grading_fee,
        shipping_insurance,
        platform_fee_pct,
        risk_discount_pct,
    );

    let cost = grading_fee + shipping_insurance;
    let roi_pct = if cost > Decimal::ZERO {
        (expected_net / cost * Decimal::ONE_HUNDRED)
            .to_f64()
            .unwrap_or(0.0)
    } else {
        0.0
    };

    let breakeven_grade = Grade::ALL
        .into_iter()
        .find(|&grade| {
            let sale = median * multiplier(multipliers, grade);
            net_after_fees(
                sale,
                grading_fee,
                shipping_insurance,
                platform_fee_pct,
                risk_discount_pct,
            ) >= Decimal::ZERO
        })
        .unwrap_or(Grade::Lt7);

    RoiResult {
        expected_net: quantize_money(expected_net),
        roi_pct,
        breakeven_grade,
    }
}
