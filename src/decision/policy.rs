//! Rule cascade behind [`decide`]
//!
//! Rules live in a fixed-priority table; the first whose predicate holds
//! produces the outcome. The last rule always matches.

use super::types::{Decision, DecisionInput, DecisionResult, Risk};
use crate::fees::{DecisionThresholds, FeeSchedule};
use crate::market::{quantize_money, MarketStats};
use crate::roi::RoiResult;
use rust_decimal::Decimal;

/// Maximum explanation lines in a result
pub const MAX_EXPLANATION_LINES: usize = 4;

/// Market confidence at which a negative expected net means SELL
const SELL_CONFIDENCE_FLOOR: u8 = 55;
/// Market confidence below which the fallback holds instead of selling
const HOLD_CONFIDENCE_CEILING: u8 = 75;

/// Values the rules read, derived once per call
#[derive(Debug, Clone)]
pub struct RuleContext<'a> {
    pub input: &'a DecisionInput,
    pub thresholds: &'a DecisionThresholds,
    pub market: &'a MarketStats,
    pub roi: &'a RoiResult,
    pub psa9_plus: f64,
    pub risk: Risk,
}

impl RuleContext<'_> {
    fn market_confidence(&self) -> f64 {
        f64::from(self.market.confidence)
    }
}

/// What a matched rule contributes to the result
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub decision: Decision,
    /// Unrounded confidence
    pub confidence: f64,
    pub risk: Risk,
    pub headline: &'static str,
}

/// One row of the cascade
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(&RuleContext<'_>) -> bool,
    pub outcome: fn(&RuleContext<'_>) -> RuleOutcome,
}

/// Fewest comps before any signal is trusted
pub fn comps_floor(thresholds: &DecisionThresholds) -> usize {
    (thresholds.min_comps_count / 2).max(3)
}

/// Risk band from comp count and spread
pub fn risk_band(comps_count: usize, spread_ratio: f64, thresholds: &DecisionThresholds) -> Risk {
    if comps_count >= thresholds.min_comps_count
        && spread_ratio <= thresholds.max_price_spread_ratio_for_low_risk
    {
        Risk::Low
    } else if comps_count >= comps_floor(thresholds) {
        Risk::Medium
    } else {
        Risk::High
    }
}

/// Round half to even and clamp into 0..=100
pub fn clamp_confidence(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round_ties_even().clamp(0.0, 100.0) as u8
}

fn insufficient_comps(ctx: &RuleContext<'_>) -> bool {
    ctx.input.comps_count < comps_floor(ctx.thresholds)
}

fn undervalued_listing(ctx: &RuleContext<'_>) -> bool {
    let Some(listed) = ctx.input.listed_price else {
        return false;
    };
    let ceiling = ctx.input.market_p25 * (Decimal::ONE - ctx.thresholds.buy_undervalue_margin);
    listed <= ceiling && ctx.risk != Risk::High
}

fn grading_pays(ctx: &RuleContext<'_>) -> bool {
    ctx.roi.expected_net >= ctx.thresholds.min_expected_net_profit
        && ctx.psa9_plus >= ctx.thresholds.min_psa9_plus_prob
        && ctx.risk != Risk::High
}

fn grading_loses(ctx: &RuleContext<'_>) -> bool {
    ctx.roi.expected_net < Decimal::ZERO && ctx.market.confidence >= SELL_CONFIDENCE_FLOOR
}

fn pass_outcome(ctx: &RuleContext<'_>) -> RuleOutcome {
    RuleOutcome {
        decision: Decision::Pass,
        confidence: ctx.market_confidence() * 0.6,
        risk: Risk::High,
        headline: "Not enough reliable comps to make a confident call.",
    }
}

fn buy_outcome(ctx: &RuleContext<'_>) -> RuleOutcome {
    RuleOutcome {
        decision: Decision::Buy,
        confidence: 0.5 * ctx.market_confidence() + 40.0,
        risk: ctx.risk,
        headline: "Listed price is significantly below low-end comps.",
    }
}

fn grade_outcome(ctx: &RuleContext<'_>) -> RuleOutcome {
    RuleOutcome {
        decision: Decision::Grade,
        confidence: 0.6 * ctx.market_confidence() + 40.0 * ctx.psa9_plus,
        risk: ctx.risk,
        headline: "High upside after grading fees with strong PSA 9+ odds.",
    }
}

fn sell_outcome(ctx: &RuleContext<'_>) -> RuleOutcome {
    RuleOutcome {
        decision: Decision::Sell,
        confidence: 0.7 * ctx.market_confidence() + 20.0,
        risk: ctx.risk,
        headline: "Grading math is unfavorable; selling raw is safer.",
    }
}

fn always(_: &RuleContext<'_>) -> bool {
    true
}

fn mixed_outcome(ctx: &RuleContext<'_>) -> RuleOutcome {
    let decision = if ctx.market.confidence < HOLD_CONFIDENCE_CEILING {
        Decision::Hold
    } else {
        Decision::Sell
    };
    RuleOutcome {
        decision,
        confidence: 0.65 * ctx.market_confidence() + 10.0,
        risk: ctx.risk,
        headline: "Signals are mixed; avoid forcing a risky move.",
    }
}

/// The cascade, highest priority first
pub static RULES: [Rule; 5] = [
    Rule {
        name: "pass_insufficient_comps",
        applies: insufficient_comps,
        outcome: pass_outcome,
    },
    Rule {
        name: "buy_undervalued_listing",
        applies: undervalued_listing,
        outcome: buy_outcome,
    },
    Rule {
        name: "grade_high_upside",
        applies: grading_pays,
        outcome: grade_outcome,
    },
    Rule {
        name: "sell_unfavorable_grading",
        applies: grading_loses,
        outcome: sell_outcome,
    },
    Rule {
        name: "mixed_signals",
        applies: always,
        outcome: mixed_outcome,
    },
];

/// Generic context lines, most salient first
fn context_lines(ctx: &RuleContext<'_>) -> [String; 4] {
    let input = ctx.input;
    [
        format!(
            "Comps: {} recent sales; market confidence {}/100.",
            input.comps_count, ctx.market.confidence
        ),
        format!(
            "Market range: ${:.2}–${:.2} (median ${:.2}).",
            quantize_money(input.market_p25),
            quantize_money(input.market_p75),
            quantize_money(input.market_median)
        ),
        format!("PSA 9+ probability: {:.0}%.", ctx.psa9_plus * 100.0),
        format!("Expected net after fees: ${:.2}.", ctx.roi.expected_net),
    ]
}

/// Evaluate the cascade and assemble the result
pub fn decide(input: &DecisionInput, fees: &FeeSchedule) -> DecisionResult {
    let thresholds = &fees.decision_thresholds;
    let market = MarketStats::from_quantiles(
        input.market_p25,
        input.market_median,
        input.market_p75,
        input.comps_count,
    );
    let roi = fees.roi_summary(input.market_median, &input.grade_probs);
    let psa9_plus = input.grade_probs.psa9_plus();
    let risk = risk_band(input.comps_count, market.spread_ratio, thresholds);

    let ctx = RuleContext {
        input,
        thresholds,
        market: &market,
        roi: &roi,
        psa9_plus,
        risk,
    };

    // The last rule always applies
    let (rule, outcome) = RULES
        .iter()
        .find(|rule| (rule.applies)(&ctx))
        .map(|rule| (rule.name, (rule.outcome)(&ctx)))
        .unwrap_or_else(|| ("mixed_signals", mixed_outcome(&ctx)));

    tracing::debug!(
        rule,
        decision = %outcome.decision,
        market_confidence = market.confidence,
        spread_ratio = market.spread_ratio,
        psa9_plus,
        expected_net = %roi.expected_net,
        "Decision rule matched"
    );

    let explanation = std::iter::once(outcome.headline.to_string())
        .chain(context_lines(&ctx))
        .take(MAX_EXPLANATION_LINES)
        .collect();

    DecisionResult {
        decision: outcome.decision,
        confidence: clamp_confidence(outcome.confidence),
        risk: outcome.risk,
        explanation,
        market,
        grade_probabilities: input.grade_probs.clone(),
        roi,
        risk_tolerance: input.risk_tolerance,
    }
}
