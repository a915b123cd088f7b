//! Condition subscores to grade distribution
//!
//! The average subscore picks where the distribution peaks. The weakest
//! subscore caps how much mass PSA 10 and PSA 9 can receive.

use super::types::{Grade, GradeProbabilities};
use crate::error::{Result, ValuationError};
use std::collections::BTreeMap;

/// Per-grade Gaussian bump (mu, sigma) over the average subscore
const BUMPS: [(Grade, f64, f64); 5] = [
    (Grade::Psa10, 9.85, 0.25),
    (Grade::Psa9, 9.25, 0.35),
    (Grade::Psa8, 8.55, 0.40),
    (Grade::Psa7, 7.75, 0.45),
    (Grade::Lt7, 6.80, 0.80),
];

/// Multiplier on PSA 10 / PSA 9 when a defect is flagged
const ISSUE_PENALTY: f64 = 0.6;

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

fn bump(x: f64, mu: f64, sigma: f64) -> f64 {
    (-(x - mu).powi(2) / (2.0 * sigma * sigma)).exp()
}

fn normalize(scores: &mut BTreeMap<Grade, f64>) {
    let sum: f64 = scores.values().sum();
    if sum <= 0.0 {
        let uniform = 1.0 / scores.len() as f64;
        scores.values_mut().for_each(|v| *v = uniform);
        return;
    }
    scores.values_mut().for_each(|v| *v /= sum);
}

fn clamp_all(scores: &mut BTreeMap<Grade, f64>) {
    scores.values_mut().for_each(|v| *v = clamp01(*v));
}

/// Map four 0-10 subscores and a defect flag to a grade distribution
pub fn grade_probabilities(
    centering: f64,
    corners: f64,
    edges: f64,
    surface: f64,
    issue_flag: bool,
) -> Result<GradeProbabilities> {
    let scores = [centering, corners, edges, surface];
    if scores.iter().any(|s| !s.is_finite()) {
        return Err(ValuationError::invalid(format!(
            "condition subscores must be finite, got {scores:?}"
        )));
    }

    let avg = scores.iter().sum::<f64>() / 4.0;
    let weakest = scores.iter().copied().fold(f64::INFINITY, f64::min);

    let cap10 = clamp01((weakest - 8.5) / 1.5);
    let cap9 = clamp01((weakest - 7.8) / 2.0);
    let penalty = if issue_flag { ISSUE_PENALTY } else { 1.0 };

    let mut raw: BTreeMap<Grade, f64> = BUMPS
        .iter()
        .map(|&(grade, mu, sigma)| {
            let factor = match grade {
                Grade::Psa10 => cap10 * penalty,
                Grade::Psa9 => cap9 * penalty,
                Grade::Psa8 => 0.9 + 0.1 * penalty,
                Grade::Psa7 | Grade::Lt7 => 1.0,
            };
            (grade, bump(avg, mu, sigma) * factor)
        })
        .collect();

    // Clamping can break the unit sum by a few ulps, hence the second pass
    normalize(&mut raw);
    clamp_all(&mut raw);
    normalize(&mut raw);
    clamp_all(&mut raw);
    normalize(&mut raw);

    Ok(GradeProbabilities::from_normalized(raw))
}
