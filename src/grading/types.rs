//! Grade and condition types

use crate::error::{Result, ValuationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Tolerance for the sum-to-one invariant
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Grade bucket, ordered best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "PSA10")]
    Psa10,
    #[serde(rename = "PSA9")]
    Psa9,
    #[serde(rename = "PSA8")]
    Psa8,
    #[serde(rename = "PSA7")]
    Psa7,
    /// Anything below PSA 7
    #[serde(rename = "LT7")]
    Lt7,
}

impl Grade {
    /// All grades, best first
    pub const ALL: [Grade; 5] = [Grade::Psa10, Grade::Psa9, Grade::Psa8, Grade::Psa7, Grade::Lt7];

    /// Wire label, e.g. `PSA10`
    pub fn label(&self) -> &'static str {
        match self {
            Grade::Psa10 => "PSA10",
            Grade::Psa9 => "PSA9",
            Grade::Psa8 => "PSA8",
            Grade::Psa7 => "PSA7",
            Grade::Lt7 => "LT7",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Probability distribution over grade outcomes
///
/// Always holds all five grades; values are in [0,1] and sum to one within
/// [`PROBABILITY_TOLERANCE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Grade, f64>", into = "BTreeMap<Grade, f64>")]
pub struct GradeProbabilities {
    probs: BTreeMap<Grade, f64>,
}

impl GradeProbabilities {
    /// Validate a caller-supplied distribution
    ///
    /// Missing grades count as zero probability.
    pub fn new(probs: BTreeMap<Grade, f64>) -> Result<Self> {
        let mut full = BTreeMap::new();
        for grade in Grade::ALL {
            let p = probs.get(&grade).copied().unwrap_or(0.0);
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(ValuationError::invalid(format!(
                    "probability for {grade} must be in [0,1], got {p}"
                )));
            }
            full.insert(grade, p);
        }

        let sum: f64 = full.values().sum();
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(ValuationError::invalid(format!(
                "probabilities must sum to 1, got {sum}"
            )));
        }
        Ok(Self { probs: full })
    }

    /// Build from `(grade, probability)` pairs
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Grade, f64)>) -> Result<Self> {
        Self::new(pairs.into_iter().collect())
    }

    pub(crate) fn from_normalized(probs: BTreeMap<Grade, f64>) -> Self {
        Self { probs }
    }

    /// Probability of a single grade
    pub fn get(&self, grade: Grade) -> f64 {
        self.probs.get(&grade).copied().unwrap_or(0.0)
    }

    /// P(PSA10) + P(PSA9)
    pub fn psa9_plus(&self) -> f64 {
        self.get(Grade::Psa10) + self.get(Grade::Psa9)
    }

    /// Iterate best to worst
    pub fn iter(&self) -> impl Iterator<Item = (Grade, f64)> + '_ {
        self.probs.iter().map(|(g, p)| (*g, *p))
    }

    pub fn sum(&self) -> f64 {
        self.probs.values().sum()
    }
}

impl TryFrom<BTreeMap<Grade, f64>> for GradeProbabilities {
    type Error = ValuationError;

    fn try_from(probs: BTreeMap<Grade, f64>) -> Result<Self> {
        Self::new(probs)
    }
}

impl From<GradeProbabilities> for BTreeMap<Grade, f64> {
    fn from(value: GradeProbabilities) -> Self {
        value.probs
    }
}

/// Condition subscores for a raw card
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConditionMetrics {
    pub centering: f64,
    pub corners: f64,
    pub edges: f64,
    pub surface: f64,
    /// Visible defect (crease, print line, stain)
    #[serde(default)]
    pub issue_flag: bool,
}

impl ConditionMetrics {
    /// Create metrics, checking every subscore is within [0,10]
    pub fn new(centering: f64, corners: f64, edges: f64, surface: f64, issue_flag: bool) -> Result<Self> {
        let metrics = Self {
            centering,
            corners,
            edges,
            surface,
            issue_flag,
        };
        metrics.validate()?;
        Ok(metrics)
    }

    /// Check every subscore is finite and within [0,10]
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("centering", self.centering),
            ("corners", self.corners),
            ("edges", self.edges),
            ("surface", self.surface),
        ] {
            if !value.is_finite() || !(0.0..=10.0).contains(&value) {
                return Err(ValuationError::invalid(format!(
                    "{name} must be in [0,10], got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Run the grade model on these subscores
    pub fn grade_probabilities(&self) -> Result<GradeProbabilities> {
        super::grade_probabilities(
            self.centering,
            self.corners,
            self.edges,
            self.surface,
            self.issue_flag,
        )
    }
}
