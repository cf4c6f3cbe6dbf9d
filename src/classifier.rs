//! Mapping crisp outputs to ordered categories.

use std::fmt;

use crate::error::{FuzzyError, Result};

/// Contiguous ascending bands over a crisp value.
///
/// The first band is `[start, upper_0]`; every later band is
/// `(upper_{i-1}, upper_i]`. A value on a shared boundary therefore belongs to
/// the lower band. Values outside `[start, last upper]` have no category.
///
/// # Example
/// ```rust
/// use mamdani_rs::classifier::RangeClassifier;
///
/// let grade = RangeClassifier::new(0.0, vec![(5.0, "fail"), (10.0, "pass")])?;
/// assert_eq!(grade.classify(5.0), Some("fail"));
/// assert_eq!(grade.classify(5.01), Some("pass"));
/// assert_eq!(grade.classify(10.5), None);
/// # Ok::<(), mamdani_rs::FuzzyError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeClassifier<L> {
    start: f64,
    bands: Vec<(f64, L)>,
}

impl<L: Clone> RangeClassifier<L> {
    /// Builds a classifier from a lower bound and `(upper, label)` pairs.
    ///
    /// # Errors
    /// Returns [`FuzzyError::InvalidClassifier`] if there are no bands, a
    /// bound is not finite, or the bounds are not strictly ascending.
    pub fn new(start: f64, bands: Vec<(f64, L)>) -> Result<Self> {
        if bands.is_empty() {
            return Err(FuzzyError::InvalidClassifier {
                reason: "at least one band is required",
            });
        }
        if !start.is_finite() || bands.iter().any(|(upper, _)| !upper.is_finite()) {
            return Err(FuzzyError::InvalidClassifier {
                reason: "bounds must be finite",
            });
        }
        let mut lower = start;
        for (upper, _) in &bands {
            if *upper <= lower {
                return Err(FuzzyError::InvalidClassifier {
                    reason: "bounds must be strictly ascending",
                });
            }
            lower = *upper;
        }
        Ok(Self { start, bands })
    }

    /// Label of the band containing `value`.
    #[must_use]
    pub fn classify(&self, value: f64) -> Option<L> {
        if value < self.start {
            return None;
        }
        self.bands
            .iter()
            .find(|(upper, _)| value <= *upper)
            .map(|(_, label)| label.clone())
    }

    /// Lower bound of the first band.
    #[must_use]
    pub fn start(&self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn bands(&self) -> &[(f64, L)] {
        &self.bands
    }
}

/// Heart disease risk category derived from the `health` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RiskLevel {
    NoRisk,
    LowRisk,
    ModerateRisk,
    HighRisk,
    VeryHighRisk,
}

impl RiskLevel {
    /// All levels from lowest to highest.
    pub const ALL: [RiskLevel; 5] = [
        RiskLevel::NoRisk,
        RiskLevel::LowRisk,
        RiskLevel::ModerateRisk,
        RiskLevel::HighRisk,
        RiskLevel::VeryHighRisk,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::NoRisk => "no_risk",
            RiskLevel::LowRisk => "low_risk",
            RiskLevel::ModerateRisk => "moderate_risk",
            RiskLevel::HighRisk => "high_risk",
            RiskLevel::VeryHighRisk => "very_high_risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
