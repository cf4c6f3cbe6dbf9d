//! Piecewise-linear membership functions.
//!
//! Both shapes are evaluated analytically, so a crisp input is fuzzified at its
//! true value rather than at the nearest grid point. Coinciding control points
//! produce vertical edges, which is how open-ended buckets (`a == b` or
//! `c == d`) and zero-width categorical spikes (`a == b == c`) are expressed.

use crate::error::{FuzzyError, Result};
use crate::traits::Membership;

/// A triangular or trapezoidal membership function.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum MembershipFunction {
    /// Ramp up over `[a, b]`, down over `[b, c]`.
    Triangular { a: f64, b: f64, c: f64 },
    /// Ramp up over `[a, b]`, plateau over `[b, c]`, ramp down over `[c, d]`.
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFunction {
    /// Creates a triangular function with `a <= b <= c`.
    ///
    /// # Errors
    /// Returns [`FuzzyError::InvalidMembership`] if the points are out of order
    /// or [`FuzzyError::NonFiniteParameter`] if any point is not finite.
    ///
    /// # Example
    /// ```rust
    /// use mamdani_rs::{Membership, MembershipFunction};
    ///
    /// let abnormal = MembershipFunction::triangular(0.2, 1.0, 1.8).unwrap();
    /// assert_eq!(abnormal.degree(1.0), 1.0);
    /// assert!((abnormal.degree(0.6) - 0.5).abs() < 1e-12);
    /// ```
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self> {
        let mf = Self::Triangular { a, b, c };
        mf.validate()?;
        Ok(mf)
    }

    /// Creates a trapezoidal function with `a <= b <= c <= d`.
    ///
    /// # Errors
    /// Returns [`FuzzyError::InvalidMembership`] if the points are out of order
    /// or [`FuzzyError::NonFiniteParameter`] if any point is not finite.
    ///
    /// # Example
    /// ```rust
    /// use mamdani_rs::{Membership, MembershipFunction};
    ///
    /// let young = MembershipFunction::trapezoidal(0.0, 0.0, 29.0, 38.0).unwrap();
    /// assert_eq!(young.degree(0.0), 1.0);
    /// assert_eq!(young.degree(75.0), 0.0);
    /// ```
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        let mf = Self::Trapezoidal { a, b, c, d };
        mf.validate()?;
        Ok(mf)
    }

    /// A zero-width spike: degree 1 exactly at `x`, 0 everywhere else.
    ///
    /// Used for categorical inputs such as sex or chest-pain class.
    ///
    /// # Errors
    /// Returns [`FuzzyError::NonFiniteParameter`] if `x` is not finite.
    pub fn singleton(x: f64) -> Result<Self> {
        Self::triangular(x, x, x)
    }

    /// Checks finiteness and ordering of the control points.
    ///
    /// # Errors
    /// See [`MembershipFunction::triangular`] and
    /// [`MembershipFunction::trapezoidal`].
    pub fn validate(&self) -> Result<()> {
        let points = self.points();
        for (&value, parameter) in points.iter().zip(["a", "b", "c", "d"]) {
            if !value.is_finite() {
                return Err(FuzzyError::non_finite(parameter, value));
            }
        }
        if points.windows(2).any(|w| w[0] > w[1]) {
            let (kind, reason) = match self {
                Self::Triangular { .. } => ("triangular", "points must satisfy a <= b <= c"),
                Self::Trapezoidal { .. } => {
                    ("trapezoidal", "points must satisfy a <= b <= c <= d")
                }
            };
            return Err(FuzzyError::invalid_membership(kind, &points, reason));
        }
        Ok(())
    }

    /// The control points in order.
    #[must_use]
    pub fn points(&self) -> Vec<f64> {
        match *self {
            Self::Triangular { a, b, c } => vec![a, b, c],
            Self::Trapezoidal { a, b, c, d } => vec![a, b, c, d],
        }
    }

    /// Outer support `[a, c]` or `[a, d]`; the degree is 0 outside it.
    #[must_use]
    pub fn support(&self) -> (f64, f64) {
        match *self {
            Self::Triangular { a, c, .. } => (a, c),
            Self::Trapezoidal { a, d, .. } => (a, d),
        }
    }

    /// Interval on which the degree is exactly 1.
    #[must_use]
    pub fn core(&self) -> (f64, f64) {
        match *self {
            Self::Triangular { b, .. } => (b, b),
            Self::Trapezoidal { b, c, .. } => (b, c),
        }
    }
}

impl Membership for MembershipFunction {
    fn degree(&self, x: f64) -> f64 {
        let (lo, hi) = self.support();
        if x < lo || x > hi {
            return 0.0;
        }
        let (a, d) = (lo, hi);
        let (b, c) = self.core();
        let degree = if x < b {
            // x >= a and x < b, so b > a
            (x - a) / (b - a)
        } else if x <= c {
            1.0
        } else {
            (d - x) / (d - c)
        };
        degree.clamp(0.0, 1.0)
    }
}
