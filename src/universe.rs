#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use crate::error::{FuzzyError, Result};

/// Fraction of a step tolerated when deciding whether `max` lies on the grid.
const GRID_TOLERANCE: f64 = 1e-9;

/// Largest number of grid points a universe may have.
pub const MAX_POINTS: usize = 10_000_000;

/// A finite, evenly spaced discretization of `[min, max]`.
///
/// The grid is `{min, min + step, ..., <= max}`. Consequent sets are sampled on
/// this grid and defuzzified with a Riemann sum, so a finer step gives a more
/// precise crisp output at the cost of more samples per inference.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Universe {
    min: f64,
    max: f64,
    step: f64,
}

impl Universe {
    /// Creates a universe after checking `min < max`, `step > 0` and that the
    /// grid has at most [`MAX_POINTS`] points.
    ///
    /// # Errors
    /// Returns [`FuzzyError::NonFiniteParameter`] for NaN or infinite bounds
    /// and [`FuzzyError::InvalidUniverse`] when the bounds or step are unusable.
    ///
    /// # Example
    /// ```rust
    /// use mamdani_rs::Universe;
    ///
    /// let health = Universe::new(0.0, 4.0, 0.01).unwrap();
    /// assert_eq!(health.len(), 401);
    /// assert!(Universe::new(1.0, 1.0, 0.1).is_err());
    /// ```
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self> {
        let universe = Self { min, max, step };
        universe.validate()?;
        Ok(universe)
    }

    /// Re-checks the invariants; used when a universe arrives through
    /// deserialization rather than [`Universe::new`].
    ///
    /// # Errors
    /// See [`Universe::new`].
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("min", self.min), ("max", self.max), ("step", self.step)] {
            if !value.is_finite() {
                return Err(FuzzyError::non_finite(parameter, value));
            }
        }
        if self.min >= self.max {
            return Err(FuzzyError::invalid_universe(
                self.min,
                self.max,
                self.step,
                "min must be less than max",
            ));
        }
        if self.step <= 0.0 {
            return Err(FuzzyError::invalid_universe(
                self.min,
                self.max,
                self.step,
                "step must be positive",
            ));
        }
        let intervals = (self.max - self.min) / self.step + GRID_TOLERANCE;
        if !intervals.is_finite() || intervals.floor() >= MAX_POINTS as f64 {
            return Err(FuzzyError::invalid_universe(
                self.min,
                self.max,
                self.step,
                "grid has too many points",
            ));
        }
        Ok(())
    }

    /// Lower bound, always the first grid point.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Spacing between grid points.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of grid points, at most [`MAX_POINTS`].
    #[must_use]
    pub fn len(&self) -> usize {
        ((self.max - self.min) / self.step + GRID_TOLERANCE).floor() as usize + 1
    }

    /// A valid universe always has at least the `min` point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the grid points in ascending order.
    ///
    /// Points are computed as `min + i * step` rather than accumulated, so the
    /// grid does not drift on long universes.
    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| (self.min + i as f64 * self.step).min(self.max))
    }

    /// Whether `x` lies inside `[min, max]`.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        (self.min..=self.max).contains(&x)
    }

    /// Clamps `x` to the nearest bound.
    #[must_use]
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }
}
