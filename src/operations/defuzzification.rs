#![allow(clippy::cast_precision_loss)]

//! Reduction of a sampled fuzzy set to one crisp value.
//!
//! Every method returns `None` for a set that is zero everywhere: there is no
//! meaningful crisp value when no rule contributed, and reporting 0 or NaN
//! would hide that.

/// Degrees within this distance of the maximum count as maximal.
const MAX_TOLERANCE: f64 = 1e-12;

/// Defuzzification method of a consequent variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Defuzzification {
    /// Center of gravity: `Σ(y·d) / Σd`
    #[default]
    Centroid,
    /// Grid point that splits the area in half
    Bisector,
    /// Mean of the grid points where the degree is maximal
    MeanOfMaximum,
    /// Smallest grid point where the degree is maximal
    SmallestOfMaximum,
    /// Largest grid point where the degree is maximal
    LargestOfMaximum,
}

impl Defuzzification {
    /// Applies the method to a set sampled at `grid`.
    ///
    /// # Example
    /// ```rust
    /// use mamdani_rs::operations::Defuzzification;
    ///
    /// let grid = [0.0, 1.0, 2.0];
    /// assert_eq!(Defuzzification::Centroid.apply(&grid, &[0.0, 1.0, 1.0]), Some(1.5));
    /// assert_eq!(Defuzzification::Centroid.apply(&grid, &[0.0, 0.0, 0.0]), None);
    /// ```
    #[must_use]
    pub fn apply(self, grid: &[f64], degrees: &[f64]) -> Option<f64> {
        debug_assert_eq!(grid.len(), degrees.len());
        match self {
            Self::Centroid => centroid(grid, degrees),
            Self::Bisector => bisector(grid, degrees),
            Self::MeanOfMaximum => {
                let maxima = maxima(grid, degrees)?;
                Some(maxima.iter().sum::<f64>() / maxima.len() as f64)
            }
            Self::SmallestOfMaximum => maxima(grid, degrees)?.first().copied(),
            Self::LargestOfMaximum => maxima(grid, degrees)?.last().copied(),
        }
    }
}

/// Riemann-sum centroid over the grid.
///
/// The accuracy of the approximation is bounded by the grid step.
#[must_use]
pub fn centroid(grid: &[f64], degrees: &[f64]) -> Option<f64> {
    let (moment, area) = grid
        .iter()
        .zip(degrees)
        .fold((0.0, 0.0), |(moment, area), (&y, &d)| {
            (moment + y * d, area + d)
        });
    (area > 0.0).then(|| moment / area)
}

fn bisector(grid: &[f64], degrees: &[f64]) -> Option<f64> {
    let total: f64 = degrees.iter().sum();
    if total <= 0.0 {
        return None;
    }
    let half = total / 2.0;
    let mut running = 0.0;
    for (&y, &d) in grid.iter().zip(degrees) {
        running += d;
        if running >= half {
            return Some(y);
        }
    }
    grid.last().copied()
}

fn maxima(grid: &[f64], degrees: &[f64]) -> Option<Vec<f64>> {
    let peak = degrees.iter().copied().fold(0.0_f64, f64::max);
    if peak <= 0.0 {
        return None;
    }
    Some(
        grid.iter()
            .zip(degrees)
            .filter(|&(_, &d)| (peak - d).abs() <= MAX_TOLERANCE)
            .map(|(&y, _)| y)
            .collect(),
    )
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn grid(n: usize, step: f64) -> Vec<f64> {
        (0..n).map(|i| i as f64 * step).collect()
    }

    #[test]
    fn test_centroid_of_symmetric_set() {
        let grid = grid(5, 1.0);
        let degrees = [0.0, 0.5, 1.0, 0.5, 0.0];
        assert_eq!(centroid(&grid, &degrees), Some(2.0));
    }

    #[test]
    fn test_centroid_of_single_point() {
        let grid = grid(5, 1.0);
        let degrees = [0.0, 0.0, 0.0, 0.7, 0.0];
        let crisp = centroid(&grid, &degrees).unwrap();
        assert!((crisp - 3.0).abs() < 1e-12, "centroid {crisp}");
    }

    #[test]
    fn test_empty_set_is_undefined_for_every_method() {
        let grid = grid(4, 0.5);
        let degrees = [0.0; 4];
        for method in [
            Defuzzification::Centroid,
            Defuzzification::Bisector,
            Defuzzification::MeanOfMaximum,
            Defuzzification::SmallestOfMaximum,
            Defuzzification::LargestOfMaximum,
        ] {
            assert_eq!(method.apply(&grid, &degrees), None, "{method:?}");
        }
    }

    #[test]
    fn test_maximum_family() {
        let grid = grid(6, 1.0);
        let degrees = [0.1, 0.6, 0.6, 0.6, 0.2, 0.6];

        assert_eq!(Defuzzification::SmallestOfMaximum.apply(&grid, &degrees), Some(1.0));
        assert_eq!(Defuzzification::LargestOfMaximum.apply(&grid, &degrees), Some(5.0));
        assert_eq!(Defuzzification::MeanOfMaximum.apply(&grid, &degrees), Some(2.75));
    }

    #[test]
    fn test_bisector_splits_area() {
        let grid = grid(5, 1.0);
        let degrees = [1.0, 1.0, 1.0, 1.0, 0.0];
        assert_eq!(Defuzzification::Bisector.apply(&grid, &degrees), Some(1.0));

        let skewed = [0.0, 0.0, 0.0, 1.0, 1.0];
        assert_eq!(Defuzzification::Bisector.apply(&grid, &skewed), Some(3.0));
    }

    #[test]
    fn test_default_is_centroid() {
        assert_eq!(Defuzzification::default(), Defuzzification::Centroid);
    }
}
