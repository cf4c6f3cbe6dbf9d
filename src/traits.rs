use crate::Universe;

/// Anything that assigns a membership degree in [0, 1] to a crisp point.
///
/// Consequent terms are sampled once on their universe when a model is built;
/// antecedent terms are evaluated directly at the crisp input.
pub trait Membership {
    /// Degree of membership of `x`.
    fn degree(&self, x: f64) -> f64;

    /// Samples the function on every grid point of `universe`.
    fn sample(&self, universe: &Universe) -> Vec<f64> {
        universe.points().map(|x| self.degree(x)).collect()
    }
}
