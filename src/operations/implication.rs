//! Min-implication and max-aggregation over sampled consequent sets.

use super::logical::FuzzyLogic;

/// Clips a sampled term at `strength`: `min(strength, term[i])` per point.
///
/// # Example
/// ```rust
/// use mamdani_rs::operations::implication::clip;
///
/// assert_eq!(clip(0.4, &[0.0, 0.5, 1.0]), vec![0.0, 0.4, 0.4]);
/// ```
#[must_use]
pub fn clip(strength: f64, term: &[f64]) -> Vec<f64> {
    term.iter().map(|&degree| strength.and(degree)).collect()
}

/// Folds a clipped term into `aggregate` with the pointwise maximum.
///
/// Max is commutative and associative, so the aggregate does not depend on
/// the order in which rules are folded in. A zero strength leaves the
/// aggregate untouched.
pub fn aggregate_clipped(aggregate: &mut [f64], strength: f64, term: &[f64]) {
    debug_assert_eq!(aggregate.len(), term.len());
    if strength <= 0.0 {
        return;
    }
    for (acc, &degree) in aggregate.iter_mut().zip(term) {
        *acc = acc.or(strength.and(degree));
    }
}
