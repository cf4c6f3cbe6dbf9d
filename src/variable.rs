use crate::error::{FuzzyError, Result};
use crate::membership::MembershipFunction;
use crate::operations::Defuzzification;
use crate::traits::Membership;
use crate::universe::Universe;

/// Whether a variable feeds rule conditions or receives rule conclusions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "role", rename_all = "snake_case"))]
pub enum VariableKind {
    /// Input variable
    Antecedent,
    /// Output variable, reduced to a crisp value with `defuzzification`
    Consequent { defuzzification: Defuzzification },
}

/// A named linguistic term.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Term {
    pub label: String,
    pub membership: MembershipFunction,
}

/// A linguistic variable: a universe plus its labelled membership functions.
///
/// # Example
/// ```rust
/// use mamdani_rs::{MembershipFunction, Universe, Variable};
///
/// let age = Variable::antecedent("age", Universe::new(0.0, 100.0, 1.0)?)
///     .with_term("young", MembershipFunction::trapezoidal(0.0, 0.0, 29.0, 38.0)?)
///     .with_term("mild", MembershipFunction::triangular(33.0, 38.0, 45.0)?);
///
/// let degrees = age.fuzzify(35.0)?;
/// assert_eq!(degrees[0].0, "young");
/// assert!((degrees[0].1 - 1.0 / 3.0).abs() < 1e-12);
/// assert!((degrees[1].1 - 0.4).abs() < 1e-12);
/// # Ok::<(), mamdani_rs::FuzzyError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    name: String,
    universe: Universe,
    kind: VariableKind,
    terms: Vec<Term>,
}

impl Variable {
    /// Creates an input variable with no terms.
    pub fn antecedent(name: impl Into<String>, universe: Universe) -> Self {
        Self {
            name: name.into(),
            universe,
            kind: VariableKind::Antecedent,
            terms: Vec::new(),
        }
    }

    /// Creates an output variable defuzzified by centroid.
    pub fn consequent(name: impl Into<String>, universe: Universe) -> Self {
        Self::consequent_with(name, universe, Defuzzification::Centroid)
    }

    /// Creates an output variable with an explicit defuzzification method.
    pub fn consequent_with(
        name: impl Into<String>,
        universe: Universe,
        defuzzification: Defuzzification,
    ) -> Self {
        Self {
            name: name.into(),
            universe,
            kind: VariableKind::Consequent { defuzzification },
            terms: Vec::new(),
        }
    }

    /// Adds a term. Duplicate labels are reported when the model is built.
    #[must_use]
    pub fn with_term(mut self, label: impl Into<String>, membership: MembershipFunction) -> Self {
        self.terms.push(Term {
            label: label.into(),
            membership,
        });
        self
    }

    /// Name used by rules and input snapshots.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Grid the terms are defined over.
    #[must_use]
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Whether the variable is an input or an output.
    #[must_use]
    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    #[must_use]
    pub fn is_antecedent(&self) -> bool {
        matches!(self.kind, VariableKind::Antecedent)
    }

    /// Terms in registration order.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Position of the term labelled `label`.
    #[must_use]
    pub fn term_index(&self, label: &str) -> Option<usize> {
        self.terms.iter().position(|term| term.label == label)
    }

    /// Degree of every term at `x`, in declaration order.
    ///
    /// Degrees are not normalized and need not sum to 1.
    ///
    /// # Errors
    /// Returns [`FuzzyError::NonFiniteInput`] for NaN or infinite `x` and
    /// [`FuzzyError::OutOfDomain`] if `x` lies outside the universe.
    pub fn fuzzify(&self, x: f64) -> Result<Vec<(&str, f64)>> {
        self.check_input(x)?;
        Ok(self
            .terms
            .iter()
            .map(|term| (term.label.as_str(), term.membership.degree(x)))
            .collect())
    }

    pub(crate) fn check_input(&self, x: f64) -> Result<()> {
        if !x.is_finite() {
            return Err(FuzzyError::NonFiniteInput {
                variable: self.name.clone(),
                value: x,
            });
        }
        if !self.universe.contains(x) {
            return Err(FuzzyError::OutOfDomain {
                variable: self.name.clone(),
                value: x,
                min: self.universe.min(),
                max: self.universe.max(),
            });
        }
        Ok(())
    }

    /// Validates the universe, each membership function and label uniqueness.
    pub(crate) fn validate(&self) -> Result<()> {
        self.universe.validate()?;
        for (i, term) in self.terms.iter().enumerate() {
            term.membership.validate()?;
            if self.terms[..i].iter().any(|t| t.label == term.label) {
                return Err(FuzzyError::DuplicateTerm {
                    variable: self.name.clone(),
                    term: term.label.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn chest_pain() -> Variable {
        Variable::antecedent("chest_pain", Universe::new(1.0, 4.0, 1.0).unwrap())
            .with_term("typical_anginal", MembershipFunction::singleton(1.0).unwrap())
            .with_term("atypical_anginal", MembershipFunction::singleton(2.0).unwrap())
            .with_term("non_anginal_pain", MembershipFunction::singleton(3.0).unwrap())
            .with_term("asymptomatic", MembershipFunction::singleton(4.0).unwrap())
    }

    #[test]
    fn test_fuzzify_categorical() {
        let chest_pain = chest_pain();
        let degrees = chest_pain.fuzzify(4.0).unwrap();
        assert_eq!(
            degrees,
            vec![
                ("typical_anginal", 0.0),
                ("atypical_anginal", 0.0),
                ("non_anginal_pain", 0.0),
                ("asymptomatic", 1.0),
            ]
        );
    }

    #[test]
    fn test_fuzzify_is_not_normalized() {
        let universe = Universe::new(0.0, 160.0, 1.0).unwrap();
        let high = MembershipFunction::trapezoidal(105.0, 105.0, 120.0, 160.0).unwrap();
        let normal = MembershipFunction::trapezoidal(0.0, 105.0, 120.0, 120.0).unwrap();
        let blood_sugar = Variable::antecedent("blood_sugar", universe)
            .with_term("true", high)
            .with_term("false", normal);

        let degrees = blood_sugar.fuzzify(110.0).unwrap();
        let total: f64 = degrees.iter().map(|(_, d)| d).sum();
        assert_eq!(total, 2.0);
    }

    #[test]
    fn test_fuzzify_out_of_domain() {
        let err = chest_pain().fuzzify(5.0).unwrap_err();
        assert_eq!(
            err,
            FuzzyError::OutOfDomain {
                variable: "chest_pain".into(),
                value: 5.0,
                min: 1.0,
                max: 4.0,
            }
        );
        assert!(matches!(
            chest_pain().fuzzify(f64::NAN),
            Err(FuzzyError::NonFiniteInput { .. })
        ));
    }

    #[test]
    fn test_duplicate_terms_rejected() {
        let variable =
            chest_pain().with_term("asymptomatic", MembershipFunction::singleton(4.0).unwrap());
        assert_eq!(
            variable.validate(),
            Err(FuzzyError::DuplicateTerm {
                variable: "chest_pain".into(),
                term: "asymptomatic".into(),
            })
        );
    }

    #[test]
    fn test_consequent_kind() {
        let health = Variable::consequent("health", Universe::new(0.0, 4.0, 0.01).unwrap());
        assert!(!health.is_antecedent());
        assert_eq!(
            health.kind(),
            VariableKind::Consequent {
                defuzzification: Defuzzification::Centroid
            }
        );
        assert_eq!(health.term_index("healthy"), None);
    }
}
