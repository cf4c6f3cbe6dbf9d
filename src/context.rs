use std::collections::HashMap;

use crate::error::{FuzzyError, Result};
use crate::expression::{Antecedent, TermRef};
use crate::model::Model;
use crate::operations::FuzzyLogic;
use crate::traits::Membership;

/// Per-call state for evaluating rule antecedents.
///
/// Many rules test the same `variable IS term` proposition, so each degree is
/// computed once per inference and memoized here. A context is created for a
/// single input snapshot and discarded afterwards.
pub struct EvaluationContext<'a> {
    model: &'a Model,
    /// Crisp value per variable id, already clamped or validated
    inputs: &'a [Option<f64>],
    memoized_degrees: HashMap<TermRef, f64>,
}

impl<'a> EvaluationContext<'a> {
    /// Create a new empty context over resolved inputs
    #[must_use]
    pub fn new(model: &'a Model, inputs: &'a [Option<f64>]) -> Self {
        Self {
            model,
            inputs,
            memoized_degrees: HashMap::new(),
        }
    }

    /// Degree of one resolved proposition
    ///
    /// # Errors
    /// Returns [`FuzzyError::MissingInput`] if the proposition's variable has
    /// no value.
    pub fn degree(&mut self, leaf: TermRef) -> Result<f64> {
        if let Some(&cached) = self.memoized_degrees.get(&leaf) {
            return Ok(cached);
        }
        let variable = &self.model.variables[leaf.variable.index()];
        let x = self
            .inputs
            .get(leaf.variable.index())
            .copied()
            .flatten()
            .ok_or_else(|| FuzzyError::missing_input(variable.name()))?;
        let degree = variable.terms()[leaf.term].membership.degree(x);
        self.memoized_degrees.insert(leaf, degree);
        Ok(degree)
    }

    /// Firing strength of an antecedent: min for AND, max for OR, `1 - x`
    /// for NOT.
    ///
    /// # Errors
    /// See [`EvaluationContext::degree`].
    pub fn evaluate(&mut self, antecedent: &Antecedent) -> Result<f64> {
        Ok(match antecedent {
            Antecedent::Term(leaf) => self.degree(*leaf)?,
            Antecedent::And(left, right) => self.evaluate(left)?.and(self.evaluate(right)?),
            Antecedent::Or(left, right) => self.evaluate(left)?.or(self.evaluate(right)?),
            Antecedent::Not(operand) => self.evaluate(operand)?.complement(),
        })
    }

    /// Number of memoized degrees
    #[must_use]
    pub fn len(&self) -> usize {
        self.memoized_degrees.len()
    }

    /// Check if nothing has been evaluated yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.memoized_degrees.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::expression::VariableId;
    use crate::{MembershipFunction, ModelBuilder, Universe, Variable};

    fn model() -> Model {
        ModelBuilder::new()
            .variable(
                Variable::antecedent("x", Universe::new(0.0, 10.0, 1.0).unwrap())
                    .with_term("low", MembershipFunction::triangular(0.0, 0.0, 10.0).unwrap())
                    .with_term("high", MembershipFunction::triangular(0.0, 10.0, 10.0).unwrap()),
            )
            .variable(
                Variable::antecedent("y", Universe::new(0.0, 1.0, 0.5).unwrap())
                    .with_term("on", MembershipFunction::singleton(1.0).unwrap()),
            )
            .variable(
                Variable::consequent("out", Universe::new(0.0, 1.0, 0.5).unwrap())
                    .with_term("any", MembershipFunction::triangular(0.0, 0.5, 1.0).unwrap()),
            )
            .build()
            .unwrap()
    }

    fn leaf(variable: usize, term: usize) -> Antecedent {
        Antecedent::Term(TermRef {
            variable: VariableId(variable),
            term,
        })
    }

    #[test]
    fn test_zadeh_connectives() {
        let model = model();
        let inputs = [Some(3.0), Some(1.0), None];
        let mut context = EvaluationContext::new(&model, &inputs);

        let low = leaf(0, 0);
        let high = leaf(0, 1);
        let low_and_high = Antecedent::And(Box::new(low.clone()), Box::new(high.clone()));
        let low_or_high = Antecedent::Or(Box::new(low.clone()), Box::new(high.clone()));
        let not_low = Antecedent::Not(Box::new(low.clone()));

        let a = context.evaluate(&low).unwrap();
        let b = context.evaluate(&high).unwrap();
        assert!((a - 0.7).abs() < 1e-12);
        assert!((b - 0.3).abs() < 1e-12);
        assert_eq!(context.evaluate(&low_and_high).unwrap(), a.min(b));
        assert_eq!(context.evaluate(&low_or_high).unwrap(), a.max(b));
        assert_eq!(context.evaluate(&not_low).unwrap(), 1.0 - a);
    }

    #[test]
    fn test_memoizes_repeated_propositions() {
        let model = model();
        let inputs = [Some(5.0), Some(1.0), None];
        let mut context = EvaluationContext::new(&model, &inputs);
        assert!(context.is_empty());

        let expr = Antecedent::Or(
            Box::new(Antecedent::And(Box::new(leaf(0, 0)), Box::new(leaf(1, 0)))),
            Box::new(leaf(0, 0)),
        );
        let strength = context.evaluate(&expr).unwrap();

        assert_eq!(strength, 0.5);
        assert_eq!(context.len(), 2);
    }

    #[test]
    fn test_missing_value() {
        let model = model();
        let inputs = [Some(5.0), None, None];
        let mut context = EvaluationContext::new(&model, &inputs);

        let leaf = TermRef {
            variable: VariableId(1),
            term: 0,
        };
        assert_eq!(context.degree(leaf), Err(FuzzyError::missing_input("y")));
    }
}
