//! Model construction.
//!
//! A [`ModelBuilder`] collects variable and rule definitions by name. Calling
//! [`ModelBuilder::build`] validates everything once, resolves every name to
//! an index and samples each consequent term on its universe. The resulting
//! [`Model`] is immutable and can be shared across threads; inference on it
//! never fails because of a misspelled variable or term.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{FuzzyError, Result};
use crate::expression::{Antecedent, TermRef, VariableId};
use crate::operations::Defuzzification;
use crate::rule::{Rule, RuleDefinition};
use crate::traits::Membership;
use crate::variable::{Variable, VariableKind};

/// Declarative description of a model.
///
/// # Example
/// ```rust
/// use mamdani_rs::{MembershipFunction, ModelBuilder, RuleDefinition, Universe, Variable};
/// use mamdani_rs::expression::is;
///
/// let model = ModelBuilder::new()
///     .variable(
///         Variable::antecedent("temperature", Universe::new(0.0, 40.0, 0.5)?)
///             .with_term("cold", MembershipFunction::trapezoidal(0.0, 0.0, 10.0, 20.0)?)
///             .with_term("hot", MembershipFunction::trapezoidal(20.0, 30.0, 40.0, 40.0)?),
///     )
///     .variable(
///         Variable::consequent("fan", Universe::new(0.0, 100.0, 1.0)?)
///             .with_term("slow", MembershipFunction::triangular(0.0, 0.0, 50.0)?)
///             .with_term("fast", MembershipFunction::triangular(50.0, 100.0, 100.0)?),
///     )
///     .rule(RuleDefinition::new("cool down", is("temperature", "hot")).then("fan", "fast"))
///     .rule(RuleDefinition::new("idle", is("temperature", "cold")).then("fan", "slow"))
///     .build()?;
///
/// assert_eq!(model.rule_count(), 2);
/// assert_eq!(model.required_inputs(), vec!["temperature"]);
/// # Ok::<(), mamdani_rs::FuzzyError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelBuilder {
    #[cfg_attr(feature = "serde", serde(default))]
    variables: Vec<Variable>,
    #[cfg_attr(feature = "serde", serde(default))]
    rules: Vec<RuleDefinition>,
}

impl ModelBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an antecedent or consequent variable.
    #[must_use]
    pub fn variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    /// Adds one rule.
    #[must_use]
    pub fn rule(mut self, rule: RuleDefinition) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several rules in order.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleDefinition>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Validates the definitions and produces an immutable model.
    ///
    /// # Errors
    /// Returns a configuration error (see [`FuzzyError::is_configuration`])
    /// for an invalid universe or membership function, a duplicate variable
    /// or term, a rule that names an unknown variable or term, uses a
    /// variable on the wrong side, has no targets, or has a weight outside
    /// [0, 1].
    pub fn build(self) -> Result<Model> {
        let variables = self.variables;

        let mut by_name = HashMap::with_capacity(variables.len());
        for (index, variable) in variables.iter().enumerate() {
            variable.validate()?;
            if by_name
                .insert(variable.name().to_string(), VariableId(index))
                .is_some()
            {
                return Err(FuzzyError::DuplicateVariable {
                    name: variable.name().to_string(),
                });
            }
        }

        let mut slot_of = vec![None; variables.len()];
        let mut outputs = Vec::new();
        for (index, variable) in variables.iter().enumerate() {
            if let VariableKind::Consequent { defuzzification } = variable.kind() {
                slot_of[index] = Some(outputs.len());
                outputs.push(OutputSlot {
                    variable: VariableId(index),
                    grid: variable.universe().points().collect(),
                    tables: variable
                        .terms()
                        .iter()
                        .map(|term| term.membership.sample(variable.universe()))
                        .collect(),
                    defuzzification,
                    inputs: Vec::new(),
                });
            }
        }

        let resolver = Resolver {
            variables: &variables,
            by_name: &by_name,
            slot_of: &slot_of,
        };
        let mut rules = Vec::with_capacity(self.rules.len());
        for definition in self.rules {
            let rule = resolver.rule(definition)?;
            for &(slot, _) in &rule.targets {
                outputs[slot].inputs.extend_from_slice(&rule.inputs);
            }
            rules.push(rule);
        }

        for output in &mut outputs {
            output.inputs.sort_unstable();
            output.inputs.dedup();
        }
        let mut required: Vec<VariableId> = rules
            .iter()
            .flat_map(|rule| rule.inputs.iter().copied())
            .collect();
        required.sort_unstable();
        required.dedup();

        debug!(
            variables = variables.len(),
            consequents = outputs.len(),
            rules = rules.len(),
            required_inputs = required.len(),
            "built fuzzy model"
        );

        Ok(Model {
            variables,
            by_name,
            rules,
            outputs,
            required,
        })
    }
}

struct Resolver<'a> {
    variables: &'a [Variable],
    by_name: &'a HashMap<String, VariableId>,
    slot_of: &'a [Option<usize>],
}

impl Resolver<'_> {
    fn rule(&self, definition: RuleDefinition) -> Result<Rule> {
        let weight = definition.weight;
        if !(0.0..=1.0).contains(&weight) {
            return Err(FuzzyError::InvalidWeight {
                rule: definition.label,
                weight,
            });
        }
        if definition.targets.is_empty() {
            return Err(FuzzyError::NoTargets {
                rule: definition.label,
            });
        }

        let antecedent = Antecedent::resolve(&definition.antecedent, &mut |name: &str, term: &str| {
            let id = self.lookup(name)?;
            let variable = &self.variables[id.0];
            if !variable.is_antecedent() {
                return Err(FuzzyError::RoleMismatch {
                    rule: definition.label.clone(),
                    name: name.to_string(),
                    expected: "antecedent",
                });
            }
            let term = variable
                .term_index(term)
                .ok_or_else(|| FuzzyError::unknown_term(name, term))?;
            Ok(TermRef { variable: id, term })
        })?;

        let mut targets = Vec::with_capacity(definition.targets.len());
        for target in &definition.targets {
            let id = self.lookup(&target.consequent)?;
            let slot = self.slot_of[id.0].ok_or_else(|| FuzzyError::RoleMismatch {
                rule: definition.label.clone(),
                name: target.consequent.clone(),
                expected: "consequent",
            })?;
            let term = self.variables[id.0]
                .term_index(&target.term)
                .ok_or_else(|| FuzzyError::unknown_term(&target.consequent, &target.term))?;
            targets.push((slot, term));
        }

        let inputs = antecedent.variables();
        Ok(Rule {
            definition,
            antecedent,
            targets,
            inputs,
        })
    }

    fn lookup(&self, name: &str) -> Result<VariableId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| FuzzyError::unknown_variable(name))
    }
}

/// Everything the engine needs for one consequent, prepared at build time.
#[derive(Debug, Clone)]
pub(crate) struct OutputSlot {
    pub(crate) variable: VariableId,
    pub(crate) grid: Vec<f64>,
    /// Each term sampled on `grid`, in term order
    pub(crate) tables: Vec<Vec<f64>>,
    pub(crate) defuzzification: Defuzzification,
    /// Antecedent variables read by any rule targeting this consequent
    pub(crate) inputs: Vec<VariableId>,
}

/// An immutable, validated fuzzy inference model.
///
/// Build one with [`ModelBuilder`]; run it with [`Model::infer`] or a
/// [`Simulation`](crate::Simulation). A model holds no per-call state, so one
/// instance can serve any number of concurrent inferences.
#[derive(Debug, Clone)]
pub struct Model {
    pub(crate) variables: Vec<Variable>,
    pub(crate) by_name: HashMap<String, VariableId>,
    pub(crate) rules: Vec<Rule>,
    pub(crate) outputs: Vec<OutputSlot>,
    pub(crate) required: Vec<VariableId>,
}

impl Model {
    /// Looks up a variable by name.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.by_name.get(name).map(|id| &self.variables[id.0])
    }

    /// All variables in declaration order.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Names of the antecedent variables in declaration order.
    #[must_use]
    pub fn antecedent_names(&self) -> Vec<&str> {
        self.variables
            .iter()
            .filter(|variable| variable.is_antecedent())
            .map(Variable::name)
            .collect()
    }

    /// Names of the consequent variables in declaration order.
    #[must_use]
    pub fn consequent_names(&self) -> Vec<&str> {
        self.outputs
            .iter()
            .map(|output| self.variables[output.variable.0].name())
            .collect()
    }

    /// Antecedents that at least one rule reads; inference requires a value
    /// for each of them. Antecedents no rule mentions are never evaluated.
    #[must_use]
    pub fn required_inputs(&self) -> Vec<&str> {
        self.required
            .iter()
            .map(|id| self.variables[id.0].name())
            .collect()
    }

    /// The rules as they were defined.
    pub fn rules(&self) -> impl Iterator<Item = &RuleDefinition> + '_ {
        self.rules.iter().map(|rule| &rule.definition)
    }

    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Sampling grid of a consequent.
    #[must_use]
    pub fn grid(&self, consequent: &str) -> Option<&[f64]> {
        let id = self.by_name.get(consequent)?;
        self.outputs
            .iter()
            .find(|output| output.variable == *id)
            .map(|output| output.grid.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::is;
    use crate::{MembershipFunction, Universe};

    fn temperature() -> Variable {
        Variable::antecedent("temperature", Universe::new(0.0, 40.0, 1.0).unwrap())
            .with_term(
                "cold",
                MembershipFunction::trapezoidal(0.0, 0.0, 10.0, 20.0).unwrap(),
            )
            .with_term(
                "hot",
                MembershipFunction::trapezoidal(20.0, 30.0, 40.0, 40.0).unwrap(),
            )
    }

    fn fan() -> Variable {
        Variable::consequent("fan", Universe::new(0.0, 10.0, 1.0).unwrap())
            .with_term("slow", MembershipFunction::triangular(0.0, 0.0, 5.0).unwrap())
            .with_term("fast", MembershipFunction::triangular(5.0, 10.0, 10.0).unwrap())
    }

    fn builder() -> ModelBuilder {
        ModelBuilder::new().variable(temperature()).variable(fan())
    }

    #[test]
    fn test_build_resolves_names() {
        let model = builder()
            .rule(RuleDefinition::new("r1", is("temperature", "hot")).then("fan", "fast"))
            .build()
            .unwrap();

        let rule = &model.rules[0];
        assert_eq!(
            rule.antecedent,
            Antecedent::Term(TermRef {
                variable: VariableId(0),
                term: 1
            })
        );
        assert_eq!(rule.targets, vec![(0, 1)]);
        assert_eq!(rule.inputs, vec![VariableId(0)]);
        assert_eq!(model.outputs[0].inputs, vec![VariableId(0)]);
        assert_eq!(model.outputs[0].tables[1].len(), 11);
    }

    #[test]
    fn test_unknown_variable() {
        let err = builder()
            .rule(RuleDefinition::new("r1", is("humidity", "high")).then("fan", "fast"))
            .build()
            .unwrap_err();
        assert_eq!(err, FuzzyError::unknown_variable("humidity"));
    }

    #[test]
    fn test_unknown_term() {
        let err = builder()
            .rule(RuleDefinition::new("r1", is("temperature", "warm")).then("fan", "fast"))
            .build()
            .unwrap_err();
        assert_eq!(err, FuzzyError::unknown_term("temperature", "warm"));

        let err = builder()
            .rule(RuleDefinition::new("r2", is("temperature", "hot")).then("fan", "turbo"))
            .build()
            .unwrap_err();
        assert_eq!(err, FuzzyError::unknown_term("fan", "turbo"));
    }

    #[test]
    fn test_role_mismatch() {
        let err = builder()
            .rule(RuleDefinition::new("backwards", is("fan", "fast")).then("fan", "slow"))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            FuzzyError::RoleMismatch {
                expected: "antecedent",
                ..
            }
        ));

        let err = builder()
            .rule(
                RuleDefinition::new("sideways", is("temperature", "hot"))
                    .then("temperature", "cold"),
            )
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            FuzzyError::RoleMismatch {
                expected: "consequent",
                ..
            }
        ));
    }

    #[test]
    fn test_rule_shape_errors() {
        let err = builder()
            .rule(RuleDefinition::new("empty", is("temperature", "hot")))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            FuzzyError::NoTargets {
                rule: "empty".into()
            }
        );

        let err = builder()
            .rule(
                RuleDefinition::new("heavy", is("temperature", "hot"))
                    .then("fan", "fast")
                    .with_weight(1.5),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, FuzzyError::InvalidWeight { .. }));

        let err = builder()
            .rule(
                RuleDefinition::new("nan", is("temperature", "hot"))
                    .then("fan", "fast")
                    .with_weight(f64::NAN),
            )
            .build()
            .unwrap_err();
        assert!(matches!(err, FuzzyError::InvalidWeight { .. }));
    }

    #[test]
    fn test_duplicate_variable() {
        let err = builder().variable(temperature()).build().unwrap_err();
        assert_eq!(
            err,
            FuzzyError::DuplicateVariable {
                name: "temperature".into()
            }
        );
    }

    #[test]
    fn test_unused_antecedent_not_required() {
        let thallium = Variable::antecedent("thallium", Universe::new(3.0, 7.0, 1.0).unwrap())
            .with_term("normal", MembershipFunction::singleton(3.0).unwrap());
        let model = builder()
            .variable(thallium)
            .rule(RuleDefinition::new("r1", is("temperature", "cold")).then("fan", "slow"))
            .build()
            .unwrap();

        assert_eq!(model.antecedent_names(), vec!["temperature", "thallium"]);
        assert_eq!(model.required_inputs(), vec!["temperature"]);
        assert_eq!(model.consequent_names(), vec!["fan"]);
    }

    #[test]
    fn test_grid_lookup() {
        let model = builder().build().unwrap();
        assert_eq!(model.grid("fan").map(<[f64]>::len), Some(11));
        assert!(model.grid("temperature").is_none());
        assert!(model.grid("missing").is_none());
    }

    #[test]
    fn test_model_is_shareable() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<Model>();
    }
}
