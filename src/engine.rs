//! Inference: fuzzify, fire rules, clip, aggregate and defuzzify.
//!
//! [`infer`] is a pure function of a [`Model`] and an [`InputSnapshot`]. It
//! allocates its own working state, never touches the model mutably and
//! performs no I/O, so any number of calls may run concurrently against the
//! same model.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::context::EvaluationContext;
use crate::error::{FuzzyError, Result};
use crate::expression::VariableId;
use crate::model::Model;
use crate::operations::implication::aggregate_clipped;

/// Crisp input values keyed by antecedent name.
///
/// # Example
/// ```rust
/// use mamdani_rs::InputSnapshot;
///
/// let snapshot = InputSnapshot::new().with("age", 75.0).with("sex", 1.0);
/// assert_eq!(snapshot.get("age"), Some(75.0));
/// assert_eq!(snapshot.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    values: HashMap<String, f64>,
}

impl InputSnapshot {
    /// An empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, replacing any previous one for the same name.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.set(name, value);
        self
    }

    /// Sets a value in place.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Value given for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Number of values given.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates `(name, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values.iter().map(|(name, &value)| (name.as_str(), value))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for InputSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

/// What to do with an input outside its universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfDomainPolicy {
    /// Clamp to the nearest bound, log a warning and record an
    /// [`InputAdjustment`] in the result.
    #[default]
    Clamp,
    /// Refuse the value. Consequents whose rules read the variable report
    /// [`Outcome::OutOfDomain`]; unrelated consequents are still computed.
    Reject,
}

/// Inference settings.
///
/// # Example
/// ```rust
/// use mamdani_rs::{InferenceConfig, OutOfDomainPolicy};
///
/// let strict = InferenceConfig::default().with_out_of_domain(OutOfDomainPolicy::Reject);
/// assert_eq!(strict.out_of_domain, OutOfDomainPolicy::Reject);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InferenceConfig {
    pub out_of_domain: OutOfDomainPolicy,
}

impl InferenceConfig {
    #[must_use]
    pub fn with_out_of_domain(mut self, policy: OutOfDomainPolicy) -> Self {
        self.out_of_domain = policy;
        self
    }
}

/// An input that was clamped into its universe.
#[derive(Debug, Clone, PartialEq)]
pub struct InputAdjustment {
    pub variable: String,
    pub given: f64,
    pub used: f64,
}

/// Firing strength of one rule in one inference.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleActivation {
    pub label: String,
    /// `None` when the rule was skipped because it reads a rejected input
    pub strength: Option<f64>,
}

/// Result for one consequent.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A crisp value
    Crisp(f64),
    /// No rule contributed; the aggregated set is zero everywhere
    Undefined,
    /// A rule input for this consequent was rejected
    OutOfDomain {
        variable: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl Outcome {
    /// The crisp value, if there is one.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Outcome::Crisp(value) => Some(*value),
            _ => None,
        }
    }
}

/// One consequent's output with its aggregated fuzzy set.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsequentOutput {
    pub name: String,
    pub outcome: Outcome,
    /// Grid of the consequent's universe
    pub grid: Vec<f64>,
    /// Aggregated degree at each grid point
    pub aggregated: Vec<f64>,
}

/// Everything produced by one inference call.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceResult {
    outputs: Vec<ConsequentOutput>,
    activations: Vec<RuleActivation>,
    adjustments: Vec<InputAdjustment>,
}

impl InferenceResult {
    /// Crisp value for `consequent`.
    ///
    /// # Errors
    /// - [`FuzzyError::UnknownOutput`] if the model has no such consequent
    /// - [`FuzzyError::UndefinedDefuzzification`] if no rule fired for it
    /// - [`FuzzyError::OutOfDomain`] if one of its inputs was rejected
    pub fn crisp(&self, consequent: &str) -> Result<f64> {
        let output = self.output(consequent).ok_or_else(|| FuzzyError::UnknownOutput {
            name: consequent.to_string(),
        })?;
        match &output.outcome {
            Outcome::Crisp(value) => Ok(*value),
            Outcome::Undefined => Err(FuzzyError::undefined(consequent)),
            Outcome::OutOfDomain {
                variable,
                value,
                min,
                max,
            } => Err(FuzzyError::OutOfDomain {
                variable: variable.clone(),
                value: *value,
                min: *min,
                max: *max,
            }),
        }
    }

    /// Output for `consequent`, including its aggregated set.
    #[must_use]
    pub fn output(&self, consequent: &str) -> Option<&ConsequentOutput> {
        self.outputs.iter().find(|output| output.name == consequent)
    }

    /// Outputs in consequent declaration order.
    #[must_use]
    pub fn outputs(&self) -> &[ConsequentOutput] {
        &self.outputs
    }

    /// Firing strength of every rule, in rule order.
    #[must_use]
    pub fn activations(&self) -> &[RuleActivation] {
        &self.activations
    }

    /// Inputs that were clamped under [`OutOfDomainPolicy::Clamp`].
    #[must_use]
    pub fn adjustments(&self) -> &[InputAdjustment] {
        &self.adjustments
    }
}

/// Runs one inference.
///
/// # Errors
/// Returns [`FuzzyError::MissingInput`] if an antecedent read by any rule has
/// no value and [`FuzzyError::NonFiniteInput`] for NaN or infinite values.
/// Both abort the call. Out-of-domain inputs and consequents without firing
/// rules are reported per consequent in the result instead.
pub fn infer(
    model: &Model,
    snapshot: &InputSnapshot,
    config: &InferenceConfig,
) -> Result<InferenceResult> {
    for (name, _) in snapshot.iter() {
        if model.variable(name).is_none_or(|variable| !variable.is_antecedent()) {
            debug!(input = name, "ignoring input that is not an antecedent");
        }
    }

    let mut inputs: Vec<Option<f64>> = vec![None; model.variables.len()];
    let mut adjustments = Vec::new();
    let mut rejected: Vec<(VariableId, f64)> = Vec::new();
    for &id in &model.required {
        let variable = &model.variables[id.index()];
        let given = snapshot
            .get(variable.name())
            .ok_or_else(|| FuzzyError::missing_input(variable.name()))?;
        match variable.check_input(given) {
            Ok(()) => inputs[id.index()] = Some(given),
            Err(FuzzyError::OutOfDomain { .. }) => match config.out_of_domain {
                OutOfDomainPolicy::Clamp => {
                    let used = variable.universe().clamp(given);
                    warn!(
                        variable = variable.name(),
                        given, used, "input outside universe, clamping"
                    );
                    adjustments.push(InputAdjustment {
                        variable: variable.name().to_string(),
                        given,
                        used,
                    });
                    inputs[id.index()] = Some(used);
                }
                OutOfDomainPolicy::Reject => {
                    debug!(variable = variable.name(), given, "input outside universe, rejecting");
                    rejected.push((id, given));
                }
            },
            Err(err) => return Err(err),
        }
    }
    let is_rejected = |id: &VariableId| rejected.iter().any(|(r, _)| r == id);

    let mut aggregates: Vec<Vec<f64>> = model
        .outputs
        .iter()
        .map(|output| vec![0.0; output.grid.len()])
        .collect();
    let mut activations = Vec::with_capacity(model.rules.len());
    let mut context = EvaluationContext::new(model, &inputs);

    for rule in &model.rules {
        if rule.inputs.iter().any(is_rejected) {
            activations.push(RuleActivation {
                label: rule.label().to_string(),
                strength: None,
            });
            continue;
        }
        let strength = context.evaluate(&rule.antecedent)? * rule.weight();
        trace!(rule = rule.label(), strength, "rule activation");
        activations.push(RuleActivation {
            label: rule.label().to_string(),
            strength: Some(strength),
        });
        for &(slot, term) in &rule.targets {
            aggregate_clipped(&mut aggregates[slot], strength, &model.outputs[slot].tables[term]);
        }
    }

    let outputs = model
        .outputs
        .iter()
        .zip(aggregates)
        .map(|(slot, aggregated)| {
            let name = model.variables[slot.variable.index()].name().to_string();
            let outcome = if let Some(&(id, value)) =
                rejected.iter().find(|(id, _)| slot.inputs.contains(id))
            {
                let variable = &model.variables[id.index()];
                Outcome::OutOfDomain {
                    variable: variable.name().to_string(),
                    value,
                    min: variable.universe().min(),
                    max: variable.universe().max(),
                }
            } else if let Some(value) = slot.defuzzification.apply(&slot.grid, &aggregated) {
                Outcome::Crisp(value)
            } else {
                debug!(consequent = %name, "no rule fired, output undefined");
                Outcome::Undefined
            };
            ConsequentOutput {
                name,
                outcome,
                grid: slot.grid.clone(),
                aggregated,
            }
        })
        .collect();

    Ok(InferenceResult {
        outputs,
        activations,
        adjustments,
    })
}

impl Model {
    /// Runs one inference with the default [`InferenceConfig`].
    ///
    /// # Errors
    /// See [`infer`].
    pub fn infer(&self, snapshot: &InputSnapshot) -> Result<InferenceResult> {
        infer(self, snapshot, &InferenceConfig::default())
    }

    /// Runs one inference with an explicit configuration.
    ///
    /// # Errors
    /// See [`infer`].
    pub fn infer_with(
        &self,
        snapshot: &InputSnapshot,
        config: &InferenceConfig,
    ) -> Result<InferenceResult> {
        infer(self, snapshot, config)
    }

    /// Runs an inference for every snapshot, in order.
    ///
    /// Each element fails or succeeds on its own.
    pub fn infer_batch(
        &self,
        snapshots: &[InputSnapshot],
        config: &InferenceConfig,
    ) -> Vec<Result<InferenceResult>> {
        snapshots
            .iter()
            .map(|snapshot| infer(self, snapshot, config))
            .collect()
    }

    /// Like [`Model::infer_batch`], spread over the rayon thread pool.
    ///
    /// Results keep the order of `snapshots`.
    #[cfg(feature = "parallel")]
    pub fn infer_batch_par(
        &self,
        snapshots: &[InputSnapshot],
        config: &InferenceConfig,
    ) -> Vec<Result<InferenceResult>> {
        use rayon::prelude::*;

        snapshots
            .par_iter()
            .map(|snapshot| infer(self, snapshot, config))
            .collect()
    }

    /// Starts a stateful [`Simulation`] over this model.
    #[must_use]
    pub fn simulation(&self) -> Simulation<'_> {
        Simulation::new(self)
    }
}

/// Set inputs one by one, compute, then read outputs.
///
/// # Example
/// ```rust
/// use mamdani_rs::{MembershipFunction, ModelBuilder, RuleDefinition, Universe, Variable};
/// use mamdani_rs::expression::is;
///
/// let model = ModelBuilder::new()
///     .variable(
///         Variable::antecedent("service", Universe::new(0.0, 10.0, 1.0)?)
///             .with_term("good", MembershipFunction::triangular(0.0, 10.0, 10.0)?),
///     )
///     .variable(
///         Variable::consequent("tip", Universe::new(0.0, 30.0, 1.0)?)
///             .with_term("generous", MembershipFunction::triangular(10.0, 20.0, 30.0)?),
///     )
///     .rule(RuleDefinition::new("reward", is("service", "good")).then("tip", "generous"))
///     .build()?;
///
/// let mut simulation = model.simulation();
/// simulation.set_input("service", 8.0)?;
/// simulation.compute()?;
/// assert!((simulation.output("tip")? - 20.0).abs() < 1e-9);
/// # Ok::<(), mamdani_rs::FuzzyError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Simulation<'m> {
    model: &'m Model,
    config: InferenceConfig,
    inputs: InputSnapshot,
    result: Option<InferenceResult>,
}

impl<'m> Simulation<'m> {
    #[must_use]
    pub fn new(model: &'m Model) -> Self {
        Self {
            model,
            config: InferenceConfig::default(),
            inputs: InputSnapshot::new(),
            result: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: InferenceConfig) -> Self {
        self.config = config;
        self
    }

    /// Stores an input value. Any previous result is discarded.
    ///
    /// # Errors
    /// Returns [`FuzzyError::UnknownVariable`] unless `name` is an antecedent
    /// of the model.
    pub fn set_input(&mut self, name: &str, value: f64) -> Result<()> {
        match self.model.variable(name) {
            Some(variable) if variable.is_antecedent() => {
                self.inputs.set(name, value);
                self.result = None;
                Ok(())
            }
            _ => Err(FuzzyError::unknown_variable(name)),
        }
    }

    /// Runs inference on the stored inputs.
    ///
    /// # Errors
    /// See [`infer`]. On error the previous result stays cleared.
    pub fn compute(&mut self) -> Result<&InferenceResult> {
        self.result = None;
        let result = infer(self.model, &self.inputs, &self.config)?;
        Ok(self.result.insert(result))
    }

    /// Crisp value of a consequent from the last [`Simulation::compute`].
    ///
    /// # Errors
    /// Returns [`FuzzyError::NotComputed`] before a successful compute,
    /// otherwise see [`InferenceResult::crisp`].
    pub fn output(&self, name: &str) -> Result<f64> {
        self.result.as_ref().ok_or(FuzzyError::NotComputed)?.crisp(name)
    }

    /// Last successful result, if any.
    #[must_use]
    pub fn result(&self) -> Option<&InferenceResult> {
        self.result.as_ref()
    }

    /// Clears inputs and the last result.
    pub fn reset(&mut self) {
        self.inputs = InputSnapshot::new();
        self.result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::is;
    use crate::{MembershipFunction, ModelBuilder, RuleDefinition, Universe, Variable};

    /// Two inputs, two outputs; `fan` reads only `temperature`, `light` only `lux`.
    fn model() -> Model {
        ModelBuilder::new()
            .variable(
                Variable::antecedent("temperature", Universe::new(0.0, 40.0, 1.0).unwrap())
                    .with_term(
                        "cold",
                        MembershipFunction::trapezoidal(0.0, 0.0, 10.0, 20.0).unwrap(),
                    )
                    .with_term(
                        "hot",
                        MembershipFunction::trapezoidal(20.0, 30.0, 40.0, 40.0).unwrap(),
                    ),
            )
            .variable(
                Variable::antecedent("lux", Universe::new(0.0, 100.0, 1.0).unwrap())
                    .with_term("dark", MembershipFunction::triangular(0.0, 0.0, 50.0).unwrap()),
            )
            .variable(
                Variable::consequent("fan", Universe::new(0.0, 10.0, 0.5).unwrap())
                    .with_term("slow", MembershipFunction::triangular(0.0, 0.0, 5.0).unwrap())
                    .with_term("fast", MembershipFunction::triangular(5.0, 10.0, 10.0).unwrap()),
            )
            .variable(
                Variable::consequent("light", Universe::new(0.0, 10.0, 0.5).unwrap())
                    .with_term("on", MembershipFunction::triangular(0.0, 5.0, 10.0).unwrap()),
            )
            .rule(RuleDefinition::new("cool", is("temperature", "hot")).then("fan", "fast"))
            .rule(RuleDefinition::new("rest", is("temperature", "cold")).then("fan", "slow"))
            .rule(RuleDefinition::new("lamp", is("lux", "dark")).then("light", "on"))
            .build()
            .unwrap()
    }

    fn snapshot(temperature: f64, lux: f64) -> InputSnapshot {
        InputSnapshot::new()
            .with("temperature", temperature)
            .with("lux", lux)
    }

    #[test]
    fn test_symmetric_set_has_central_centroid() {
        let result = model().infer(&snapshot(35.0, 0.0)).unwrap();
        assert!((result.crisp("light").unwrap() - 5.0).abs() < 1e-9);
        let fan = result.crisp("fan").unwrap();
        assert!(fan > 5.0 && fan <= 10.0);
    }

    #[test]
    fn test_undefined_when_no_rule_fires() {
        let model = ModelBuilder::new()
            .variable(
                Variable::antecedent("x", Universe::new(0.0, 10.0, 1.0).unwrap())
                    .with_term("high", MembershipFunction::triangular(8.0, 10.0, 10.0).unwrap()),
            )
            .variable(
                Variable::consequent("y", Universe::new(0.0, 1.0, 0.1).unwrap())
                    .with_term("on", MembershipFunction::triangular(0.0, 1.0, 1.0).unwrap()),
            )
            .rule(RuleDefinition::new("only", is("x", "high")).then("y", "on"))
            .build()
            .unwrap();

        let result = model.infer(&InputSnapshot::new().with("x", 2.0)).unwrap();
        assert_eq!(result.output("y").unwrap().outcome, Outcome::Undefined);
        assert_eq!(result.crisp("y"), Err(FuzzyError::undefined("y")));
        assert!(result.output("y").unwrap().aggregated.iter().all(|&d| d == 0.0));
    }

    #[test]
    fn test_clamp_records_adjustment() {
        let result = model().infer(&snapshot(55.0, 10.0)).unwrap();
        assert_eq!(
            result.adjustments(),
            &[InputAdjustment {
                variable: "temperature".into(),
                given: 55.0,
                used: 40.0,
            }]
        );
        assert!(result.crisp("fan").is_ok());
    }

    #[test]
    fn test_reject_only_affects_dependent_outputs() {
        let config = InferenceConfig::default().with_out_of_domain(OutOfDomainPolicy::Reject);
        let result = model().infer_with(&snapshot(-5.0, 0.0), &config).unwrap();

        assert!(matches!(
            result.crisp("fan"),
            Err(FuzzyError::OutOfDomain { ref variable, .. }) if variable == "temperature"
        ));
        assert!((result.crisp("light").unwrap() - 5.0).abs() < 1e-9);
        assert!(result.adjustments().is_empty());

        let skipped: Vec<_> = result
            .activations()
            .iter()
            .filter(|activation| activation.strength.is_none())
            .map(|activation| activation.label.as_str())
            .collect();
        assert_eq!(skipped, vec!["cool", "rest"]);
    }

    #[test]
    fn test_missing_and_non_finite_inputs_abort() {
        let model = model();
        let only_temperature = InputSnapshot::new().with("temperature", 20.0);
        assert_eq!(model.infer(&only_temperature), Err(FuzzyError::missing_input("lux")));

        let err = model.infer(&snapshot(f64::INFINITY, 0.0)).unwrap_err();
        assert!(matches!(err, FuzzyError::NonFiniteInput { .. }));
    }

    #[test]
    fn test_extra_inputs_are_ignored() {
        let model = model();
        let plain = model.infer(&snapshot(25.0, 30.0)).unwrap();
        let noisy = model
            .infer(&snapshot(25.0, 30.0).with("humidity", 80.0).with("fan", 3.0))
            .unwrap();
        assert_eq!(plain, noisy);
    }

    #[test]
    fn test_activations_follow_rule_order() {
        let result = model().infer(&snapshot(25.0, 25.0)).unwrap();
        let labels: Vec<_> = result
            .activations()
            .iter()
            .map(|activation| activation.label.as_str())
            .collect();
        assert_eq!(labels, vec!["cool", "rest", "lamp"]);
        assert_eq!(result.activations()[0].strength, Some(0.5));
        assert_eq!(result.activations()[1].strength, Some(0.0));
        assert_eq!(result.activations()[2].strength, Some(0.5));
    }

    #[test]
    fn test_unknown_output() {
        let result = model().infer(&snapshot(25.0, 25.0)).unwrap();
        assert!(matches!(result.crisp("temperature"), Err(FuzzyError::UnknownOutput { .. })));
    }

    #[test]
    fn test_batch_keeps_order_and_isolates_errors() {
        let model = model();
        let snapshots = vec![snapshot(35.0, 0.0), InputSnapshot::new(), snapshot(5.0, 0.0)];
        let results = model.infer_batch(&snapshots, &InferenceConfig::default());

        assert_eq!(results.len(), 3);
        assert_eq!(results[0], model.infer(&snapshots[0]));
        assert!(results[1].is_err());
        assert_eq!(results[2], model.infer(&snapshots[2]));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_batch_matches_sequential() {
        let model = model();
        let snapshots: Vec<_> = (0..64)
            .map(|i| snapshot(f64::from(i) * 0.6, f64::from(i)))
            .collect();
        let config = InferenceConfig::default();
        assert_eq!(
            model.infer_batch_par(&snapshots, &config),
            model.infer_batch(&snapshots, &config)
        );
    }

    #[test]
    fn test_simulation_lifecycle() {
        let model = model();
        let mut simulation = model.simulation();

        assert_eq!(simulation.output("fan"), Err(FuzzyError::NotComputed));
        assert!(simulation.set_input("humidity", 1.0).is_err());
        assert!(simulation.set_input("fan", 1.0).is_err());

        simulation.set_input("temperature", 35.0).unwrap();
        assert!(simulation.compute().is_err());

        simulation.set_input("lux", 0.0).unwrap();
        simulation.compute().unwrap();
        assert!((simulation.output("light").unwrap() - 5.0).abs() < 1e-9);

        simulation.set_input("lux", 10.0).unwrap();
        assert_eq!(simulation.output("light"), Err(FuzzyError::NotComputed));

        simulation.reset();
        assert!(simulation.result().is_none());
        assert!(simulation.compute().is_err());
    }
}
