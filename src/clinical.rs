//! Heart disease risk model.
//!
//! Ten clinical measurements feed a single `health` consequent on `[0, 4]`
//! through 49 rules. The thallium scan is not part of the model; its rules are
//! intentionally left out until the variable is defined.
//!
//! | input                | unit / coding                       | universe     |
//! |----------------------|-------------------------------------|--------------|
//! | `age`                | years                               | `[0, 100]`   |
//! | `ecg`                | resting ECG, 0 normal .. 2 LVH      | `[-0.5, 2.5]`|
//! | `blood_pressure`     | mmHg                                | `[100, 300]` |
//! | `blood_sugar`        | mg/dL                               | `[0, 160]`   |
//! | `cholesterol`        | mg/dL                               | `[100, 400]` |
//! | `maximum_heart_rate` | bpm                                 | `[0, 500]`   |
//! | `old_peak`           | ST depression                       | `[0, 6]`     |
//! | `sex`                | 0 male, 1 female                    | `[0, 1]`     |
//! | `chest_pain`         | 1 typical .. 4 asymptomatic         | `[1, 4]`     |
//! | `exercise`           | exercise angina: 0 true, 1 false    | `[0, 1]`     |

use crate::classifier::{RangeClassifier, RiskLevel};
use crate::error::Result;
use crate::expression::is;
use crate::membership::MembershipFunction;
use crate::model::{Model, ModelBuilder};
use crate::rule::RuleDefinition;
use crate::universe::Universe;
use crate::variable::Variable;

/// Name of the single consequent.
pub const HEALTH: &str = "health";

fn tri(a: f64, b: f64, c: f64) -> Result<MembershipFunction> {
    MembershipFunction::triangular(a, b, c)
}

fn trap(a: f64, b: f64, c: f64, d: f64) -> Result<MembershipFunction> {
    MembershipFunction::trapezoidal(a, b, c, d)
}

fn point(x: f64) -> Result<MembershipFunction> {
    MembershipFunction::singleton(x)
}

/// The ten antecedents and the `health` consequent, in declaration order.
///
/// # Errors
/// Only if one of the built-in definitions were invalid.
pub fn heart_disease_variables() -> Result<Vec<Variable>> {
    Ok(vec![
        Variable::antecedent("ecg", Universe::new(-0.5, 2.5, 0.01)?)
            .with_term("normal", trap(-0.5, -0.5, 0.0, 0.4)?)
            .with_term("abnormal", tri(0.2, 1.0, 1.8)?)
            .with_term("hypertrophy", trap(1.4, 1.9, 2.5, 2.5)?),
        Variable::antecedent("age", Universe::new(0.0, 100.0, 1.0)?)
            .with_term("young", trap(0.0, 0.0, 29.0, 38.0)?)
            .with_term("mild", tri(33.0, 38.0, 45.0)?)
            .with_term("old", tri(40.0, 48.0, 58.0)?)
            .with_term("very_old", trap(52.0, 60.0, 80.0, 80.0)?),
        Variable::antecedent("blood_pressure", Universe::new(100.0, 300.0, 1.0)?)
            .with_term("low", trap(100.0, 100.0, 111.0, 134.0)?)
            .with_term("medium", tri(127.0, 139.0, 153.0)?)
            .with_term("high", tri(153.0, 157.0, 172.0)?)
            .with_term("very_high", trap(154.0, 171.0, 300.0, 300.0)?),
        Variable::antecedent("blood_sugar", Universe::new(0.0, 160.0, 1.0)?)
            .with_term("true", trap(105.0, 105.0, 120.0, 160.0)?)
            .with_term("false", trap(0.0, 105.0, 120.0, 120.0)?),
        Variable::antecedent("cholesterol", Universe::new(100.0, 400.0, 1.0)?)
            .with_term("low", trap(100.0, 100.0, 151.0, 177.0)?)
            .with_term("medium", tri(188.0, 215.0, 250.0)?)
            .with_term("high", tri(217.0, 263.0, 307.0)?)
            .with_term("very_high", trap(281.0, 347.0, 400.0, 400.0)?),
        Variable::antecedent("maximum_heart_rate", Universe::new(0.0, 500.0, 1.0)?)
            .with_term("low", trap(0.0, 0.0, 100.0, 141.0)?)
            .with_term("medium", tri(111.0, 152.0, 194.0)?)
            .with_term("high", trap(152.0, 210.0, 500.0, 500.0)?),
        Variable::antecedent("old_peak", Universe::new(0.0, 6.0, 0.01)?)
            .with_term("low", trap(0.0, 0.0, 1.0, 2.0)?)
            .with_term("risk", tri(1.5, 2.8, 4.2)?)
            .with_term("terrible", trap(2.5, 4.0, 6.0, 6.0)?),
        Variable::antecedent("sex", Universe::new(0.0, 1.0, 1.0)?)
            .with_term("male", point(0.0)?)
            .with_term("female", point(1.0)?),
        Variable::antecedent("chest_pain", Universe::new(1.0, 4.0, 1.0)?)
            .with_term("typical_anginal", point(1.0)?)
            .with_term("atypical_anginal", point(2.0)?)
            .with_term("non_anginal_pain", point(3.0)?)
            .with_term("asymptomatic", point(4.0)?),
        Variable::antecedent("exercise", Universe::new(0.0, 1.0, 1.0)?)
            .with_term("true", point(0.0)?)
            .with_term("false", point(1.0)?),
        Variable::consequent(HEALTH, Universe::new(0.0, 4.0, 0.01)?)
            .with_term("healthy", trap(0.0, 0.0, 0.25, 1.0)?)
            .with_term("sick_1", tri(0.0, 1.0, 2.0)?)
            .with_term("sick_2", tri(1.0, 2.0, 3.0)?)
            .with_term("sick_3", tri(2.0, 3.0, 4.0)?)
            .with_term("sick_4", trap(3.0, 3.75, 4.0, 4.0)?),
    ])
}

/// `IF variable IS term THEN health IS outcome`
fn single(label: &str, variable: &str, term: &str, outcome: &str) -> RuleDefinition {
    RuleDefinition::new(label, is(variable, term)).then(HEALTH, outcome)
}

/// The active rule base. Some pairs of rules conclude different health terms
/// from the same condition; both fire and aggregation keeps the larger.
#[must_use]
pub fn heart_disease_rules() -> Vec<RuleDefinition> {
    vec![
        RuleDefinition::new(
            "rule1",
            is("age", "very_old").and(is("chest_pain", "atypical_anginal")),
        )
        .then(HEALTH, "sick_4"),
        RuleDefinition::new(
            "rule2",
            is("maximum_heart_rate", "high").and(is("age", "old")),
        )
        .then(HEALTH, "sick_4"),
        RuleDefinition::new(
            "rule3",
            is("sex", "male").and(is("maximum_heart_rate", "medium")),
        )
        .then(HEALTH, "sick_3"),
        RuleDefinition::new(
            "rule4",
            is("sex", "female").and(is("maximum_heart_rate", "medium")),
        )
        .then(HEALTH, "sick_2"),
        RuleDefinition::new(
            "rule5",
            is("chest_pain", "non_anginal_pain").and(is("blood_pressure", "high")),
        )
        .then(HEALTH, "sick_3"),
        RuleDefinition::new(
            "rule6",
            is("chest_pain", "typical_anginal").and(is("maximum_heart_rate", "medium")),
        )
        .then(HEALTH, "sick_2"),
        RuleDefinition::new(
            "rule7",
            is("blood_sugar", "true").and(is("age", "mild")),
        )
        .then(HEALTH, "sick_3"),
        RuleDefinition::new(
            "rule8",
            is("blood_sugar", "false").and(is("blood_pressure", "very_high")),
        )
        .then(HEALTH, "sick_2"),
        RuleDefinition::new(
            "rule9",
            is("chest_pain", "asymptomatic").or(is("age", "very_old")),
        )
        .then(HEALTH, "sick_1"),
        RuleDefinition::new(
            "rule10",
            is("blood_pressure", "high").or(is("maximum_heart_rate", "low")),
        )
        .then(HEALTH, "sick_1"),
        single("rule11", "chest_pain", "typical_anginal", "healthy"),
        single("rule12", "chest_pain", "atypical_anginal", "sick_1"),
        single("rule13", "chest_pain", "non_anginal_pain", "sick_2"),
        single("rule14", "chest_pain", "asymptomatic", "sick_3"),
        single("rule15", "chest_pain", "asymptomatic", "sick_4"),
        single("rule16", "sex", "female", "sick_1"),
        single("rule17", "sex", "male", "sick_2"),
        single("rule18", "blood_pressure", "low", "healthy"),
        single("rule19", "blood_pressure", "medium", "sick_1"),
        single("rule20", "blood_pressure", "high", "sick_2"),
        single("rule21", "blood_pressure", "high", "sick_3"),
        single("rule22", "blood_pressure", "very_high", "sick_4"),
        single("rule23", "cholesterol", "low", "healthy"),
        single("rule24", "cholesterol", "medium", "sick_1"),
        single("rule25", "cholesterol", "high", "sick_2"),
        single("rule26", "cholesterol", "high", "sick_3"),
        single("rule27", "cholesterol", "very_high", "sick_4"),
        single("rule28", "blood_sugar", "true", "sick_2"),
        single("rule29", "ecg", "normal", "healthy"),
        single("rule30", "ecg", "normal", "sick_1"),
        single("rule31", "ecg", "abnormal", "sick_2"),
        single("rule32", "ecg", "hypertrophy", "sick_3"),
        single("rule33", "ecg", "hypertrophy", "sick_4"),
        single("rule34", "maximum_heart_rate", "low", "healthy"),
        single("rule35", "maximum_heart_rate", "medium", "sick_1"),
        single("rule36", "maximum_heart_rate", "medium", "sick_2"),
        single("rule37", "maximum_heart_rate", "high", "sick_3"),
        single("rule38", "maximum_heart_rate", "high", "sick_4"),
        single("rule39", "exercise", "true", "sick_2"),
        single("rule40", "old_peak", "low", "healthy"),
        single("rule41", "old_peak", "low", "sick_1"),
        single("rule42", "old_peak", "terrible", "sick_2"),
        single("rule43", "old_peak", "terrible", "sick_3"),
        single("rule44", "old_peak", "risk", "sick_4"),
        single("rule50", "age", "young", "healthy"),
        single("rule51", "age", "mild", "sick_1"),
        single("rule52", "age", "old", "sick_2"),
        single("rule53", "age", "old", "sick_3"),
        single("rule54", "age", "very_old", "sick_4"),
    ]
}

/// Builds the complete heart disease model.
///
/// # Example
/// ```rust
/// use mamdani_rs::InputSnapshot;
/// use mamdani_rs::clinical::{heart_disease_model, risk_classifier, HEALTH};
///
/// let model = heart_disease_model()?;
/// let patient = InputSnapshot::new()
///     .with("age", 75.0)
///     .with("ecg", 1.0)
///     .with("blood_pressure", 120.0)
///     .with("blood_sugar", 100.0)
///     .with("cholesterol", 120.0)
///     .with("maximum_heart_rate", 200.0)
///     .with("old_peak", 5.0)
///     .with("chest_pain", 4.0)
///     .with("exercise", 1.0)
///     .with("sex", 1.0);
///
/// let health = model.infer(&patient)?.crisp(HEALTH)?;
/// let level = risk_classifier()?.classify(health);
/// assert_eq!(level.map(|l| l.to_string()).as_deref(), Some("moderate_risk"));
/// # Ok::<(), mamdani_rs::FuzzyError>(())
/// ```
///
/// # Errors
/// Only if one of the built-in definitions were invalid.
pub fn heart_disease_model() -> Result<Model> {
    heart_disease_variables()?
        .into_iter()
        .fold(ModelBuilder::new(), ModelBuilder::variable)
        .rules(heart_disease_rules())
        .build()
}

/// Maps the `health` output to a [`RiskLevel`].
///
/// `[0, 0.5]` no risk, `(0.5, 1.5]` low, `(1.5, 2.5]` moderate,
/// `(2.5, 3.5]` high, `(3.5, 4.5]` very high.
///
/// # Errors
/// Only if the built-in table were invalid.
pub fn risk_classifier() -> Result<RangeClassifier<RiskLevel>> {
    RangeClassifier::new(
        0.0,
        vec![
            (0.5, RiskLevel::NoRisk),
            (1.5, RiskLevel::LowRisk),
            (2.5, RiskLevel::ModerateRisk),
            (3.5, RiskLevel::HighRisk),
            (4.5, RiskLevel::VeryHighRisk),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_base_shape() {
        let rules = heart_disease_rules();
        assert_eq!(rules.len(), 49);
        assert!(rules.iter().all(|rule| rule.targets.len() == 1));
        assert!(!rules.iter().any(|rule| {
            ["rule45", "rule46", "rule47", "rule48", "rule49"].contains(&rule.label.as_str())
        }));
    }

    #[test]
    fn test_every_antecedent_is_required() {
        let model = heart_disease_model().unwrap();
        let mut required = model.required_inputs();
        required.sort_unstable();
        let mut declared = model.antecedent_names();
        declared.sort_unstable();
        assert_eq!(required, declared);
        assert_eq!(declared.len(), 10);
        assert_eq!(model.consequent_names(), vec![HEALTH]);
    }

    #[test]
    fn test_health_grid() {
        let model = heart_disease_model().unwrap();
        let grid = model.grid(HEALTH).unwrap();
        assert_eq!(grid.len(), 401);
        assert!((grid[400] - 4.0).abs() < 1e-9);
    }
}
