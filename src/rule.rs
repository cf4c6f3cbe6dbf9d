use std::fmt;

use crate::expression::{Antecedent, Expr, VariableId};

/// One `consequent IS term` conclusion of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    pub consequent: String,
    pub term: String,
}

/// A linguistic rule as authored: `IF antecedent THEN targets`.
///
/// # Example
/// ```rust
/// use mamdani_rs::{RuleDefinition, expression::is};
///
/// let condition = is("chest_pain", "asymptomatic").or(is("age", "very_old"));
/// let rule = RuleDefinition::new("rule9", condition).then("health", "sick_1");
///
/// assert_eq!(
///     rule.to_string(),
///     "rule9: IF (chest_pain IS asymptomatic OR age IS very_old) THEN health IS sick_1"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleDefinition {
    pub label: String,
    pub antecedent: Expr,
    pub targets: Vec<Target>,
    #[cfg_attr(feature = "serde", serde(default = "default_weight"))]
    pub weight: f64,
}

#[cfg(feature = "serde")]
fn default_weight() -> f64 {
    1.0
}

impl RuleDefinition {
    /// Creates a rule with weight 1 and no targets yet.
    pub fn new(label: impl Into<String>, antecedent: Expr) -> Self {
        Self {
            label: label.into(),
            antecedent,
            targets: Vec::new(),
            weight: 1.0,
        }
    }

    /// Adds a conclusion; may be called more than once.
    #[must_use]
    pub fn then(mut self, consequent: impl Into<String>, term: impl Into<String>) -> Self {
        self.targets.push(Target {
            consequent: consequent.into(),
            term: term.into(),
        });
        self
    }

    /// Scales the firing strength; must lie in [0, 1].
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }
}

impl fmt::Display for RuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: IF {} THEN ", self.label, self.antecedent)?;
        for (i, target) in self.targets.iter().enumerate() {
            if i > 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{} IS {}", target.consequent, target.term)?;
        }
        if (self.weight - 1.0).abs() > f64::EPSILON {
            write!(f, " WITH {}", self.weight)?;
        }
        Ok(())
    }
}

/// A rule resolved against a model.
#[derive(Debug, Clone)]
pub(crate) struct Rule {
    pub(crate) definition: RuleDefinition,
    pub(crate) antecedent: Antecedent,
    /// `(consequent slot, term index)` pairs
    pub(crate) targets: Vec<(usize, usize)>,
    /// Distinct antecedent variables the rule reads
    pub(crate) inputs: Vec<VariableId>,
}

impl Rule {
    pub(crate) fn label(&self) -> &str {
        &self.definition.label
    }

    pub(crate) fn weight(&self) -> f64 {
        self.definition.weight
    }
}
