//! Error types for the mamdani-rs library.
//!
//! Errors fall into two groups. Configuration errors are raised while a
//! [`Model`](crate::Model) is being built and mean the model cannot be used.
//! Inference errors belong to a single call and leave the model untouched.

use thiserror::Error;

/// The main error type for the mamdani-rs library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FuzzyError {
    /// A universe whose bounds or step cannot produce a sampling grid.
    #[error("Invalid universe [{min}, {max}] with step {step}: {reason}")]
    InvalidUniverse {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
        /// Grid step
        step: f64,
        /// Which constraint was violated
        reason: &'static str,
    },

    /// Membership control points that violate the ordering invariant.
    #[error("Invalid {kind} membership function {points:?}: {reason}")]
    InvalidMembership {
        /// `"triangular"` or `"trapezoidal"`
        kind: &'static str,
        /// The control points as given
        points: Vec<f64>,
        /// Which constraint was violated
        reason: &'static str,
    },

    /// A parameter is NaN or infinite.
    #[error("Non-finite parameter '{parameter}': {value}")]
    NonFiniteParameter {
        /// The name of the parameter
        parameter: &'static str,
        /// The non-finite value
        value: f64,
    },

    /// Two variables in one model share a name.
    #[error("Duplicate variable '{name}'")]
    DuplicateVariable {
        /// The repeated name
        name: String,
    },

    /// A variable declares the same term label twice.
    #[error("Duplicate term '{term}' on variable '{variable}'")]
    DuplicateTerm {
        /// Owning variable
        variable: String,
        /// The repeated label
        term: String,
    },

    /// A rule or input refers to a variable the model does not define.
    #[error("Unknown variable '{name}'")]
    UnknownVariable {
        /// The name that failed to resolve
        name: String,
    },

    /// A rule refers to a term its variable does not define.
    #[error("Unknown term '{term}' on variable '{variable}'")]
    UnknownTerm {
        /// Variable that was found
        variable: String,
        /// Term label that was not
        term: String,
    },

    /// A variable was used on the wrong side of a rule.
    #[error("Variable '{name}' used as {expected} in rule '{rule}'")]
    RoleMismatch {
        /// Offending rule label
        rule: String,
        /// Variable name
        name: String,
        /// `"antecedent"` or `"consequent"`
        expected: &'static str,
    },

    /// Rule weight outside [0, 1].
    #[error("Invalid weight {weight} on rule '{rule}' (must be in range [0, 1])")]
    InvalidWeight {
        /// Offending rule label
        rule: String,
        /// The weight as given
        weight: f64,
    },

    /// A rule with nothing on its right-hand side.
    #[error("Rule '{rule}' has no consequent targets")]
    NoTargets {
        /// Offending rule label
        rule: String,
    },

    /// A classifier table that is not contiguous and ascending.
    #[error("Invalid classifier: {reason}")]
    InvalidClassifier {
        /// Which constraint was violated
        reason: &'static str,
    },

    /// An antecedent referenced by at least one rule has no input value.
    #[error("Missing input for variable '{variable}'")]
    MissingInput {
        /// The variable without a value
        variable: String,
    },

    /// An input value is NaN or infinite.
    #[error("Non-finite input for variable '{variable}': {value}")]
    NonFiniteInput {
        /// The variable
        variable: String,
        /// The value as given
        value: f64,
    },

    /// An input value lies outside its universe.
    #[error("Input {value} for variable '{variable}' is outside [{min}, {max}]")]
    OutOfDomain {
        /// The variable
        variable: String,
        /// The value as given
        value: f64,
        /// Universe lower bound
        min: f64,
        /// Universe upper bound
        max: f64,
    },

    /// No rule contributed to a consequent, so there is no crisp value.
    #[error("Undefined defuzzification for '{consequent}': no rule fired")]
    UndefinedDefuzzification {
        /// The consequent without an output
        consequent: String,
    },

    /// An output was requested for a name that is not a consequent.
    #[error("Unknown output '{name}'")]
    UnknownOutput {
        /// The requested name
        name: String,
    },

    /// Output read from a simulation before `compute` succeeded.
    #[error("No result available: call compute() first")]
    NotComputed,
}

/// A specialized `Result` type for fuzzy inference operations.
pub type Result<T> = std::result::Result<T, FuzzyError>;

impl FuzzyError {
    /// Create an error for an invalid universe.
    ///
    /// # Example
    /// ```
    /// use mamdani_rs::error::FuzzyError;
    ///
    /// let error = FuzzyError::invalid_universe(0.0, 1.0, 0.0, "step must be positive");
    /// assert!(error.to_string().contains("step must be positive"));
    /// ```
    #[must_use]
    pub fn invalid_universe(min: f64, max: f64, step: f64, reason: &'static str) -> Self {
        Self::InvalidUniverse {
            min,
            max,
            step,
            reason,
        }
    }

    /// Create an error for invalid membership control points.
    #[must_use]
    pub fn invalid_membership(kind: &'static str, points: &[f64], reason: &'static str) -> Self {
        Self::InvalidMembership {
            kind,
            points: points.to_vec(),
            reason,
        }
    }

    /// Create an error for a non-finite parameter.
    ///
    /// # Example
    /// ```
    /// use mamdani_rs::error::FuzzyError;
    ///
    /// let error = FuzzyError::non_finite("step", f64::NAN);
    /// assert!(error.to_string().contains("step"));
    /// ```
    #[must_use]
    pub fn non_finite(parameter: &'static str, value: f64) -> Self {
        Self::NonFiniteParameter { parameter, value }
    }

    /// Create an error for an unresolved variable name.
    pub fn unknown_variable(name: impl Into<String>) -> Self {
        Self::UnknownVariable { name: name.into() }
    }

    /// Create an error for an unresolved term label.
    pub fn unknown_term(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Self::UnknownTerm {
            variable: variable.into(),
            term: term.into(),
        }
    }

    /// Create an error for a missing input.
    pub fn missing_input(variable: impl Into<String>) -> Self {
        Self::MissingInput {
            variable: variable.into(),
        }
    }

    /// Create an error for a consequent without a crisp value.
    pub fn undefined(consequent: impl Into<String>) -> Self {
        Self::UndefinedDefuzzification {
            consequent: consequent.into(),
        }
    }

    /// Whether this error was raised while building a model.
    ///
    /// # Example
    /// ```
    /// use mamdani_rs::error::FuzzyError;
    ///
    /// assert!(FuzzyError::unknown_variable("age").is_configuration());
    /// assert!(!FuzzyError::missing_input("age").is_configuration());
    /// ```
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidUniverse { .. }
                | Self::InvalidMembership { .. }
                | Self::NonFiniteParameter { .. }
                | Self::DuplicateVariable { .. }
                | Self::DuplicateTerm { .. }
                | Self::UnknownVariable { .. }
                | Self::UnknownTerm { .. }
                | Self::RoleMismatch { .. }
                | Self::InvalidWeight { .. }
                | Self::NoTargets { .. }
                | Self::InvalidClassifier { .. }
        )
    }
}
