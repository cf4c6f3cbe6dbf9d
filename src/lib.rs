//! # mamdani-rs
//!
//! A Mamdani fuzzy inference engine: crisp inputs are fuzzified against
//! linguistic terms, rules combine them with Zadeh min/max/complement logic,
//! each rule clips its consequent term, the clipped sets are aggregated by
//! maximum and the result is defuzzified back to a crisp value.
//!
//! ## Core Concept: Build Once, Infer Many Times
//!
//! Variables and rules are declared by name and validated together when the
//! model is built. Inference is a pure function of the model and a snapshot
//! of inputs:
//!
//! ```rust
//! use mamdani_rs::{
//!     InputSnapshot, MembershipFunction, ModelBuilder, RuleDefinition, Universe, Variable,
//! };
//! use mamdani_rs::expression::is;
//!
//! let model = ModelBuilder::new()
//!     .variable(
//!         Variable::antecedent("pressure", Universe::new(100.0, 300.0, 1.0)?)
//!             .with_term("low", MembershipFunction::trapezoidal(100.0, 100.0, 111.0, 134.0)?)
//!             .with_term("high", MembershipFunction::triangular(153.0, 157.0, 172.0)?),
//!     )
//!     .variable(
//!         Variable::consequent("risk", Universe::new(0.0, 4.0, 0.01)?)
//!             .with_term("none", MembershipFunction::trapezoidal(0.0, 0.0, 0.25, 1.0)?)
//!             .with_term("severe", MembershipFunction::trapezoidal(3.0, 3.75, 4.0, 4.0)?),
//!     )
//!     .rule(RuleDefinition::new("calm", is("pressure", "low")).then("risk", "none"))
//!     .rule(RuleDefinition::new("alarm", is("pressure", "high")).then("risk", "severe"))
//!     .build()?;
//!
//! let result = model.infer(&InputSnapshot::new().with("pressure", 120.0))?;
//! assert!(result.crisp("risk")? < 1.0);
//! # Ok::<(), mamdani_rs::FuzzyError>(())
//! ```
//!
//! ## Features
//!
//! - **Triangular and trapezoidal terms**: degenerate shapes give shoulders
//!   and singletons for categorical inputs
//! - **Expression trees**: arbitrary AND/OR/NOT antecedents and rules with
//!   several weighted targets
//! - **Defuzzification**: centroid by default, plus bisector and the maximum
//!   family; an empty output set is reported as undefined
//! - **Out-of-domain policy**: clamp and record, or reject per consequent
//! - **Diagnostics**: rule activations and input adjustments in every result
//! - **`parallel`**: rayon-backed batch inference
//! - **`serde`**: models can be described in JSON and built at runtime

pub mod classifier;
pub mod clinical;
pub mod context;
pub mod engine;
pub mod error;
pub mod expression;
pub mod membership;
pub mod model;
pub mod operations;
pub mod rule;
pub mod traits;
pub mod universe;
pub mod variable;

pub use classifier::{RangeClassifier, RiskLevel};
pub use engine::{
    ConsequentOutput, InferenceConfig, InferenceResult, InputAdjustment, InputSnapshot,
    OutOfDomainPolicy, Outcome, RuleActivation, Simulation, infer,
};
pub use error::{FuzzyError, Result};
pub use expression::Expr;
pub use membership::MembershipFunction;
pub use model::{Model, ModelBuilder};
pub use operations::{Defuzzification, FuzzyLogic};
pub use rule::RuleDefinition;
pub use traits::Membership;
pub use universe::Universe;
pub use variable::{Term, Variable, VariableKind};
