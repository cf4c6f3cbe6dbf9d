//! Rule antecedent expressions.
//!
//! [`Expr`] is the authoring form: it names variables and terms by string and
//! is what rule definitions carry. When a model is built each `Expr` is
//! resolved into an [`Antecedent`] whose leaves are index pairs, so evaluation
//! never looks up a label.

use std::fmt;

/// An antecedent expression over `variable IS term` propositions.
///
/// # Example
/// ```rust
/// use mamdani_rs::expression::{self, Expr};
///
/// let condition = expression::is("age", "very_old")
///     .and(expression::is("chest_pain", "atypical_anginal"))
///     .or(expression::not(expression::is("sex", "male")));
///
/// assert_eq!(
///     condition.to_string(),
///     "((age IS very_old AND chest_pain IS atypical_anginal) OR NOT sex IS male)"
/// );
/// assert_eq!(condition.node_count(), 6);
/// assert_eq!(condition.depth(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Expr {
    /// `variable IS term`
    Is { variable: String, term: String },
    /// Minimum of both sides
    And(Box<Expr>, Box<Expr>),
    /// Maximum of both sides
    Or(Box<Expr>, Box<Expr>),
    /// Complement
    Not(Box<Expr>),
}

/// Leaf proposition `variable IS term`.
pub fn is(variable: impl Into<String>, term: impl Into<String>) -> Expr {
    Expr::Is {
        variable: variable.into(),
        term: term.into(),
    }
}

/// Conjunction of two expressions.
#[must_use]
pub fn and(left: Expr, right: Expr) -> Expr {
    Expr::And(Box::new(left), Box::new(right))
}

/// Disjunction of two expressions.
#[must_use]
pub fn or(left: Expr, right: Expr) -> Expr {
    Expr::Or(Box::new(left), Box::new(right))
}

/// Complement of an expression.
#[must_use]
pub fn not(operand: Expr) -> Expr {
    Expr::Not(Box::new(operand))
}

impl Expr {
    /// `self AND other`
    #[must_use]
    pub fn and(self, other: Expr) -> Expr {
        and(self, other)
    }

    /// `self OR other`
    #[must_use]
    pub fn or(self, other: Expr) -> Expr {
        or(self, other)
    }

    /// `NOT self`
    #[must_use]
    pub fn negate(self) -> Expr {
        not(self)
    }

    /// Counts the nodes in the expression tree
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Is { .. } => 1,
            Expr::And(left, right) | Expr::Or(left, right) => {
                1 + left.node_count() + right.node_count()
            }
            Expr::Not(operand) => 1 + operand.node_count(),
        }
    }

    /// Gets the depth of the expression tree
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Expr::Is { .. } => 1,
            Expr::And(left, right) | Expr::Or(left, right) => 1 + left.depth().max(right.depth()),
            Expr::Not(operand) => 1 + operand.depth(),
        }
    }

    /// Every `(variable, term)` leaf, left to right, duplicates included.
    #[must_use]
    pub fn propositions(&self) -> Vec<(&str, &str)> {
        let mut leaves = Vec::new();
        self.collect_propositions(&mut leaves);
        leaves
    }

    fn collect_propositions<'a>(&'a self, leaves: &mut Vec<(&'a str, &'a str)>) {
        match self {
            Expr::Is { variable, term } => leaves.push((variable.as_str(), term.as_str())),
            Expr::And(left, right) | Expr::Or(left, right) => {
                left.collect_propositions(leaves);
                right.collect_propositions(leaves);
            }
            Expr::Not(operand) => operand.collect_propositions(leaves),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Is { variable, term } => write!(f, "{variable} IS {term}"),
            Expr::And(left, right) => write!(f, "({left} AND {right})"),
            Expr::Or(left, right) => write!(f, "({left} OR {right})"),
            Expr::Not(operand) => write!(f, "NOT {operand}"),
        }
    }
}

/// Index of a variable inside a built model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(pub(crate) usize);

impl VariableId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A resolved `variable IS term` leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TermRef {
    pub variable: VariableId,
    pub term: usize,
}

/// An [`Expr`] with every leaf resolved against a model.
#[derive(Debug, Clone, PartialEq)]
pub enum Antecedent {
    Term(TermRef),
    And(Box<Antecedent>, Box<Antecedent>),
    Or(Box<Antecedent>, Box<Antecedent>),
    Not(Box<Antecedent>),
}

impl Antecedent {
    /// Resolves an expression, mapping each leaf through `lookup`.
    ///
    /// # Errors
    /// Returns the first error produced by `lookup`.
    pub fn resolve<E, F>(expr: &Expr, lookup: &mut F) -> Result<Self, E>
    where
        F: FnMut(&str, &str) -> Result<TermRef, E>,
    {
        Ok(match expr {
            Expr::Is { variable, term } => {
                Antecedent::Term(lookup(variable.as_str(), term.as_str())?)
            }
            Expr::And(left, right) => Antecedent::And(
                Box::new(Self::resolve(left, lookup)?),
                Box::new(Self::resolve(right, lookup)?),
            ),
            Expr::Or(left, right) => Antecedent::Or(
                Box::new(Self::resolve(left, lookup)?),
                Box::new(Self::resolve(right, lookup)?),
            ),
            Expr::Not(operand) => Antecedent::Not(Box::new(Self::resolve(operand, lookup)?)),
        })
    }

    /// Distinct variables referenced, in ascending id order.
    #[must_use]
    pub fn variables(&self) -> Vec<VariableId> {
        let mut ids = Vec::new();
        self.collect_variables(&mut ids);
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn collect_variables(&self, ids: &mut Vec<VariableId>) {
        match self {
            Antecedent::Term(leaf) => ids.push(leaf.variable),
            Antecedent::And(left, right) | Antecedent::Or(left, right) => {
                left.collect_variables(ids);
                right.collect_variables(ids);
            }
            Antecedent::Not(operand) => operand.collect_variables(ids),
        }
    }
}
