//! Canonical validation error model.
//!
//! Every validator in this crate reports failures as a list of
//! [`ValidationConstraint`]s, regardless of the engine that produced them.
//! A constraint is either a leaf message attached to a field, or a nested
//! list of constraints attached to a sub-object.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// A single normalized validation failure.
///
/// Serialized untagged, so a field constraint reads
/// `{"field": "name", "message": "expected string"}` and a nested one reads
/// `{"field": "config", "constraints": [...]}`.
///
/// # Example
///
/// ```rust
/// use verdict::ValidationConstraint;
///
/// let tree = ValidationConstraint::nested(
///     "config",
///     vec![ValidationConstraint::field("quantity", "expected number")],
/// );
///
/// assert_eq!(tree.field_name(), "config");
/// assert!(tree.is_nested());
/// assert_eq!(tree.constraints().map(|c| c.len()), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValidationConstraint {
    /// A leaf failure on `field`.
    Field {
        /// Field name; empty when the whole input is invalid.
        field: String,
        /// Human-readable message.
        message: String,
    },
    /// Failures localized inside the sub-object `field`.
    Nested {
        /// Field name of the sub-object.
        field: String,
        /// Failures inside the sub-object, in discovery order.
        constraints: Vec<ValidationConstraint>,
    },
}

impl ValidationConstraint {
    /// Creates a leaf constraint.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationConstraint::Field {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a nested constraint.
    pub fn nested(field: impl Into<String>, constraints: Vec<ValidationConstraint>) -> Self {
        ValidationConstraint::Nested {
            field: field.into(),
            constraints,
        }
    }

    /// Returns the field name of either shape.
    pub fn field_name(&self) -> &str {
        match self {
            ValidationConstraint::Field { field, .. } => field,
            ValidationConstraint::Nested { field, .. } => field,
        }
    }

    /// Returns the message of a leaf constraint.
    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationConstraint::Field { message, .. } => Some(message),
            ValidationConstraint::Nested { .. } => None,
        }
    }

    /// Returns the children of a nested constraint.
    pub fn constraints(&self) -> Option<&[ValidationConstraint]> {
        match self {
            ValidationConstraint::Field { .. } => None,
            ValidationConstraint::Nested { constraints, .. } => Some(constraints),
        }
    }

    /// Returns true for the nested shape.
    pub fn is_nested(&self) -> bool {
        matches!(self, ValidationConstraint::Nested { .. })
    }

    /// Returns true if this is a nested constraint named `field`.
    pub(crate) fn is_nested_named(&self, field: &str) -> bool {
        matches!(self, ValidationConstraint::Nested { field: f, .. } if f == field)
    }
}

/// The failure payload of a validation: root-level constraints in discovery
/// order.
///
/// Serialized transparently as a JSON array of constraints.
///
/// # Example
///
/// ```rust
/// use verdict::{ValidationConstraint, ValidationError};
///
/// let error = ValidationError::from(vec![
///     ValidationConstraint::field("name", "expected string"),
/// ]);
///
/// assert_eq!(error.len(), 1);
/// assert_eq!(error.get("name").and_then(|c| c.message()), Some("expected string"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationError(Vec<ValidationConstraint>);

impl ValidationError {
    /// Wraps a list of root-level constraints.
    pub fn new(constraints: Vec<ValidationConstraint>) -> Self {
        Self(constraints)
    }

    /// Creates an error holding a single constraint.
    pub fn single(constraint: ValidationConstraint) -> Self {
        Self(vec![constraint])
    }

    /// Creates an error describing the whole input (`field` is empty).
    pub fn root(message: impl Into<String>) -> Self {
        Self::single(ValidationConstraint::field("", message))
    }

    /// Returns the number of root-level constraints.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no constraints.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the root-level constraints.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationConstraint> {
        self.0.iter()
    }

    /// Returns the root-level constraints.
    pub fn constraints(&self) -> &[ValidationConstraint] {
        &self.0
    }

    /// Returns the first root-level constraint named `field`.
    pub fn get(&self, field: &str) -> Option<&ValidationConstraint> {
        self.0.iter().find(|c| c.field_name() == field)
    }

    /// Converts into the underlying list.
    pub fn into_vec(self) -> Vec<ValidationConstraint> {
        self.0
    }
}

impl From<Vec<ValidationConstraint>> for ValidationError {
    fn from(constraints: Vec<ValidationConstraint>) -> Self {
        Self(constraints)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} constraint(s):", self.len())?;
        for constraint in &self.0 {
            write_constraint(f, constraint, 1)?;
        }
        Ok(())
    }
}

fn write_constraint(
    f: &mut fmt::Formatter<'_>,
    constraint: &ValidationConstraint,
    depth: usize,
) -> fmt::Result {
    let indent = "  ".repeat(depth);
    let name = if constraint.field_name().is_empty() {
        "(root)"
    } else {
        constraint.field_name()
    };
    match constraint {
        ValidationConstraint::Field { message, .. } => writeln!(f, "{}{}: {}", indent, name, message),
        ValidationConstraint::Nested { constraints, .. } => {
            writeln!(f, "{}{}:", indent, name)?;
            for child in constraints {
                write_constraint(f, child, depth + 1)?;
            }
            Ok(())
        }
    }
}

impl std::error::Error for ValidationError {}

impl IntoIterator for ValidationError {
    type Item = ValidationConstraint;
    type IntoIter = std::vec::IntoIter<ValidationConstraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationError {
    type Item = &'a ValidationConstraint;
    type IntoIter = std::slice::Iter<'a, ValidationConstraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
