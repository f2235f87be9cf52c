//! Backend-neutral validation issues.
//!
//! An [`Issue`] is the only shape the [normalizer](crate::normalize) consumes:
//! a path from the root to the offending value, a message, and a kind.
//! Adapters translate their engine's native errors into issues first.

use std::fmt::{self, Display};

use crate::path::JsonPath;

/// What went wrong, independent of the engine that noticed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Wrong JSON type.
    InvalidType,
    /// A required field is absent.
    Required,
    /// Below a length, size or value bound.
    TooSmall,
    /// Above a length, size or value bound.
    TooBig,
    /// A string failed a format or pattern check.
    InvalidString,
    /// A fractional number where an integer was expected.
    NotInteger,
    /// Not the expected literal.
    InvalidLiteral,
    /// Not one of the enumerated values.
    InvalidEnumValue {
        /// Accepted values in declared order.
        options: Vec<String>,
    },
    /// No member of a union matched.
    InvalidUnion,
    /// Missing or unknown discriminator of a tagged union.
    InvalidUnionDiscriminator {
        /// Accepted discriminator values in declared order.
        options: Vec<String>,
    },
    /// Fields the schema does not allow.
    UnrecognizedKeys,
    /// A custom refinement failed.
    Custom,
}

/// A single validation problem reported by a backend.
///
/// # Example
///
/// ```rust
/// use verdict::{Issue, IssueKind, JsonPath};
///
/// let issue = Issue::new(JsonPath::root().push_field("kind"), "Invalid discriminator")
///     .with_kind(IssueKind::InvalidUnionDiscriminator {
///         options: vec!["cat".into(), "dog".into()],
///     });
///
/// assert_eq!(issue.path.len(), 1);
/// assert_eq!(issue.to_string(), "kind: Invalid discriminator");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Accessors from the root to the offending value; empty for the root.
    pub path: JsonPath,
    /// The backend's message.
    pub message: String,
    /// Issue classification.
    pub kind: IssueKind,
}

impl Issue {
    /// Creates an issue of kind [`IssueKind::Custom`].
    pub fn new(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            kind: IssueKind::Custom,
        }
    }

    /// Creates an issue about the whole input.
    pub fn root(message: impl Into<String>) -> Self {
        Self::new(JsonPath::root(), message)
    }

    /// Sets the kind.
    pub fn with_kind(mut self, kind: IssueKind) -> Self {
        self.kind = kind;
        self
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}
