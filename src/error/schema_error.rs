//! Schema engine error types.
//!
//! This module provides [`SchemaError`] for single schema failures,
//! [`SchemaErrors`] for accumulating them, and the [`ErrorCode`] that tells
//! adapters what kind of failure each one is.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::JsonPath;

/// Machine-readable classification of a schema failure.
///
/// Codes that carry options (enum values, discriminator values) keep them in
/// the order the schema declared them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    /// The value has the wrong JSON type.
    InvalidType,
    /// A required object field is absent.
    Required,
    /// A string is shorter than allowed.
    MinLength,
    /// A string is longer than allowed.
    MaxLength,
    /// A string does not match a pattern.
    Pattern,
    /// A number is below the minimum.
    Min,
    /// A number is above the maximum.
    Max,
    /// A number has a fractional part where an integer is expected.
    NotInteger,
    /// An array or tuple has too few items.
    MinItems,
    /// An array or tuple has too many items.
    MaxItems,
    /// A value differs from the expected literal.
    InvalidLiteral,
    /// A value is not one of the enumerated options.
    InvalidEnumValue {
        /// Accepted values in declared order.
        options: Vec<String>,
    },
    /// No union member accepted the value.
    NoUnionMatch,
    /// The discriminator of a tagged union is missing or unknown.
    InvalidDiscriminator {
        /// Accepted discriminator values in declared order.
        options: Vec<String>,
    },
    /// An object carries a field the schema rejects.
    AdditionalProperty,
    /// A custom refinement failed.
    Custom,
}

impl ErrorCode {
    /// Returns a stable snake_case name for the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidType => "invalid_type",
            ErrorCode::Required => "required",
            ErrorCode::MinLength => "min_length",
            ErrorCode::MaxLength => "max_length",
            ErrorCode::Pattern => "pattern",
            ErrorCode::Min => "min_value",
            ErrorCode::Max => "max_value",
            ErrorCode::NotInteger => "not_integer",
            ErrorCode::MinItems => "min_items",
            ErrorCode::MaxItems => "max_items",
            ErrorCode::InvalidLiteral => "invalid_literal",
            ErrorCode::InvalidEnumValue { .. } => "invalid_enum_value",
            ErrorCode::NoUnionMatch => "no_union_match",
            ErrorCode::InvalidDiscriminator { .. } => "invalid_discriminator",
            ErrorCode::AdditionalProperty => "additional_property",
            ErrorCode::Custom => "custom",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single schema failure with full context.
///
/// # Example
///
/// ```rust
/// use verdict::{ErrorCode, JsonPath, SchemaError};
///
/// let error = SchemaError::new(JsonPath::root().push_field("email"), "invalid email")
///     .with_code(ErrorCode::Pattern)
///     .with_got("not-an-email")
///     .with_expected("string matching '@'");
///
/// assert_eq!(error.code, ErrorCode::Pattern);
/// assert_eq!(error.to_string(), "email: invalid email (expected: string matching '@') (got: not-an-email)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// Where in the input the failure occurred.
    pub path: JsonPath,
    /// Human-readable message.
    pub message: String,
    /// The received value, formatted for display.
    pub got: Option<String>,
    /// What was expected instead.
    pub expected: Option<String>,
    /// Failure classification.
    pub code: ErrorCode,
}

impl SchemaError {
    /// Creates an error at `path`; the code defaults to [`ErrorCode::Custom`].
    pub fn new(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            got: None,
            expected: None,
            code: ErrorCode::Custom,
        }
    }

    /// Sets the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = code;
        self
    }

    /// Sets the received value description.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    /// Sets the expected value description.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };

        write!(f, "{}: {}", path_str, self.message)?;

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for SchemaError {}

/// A non-empty collection of schema failures.
///
/// Schemas collect every failure they find and build the collection with
/// [`SchemaErrors::from_vec`]. [`Semigroup`] lets callers merge the failures
/// of separate `Validation`s.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors(NonEmptyVec<SchemaError>);

impl SchemaErrors {
    /// Creates a collection holding one error.
    pub fn single(error: SchemaError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the errors in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaError> {
        self.0.iter()
    }

    /// Returns the first error.
    pub fn first(&self) -> &SchemaError {
        self.0.head()
    }

    /// Returns every error with the given code.
    pub fn with_code(&self, code: &ErrorCode) -> Vec<&SchemaError> {
        self.0.iter().filter(|e| &e.code == code).collect()
    }

    /// Converts into a `Vec<SchemaError>`.
    pub fn into_vec(self) -> Vec<SchemaError> {
        self.0.into_vec()
    }

    /// Creates a collection from a vec of errors.
    ///
    /// # Panics
    ///
    /// Panics if `errors` is empty. Callers only build this after checking
    /// that at least one error was collected.
    pub fn from_vec(errors: Vec<SchemaError>) -> Self {
        Self(NonEmptyVec::from_vec(errors).expect("SchemaErrors requires at least one error"))
    }
}

impl Semigroup for SchemaErrors {
    fn combine(self, other: Self) -> Self {
        SchemaErrors(self.0.combine(other.0))
    }
}

impl Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Schema validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl IntoIterator for SchemaErrors {
    type Item = SchemaError;
    type IntoIter = std::vec::IntoIter<SchemaError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaErrors>();
    assert_sync::<SchemaErrors>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_code_is_custom() {
        let error = SchemaError::new(JsonPath::root().push_field("cpf"), "invalid CPF");
        assert_eq!(error.code, ErrorCode::Custom);
        assert!(error.got.is_none());
        assert!(error.expected.is_none());
    }

    #[test]
    fn test_display_root() {
        let error = SchemaError::new(JsonPath::root(), "expected object");
        assert_eq!(error.to_string(), "(root): expected object");
    }

    #[test]
    fn test_code_names() {
        assert_eq!(ErrorCode::Required.to_string(), "required");
        let code = ErrorCode::InvalidDiscriminator {
            options: vec!["cat".into()],
        };
        assert_eq!(code.as_str(), "invalid_discriminator");
    }

    #[test]
    fn test_combine_preserves_order() {
        let first = SchemaErrors::single(SchemaError::new(JsonPath::root().push_field("a"), "1"));
        let second = SchemaErrors::single(SchemaError::new(JsonPath::root().push_field("b"), "2"));

        let combined = first.combine(second);
        let messages: Vec<_> = combined.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["1", "2"]);
    }

    #[test]
    fn test_with_code_filters() {
        let errors = SchemaErrors::from_vec(vec![
            SchemaError::new(JsonPath::root().push_field("a"), "x").with_code(ErrorCode::Required),
            SchemaError::new(JsonPath::root().push_field("b"), "y").with_code(ErrorCode::Pattern),
            SchemaError::new(JsonPath::root().push_field("c"), "z").with_code(ErrorCode::Required),
        ]);

        assert_eq!(errors.with_code(&ErrorCode::Required).len(), 2);
        assert_eq!(errors.with_code(&ErrorCode::Pattern).len(), 1);
        assert_eq!(errors.first().message, "x");
    }

    #[test]
    fn test_display_lists_errors() {
        let errors = SchemaErrors::single(SchemaError::new(
            JsonPath::root().push_field("name"),
            "expected string",
        ));
        let display = errors.to_string();
        assert!(display.contains("1 error(s)"));
        assert!(display.contains("1. name: expected string"));
    }

    #[test]
    #[should_panic(expected = "at least one error")]
    fn test_from_empty_vec_panics() {
        SchemaErrors::from_vec(Vec::new());
    }
}
