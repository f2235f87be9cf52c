//! Validator backed by the schema engine.
//!
//! Schema errors are converted to issues and normalized into a constraint tree.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;
use stillwater::Validation;
use tracing::{debug, trace};

use crate::constraint::ValidationError;
use crate::error::{ErrorCode, SchemaError, SchemaErrors};
use crate::issue::{Issue, IssueKind};
use crate::normalize::{DefaultMessages, MessageStrategy, Normalizer};
use crate::outcome::Outcome;
use crate::path::JsonPath;
use crate::schema::{SchemaLike, ValueValidator};
use crate::validator::Validator;

impl From<ErrorCode> for IssueKind {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::InvalidType => IssueKind::InvalidType,
            ErrorCode::Required => IssueKind::Required,
            ErrorCode::MinLength | ErrorCode::Min | ErrorCode::MinItems => IssueKind::TooSmall,
            ErrorCode::MaxLength | ErrorCode::Max | ErrorCode::MaxItems => IssueKind::TooBig,
            ErrorCode::Pattern => IssueKind::InvalidString,
            ErrorCode::NotInteger => IssueKind::NotInteger,
            ErrorCode::InvalidLiteral => IssueKind::InvalidLiteral,
            ErrorCode::InvalidEnumValue { options } => IssueKind::InvalidEnumValue { options },
            ErrorCode::NoUnionMatch => IssueKind::InvalidUnion,
            ErrorCode::InvalidDiscriminator { options } => {
                IssueKind::InvalidUnionDiscriminator { options }
            }
            ErrorCode::AdditionalProperty => IssueKind::UnrecognizedKeys,
            ErrorCode::Custom => IssueKind::Custom,
        }
    }
}

impl From<SchemaError> for Issue {
    fn from(error: SchemaError) -> Self {
        Issue::new(error.path, error.message).with_kind(error.code.into())
    }
}

/// Validates input against a schema from the built-in schema engine.
///
/// On success the schema's output (with coercions such as trimming applied)
/// is deserialized into `T`; a value that passes the schema but does not
/// fit `T` is reported as a single root constraint. On failure every
/// [`SchemaError`] becomes an [`Issue`] and the list is normalized.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use serde_json::json;
/// use verdict::{adapters::SchemaValidator, Schema, ValidationConstraint, Validator};
///
/// #[derive(Debug, Deserialize)]
/// struct Todo {
///     title: String,
/// }
///
/// let validator = SchemaValidator::<Todo>::new(
///     Schema::object().field("title", Schema::string().error("expected string")),
/// );
///
/// assert_eq!(validator.validate(&json!({"title": "write"})).unwrap().title, "write");
///
/// let error = validator.validate(&json!({"title": 1})).unwrap_failure();
/// assert_eq!(error.into_vec(), vec![ValidationConstraint::field("title", "expected string")]);
/// ```
pub struct SchemaValidator<T, M = DefaultMessages> {
    schema: Box<dyn ValueValidator>,
    normalizer: Normalizer<M>,
    _target: PhantomData<fn() -> T>,
}

impl<T> SchemaValidator<T> {
    /// Wraps `schema` with the default message strategy.
    pub fn new<S: SchemaLike + 'static>(schema: S) -> Self {
        Self {
            schema: Box::new(schema),
            normalizer: Normalizer::new(),
            _target: PhantomData,
        }
    }
}

impl<T, M: MessageStrategy> SchemaValidator<T, M> {
    /// Replaces the message strategy.
    pub fn with_messages<N: MessageStrategy>(self, messages: N) -> SchemaValidator<T, N> {
        SchemaValidator {
            schema: self.schema,
            normalizer: Normalizer::with_messages(messages),
            _target: PhantomData,
        }
    }

    fn to_validation_error(&self, errors: SchemaErrors) -> ValidationError {
        let issues: Vec<Issue> = errors.into_iter().map(Issue::from).collect();
        debug!(issues = issues.len(), "schema validation failed");
        ValidationError::new(self.normalizer.normalize(&issues))
    }
}

impl<T, M> Validator<T> for SchemaValidator<T, M>
where
    T: DeserializeOwned,
    M: MessageStrategy,
{
    fn validate(&self, input: &Value) -> Outcome<T, ValidationError> {
        match self.schema.validate_value(input, &JsonPath::root()) {
            Validation::Success(value) => match serde_json::from_value::<T>(value) {
                Ok(parsed) => {
                    trace!("schema validation succeeded");
                    Outcome::Success(parsed)
                }
                Err(e) => {
                    debug!(error = %e, "validated value does not fit the target type");
                    Outcome::Failure(ValidationError::root(e.to_string()))
                }
            },
            Validation::Failure(errors) => Outcome::Failure(self.to_validation_error(errors)),
        }
    }
}
