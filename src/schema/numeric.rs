//! Numeric schema validation.
//!
//! This module provides [`NumberSchema`] for validating JSON numbers with an
//! optional integer requirement, bounds and sign constraints.

use serde_json::{Number, Value};
use stillwater::Validation;

use crate::error::{ErrorCode, SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::{value_type_name, SchemaLike};

/// A constraint applied to numeric values.
#[derive(Clone)]
enum NumberConstraint {
    Int { message: Option<String> },
    Min { value: f64, message: Option<String> },
    Max { value: f64, message: Option<String> },
    Positive { message: Option<String> },
    NonNegative { message: Option<String> },
    Negative { message: Option<String> },
}

/// A schema for validating numbers.
///
/// The output keeps the input's numeric representation, so integers stay
/// integers after validation.
///
/// # Example
///
/// ```rust
/// use verdict::{JsonPath, Schema};
/// use serde_json::json;
///
/// let quantity = Schema::number()
///     .error("expected number")
///     .int()
///     .error("expected integer")
///     .min(1.0);
///
/// assert!(quantity.validate(&json!(3), &JsonPath::root()).is_success());
/// assert!(quantity.validate(&json!(2.5), &JsonPath::root()).is_failure());
/// assert!(quantity.validate(&json!("3"), &JsonPath::root()).is_failure());
/// ```
#[derive(Clone)]
pub struct NumberSchema {
    constraints: Vec<NumberConstraint>,
    type_error_message: Option<String>,
    required_message: Option<String>,
}

impl NumberSchema {
    /// Creates a number schema with no constraints.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            type_error_message: None,
            required_message: None,
        }
    }

    /// Requires a whole number.
    pub fn int(mut self) -> Self {
        self.constraints.push(NumberConstraint::Int { message: None });
        self
    }

    /// Requires a value of at least `value` (inclusive).
    pub fn min(mut self, value: f64) -> Self {
        self.constraints.push(NumberConstraint::Min {
            value,
            message: None,
        });
        self
    }

    /// Requires a value of at most `value` (inclusive).
    pub fn max(mut self, value: f64) -> Self {
        self.constraints.push(NumberConstraint::Max {
            value,
            message: None,
        });
        self
    }

    /// Requires a value greater than 0.
    pub fn positive(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::Positive { message: None });
        self
    }

    /// Requires a value greater than or equal to 0.
    pub fn non_negative(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::NonNegative { message: None });
        self
    }

    /// Requires a value less than 0.
    pub fn negative(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::Negative { message: None });
        self
    }

    /// Sets the message for the most recent constraint.
    ///
    /// Before any constraint is added, this sets the type error message, which
    /// is also used when an object field with this schema is missing.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                NumberConstraint::Int { message: m }
                | NumberConstraint::Min { message: m, .. }
                | NumberConstraint::Max { message: m, .. }
                | NumberConstraint::Positive { message: m }
                | NumberConstraint::NonNegative { message: m }
                | NumberConstraint::Negative { message: m } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }

    /// Sets the message used when an object field with this schema is missing.
    pub fn required_error(mut self, message: impl Into<String>) -> Self {
        self.required_message = Some(message.into());
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Number, SchemaErrors> {
        let (number, n) = match value {
            Value::Number(number) => match number.as_f64() {
                Some(n) => (number, n),
                None => return Validation::Failure(self.type_error(value, path)),
            },
            _ => return Validation::Failure(self.type_error(value, path)),
        };

        let errors: Vec<SchemaError> = self
            .constraints
            .iter()
            .filter_map(|c| check_constraint(c, number, n, path))
            .collect();

        if errors.is_empty() {
            Validation::Success(number.clone())
        } else {
            Validation::Failure(SchemaErrors::from_vec(errors))
        }
    }

    fn type_error(&self, value: &Value, path: &JsonPath) -> SchemaErrors {
        let message = self
            .type_error_message
            .clone()
            .unwrap_or_else(|| "expected number".to_string());
        SchemaErrors::single(
            SchemaError::new(path.clone(), message)
                .with_code(ErrorCode::InvalidType)
                .with_got(value_type_name(value))
                .with_expected("number"),
        )
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for NumberSchema {
    type Output = Number;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path).map(Value::Number)
    }

    fn required_message(&self) -> Option<String> {
        self.required_message
            .clone()
            .or_else(|| self.type_error_message.clone())
    }
}

fn is_whole(number: &Number, n: f64) -> bool {
    number.is_i64() || number.is_u64() || n.fract() == 0.0
}

fn check_constraint(
    constraint: &NumberConstraint,
    number: &Number,
    n: f64,
    path: &JsonPath,
) -> Option<SchemaError> {
    let (failed, code, default, expected, message) = match constraint {
        NumberConstraint::Int { message } => (
            !is_whole(number, n),
            ErrorCode::NotInteger,
            "expected integer, received float".to_string(),
            "integer".to_string(),
            message,
        ),
        NumberConstraint::Min { value, message } => (
            n < *value,
            ErrorCode::Min,
            format!("value must be >= {}, got {}", value, number),
            format!(">= {}", value),
            message,
        ),
        NumberConstraint::Max { value, message } => (
            n > *value,
            ErrorCode::Max,
            format!("value must be <= {}, got {}", value, number),
            format!("<= {}", value),
            message,
        ),
        NumberConstraint::Positive { message } => (
            n <= 0.0,
            ErrorCode::Min,
            format!("value must be positive, got {}", number),
            "> 0".to_string(),
            message,
        ),
        NumberConstraint::NonNegative { message } => (
            n < 0.0,
            ErrorCode::Min,
            format!("value must be non-negative, got {}", number),
            ">= 0".to_string(),
            message,
        ),
        NumberConstraint::Negative { message } => (
            n >= 0.0,
            ErrorCode::Max,
            format!("value must be negative, got {}", number),
            "< 0".to_string(),
            message,
        ),
    };

    failed.then(|| {
        SchemaError::new(path.clone(), message.clone().unwrap_or(default))
            .with_code(code)
            .with_expected(expected)
            .with_got(number.to_string())
    })
}
