//! Array and tuple schema validation.
//!
//! [`ArraySchema`] validates homogeneous arrays against one item schema;
//! [`TupleSchema`] validates fixed-length arrays position by position.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{ErrorCode, SchemaError, SchemaErrors};
use crate::path::JsonPath;

use super::traits::{value_type_name, SchemaLike, ValueValidator};

enum ArrayConstraint {
    MinLength { min: usize, message: Option<String> },
    MaxLength { max: usize, message: Option<String> },
    Unique { message: Option<String> },
}

/// A schema for validating arrays.
///
/// Length violations and item failures accumulate. Item failures carry the
/// item index in their path, so `items[1].sku` ends up nested under `"1"`
/// once normalized.
///
/// # Example
///
/// ```rust
/// use verdict::{JsonPath, Schema};
/// use serde_json::json;
///
/// let schema = Schema::array(Schema::string().min_len(1))
///     .non_empty()
///     .error("at least one tag is required");
///
/// assert!(schema.validate(&json!(["a", "b"]), &JsonPath::root()).is_success());
///
/// let errors = schema.validate(&json!([]), &JsonPath::root()).into_result().unwrap_err();
/// assert_eq!(errors.first().message, "at least one tag is required");
/// ```
pub struct ArraySchema<S> {
    item_schema: S,
    constraints: Vec<ArrayConstraint>,
    type_error_message: Option<String>,
}

impl<S: SchemaLike> ArraySchema<S> {
    /// Creates an array schema with the given item schema.
    pub fn new(item_schema: S) -> Self {
        Self {
            item_schema,
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// Requires at least `min` items.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(ArrayConstraint::MinLength { min, message: None });
        self
    }

    /// Requires at most `max` items.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(ArrayConstraint::MaxLength { max, message: None });
        self
    }

    /// Requires at least one item.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Rejects arrays containing equal items.
    pub fn unique(mut self) -> Self {
        self.constraints
            .push(ArrayConstraint::Unique { message: None });
        self
    }

    /// Sets the message for the most recent constraint, or the type error
    /// message before any constraint is added.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                ArrayConstraint::MinLength { message: m, .. }
                | ArrayConstraint::MaxLength { message: m, .. }
                | ArrayConstraint::Unique { message: m } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Vec<Value>, SchemaErrors> {
        let arr = match value.as_array() {
            Some(a) => a,
            None => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "expected array".to_string());
                return Validation::Failure(SchemaErrors::single(
                    SchemaError::new(path.clone(), message)
                        .with_code(ErrorCode::InvalidType)
                        .with_got(value_type_name(value))
                        .with_expected("array"),
                ));
            }
        };

        let mut errors = Vec::new();

        for constraint in &self.constraints {
            match constraint {
                ArrayConstraint::MinLength { min, message } if arr.len() < *min => {
                    errors.push(length_error(
                        path,
                        ErrorCode::MinItems,
                        message.clone().unwrap_or_else(|| {
                            format!("array must have at least {} items, got {}", min, arr.len())
                        }),
                        format!("at least {} items", min),
                        arr.len(),
                    ));
                }
                ArrayConstraint::MaxLength { max, message } if arr.len() > *max => {
                    errors.push(length_error(
                        path,
                        ErrorCode::MaxItems,
                        message.clone().unwrap_or_else(|| {
                            format!("array must have at most {} items, got {}", max, arr.len())
                        }),
                        format!("at most {} items", max),
                        arr.len(),
                    ));
                }
                ArrayConstraint::Unique { message } => {
                    if let Some((first, second)) = first_duplicate(arr) {
                        let msg = message.clone().unwrap_or_else(|| {
                            format!("duplicate value at indices {} and {}", first, second)
                        });
                        errors.push(SchemaError::new(path.clone(), msg).with_code(ErrorCode::Custom));
                    }
                }
                _ => {}
            }
        }

        let mut validated_items = Vec::with_capacity(arr.len());
        for (index, item) in arr.iter().enumerate() {
            match self.item_schema.validate_to_value(item, &path.push_index(index)) {
                Validation::Success(v) => validated_items.push(v),
                Validation::Failure(e) => errors.extend(e),
            }
        }

        if errors.is_empty() {
            Validation::Success(validated_items)
        } else {
            Validation::Failure(SchemaErrors::from_vec(errors))
        }
    }
}

impl<S: SchemaLike> SchemaLike for ArraySchema<S> {
    type Output = Vec<Value>;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path).map(Value::Array)
    }

    fn required_message(&self) -> Option<String> {
        self.type_error_message.clone()
    }
}

/// A schema for fixed-length arrays with one schema per position.
///
/// With [`error`](TupleSchema::error) set, any shape mismatch (not an array,
/// wrong length) reports that single message at the tuple's own path.
/// Failures inside items keep their own messages and index paths.
///
/// # Example
///
/// ```rust
/// use verdict::{JsonPath, Schema};
/// use serde_json::json;
///
/// let point = Schema::tuple()
///     .item(Schema::number())
///     .item(Schema::number())
///     .error("expected [x, y]");
///
/// assert!(point.validate(&json!([1, 2]), &JsonPath::root()).is_success());
///
/// let errors = point.validate(&json!([1]), &JsonPath::root()).into_result().unwrap_err();
/// assert_eq!(errors.first().message, "expected [x, y]");
/// ```
pub struct TupleSchema {
    items: Vec<Box<dyn ValueValidator>>,
    message: Option<String>,
}

impl TupleSchema {
    /// Creates an empty tuple schema.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            message: None,
        }
    }

    /// Appends a position.
    pub fn item<S: SchemaLike + 'static>(mut self, schema: S) -> Self {
        self.items.push(Box::new(schema));
        self
    }

    /// Sets the message for shape mismatches.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Vec<Value>, SchemaErrors> {
        let arr = match value.as_array() {
            Some(a) => a,
            None => {
                let message = self
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("expected tuple of {} items", self.items.len()));
                return Validation::Failure(SchemaErrors::single(
                    SchemaError::new(path.clone(), message)
                        .with_code(ErrorCode::InvalidType)
                        .with_got(value_type_name(value))
                        .with_expected("array"),
                ));
            }
        };

        let expected = self.items.len();
        if arr.len() != expected {
            let code = if arr.len() < expected {
                ErrorCode::MinItems
            } else {
                ErrorCode::MaxItems
            };
            let message = self.message.clone().unwrap_or_else(|| {
                format!("expected tuple of {} items, got {}", expected, arr.len())
            });
            return Validation::Failure(SchemaErrors::single(length_error(
                path,
                code,
                message,
                format!("exactly {} items", expected),
                arr.len(),
            )));
        }

        let mut errors = Vec::new();
        let mut validated = Vec::with_capacity(expected);
        for (index, (schema, item)) in self.items.iter().zip(arr).enumerate() {
            match schema.validate_value(item, &path.push_index(index)) {
                Validation::Success(v) => validated.push(v),
                Validation::Failure(e) => errors.extend(e),
            }
        }

        if errors.is_empty() {
            Validation::Success(validated)
        } else {
            Validation::Failure(SchemaErrors::from_vec(errors))
        }
    }
}

impl Default for TupleSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for TupleSchema {
    type Output = Vec<Value>;

    fn validate(&self, value: &Value, path: &JsonPath) -> Validation<Self::Output, SchemaErrors> {
        self.validate(value, path)
    }

    fn validate_to_value(&self, value: &Value, path: &JsonPath) -> Validation<Value, SchemaErrors> {
        self.validate(value, path).map(Value::Array)
    }

    fn required_message(&self) -> Option<String> {
        self.message.clone()
    }
}

fn length_error(
    path: &JsonPath,
    code: ErrorCode,
    message: String,
    expected: String,
    len: usize,
) -> SchemaError {
    SchemaError::new(path.clone(), message)
        .with_code(code)
        .with_expected(expected)
        .with_got(format!("{} items", len))
}

fn first_duplicate(items: &[Value]) -> Option<(usize, usize)> {
    items.iter().enumerate().find_map(|(i, item)| {
        items[i + 1..]
            .iter()
            .position(|other| other == item)
            .map(|offset| (i, i + 1 + offset))
    })
}
