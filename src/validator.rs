//! The backend-agnostic validator contract.

use rayon::prelude::*;
use serde_json::Value;

use crate::constraint::ValidationError;
use crate::outcome::Outcome;

/// Validates raw input into a `T` or a canonical constraint tree.
///
/// Implementations never panic on malformed input and never return
/// engine-specific errors.
///
/// # Example
///
/// ```rust
/// use serde_json::{json, Value};
/// use verdict::{Outcome, ValidationError, Validator};
///
/// struct NonNull;
///
/// impl Validator<Value> for NonNull {
///     fn validate(&self, input: &Value) -> Outcome<Value, ValidationError> {
///         if input.is_null() {
///             Outcome::failure(ValidationError::root("value is required"))
///         } else {
///             Outcome::success(input.clone())
///         }
///     }
/// }
///
/// assert!(NonNull.validate(&json!(1)).is_success());
/// assert!(NonNull.validate(&Value::Null).is_failure());
/// ```
pub trait Validator<T>: Send + Sync {
    /// Validates `input`.
    fn validate(&self, input: &Value) -> Outcome<T, ValidationError>;
}

impl<T, V: Validator<T> + ?Sized> Validator<T> for Box<V> {
    fn validate(&self, input: &Value) -> Outcome<T, ValidationError> {
        (**self).validate(input)
    }
}

impl<T, V: Validator<T> + ?Sized> Validator<T> for std::sync::Arc<V> {
    fn validate(&self, input: &Value) -> Outcome<T, ValidationError> {
        (**self).validate(input)
    }
}

/// Extra operations available on every [`Validator`].
pub trait ValidatorExt<T>: Validator<T> {
    /// Validates every input in parallel; results keep the input order.
    fn validate_batch(&self, inputs: &[Value]) -> Vec<Outcome<T, ValidationError>>
    where
        T: Send,
    {
        inputs.par_iter().map(|input| self.validate(input)).collect()
    }
}

impl<T, V: Validator<T> + ?Sized> ValidatorExt<T> for V {}
