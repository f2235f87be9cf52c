//! Raw input paired with the validator that checks it.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::constraint::ValidationError;
use crate::outcome::Outcome;
use crate::validator::Validator;

/// Something that can produce a validated `T`.
///
/// Implementations re-validate on every call; nothing is cached.
pub trait ValidatedInput<T> {
    /// Validates and returns the outcome.
    fn validated(&self) -> Outcome<T, ValidationError>;
}

/// Raw input together with its validator.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{adapters::SchemaValidator, Input, Schema, ValidatedInput};
///
/// let input: Input<serde_json::Value> = Input::new(
///     json!({"description": "  buy milk  "}),
///     SchemaValidator::new(Schema::object().field("description", Schema::string().trim())),
/// );
///
/// let dto = input.validated().unwrap();
/// assert_eq!(dto["description"], "buy milk");
/// ```
pub struct Input<T> {
    raw: Value,
    validator: Arc<dyn Validator<T>>,
}

impl<T> Input<T> {
    /// Pairs `raw` with `validator`.
    pub fn new<V>(raw: Value, validator: V) -> Self
    where
        V: Validator<T> + 'static,
    {
        Self::shared(raw, Arc::new(validator))
    }

    /// Pairs `raw` with a validator shared across inputs.
    pub fn shared(raw: Value, validator: Arc<dyn Validator<T>>) -> Self {
        Self { raw, validator }
    }

    /// The unvalidated input.
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl<T> ValidatedInput<T> for Input<T> {
    fn validated(&self) -> Outcome<T, ValidationError> {
        self.validator.validate(&self.raw)
    }
}

impl<T> Clone for Input<T> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            validator: Arc::clone(&self.validator),
        }
    }
}

impl<T> fmt::Debug for Input<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input").field("raw", &self.raw).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting(Arc<AtomicUsize>);

    impl Validator<Value> for Counting {
        fn validate(&self, input: &Value) -> Outcome<Value, ValidationError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Outcome::success(input.clone())
        }
    }

    #[test]
    fn test_every_call_revalidates() {
        let calls = Arc::new(AtomicUsize::new(0));
        let input = Input::new(json!({"a": 1}), Counting(Arc::clone(&calls)));

        assert!(input.validated().is_success());
        assert!(input.validated().is_success());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_shared_validator() {
        let calls = Arc::new(AtomicUsize::new(0));
        let validator: Arc<dyn Validator<Value>> = Arc::new(Counting(Arc::clone(&calls)));
        let a = Input::shared(json!(1), Arc::clone(&validator));
        let b = Input::shared(json!(2), validator);

        assert_eq!(a.validated().unwrap(), json!(1));
        assert_eq!(b.clone().validated().unwrap(), json!(2));
        assert_eq!(b.raw(), &json!(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
