//! Validated business steps.

use async_trait::async_trait;
use tracing::debug;

use crate::error::ApiValidationError;
use crate::input::ValidatedInput;
use crate::outcome::Outcome;

/// A business step guarded by input validation.
///
/// Implement [`run`](Operator::run); call [`exec`](Operator::exec). When
/// the input fails validation, `exec` returns an [`ApiValidationError`]
/// converted into `Self::Error` and `run` is never called. Otherwise the
/// outcome of `run` is returned unchanged.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use serde::Deserialize;
/// use serde_json::json;
/// use verdict::{adapters::SchemaValidator, ApiError, Input, Operator, Outcome, Schema};
///
/// #[derive(Deserialize)]
/// struct CreateTodo {
///     description: String,
/// }
///
/// struct CreateTodoOperator;
///
/// #[async_trait]
/// impl Operator for CreateTodoOperator {
///     type Input = CreateTodo;
///     type Output = String;
///     type Error = ApiError;
///
///     async fn run(&self, input: CreateTodo) -> Outcome<String, ApiError> {
///         Outcome::success(input.description)
///     }
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let validator = || SchemaValidator::new(Schema::object().field("description", Schema::string()));
///
/// let ok = CreateTodoOperator
///     .exec(&Input::new(json!({"description": "milk"}), validator()))
///     .await;
/// assert_eq!(ok.unwrap(), "milk");
///
/// let rejected = CreateTodoOperator.exec(&Input::new(json!({}), validator())).await;
/// assert!(rejected.unwrap_failure().is_validation());
/// # });
/// ```
#[async_trait]
pub trait Operator: Send + Sync {
    /// The validated input `run` receives.
    type Input: Send;
    /// What `run` produces on success.
    type Output: Send;
    /// The failure type; must absorb validation failures.
    type Error: From<ApiValidationError> + Send;

    /// The business step.
    async fn run(&self, input: Self::Input) -> Outcome<Self::Output, Self::Error>;

    /// Validates `input`, then runs the business step.
    async fn exec<V>(&self, input: &V) -> Outcome<Self::Output, Self::Error>
    where
        V: ValidatedInput<Self::Input> + Sync + ?Sized,
    {
        match input.validated() {
            Outcome::Success(dto) => self.run(dto).await,
            Outcome::Failure(details) => {
                debug!(constraints = details.len(), "input rejected, skipping run");
                Outcome::Failure(ApiValidationError::new(details).into())
            }
        }
    }
}
