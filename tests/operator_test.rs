//! Tests for validated business steps.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use verdict::adapters::SchemaValidator;
use verdict::{
    ApiError, ApiValidationError, Input, Operator, Outcome, Schema, ValidationConstraint,
    Validator,
};

#[derive(Debug, Deserialize)]
struct CreateTodo {
    description: String,
}

#[derive(Debug, PartialEq)]
struct Todo {
    id: usize,
    description: String,
}

fn create_todo_validator() -> Arc<dyn Validator<CreateTodo>> {
    Arc::new(SchemaValidator::<CreateTodo>::new(
        Schema::object().field(
            "description",
            Schema::string()
                .error("Property 'description' is a required string")
                .trim()
                .max_len(256)
                .error("Property 'description' cannot have more than 256 characters"),
        ),
    ))
}

#[derive(Default)]
struct CreateTodoOperator {
    runs: AtomicUsize,
}

#[async_trait]
impl Operator for CreateTodoOperator {
    type Input = CreateTodo;
    type Output = Todo;
    type Error = ApiError;

    async fn run(&self, input: CreateTodo) -> Outcome<Todo, ApiError> {
        let id = self.runs.fetch_add(1, Ordering::SeqCst) + 1;
        if input.description == "duplicate" {
            return Outcome::failure(ApiError::new("TodoAlreadyExists", "Todo already exists"));
        }
        Outcome::success(Todo {
            id,
            description: input.description,
        })
    }
}

#[tokio::test]
async fn test_valid_input_runs_step() {
    let operator = CreateTodoOperator::default();
    let input = Input::shared(json!({"description": "  buy milk "}), create_todo_validator());

    let todo = operator.exec(&input).await.unwrap();

    assert_eq!(
        todo,
        Todo {
            id: 1,
            description: "buy milk".into()
        }
    );
}

#[tokio::test]
async fn test_invalid_input_skips_step() {
    let operator = CreateTodoOperator::default();
    let input = Input::shared(json!({}), create_todo_validator());

    let error = operator.exec(&input).await.unwrap_failure();

    assert!(error.is_validation());
    assert_eq!(operator.runs.load(Ordering::SeqCst), 0);
    assert_eq!(
        error.details,
        Some(json!([{
            "field": "description",
            "message": "Property 'description' is a required string"
        }]))
    );
}

#[tokio::test]
async fn test_step_failure_is_returned_unchanged() {
    let operator = CreateTodoOperator::default();
    let input = Input::shared(json!({"description": "duplicate"}), create_todo_validator());

    let error = operator.exec(&input).await.unwrap_failure();

    assert_eq!(error.code, "TodoAlreadyExists");
    assert!(!error.is_validation());
    assert_eq!(operator.runs.load(Ordering::SeqCst), 1);
}

struct Echo;

#[async_trait]
impl Operator for Echo {
    type Input = Value;
    type Output = Value;
    type Error = ApiValidationError;

    async fn run(&self, input: Value) -> Outcome<Value, ApiValidationError> {
        Outcome::success(input)
    }
}

#[tokio::test]
async fn test_validation_error_wire_shape() {
    let input = Input::new(
        json!({"name": 1}),
        SchemaValidator::<Value>::new(
            Schema::object().field("name", Schema::string().error("expected string")),
        ),
    );

    let error = Echo.exec(&input).await.unwrap_failure();
    let wire = serde_json::to_value(&error).unwrap();

    assert_eq!(wire["code"], "ValidationError");
    assert!(wire["timestamp"].is_string());
    assert_eq!(
        wire["details"],
        json!([{"field": "name", "message": "expected string"}])
    );
    assert_eq!(
        error.details.into_vec(),
        vec![ValidationConstraint::field("name", "expected string")]
    );
}
