//! Tests for sharing validators across threads.

use serde_json::{json, Value};
use std::sync::Arc;
use std::thread;
use verdict::adapters::{ClassValidator, SchemaValidator};
use verdict::class::{ClassSchema, Rule};
use verdict::{Input, Schema, ValidatedInput, Validator, ValidatorExt};

fn user_validator() -> SchemaValidator<Value> {
    SchemaValidator::new(
        Schema::object()
            .field("name", Schema::string().error("expected string"))
            .field("age", Schema::integer().positive()),
    )
}

#[test]
fn test_concurrent_validation() {
    let validator = Arc::new(user_validator());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                let result = validator.validate(&json!({
                    "name": format!("User{}", i),
                    "age": 20 + i
                }));
                assert!(result.is_success());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_failures_are_independent() {
    let validator = Arc::new(ClassValidator::<Value>::new(
        ClassSchema::new().property("name", [Rule::is_string().with_message("expected string")]),
    ));

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                let input = if i % 2 == 0 { json!({"name": i}) } else { json!({"name": "ok"}) };
                (i, validator.validate(&input).is_failure())
            })
        })
        .collect();

    for handle in handles {
        let (i, failed) = handle.join().unwrap();
        assert_eq!(failed, i % 2 == 0);
    }
}

#[test]
fn test_inputs_share_one_validator() {
    let validator: Arc<dyn Validator<Value>> = Arc::new(user_validator());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let input = Input::shared(json!({"name": "a", "age": i}), Arc::clone(&validator));
            thread::spawn(move || input.validated().is_success())
        })
        .collect();

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(!results[0]);
    assert!(results[1..].iter().all(|ok| *ok));
}

#[test]
fn test_validate_batch_preserves_order() {
    let validator = user_validator();
    let inputs: Vec<Value> = (0..100)
        .map(|i| {
            if i % 3 == 0 {
                json!({"name": i, "age": 1})
            } else {
                json!({"name": "x", "age": i})
            }
        })
        .collect();

    let results = validator.validate_batch(&inputs);

    assert_eq!(results.len(), 100);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.is_failure(), i % 3 == 0, "input {}", i);
    }
    let error = results[0].as_ref().unwrap_failure();
    assert_eq!(error.constraints()[0].message(), Some("expected string"));
}
