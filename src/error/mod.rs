//! Error types.
//!
//! [`SchemaError`] and [`SchemaErrors`] are what the schema engine reports
//! natively; adapters translate them before they leave the crate.
//! [`ApiValidationError`] and [`ApiError`] are the shapes handed to the outer
//! boundary.

mod api_error;
mod schema_error;

pub use api_error::{ApiError, ApiValidationError, VALIDATION_ERROR_CODE};
pub use schema_error::{ErrorCode, SchemaError, SchemaErrors};
