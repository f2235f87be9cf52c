//! The class engine.
//!
//! A [`ClassSchema`] declares properties, each with an ordered list of
//! [`Rule`]s, optionally a nested schema, plus whole-object
//! [`Refinement`]s. Running it builds a candidate object from raw input and
//! reports a tree of [`PropertyError`]s. Wrap one in a
//! [`ClassValidator`](crate::adapters::ClassValidator) to get canonical
//! constraint trees.

mod options;
mod rule;
mod schema;

pub use options::ClassValidatorOptions;
pub use rule::Rule;
pub use schema::{ClassSchema, PropertyError, Refinement};
