//! Error types for the search DSL builders.

mod dsl_error;

pub use dsl_error::DslError;
