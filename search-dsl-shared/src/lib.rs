//! # Search DSL Shared
//!
//! Core building blocks shared by every search DSL builder: the error type,
//! the recursive serializer that flattens builder trees into plain JSON, the
//! helpers that validate enumerated parameters, and the builder configuration.

pub mod config;
pub mod errors;
pub mod serializer;
pub mod validation;

pub use config::DslConfig;
pub use errors::DslError;
pub use serializer::{serialize, serialize_bag, DslValue, OptionsBag, Serializable};
pub use validation::{invalid_param, AcceptedValues, Case, InvalidParam};
