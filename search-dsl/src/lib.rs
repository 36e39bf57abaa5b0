//! # Search DSL
//!
//! Fluent builders producing the JSON request bodies of a document search
//! engine's query DSL. Queries, aggregations and suggesters are attached to
//! a [`RequestBodySearch`], which serializes the whole tree into a plain
//! [`serde_json::Value`] ready to be sent by a search client.
//!
//! ```ignore
//! use search_dsl::prelude::*;
//!
//! let body = RequestBodySearch::new()
//!     .query(TermQuery::new("user", "kimchy"))
//!     .agg(TermsAggregation::new("colors", "color")?)
//!     .from(0)
//!     .size(10);
//! let json = body.to_json()?;
//! ```

pub mod aggregations;
pub mod core;
pub mod queries;
pub mod suggesters;

pub use crate::core::{
    Aggregation, AnyAggregation, AnyQuery, AnySuggester, Query, RequestBodySearch, Suggester,
};
pub use search_dsl_shared::{
    serialize, DslConfig, DslError, DslValue, OptionsBag, Serializable,
};

/// Builder traits and the most used types.
pub mod prelude {
    pub use crate::aggregations::*;
    pub use crate::core::*;
    pub use crate::queries::*;
    pub use crate::suggesters::*;
    pub use search_dsl_shared::{DslConfig, DslError, DslValue, Serializable};
}

#[cfg(test)]
mod tests;
