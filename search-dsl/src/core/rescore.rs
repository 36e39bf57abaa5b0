//! Query rescoring of the top hits.

use search_dsl_shared::{param_enum, DslError, DslValue, OptionsBag, Serializable};

use crate::core::AnyQuery;

param_enum! {
    /// How the original and rescore query scores are combined.
    pub enum RescoreScoreMode("score_mode", "filter-search-results.html", Lower) {
        Total => "total",
        Multiply => "multiply",
        Avg => "avg",
        Max => "max",
        Min => "min",
    }
}

/// Rescore the top `window_size` hits of every shard with a second query.
///
/// Serializes as `{ window_size, query: { rescore_query, .. } }`.
#[derive(Debug, Clone)]
pub struct Rescore {
    window_size: u32,
    query: OptionsBag,
}

impl Rescore {
    pub fn new(window_size: u32, rescore_query: impl Into<AnyQuery>) -> Self {
        let mut query = OptionsBag::new();
        query.set("rescore_query", rescore_query.into());
        Self { window_size, query }
    }

    /// Weight of the original query score.
    pub fn query_weight(mut self, weight: f64) -> Self {
        self.query.set("query_weight", weight);
        self
    }

    /// Weight of the rescore query score.
    pub fn rescore_query_weight(mut self, weight: f64) -> Self {
        self.query.set("rescore_query_weight", weight);
        self
    }

    pub fn score_mode(mut self, mode: RescoreScoreMode) -> Self {
        self.query.set("score_mode", mode);
        self
    }
}

impl Serializable for Rescore {
    fn to_value(&self) -> Result<DslValue, DslError> {
        let mut body = OptionsBag::new();
        body.set("window_size", self.window_size);
        body.set("query", self.query.clone());
        Ok(body.into())
    }

    fn capability(&self) -> &'static str {
        "Rescore"
    }
}

impl From<Rescore> for DslValue {
    fn from(rescore: Rescore) -> Self {
        DslValue::entity(rescore)
    }
}

search_dsl_shared::impl_json_serialize!(Rescore);
