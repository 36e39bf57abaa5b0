//! Function score query.

use search_dsl_shared::{param_enum, DslError, DslValue, OptionsBag, Serializable};

use crate::core::{impl_query_builder, AnyQuery, Query, Script, QUERY_CAPABILITY};

param_enum! {
    /// How the scores of the functions are combined.
    pub enum FunctionScoreMode("score_mode", "query-dsl-function-score-query.html", Lower) {
        Multiply => "multiply",
        Sum => "sum",
        Avg => "avg",
        First => "first",
        Max => "max",
        Min => "min",
    }
}

param_enum! {
    /// How the combined function score is merged with the query score.
    pub enum BoostMode("boost_mode", "query-dsl-function-score-query.html", Lower) {
        Multiply => "multiply",
        Replace => "replace",
        Sum => "sum",
        Avg => "avg",
        Max => "max",
        Min => "min",
    }
}

param_enum! {
    /// Function applied to a field value by `field_value_factor`.
    pub enum FieldValueFactorModifier("modifier", "query-dsl-function-score-query.html", Lower) {
        None => "none",
        Log => "log",
        Log1p => "log1p",
        Log2p => "log2p",
        Ln => "ln",
        Ln1p => "ln1p",
        Ln2p => "ln2p",
        Square => "square",
        Sqrt => "sqrt",
        Reciprocal => "reciprocal",
    }
}

/// One scoring function of a [`FunctionScoreQuery`].
#[derive(Debug, Clone)]
pub struct ScoreFunction {
    kind: Option<&'static str>,
    body: OptionsBag,
    filter: Option<AnyQuery>,
    weight: Option<f64>,
}

impl ScoreFunction {
    fn with_kind(kind: Option<&'static str>, body: OptionsBag) -> Self {
        Self {
            kind,
            body,
            filter: None,
            weight: None,
        }
    }

    /// Multiply the score by a constant weight.
    pub fn weight_only(weight: f64) -> Self {
        Self::with_kind(None, OptionsBag::new()).weight(weight)
    }

    /// Score on the value of a numeric field.
    pub fn field_value_factor(field: impl Into<String>) -> Self {
        let mut body = OptionsBag::new();
        body.set("field", field.into());
        Self::with_kind(Some("field_value_factor"), body)
    }

    /// Uniformly distributed random score.
    pub fn random_score() -> Self {
        Self::with_kind(Some("random_score"), OptionsBag::new())
    }

    /// Score computed by a script.
    pub fn script_score(script: Script) -> Self {
        let mut body = OptionsBag::new();
        body.set("script", script);
        Self::with_kind(Some("script_score"), body)
    }

    /// Apply the function only to documents matching `filter`.
    pub fn filter(mut self, filter: impl Into<AnyQuery>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Multiply the function's score by `weight`.
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Factor applied to the field value (`field_value_factor`).
    pub fn factor(mut self, factor: f64) -> Self {
        self.body.set("factor", factor);
        self
    }

    /// Modifier applied to the field value (`field_value_factor`).
    pub fn modifier(mut self, modifier: FieldValueFactorModifier) -> Self {
        self.body.set("modifier", modifier);
        self
    }

    /// Value used for documents without the field (`field_value_factor`).
    pub fn missing(mut self, missing: f64) -> Self {
        self.body.set("missing", missing);
        self
    }

    /// Seed of the random score (`random_score`).
    pub fn seed(mut self, seed: impl Into<DslValue>) -> Self {
        self.body.set("seed", seed);
        self
    }

    /// Field the random score is derived from (`random_score`).
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.body.set("field", field.into());
        self
    }
}

impl Serializable for ScoreFunction {
    fn to_value(&self) -> Result<DslValue, DslError> {
        let mut body = OptionsBag::new();
        if let Some(filter) = &self.filter {
            body.set("filter", filter.clone());
        }
        if let Some(kind) = self.kind {
            body.set(kind, self.body.clone());
        }
        if let Some(weight) = self.weight {
            body.set("weight", weight);
        }
        Ok(body.into())
    }

    fn capability(&self) -> &'static str {
        "ScoreFunction"
    }
}

impl From<ScoreFunction> for DslValue {
    fn from(function: ScoreFunction) -> Self {
        DslValue::entity(function)
    }
}

/// Modifies the scores of the documents matched by a query.
#[derive(Debug, Clone)]
pub struct FunctionScoreQuery {
    inner: Query,
    functions: Vec<ScoreFunction>,
}

impl FunctionScoreQuery {
    pub fn new() -> Self {
        Self {
            inner: Query::new("function_score"),
            functions: Vec::new(),
        }
    }

    /// Query whose matches are rescored. Defaults to `match_all`.
    pub fn query(mut self, query: impl Into<AnyQuery>) -> Self {
        self.inner.set("query", query.into());
        self
    }

    pub fn function(mut self, function: ScoreFunction) -> Self {
        self.functions.push(function);
        self
    }

    pub fn functions(mut self, functions: impl IntoIterator<Item = ScoreFunction>) -> Self {
        self.functions.extend(functions);
        self
    }

    pub fn score_mode(mut self, mode: FunctionScoreMode) -> Self {
        self.inner.set("score_mode", mode);
        self
    }

    pub fn boost_mode(mut self, mode: BoostMode) -> Self {
        self.inner.set("boost_mode", mode);
        self
    }

    /// Upper bound of the function score.
    pub fn max_boost(mut self, max: f64) -> Self {
        self.inner.set("max_boost", max);
        self
    }

    /// Exclude documents scoring below `score`.
    pub fn min_score(mut self, score: f64) -> Self {
        self.inner.set("min_score", score);
        self
    }
}

impl Default for FunctionScoreQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializable for FunctionScoreQuery {
    fn to_value(&self) -> Result<DslValue, DslError> {
        let mut body = self.inner.opts().clone();
        if !self.functions.is_empty() {
            body.set("functions", self.functions.clone());
        }
        Ok(self.inner.envelope(body))
    }

    fn capability(&self) -> &'static str {
        QUERY_CAPABILITY
    }
}

impl_query_builder!(FunctionScoreQuery);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QueryBuilder;
    use crate::queries::{MatchAllQuery, MatchQuery, TermQuery};
    use serde_json::json;

    #[test]
    fn test_function_score() {
        let query = FunctionScoreQuery::new()
            .query(MatchAllQuery::new())
            .boost(5.0)
            .function(ScoreFunction::weight_only(23.0).filter(MatchQuery::new("test", "bar")))
            .function(
                ScoreFunction::random_score()
                    .filter(MatchQuery::new("test", "cat"))
                    .weight(42.0),
            )
            .max_boost(42.0)
            .score_mode(FunctionScoreMode::Max)
            .boost_mode(BoostMode::Multiply)
            .min_score(42.0);
        assert_eq!(
            query.to_json().unwrap(),
            json!({
                "function_score": {
                    "query": { "match_all": {} },
                    "boost": 5.0,
                    "max_boost": 42.0,
                    "score_mode": "max",
                    "boost_mode": "multiply",
                    "min_score": 42.0,
                    "functions": [
                        { "filter": { "match": { "test": "bar" } }, "weight": 23.0 },
                        {
                            "filter": { "match": { "test": "cat" } },
                            "random_score": {},
                            "weight": 42.0
                        }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_field_value_factor() {
        let function = ScoreFunction::field_value_factor("my-int")
            .factor(1.2)
            .modifier(FieldValueFactorModifier::Sqrt)
            .missing(1.0);
        assert_eq!(
            function.to_json().unwrap(),
            json!({
                "field_value_factor": {
                    "field": "my-int",
                    "factor": 1.2,
                    "modifier": "sqrt",
                    "missing": 1.0
                }
            })
        );
    }

    #[test]
    fn test_script_score() {
        let query = FunctionScoreQuery::new()
            .query(TermQuery::new("message", "elasticsearch"))
            .function(ScoreFunction::script_score(
                Script::inline("Math.log(2 + doc['my-int'].value)"),
            ));
        assert_eq!(
            query.to_json().unwrap()["function_score"]["functions"],
            json!([{ "script_score": { "script": { "source": "Math.log(2 + doc['my-int'].value)" } } }])
        );
    }

    #[test]
    fn test_random_score_seed() {
        let function = ScoreFunction::random_score().seed(10).field("_seq_no");
        assert_eq!(
            function.to_json().unwrap(),
            json!({ "random_score": { "seed": 10, "field": "_seq_no" } })
        );
    }
}
