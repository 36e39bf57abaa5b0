//! Compound queries wrapping other queries.

use search_dsl_shared::{DslError, DslValue, OptionsBag, Serializable};

use crate::core::{impl_plain_query, impl_query_builder, AnyQuery, Query, QUERY_CAPABILITY};

/// Serialize a clause: one query as an object, several as an array.
fn clause(queries: &[AnyQuery]) -> Option<DslValue> {
    match queries {
        [] => None,
        [single] => Some(single.clone().into()),
        several => Some(several.to_vec().into()),
    }
}

/// Matches documents matching boolean combinations of other queries.
///
/// A clause holding one query serializes as that query's object, and as
/// an array once it holds several.
///
/// Keys are written in a fixed order regardless of the call order: the
/// clauses `must`, `filter`, `must_not` and `should`, then the other options
/// (`minimum_should_match`, `boost`, `_name`, ...) in the order they were
/// first set.
#[derive(Debug, Clone)]
pub struct BoolQuery {
    inner: Query,
    must: Vec<AnyQuery>,
    filter: Vec<AnyQuery>,
    must_not: Vec<AnyQuery>,
    should: Vec<AnyQuery>,
}

impl BoolQuery {
    pub fn new() -> Self {
        Self {
            inner: Query::new("bool"),
            must: Vec::new(),
            filter: Vec::new(),
            must_not: Vec::new(),
            should: Vec::new(),
        }
    }

    /// Add a clause that must match and contributes to the score.
    pub fn must(mut self, query: impl Into<AnyQuery>) -> Self {
        self.must.push(query.into());
        self
    }

    pub fn musts<I>(mut self, queries: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyQuery>,
    {
        self.must.extend(queries.into_iter().map(Into::into));
        self
    }

    /// Add a clause that must match, in filter context.
    pub fn filter(mut self, query: impl Into<AnyQuery>) -> Self {
        self.filter.push(query.into());
        self
    }

    pub fn filters<I>(mut self, queries: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyQuery>,
    {
        self.filter.extend(queries.into_iter().map(Into::into));
        self
    }

    /// Add a clause that must not match, in filter context.
    pub fn must_not(mut self, query: impl Into<AnyQuery>) -> Self {
        self.must_not.push(query.into());
        self
    }

    pub fn must_nots<I>(mut self, queries: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyQuery>,
    {
        self.must_not.extend(queries.into_iter().map(Into::into));
        self
    }

    /// Add a clause that should match.
    pub fn should(mut self, query: impl Into<AnyQuery>) -> Self {
        self.should.push(query.into());
        self
    }

    pub fn shoulds<I>(mut self, queries: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyQuery>,
    {
        self.should.extend(queries.into_iter().map(Into::into));
        self
    }

    /// Add a clause from an erased value, failing unless it holds a query.
    ///
    /// `clause` is one of `must`, `filter`, `must_not` or `should`.
    pub fn try_clause(mut self, clause: &str, query: DslValue) -> Result<Self, DslError> {
        let query = AnyQuery::try_from(query)?;
        match clause {
            "must" => self.must.push(query),
            "filter" => self.filter.push(query),
            "must_not" => self.must_not.push(query),
            "should" => self.should.push(query),
            other => {
                return Err(search_dsl_shared::invalid_param(
                    "",
                    "clause",
                    vec!["must", "filter", "must_not", "should"],
                )
                .raise(other))
            }
        }
        Ok(self)
    }

    /// Number or percentage of `should` clauses that must match.
    pub fn minimum_should_match(mut self, minimum: impl Into<DslValue>) -> Self {
        self.inner.set("minimum_should_match", minimum);
        self
    }

    pub fn adjust_pure_negative(mut self, enabled: bool) -> Self {
        self.inner.set("adjust_pure_negative", enabled);
        self
    }
}

impl Default for BoolQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializable for BoolQuery {
    fn to_value(&self) -> Result<DslValue, DslError> {
        let mut body = OptionsBag::new();
        let clauses = [
            ("must", &self.must),
            ("filter", &self.filter),
            ("must_not", &self.must_not),
            ("should", &self.should),
        ];
        for (name, queries) in clauses {
            if let Some(value) = clause(queries) {
                body.set(name, value);
            }
        }
        for (key, value) in self.inner.opts().iter() {
            body.set(key, value.clone());
        }
        Ok(self.inner.envelope(body))
    }

    fn capability(&self) -> &'static str {
        QUERY_CAPABILITY
    }
}

/// Wraps a filter query and gives every match the same score.
#[derive(Debug, Clone)]
pub struct ConstantScoreQuery {
    inner: Query,
}

impl ConstantScoreQuery {
    pub fn new(filter: impl Into<AnyQuery>) -> Self {
        let mut inner = Query::new("constant_score");
        inner.set("filter", filter.into());
        Self { inner }
    }
}

/// Scores documents by their best matching query.
#[derive(Debug, Clone)]
pub struct DisMaxQuery {
    inner: Query,
    queries: Vec<AnyQuery>,
}

impl DisMaxQuery {
    pub fn new() -> Self {
        Self {
            inner: Query::new("dis_max"),
            queries: Vec::new(),
        }
    }

    pub fn query(mut self, query: impl Into<AnyQuery>) -> Self {
        self.queries.push(query.into());
        self
    }

    pub fn queries<I>(mut self, queries: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyQuery>,
    {
        self.queries.extend(queries.into_iter().map(Into::into));
        self
    }

    /// Weight of the non-best matching queries in the final score.
    pub fn tie_breaker(mut self, tie_breaker: f64) -> Self {
        self.inner.set("tie_breaker", tie_breaker);
        self
    }
}

impl Default for DisMaxQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializable for DisMaxQuery {
    fn to_value(&self) -> Result<DslValue, DslError> {
        let mut body = OptionsBag::new();
        body.set("queries", self.queries.clone());
        for (key, value) in self.inner.opts().iter() {
            body.set(key, value.clone());
        }
        Ok(self.inner.envelope(body))
    }

    fn capability(&self) -> &'static str {
        QUERY_CAPABILITY
    }
}

/// Demotes documents matching a negative query.
#[derive(Debug, Clone)]
pub struct BoostingQuery {
    inner: Query,
}

impl BoostingQuery {
    pub fn new(
        positive: impl Into<AnyQuery>,
        negative: impl Into<AnyQuery>,
        negative_boost: f64,
    ) -> Self {
        let mut inner = Query::new("boosting");
        inner.set("positive", positive.into());
        inner.set("negative", negative.into());
        inner.set("negative_boost", negative_boost);
        Self { inner }
    }
}

impl_plain_query!(ConstantScoreQuery, BoostingQuery);
impl_query_builder!(BoolQuery, DisMaxQuery);
