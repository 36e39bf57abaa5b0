//! Term level queries.
//!
//! These match exact terms stored in the index, without analyzing the
//! value first.

use search_dsl_shared::{param_enum, DslError, DslValue, OptionsBag, Serializable};

use crate::core::{impl_query_builder, Query, QUERY_CAPABILITY};
use crate::queries::Rewrite;

const VALUE_REQUIRED: &str = "Value is required for term level query";

param_enum! {
    /// How a range query matches range fields.
    pub enum RangeRelation("relation", "query-dsl-range-query.html", Upper) {
        Intersects => "INTERSECTS",
        Contains => "CONTAINS",
        Within => "WITHIN",
    }
}

field_query! {
    /// Matches documents containing an exact term.
    TermQuery("term", "value": DslValue, VALUE_REQUIRED)
}

field_query! {
    /// Matches documents with a term starting with the given prefix.
    PrefixQuery("prefix", "value": String, VALUE_REQUIRED)
}

field_query! {
    /// Matches documents with a term matching a wildcard pattern.
    WildcardQuery("wildcard", "value": String, VALUE_REQUIRED)
}

field_query! {
    /// Matches documents with a term matching a regular expression.
    RegexpQuery("regexp", "value": String, VALUE_REQUIRED)
}

field_query! {
    /// Matches documents with terms similar to the given one.
    FuzzyQuery("fuzzy", "value": DslValue, VALUE_REQUIRED)
}

impl TermQuery {
    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.inner.set("case_insensitive", enabled);
        self
    }
}

impl PrefixQuery {
    pub fn rewrite(mut self, rewrite: Rewrite) -> Self {
        self.inner.set("rewrite", rewrite);
        self
    }

    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.inner.set("case_insensitive", enabled);
        self
    }
}

impl WildcardQuery {
    pub fn rewrite(mut self, rewrite: Rewrite) -> Self {
        self.inner.set("rewrite", rewrite);
        self
    }

    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.inner.set("case_insensitive", enabled);
        self
    }
}

impl RegexpQuery {
    /// Enabled operators, e.g. `ALL` or `INTERSECTION|COMPLEMENT`.
    pub fn flags(mut self, flags: impl Into<String>) -> Self {
        self.inner.set("flags", flags.into());
        self
    }

    pub fn max_determinized_states(mut self, max: u32) -> Self {
        self.inner.set("max_determinized_states", max);
        self
    }

    pub fn rewrite(mut self, rewrite: Rewrite) -> Self {
        self.inner.set("rewrite", rewrite);
        self
    }

    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.inner.set("case_insensitive", enabled);
        self
    }
}

impl FuzzyQuery {
    /// Maximum edit distance, e.g. `AUTO` or `2`.
    pub fn fuzziness(mut self, fuzziness: impl Into<DslValue>) -> Self {
        self.inner.set("fuzziness", fuzziness);
        self
    }

    pub fn prefix_length(mut self, length: u32) -> Self {
        self.inner.set("prefix_length", length);
        self
    }

    pub fn max_expansions(mut self, max: u32) -> Self {
        self.inner.set("max_expansions", max);
        self
    }

    pub fn transpositions(mut self, enabled: bool) -> Self {
        self.inner.set("transpositions", enabled);
        self
    }

    pub fn rewrite(mut self, rewrite: Rewrite) -> Self {
        self.inner.set("rewrite", rewrite);
        self
    }
}

/// Matches documents containing one or more of the given terms.
///
/// The terms are either listed or looked up from another document.
#[derive(Debug, Clone)]
pub struct TermsQuery {
    inner: Query,
    field: String,
    terms: DslValue,
}

impl TermsQuery {
    pub fn new<I>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<DslValue>,
    {
        let values: Vec<DslValue> = values.into_iter().map(Into::into).collect();
        Self {
            inner: Query::new("terms"),
            field: field.into(),
            terms: values.into(),
        }
    }

    /// Fetch the terms from `path` of document `id` in `index`.
    pub fn lookup(
        field: impl Into<String>,
        index: impl Into<String>,
        id: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        let mut lookup = OptionsBag::new();
        lookup.set("index", index.into());
        lookup.set("id", id.into());
        lookup.set("path", path.into());
        Self {
            inner: Query::new("terms"),
            field: field.into(),
            terms: lookup.into(),
        }
    }
}

impl Serializable for TermsQuery {
    fn to_value(&self) -> Result<DslValue, DslError> {
        let mut body = OptionsBag::new();
        body.set(self.field.as_str(), self.terms.clone());
        for (key, value) in self.inner.opts().iter() {
            body.set(key, value.clone());
        }
        Ok(self.inner.envelope(body))
    }

    fn capability(&self) -> &'static str {
        QUERY_CAPABILITY
    }
}

/// Matches documents with a field value within a range.
#[derive(Debug, Clone)]
pub struct RangeQuery {
    inner: Query,
    field: String,
}

impl RangeQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            inner: Query::new("range"),
            field: field.into(),
        }
    }

    pub fn gt(mut self, value: impl Into<DslValue>) -> Self {
        self.inner.set("gt", value);
        self
    }

    pub fn gte(mut self, value: impl Into<DslValue>) -> Self {
        self.inner.set("gte", value);
        self
    }

    pub fn lt(mut self, value: impl Into<DslValue>) -> Self {
        self.inner.set("lt", value);
        self
    }

    pub fn lte(mut self, value: impl Into<DslValue>) -> Self {
        self.inner.set("lte", value);
        self
    }

    /// Date format used to parse date values.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.inner.set("format", format.into());
        self
    }

    pub fn time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.inner.set("time_zone", time_zone.into());
        self
    }

    pub fn relation(mut self, relation: RangeRelation) -> Self {
        self.inner.set("relation", relation);
        self
    }
}

impl Serializable for RangeQuery {
    fn to_value(&self) -> Result<DslValue, DslError> {
        let mut body = OptionsBag::new();
        body.set(self.field.as_str(), self.inner.opts().clone());
        Ok(self.inner.envelope(body))
    }

    fn capability(&self) -> &'static str {
        QUERY_CAPABILITY
    }
}

/// Matches documents with an indexed value for a field.
#[derive(Debug, Clone)]
pub struct ExistsQuery {
    inner: Query,
}

impl ExistsQuery {
    pub fn new(field: impl Into<String>) -> Self {
        let mut inner = Query::new("exists");
        inner.set("field", field.into());
        Self { inner }
    }
}

/// Matches documents by their ids.
#[derive(Debug, Clone)]
pub struct IdsQuery {
    inner: Query,
}

impl IdsQuery {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        let mut inner = Query::new("ids");
        inner.set("values", ids);
        Self { inner }
    }
}

crate::core::impl_plain_query!(ExistsQuery, IdsQuery);
impl_query_builder!(TermsQuery, RangeQuery);
