//! Full text queries.

use search_dsl_shared::{param_enum, DslError, DslValue, Serializable};

use crate::core::{impl_query_builder, Query, QueryBuilder, QUERY_CAPABILITY};
use crate::queries::Rewrite;

const FIELD_AND_QUERY_REQUIRED: &str = "Field and query are required";
const QUERY_STRING_REQUIRED: &str = "Query string is required";

param_enum! {
    /// Boolean logic used to combine the terms of the analyzed text.
    pub enum Operator("operator", "query-dsl-match-query.html", Lower) {
        And => "and",
        Or => "or",
    }
}

param_enum! {
    /// Behaviour when the analyzer removes every token.
    pub enum ZeroTermsQuery("zero_terms_query", "query-dsl-match-query.html", Lower) {
        All => "all",
        None => "none",
    }
}

param_enum! {
    /// How a multi_match query is executed.
    pub enum MultiMatchType("type", "query-dsl-multi-match-query.html", Lower) {
        BestFields => "best_fields",
        MostFields => "most_fields",
        CrossFields => "cross_fields",
        Phrase => "phrase",
        PhrasePrefix => "phrase_prefix",
        BoolPrefix => "bool_prefix",
    }
}

field_query! {
    /// Analyzes the text and matches documents containing its terms.
    MatchQuery("match", "query": String, FIELD_AND_QUERY_REQUIRED)
}

field_query! {
    /// Matches the analyzed text as a phrase.
    MatchPhraseQuery("match_phrase", "query": String, FIELD_AND_QUERY_REQUIRED)
}

field_query! {
    /// Matches a phrase whose last term is used as a prefix.
    MatchPhrasePrefixQuery("match_phrase_prefix", "query": String, FIELD_AND_QUERY_REQUIRED)
}

field_query! {
    /// Matches the terms of the analyzed text as a bool query, the last one
    /// as a prefix.
    MatchBoolPrefixQuery("match_bool_prefix", "query": String, FIELD_AND_QUERY_REQUIRED)
}

impl MatchQuery {
    pub fn operator(mut self, operator: Operator) -> Self {
        self.inner.set("operator", operator);
        self
    }

    pub fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.inner.set("analyzer", analyzer.into());
        self
    }

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

    pub fn fuzzy_transpositions(mut self, enabled: bool) -> Self {
        self.inner.set("fuzzy_transpositions", enabled);
        self
    }

    pub fn fuzzy_rewrite(mut self, rewrite: Rewrite) -> Self {
        self.inner.set("fuzzy_rewrite", rewrite);
        self
    }

    pub fn lenient(mut self, lenient: bool) -> Self {
        self.inner.set("lenient", lenient);
        self
    }

    pub fn zero_terms_query(mut self, behaviour: ZeroTermsQuery) -> Self {
        self.inner.set("zero_terms_query", behaviour);
        self
    }

    /// Minimum number of clauses that must match, e.g. `2` or `75%`.
    pub fn minimum_should_match(mut self, minimum: impl Into<DslValue>) -> Self {
        self.inner.set("minimum_should_match", minimum);
        self
    }

    pub fn auto_generate_synonyms_phrase_query(mut self, enabled: bool) -> Self {
        self.inner.set("auto_generate_synonyms_phrase_query", enabled);
        self
    }
}

impl MatchPhraseQuery {
    pub fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.inner.set("analyzer", analyzer.into());
        self
    }

    /// Maximum number of positions allowed between matching tokens.
    pub fn slop(mut self, slop: u32) -> Self {
        self.inner.set("slop", slop);
        self
    }

    pub fn zero_terms_query(mut self, behaviour: ZeroTermsQuery) -> Self {
        self.inner.set("zero_terms_query", behaviour);
        self
    }
}

impl MatchPhrasePrefixQuery {
    pub fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.inner.set("analyzer", analyzer.into());
        self
    }

    pub fn slop(mut self, slop: u32) -> Self {
        self.inner.set("slop", slop);
        self
    }

    /// Maximum number of terms the last term expands to.
    pub fn max_expansions(mut self, max: u32) -> Self {
        self.inner.set("max_expansions", max);
        self
    }

    pub fn zero_terms_query(mut self, behaviour: ZeroTermsQuery) -> Self {
        self.inner.set("zero_terms_query", behaviour);
        self
    }
}

impl MatchBoolPrefixQuery {
    pub fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.inner.set("analyzer", analyzer.into());
        self
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.inner.set("operator", operator);
        self
    }

    pub fn minimum_should_match(mut self, minimum: impl Into<DslValue>) -> Self {
        self.inner.set("minimum_should_match", minimum);
        self
    }

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

    pub fn fuzzy_transpositions(mut self, enabled: bool) -> Self {
        self.inner.set("fuzzy_transpositions", enabled);
        self
    }

    pub fn fuzzy_rewrite(mut self, rewrite: Rewrite) -> Self {
        self.inner.set("fuzzy_rewrite", rewrite);
        self
    }
}

/// Runs a match query over several fields.
#[derive(Debug, Clone)]
pub struct MultiMatchQuery {
    inner: Query,
}

impl MultiMatchQuery {
    pub fn new<I, S>(fields: I, query: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let mut inner = Query::new("multi_match");
        inner.set("query", query.into());
        inner.set("fields", fields);
        Self { inner }
    }

    pub fn multi_match_type(mut self, kind: MultiMatchType) -> Self {
        self.inner.set("type", kind);
        self
    }

    /// Weight of the non-best matching fields in the final score.
    pub fn tie_breaker(mut self, tie_breaker: f64) -> Self {
        self.inner.set("tie_breaker", tie_breaker);
        self
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.inner.set("operator", operator);
        self
    }

    pub fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.inner.set("analyzer", analyzer.into());
        self
    }

    pub fn minimum_should_match(mut self, minimum: impl Into<DslValue>) -> Self {
        self.inner.set("minimum_should_match", minimum);
        self
    }

    pub fn fuzziness(mut self, fuzziness: impl Into<DslValue>) -> Self {
        self.inner.set("fuzziness", fuzziness);
        self
    }

    pub fn slop(mut self, slop: u32) -> Self {
        self.inner.set("slop", slop);
        self
    }

    pub fn zero_terms_query(mut self, behaviour: ZeroTermsQuery) -> Self {
        self.inner.set("zero_terms_query", behaviour);
        self
    }
}

impl Serializable for MultiMatchQuery {
    fn to_value(&self) -> Result<DslValue, DslError> {
        self.inner.to_value()
    }

    fn capability(&self) -> &'static str {
        QUERY_CAPABILITY
    }
}

impl_query_builder!(MultiMatchQuery);

/// Setters shared by the query string queries.
pub trait QueryStringBuilder: QueryBuilder {
    /// Fields to query, with optional `^boost` suffixes.
    fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        self.base_mut().set("fields", fields);
        self
    }

    fn default_operator(mut self, operator: Operator) -> Self {
        self.base_mut().set("default_operator", operator);
        self
    }

    fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.base_mut().set("analyzer", analyzer.into());
        self
    }

    fn analyze_wildcard(mut self, enabled: bool) -> Self {
        self.base_mut().set("analyze_wildcard", enabled);
        self
    }

    fn lenient(mut self, lenient: bool) -> Self {
        self.base_mut().set("lenient", lenient);
        self
    }

    fn minimum_should_match(mut self, minimum: impl Into<DslValue>) -> Self {
        self.base_mut().set("minimum_should_match", minimum);
        self
    }

    fn quote_field_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.base_mut().set("quote_field_suffix", suffix.into());
        self
    }

    fn fuzzy_max_expansions(mut self, max: u32) -> Self {
        self.base_mut().set("fuzzy_max_expansions", max);
        self
    }

    fn fuzzy_prefix_length(mut self, length: u32) -> Self {
        self.base_mut().set("fuzzy_prefix_length", length);
        self
    }

    fn fuzzy_transpositions(mut self, enabled: bool) -> Self {
        self.base_mut().set("fuzzy_transpositions", enabled);
        self
    }

    fn auto_generate_synonyms_phrase_query(mut self, enabled: bool) -> Self {
        self.base_mut()
            .set("auto_generate_synonyms_phrase_query", enabled);
        self
    }
}

fn require_query_string(inner: &Query) -> Result<DslValue, DslError> {
    if !inner.opts().contains_key("query") {
        return Err(DslError::serialization(QUERY_STRING_REQUIRED));
    }
    inner.to_value()
}

/// Parses a query string with the full Lucene syntax.
#[derive(Debug, Clone)]
pub struct QueryStringQuery {
    inner: Query,
}

impl QueryStringQuery {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let mut inner = Query::new("query_string");
        if !query.is_empty() {
            inner.set("query", query);
        }
        Self { inner }
    }

    /// Field searched when the query string names none.
    pub fn default_field(mut self, field: impl Into<String>) -> Self {
        self.inner.set("default_field", field.into());
        self
    }

    pub fn allow_leading_wildcard(mut self, enabled: bool) -> Self {
        self.inner.set("allow_leading_wildcard", enabled);
        self
    }

    pub fn enable_position_increments(mut self, enabled: bool) -> Self {
        self.inner.set("enable_position_increments", enabled);
        self
    }

    pub fn fuzziness(mut self, fuzziness: impl Into<DslValue>) -> Self {
        self.inner.set("fuzziness", fuzziness);
        self
    }

    pub fn phrase_slop(mut self, slop: u32) -> Self {
        self.inner.set("phrase_slop", slop);
        self
    }

    pub fn quote_analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.inner.set("quote_analyzer", analyzer.into());
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

    pub fn time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.inner.set("time_zone", time_zone.into());
        self
    }

    pub fn tie_breaker(mut self, tie_breaker: f64) -> Self {
        self.inner.set("tie_breaker", tie_breaker);
        self
    }

    pub fn escape(mut self, escape: bool) -> Self {
        self.inner.set("escape", escape);
        self
    }
}

impl Serializable for QueryStringQuery {
    fn to_value(&self) -> Result<DslValue, DslError> {
        require_query_string(&self.inner)
    }

    fn capability(&self) -> &'static str {
        QUERY_CAPABILITY
    }
}

/// Parses a query string with a limited, fault-tolerant syntax.
#[derive(Debug, Clone)]
pub struct SimpleQueryStringQuery {
    inner: Query,
}

impl SimpleQueryStringQuery {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let mut inner = Query::new("simple_query_string");
        if !query.is_empty() {
            inner.set("query", query);
        }
        Self { inner }
    }

    /// Enabled operators, e.g. `OR|AND|PREFIX`.
    pub fn flags(mut self, flags: impl Into<String>) -> Self {
        self.inner.set("flags", flags.into());
        self
    }
}

impl Serializable for SimpleQueryStringQuery {
    fn to_value(&self) -> Result<DslValue, DslError> {
        require_query_string(&self.inner)
    }

    fn capability(&self) -> &'static str {
        QUERY_CAPABILITY
    }
}

impl_query_builder!(QueryStringQuery, SimpleQueryStringQuery);

impl QueryStringBuilder for QueryStringQuery {}
impl QueryStringBuilder for SimpleQueryStringQuery {}
