//! Request body of a search.
//!
//! [`RequestBodySearch`] is the top-level container handed to the search
//! client. It serializes its sections in a fixed order: `query`, `aggs`,
//! `suggest`, followed by the flat options in the order they were first set.

use search_dsl_shared::{DslError, DslValue, OptionsBag, Serializable};
use serde_json::Value;

use crate::core::util::merge_labelled;
use crate::core::{
    AnyAggregation, AnyQuery, AnySuggester, Collapse, Highlight, Rescore, Script, Sort,
    SourceFilter,
};

/// Search request body builder.
#[derive(Debug, Clone, Default)]
pub struct RequestBodySearch {
    query: Option<AnyQuery>,
    aggs: Vec<AnyAggregation>,
    suggesters: Vec<AnySuggester>,
    suggest_text: Option<String>,
    script_fields: Option<OptionsBag>,
    opts: OptionsBag,
}

impl RequestBodySearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query of the search. Replaces a previously set query.
    pub fn query(mut self, query: impl Into<AnyQuery>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the query from an erased value, failing unless it holds a query.
    pub fn try_query(self, query: DslValue) -> Result<Self, DslError> {
        Ok(self.query(AnyQuery::try_from(query)?))
    }

    /// Add an aggregation.
    pub fn aggregation(mut self, aggregation: impl Into<AnyAggregation>) -> Self {
        self.aggs.push(aggregation.into());
        self
    }

    /// Alias of [`aggregation`](Self::aggregation).
    pub fn agg(self, aggregation: impl Into<AnyAggregation>) -> Self {
        self.aggregation(aggregation)
    }

    /// Add several aggregations, in order.
    pub fn aggregations<I>(mut self, aggregations: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyAggregation>,
    {
        self.aggs.extend(aggregations.into_iter().map(Into::into));
        self
    }

    /// Alias of [`aggregations`](Self::aggregations).
    pub fn aggs<I>(self, aggregations: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyAggregation>,
    {
        self.aggregations(aggregations)
    }

    /// Add an aggregation from an erased value, failing unless it holds one.
    pub fn try_aggregation(self, aggregation: DslValue) -> Result<Self, DslError> {
        Ok(self.aggregation(AnyAggregation::try_from(aggregation)?))
    }

    /// Add a suggester.
    pub fn suggest(mut self, suggester: impl Into<AnySuggester>) -> Self {
        self.suggesters.push(suggester.into());
        self
    }

    /// Add several suggesters, in order.
    pub fn suggesters<I>(mut self, suggesters: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnySuggester>,
    {
        self.suggesters.extend(suggesters.into_iter().map(Into::into));
        self
    }

    /// Add a suggester from an erased value, failing unless it holds one.
    pub fn try_suggest(self, suggester: DslValue) -> Result<Self, DslError> {
        Ok(self.suggest(AnySuggester::try_from(suggester)?))
    }

    /// Text shared by every suggester that does not set its own.
    pub fn suggest_text(mut self, text: impl Into<String>) -> Self {
        self.suggest_text = Some(text.into());
        self
    }

    /// Offset of the first hit returned.
    pub fn from(self, from: u64) -> Self {
        self.option("from", from)
    }

    /// Maximum number of hits returned.
    pub fn size(self, size: u64) -> Self {
        self.option("size", size)
    }

    /// Search timeout, e.g. `5s`.
    pub fn timeout(self, timeout: impl Into<String>) -> Self {
        self.option("timeout", timeout.into())
    }

    /// Maximum number of documents to collect per shard.
    pub fn terminate_after(self, count: u64) -> Self {
        self.option("terminate_after", count)
    }

    /// Add a sort criterion. `sort` is always serialized as an array.
    pub fn sort(mut self, sort: impl Into<Sort>) -> Self {
        self.opts.push("sort", sort.into());
        self
    }

    /// Add several sort criteria, in order.
    pub fn sorts<I>(self, sorts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Sort>,
    {
        sorts.into_iter().fold(self, |body, sort| body.sort(sort))
    }

    /// Compute scores even when sorting on a field.
    pub fn track_scores(self, enabled: bool) -> Self {
        self.option("track_scores", enabled)
    }

    /// Track the total hit count accurately, or up to a limit when given a
    /// number.
    pub fn track_total_hits(self, track: impl Into<DslValue>) -> Self {
        self.option("track_total_hits", track)
    }

    /// `_source` filtering.
    pub fn source(self, source: impl Into<SourceFilter>) -> Self {
        self.option("_source", source.into())
    }

    /// Stored fields to return with each hit.
    pub fn stored_fields<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        self.option("stored_fields", fields)
    }

    /// Add a field computed by `script` for each hit.
    pub fn script_field(mut self, name: impl Into<String>, script: Script) -> Self {
        let mut field = OptionsBag::new();
        field.set("script", script);
        if !self.opts.contains_key("script_fields") {
            self.opts.set("script_fields", DslValue::null());
        }
        self.script_fields
            .get_or_insert_with(OptionsBag::new)
            .set(name, field);
        self
    }

    /// Add several script fields, in order.
    pub fn script_fields<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Script)>,
        S: Into<String>,
    {
        fields
            .into_iter()
            .fold(self, |body, (name, script)| body.script_field(name, script))
    }

    /// Doc value fields to return with each hit.
    pub fn docvalue_fields<I, S>(self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        self.option("docvalue_fields", fields)
    }

    /// Filter applied to hits after aggregations are computed.
    pub fn post_filter(self, filter: impl Into<AnyQuery>) -> Self {
        self.option("post_filter", filter.into())
    }

    pub fn highlight(self, highlight: Highlight) -> Self {
        self.option("highlight", highlight)
    }

    /// Add a rescorer. One rescorer serializes as an object, several as an
    /// array.
    pub fn rescore(mut self, rescore: Rescore) -> Self {
        self.opts.push("rescore", rescore);
        self
    }

    /// Return an explanation of the score of each hit.
    pub fn explain(self, enabled: bool) -> Self {
        self.option("explain", enabled)
    }

    /// Return the version of each hit.
    pub fn version(self, enabled: bool) -> Self {
        self.option("version", enabled)
    }

    /// Boost the scores of hits from `index`.
    pub fn indices_boost(mut self, index: impl Into<String>, boost: f64) -> Self {
        let mut entry = OptionsBag::new();
        entry.set(index, boost);
        self.opts.push("indices_boost", entry);
        self
    }

    /// Exclude hits scoring below `score`.
    pub fn min_score(self, score: f64) -> Self {
        self.option("min_score", score)
    }

    pub fn collapse(self, collapse: Collapse) -> Self {
        self.option("collapse", collapse)
    }

    /// Sort values of the last hit of the previous page.
    pub fn search_after<I>(self, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<DslValue>,
    {
        let values: Vec<DslValue> = values.into_iter().map(Into::into).collect();
        self.option("search_after", values)
    }

    /// Set an arbitrary flat option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<DslValue>) -> Self {
        self.opts.set(key, value);
        self
    }

    /// Alias of [`Serializable::to_json`].
    pub fn get_dsl(&self) -> Result<Value, DslError> {
        self.to_json()
    }

    fn flat_options(&self) -> OptionsBag {
        let mut opts = self.opts.clone();
        if let Some(script_fields) = &self.script_fields {
            opts.set("script_fields", script_fields.clone());
        }
        if let Some(DslValue::Array(rescores)) = opts.get("rescore") {
            if let [single] = rescores.as_slice() {
                let single = single.clone();
                opts.set("rescore", single);
            }
        }
        opts
    }
}

impl Serializable for RequestBodySearch {
    fn to_value(&self) -> Result<DslValue, DslError> {
        let mut body = OptionsBag::new();

        if let Some(query) = &self.query {
            body.set("query", query.clone());
        }

        if !self.aggs.is_empty() {
            body.set("aggs", Value::Object(merge_labelled(&self.aggs)?));
        }

        if !self.suggesters.is_empty() || self.suggest_text.is_some() {
            let mut suggest = merge_labelled(&self.suggesters)?;
            if let Some(text) = &self.suggest_text {
                suggest.insert("text".to_string(), Value::String(text.clone()));
            }
            body.set("suggest", Value::Object(suggest));
        }

        for (key, value) in self.flat_options() {
            body.set(key, value);
        }

        Ok(body.into())
    }

    fn capability(&self) -> &'static str {
        "RequestBodySearch"
    }
}

search_dsl_shared::impl_json_serialize!(RequestBodySearch);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregations::{AvgAggregation, TermsAggregation};
    use crate::core::{AggregationBuilder, AnalyzedSuggesterBuilder, SortOrder, SuggesterBuilder};
    use crate::queries::{BoolQuery, MatchQuery, TermQuery};
    use crate::suggesters::TermSuggester;
    use serde_json::json;

    #[test]
    fn test_end_to_end_shape() {
        let body = RequestBodySearch::new()
            .query(TermQuery::new("user", "kimchy"))
            .agg(TermsAggregation::new("colors", "color").unwrap())
            .from(0)
            .size(10);
        assert_eq!(
            serde_json::to_string(&body.to_json().unwrap()).unwrap(),
            r#"{"query":{"term":{"user":"kimchy"}},"aggs":{"colors":{"terms":{"field":"color"}}},"from":0,"size":10}"#
        );
    }

    #[test]
    fn test_sections_precede_flat_options() {
        let body = RequestBodySearch::new()
            .size(5)
            .agg(TermsAggregation::new("colors", "color").unwrap())
            .query(MatchQuery::new("title", "rust"));
        let json = body.to_json().unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["query", "aggs", "size"]);
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(RequestBodySearch::new().to_json().unwrap(), json!({}));
    }

    #[test]
    fn test_aggregations_are_merged_by_label() {
        let body = RequestBodySearch::new().aggs(vec![
            crate::core::AnyAggregation::from(TermsAggregation::new("colors", "color").unwrap()),
            crate::core::AnyAggregation::from(
                AvgAggregation::new("avg_price", "price").unwrap(),
            ),
        ]);
        assert_eq!(
            body.to_json().unwrap(),
            json!({
                "aggs": {
                    "colors": { "terms": { "field": "color" } },
                    "avg_price": { "avg": { "field": "price" } }
                }
            })
        );
    }

    #[test]
    fn test_nested_aggregation_is_merged_into_aggs() {
        let body = RequestBodySearch::new().agg(
            TermsAggregation::new("colors", "color")
                .unwrap()
                .agg(AvgAggregation::new("avg_price", "price").unwrap()),
        );
        assert_eq!(
            body.to_json().unwrap(),
            json!({
                "aggs": {
                    "colors": { "terms": { "field": "color" } },
                    "aggs": { "avg_price": { "avg": { "field": "price" } } }
                }
            })
        );
    }

    #[test]
    fn test_suggest_section() {
        let body = RequestBodySearch::new()
            .suggest(TermSuggester::new("my-suggest-1").unwrap().field("message"))
            .suggest(
                TermSuggester::new("my-suggest-2")
                    .unwrap()
                    .text("kmichy")
                    .field("user"),
            )
            .suggest_text("tring out Elasticsearch");
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"suggest":{"my-suggest-1":{"term":{"field":"message"}},"my-suggest-2":{"term":{"field":"user"},"text":"kmichy"},"text":"tring out Elasticsearch"}}"#
        );
    }

    #[test]
    fn test_sort_is_always_an_array() {
        let body = RequestBodySearch::new().sort(Sort::new("post_date").order(SortOrder::Asc));
        assert_eq!(
            body.to_json().unwrap(),
            json!({ "sort": [{ "post_date": "asc" }] })
        );

        let body = RequestBodySearch::new().sorts(["user", "_score"]);
        assert_eq!(body.to_json().unwrap(), json!({ "sort": ["user", "_score"] }));
    }

    #[test]
    fn test_rescore_single_and_several() {
        let single = RequestBodySearch::new().rescore(Rescore::new(10, MatchQuery::new("a", "b")));
        assert!(single.to_json().unwrap()["rescore"].is_object());

        let several = RequestBodySearch::new()
            .rescore(Rescore::new(10, MatchQuery::new("a", "b")))
            .rescore(Rescore::new(20, MatchQuery::new("c", "d")));
        assert_eq!(several.to_json().unwrap()["rescore"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_flat_options_keep_insertion_order() {
        let body = RequestBodySearch::new()
            .source(vec!["obj1.*", "obj2.*"])
            .script_field("test1", Script::inline("doc['price'].value * 2"))
            .track_total_hits(true)
            .script_field(
                "test2",
                Script::inline("doc['price'].value * params.factor").param("factor", 2.0),
            )
            .indices_boost("my-index-000001", 1.4)
            .indices_boost("my-index-000002", 1.3)
            .min_score(0.5)
            .search_after(vec![DslValue::from(1463538857), DslValue::from("654323")]);
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            concat!(
                r#"{"_source":["obj1.*","obj2.*"],"#,
                r#""script_fields":{"test1":{"script":{"source":"doc['price'].value * 2"}},"#,
                r#""test2":{"script":{"source":"doc['price'].value * params.factor","params":{"factor":2.0}}}},"#,
                r#""track_total_hits":true,"#,
                r#""indices_boost":[{"my-index-000001":1.4},{"my-index-000002":1.3}],"#,
                r#""min_score":0.5,"search_after":[1463538857,"654323"]}"#
            )
        );
    }

    #[test]
    fn test_post_filter_highlight_and_collapse() {
        let body = RequestBodySearch::new()
            .query(BoolQuery::new().filter(TermQuery::new("brand", "gucci")))
            .post_filter(TermQuery::new("color", "red"))
            .highlight(Highlight::new().field("content"))
            .collapse(Collapse::new("user.id"));
        assert_eq!(
            body.to_json().unwrap(),
            json!({
                "query": { "bool": { "filter": { "term": { "brand": "gucci" } } } },
                "post_filter": { "term": { "color": "red" } },
                "highlight": { "fields": { "content": {} } },
                "collapse": { "field": "user.id" }
            })
        );
    }

    #[test]
    fn test_try_query_rejects_aggregations() {
        let agg = crate::core::AnyAggregation::from(TermsAggregation::new("colors", "color").unwrap());
        let err = RequestBodySearch::new()
            .try_query(DslValue::from(agg))
            .unwrap_err();
        assert_eq!(err.to_string(), "Argument must be an instance of Query");
    }

    #[test]
    fn test_try_variants_accept_matching_entities() {
        let query = DslValue::from(AnyQuery::from(TermQuery::new("user", "kimchy")));
        let body = RequestBodySearch::new().try_query(query).unwrap();
        assert_eq!(body.to_json().unwrap(), json!({ "query": { "term": { "user": "kimchy" } } }));

        assert!(RequestBodySearch::new()
            .try_aggregation(DslValue::from("colors"))
            .is_err());
        assert!(RequestBodySearch::new()
            .try_suggest(DslValue::from(json!({ "term": {} })))
            .is_err());
    }

    #[test]
    fn test_serialization_is_idempotent() {
        let body = RequestBodySearch::new()
            .query(TermQuery::new("user", "kimchy"))
            .agg(TermsAggregation::new("colors", "color").unwrap())
            .size(10);
        assert_eq!(body.to_json().unwrap(), body.to_json().unwrap());
        assert_eq!(body.get_dsl().unwrap(), body.to_json().unwrap());
    }
}
