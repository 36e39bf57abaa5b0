//! Bucket aggregations.

use search_dsl_shared::{param_enum, DslError, DslValue, OptionsBag, Serializable};

use crate::aggregations::ValuesSourceBuilder;
use crate::core::{
    impl_aggregation_builder, impl_plain_aggregation, Aggregation, AnyQuery, SortOrder,
    AGGREGATION_CAPABILITY,
};

param_enum! {
    /// Mechanism used to collect terms.
    pub enum TermsExecutionHint("execution_hint", "search-aggregations-bucket-terms-aggregation.html", Lower) {
        Map => "map",
        GlobalOrdinals => "global_ordinals",
    }
}

param_enum! {
    /// Order in which the sub-aggregation tree is built.
    pub enum CollectMode("collect_mode", "search-aggregations-bucket-terms-aggregation.html", Lower) {
        DepthFirst => "depth_first",
        BreadthFirst => "breadth_first",
    }
}

param_enum! {
    /// Calendar-aware date histogram interval.
    pub enum CalendarInterval("calendar_interval", "search-aggregations-bucket-datehistogram-aggregation.html", Lower) {
        Minute => "minute",
        Hour => "hour",
        Day => "day",
        Week => "week",
        Month => "month",
        Quarter => "quarter",
        Year => "year",
    }
}

fn ordering(key: impl Into<String>, direction: SortOrder) -> OptionsBag {
    let mut order = OptionsBag::new();
    order.set(key, direction);
    order
}

/// One bucket per unique value.
#[derive(Debug, Clone)]
pub struct TermsAggregation {
    inner: Aggregation,
}

impl TermsAggregation {
    /// Bucket on the values of `field`. An empty field leaves the values
    /// source to [`ValuesSourceBuilder::script`].
    pub fn new(label: impl Into<String>, field: impl Into<String>) -> Result<Self, DslError> {
        let field = field.into();
        let mut inner = Aggregation::new(label, "terms")?;
        if !field.is_empty() {
            inner.set("field", field);
        }
        Ok(Self { inner })
    }

    /// Number of buckets returned.
    pub fn size(mut self, size: u32) -> Self {
        self.inner.set("size", size);
        self
    }

    /// Number of candidate terms requested from each shard.
    pub fn shard_size(mut self, size: u32) -> Self {
        self.inner.set("shard_size", size);
        self
    }

    pub fn min_doc_count(mut self, count: u64) -> Self {
        self.inner.set("min_doc_count", count);
        self
    }

    pub fn show_term_doc_count_error(mut self, enabled: bool) -> Self {
        self.inner.set("show_term_doc_count_error", enabled);
        self
    }

    /// Order buckets by `key`, e.g. `_count`, `_key` or a metric sub-aggregation.
    pub fn order(mut self, key: impl Into<String>, direction: SortOrder) -> Self {
        self.inner.set("order", ordering(key, direction));
        self
    }

    /// Order buckets by several criteria, in priority order.
    pub fn orders<I, K>(mut self, orders: I) -> Self
    where
        I: IntoIterator<Item = (K, SortOrder)>,
        K: Into<String>,
    {
        let orders: Vec<OptionsBag> = orders
            .into_iter()
            .map(|(key, direction)| ordering(key, direction))
            .collect();
        self.inner.set("order", orders);
        self
    }

    /// Terms to include: a regular expression or a list of values.
    pub fn include(mut self, include: impl Into<DslValue>) -> Self {
        self.inner.set("include", include);
        self
    }

    /// Terms to exclude: a regular expression or a list of values.
    pub fn exclude(mut self, exclude: impl Into<DslValue>) -> Self {
        self.inner.set("exclude", exclude);
        self
    }

    pub fn execution_hint(mut self, hint: TermsExecutionHint) -> Self {
        self.inner.set("execution_hint", hint);
        self
    }

    pub fn collect_mode(mut self, mode: CollectMode) -> Self {
        self.inner.set("collect_mode", mode);
        self
    }
}

/// Fixed-width numeric buckets.
#[derive(Debug, Clone)]
pub struct HistogramAggregation {
    inner: Aggregation,
}

impl HistogramAggregation {
    pub fn new(
        label: impl Into<String>,
        field: impl Into<String>,
        interval: f64,
    ) -> Result<Self, DslError> {
        let mut inner = Aggregation::new(label, "histogram")?;
        inner.set("field", field.into());
        inner.set("interval", interval);
        Ok(Self { inner })
    }

    pub fn min_doc_count(mut self, count: u64) -> Self {
        self.inner.set("min_doc_count", count);
        self
    }

    /// Force buckets to be created between `min` and `max`.
    pub fn extended_bounds(mut self, min: f64, max: f64) -> Self {
        let mut bounds = OptionsBag::new();
        bounds.set("min", min);
        bounds.set("max", max);
        self.inner.set("extended_bounds", bounds);
        self
    }

    /// Limit buckets to those between `min` and `max`.
    pub fn hard_bounds(mut self, min: f64, max: f64) -> Self {
        let mut bounds = OptionsBag::new();
        bounds.set("min", min);
        bounds.set("max", max);
        self.inner.set("hard_bounds", bounds);
        self
    }

    /// Shift bucket boundaries by `offset`.
    pub fn offset(mut self, offset: f64) -> Self {
        self.inner.set("offset", offset);
        self
    }

    pub fn keyed(mut self, keyed: bool) -> Self {
        self.inner.set("keyed", keyed);
        self
    }

    pub fn order(mut self, key: impl Into<String>, direction: SortOrder) -> Self {
        self.inner.set("order", ordering(key, direction));
        self
    }
}

/// Date buckets of a calendar or fixed interval.
#[derive(Debug, Clone)]
pub struct DateHistogramAggregation {
    inner: Aggregation,
}

impl DateHistogramAggregation {
    pub fn new(label: impl Into<String>, field: impl Into<String>) -> Result<Self, DslError> {
        let mut inner = Aggregation::new(label, "date_histogram")?;
        inner.set("field", field.into());
        Ok(Self { inner })
    }

    pub fn calendar_interval(mut self, interval: CalendarInterval) -> Self {
        self.inner.set("calendar_interval", interval);
        self
    }

    /// Fixed interval in SI units, e.g. `90m`.
    pub fn fixed_interval(mut self, interval: impl Into<String>) -> Self {
        self.inner.set("fixed_interval", interval.into());
        self
    }

    pub fn time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.inner.set("time_zone", time_zone.into());
        self
    }

    /// Shift bucket boundaries, e.g. `+6h`.
    pub fn offset(mut self, offset: impl Into<String>) -> Self {
        self.inner.set("offset", offset.into());
        self
    }

    pub fn min_doc_count(mut self, count: u64) -> Self {
        self.inner.set("min_doc_count", count);
        self
    }

    pub fn extended_bounds(mut self, min: impl Into<DslValue>, max: impl Into<DslValue>) -> Self {
        let mut bounds = OptionsBag::new();
        bounds.set("min", min);
        bounds.set("max", max);
        self.inner.set("extended_bounds", bounds);
        self
    }

    pub fn keyed(mut self, keyed: bool) -> Self {
        self.inner.set("keyed", keyed);
        self
    }
}

/// One range of a [`RangeAggregation`]. `from` is inclusive, `to` exclusive.
#[derive(Debug, Clone, Default)]
pub struct RangeBucket {
    opts: OptionsBag,
}

impl RangeBucket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.opts.set("key", key.into());
        self
    }

    pub fn from(mut self, from: impl Into<DslValue>) -> Self {
        self.opts.set("from", from);
        self
    }

    pub fn to(mut self, to: impl Into<DslValue>) -> Self {
        self.opts.set("to", to);
        self
    }
}

impl From<RangeBucket> for DslValue {
    fn from(bucket: RangeBucket) -> Self {
        bucket.opts.into()
    }
}

/// One bucket per user-defined range.
#[derive(Debug, Clone)]
pub struct RangeAggregation {
    inner: Aggregation,
    ranges: Vec<RangeBucket>,
}

impl RangeAggregation {
    pub fn new(label: impl Into<String>, field: impl Into<String>) -> Result<Self, DslError> {
        let mut inner = Aggregation::new(label, "range")?;
        inner.set("field", field.into());
        Ok(Self {
            inner,
            ranges: Vec::new(),
        })
    }

    pub fn range(mut self, bucket: RangeBucket) -> Self {
        self.ranges.push(bucket);
        self
    }

    pub fn ranges(mut self, buckets: impl IntoIterator<Item = RangeBucket>) -> Self {
        self.ranges.extend(buckets);
        self
    }

    pub fn keyed(mut self, keyed: bool) -> Self {
        self.inner.set("keyed", keyed);
        self
    }
}

impl Serializable for RangeAggregation {
    fn to_value(&self) -> Result<DslValue, DslError> {
        if self.ranges.is_empty() {
            return Err(DslError::serialization("`ranges` cannot be empty"));
        }
        let mut body = self.inner.opts().clone();
        body.set("ranges", self.ranges.clone());
        self.inner.render(body)
    }

    fn capability(&self) -> &'static str {
        AGGREGATION_CAPABILITY
    }
}

/// Single bucket of the documents matching a query.
#[derive(Debug, Clone)]
pub struct FilterAggregation {
    inner: Aggregation,
    filter: AnyQuery,
}

impl FilterAggregation {
    pub fn new(label: impl Into<String>, filter: impl Into<AnyQuery>) -> Result<Self, DslError> {
        Ok(Self {
            inner: Aggregation::new(label, "filter")?,
            filter: filter.into(),
        })
    }
}

impl Serializable for FilterAggregation {
    fn to_value(&self) -> Result<DslValue, DslError> {
        self.inner.render(self.filter.clone())
    }

    fn capability(&self) -> &'static str {
        AGGREGATION_CAPABILITY
    }
}

/// One bucket per filter query.
///
/// Filters are either all named or all anonymous.
#[derive(Debug, Clone)]
pub struct FiltersAggregation {
    inner: Aggregation,
    named: Vec<(String, AnyQuery)>,
    anonymous: Vec<AnyQuery>,
}

impl FiltersAggregation {
    pub fn new(label: impl Into<String>) -> Result<Self, DslError> {
        Ok(Self {
            inner: Aggregation::new(label, "filters")?,
            named: Vec::new(),
            anonymous: Vec::new(),
        })
    }

    /// Add a bucket named `name`.
    pub fn filter(mut self, name: impl Into<String>, filter: impl Into<AnyQuery>) -> Self {
        self.named.push((name.into(), filter.into()));
        self
    }

    /// Add an unnamed bucket. Buckets are returned in insertion order.
    pub fn anonymous_filter(mut self, filter: impl Into<AnyQuery>) -> Self {
        self.anonymous.push(filter.into());
        self
    }

    /// Add a bucket for documents matching none of the filters.
    pub fn other_bucket(mut self, enabled: bool) -> Self {
        self.inner.set("other_bucket", enabled);
        self
    }

    /// Key of the other bucket. Implies `other_bucket`.
    pub fn other_bucket_key(mut self, key: impl Into<String>) -> Self {
        self.inner.set("other_bucket_key", key.into());
        self
    }
}

impl Serializable for FiltersAggregation {
    fn to_value(&self) -> Result<DslValue, DslError> {
        let filters: DslValue = match (self.named.is_empty(), self.anonymous.is_empty()) {
            (false, false) => {
                return Err(DslError::serialization(
                    "Filters aggregation cannot mix named and anonymous filters",
                ))
            }
            (true, false) => self.anonymous.clone().into(),
            _ => self.named.iter().cloned().collect::<OptionsBag>().into(),
        };

        let mut body = OptionsBag::new();
        body.set("filters", filters);
        for (key, value) in self.inner.opts().iter() {
            body.set(key, value.clone());
        }
        self.inner.render(body)
    }

    fn capability(&self) -> &'static str {
        AGGREGATION_CAPABILITY
    }
}

/// Single bucket aggregating nested documents.
#[derive(Debug, Clone)]
pub struct NestedAggregation {
    inner: Aggregation,
}

impl NestedAggregation {
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Result<Self, DslError> {
        let mut inner = Aggregation::new(label, "nested")?;
        inner.set("path", path.into());
        Ok(Self { inner })
    }
}

/// Single bucket of every document, regardless of the search query.
#[derive(Debug, Clone)]
pub struct GlobalAggregation {
    inner: Aggregation,
}

impl GlobalAggregation {
    pub fn new(label: impl Into<String>) -> Result<Self, DslError> {
        Ok(Self {
            inner: Aggregation::new(label, "global")?,
        })
    }
}

/// Single bucket of the documents missing a field value.
#[derive(Debug, Clone)]
pub struct MissingAggregation {
    inner: Aggregation,
}

impl MissingAggregation {
    pub fn new(label: impl Into<String>, field: impl Into<String>) -> Result<Self, DslError> {
        let mut inner = Aggregation::new(label, "missing")?;
        inner.set("field", field.into());
        Ok(Self { inner })
    }
}

impl_plain_aggregation!(
    TermsAggregation,
    HistogramAggregation,
    DateHistogramAggregation,
    NestedAggregation,
    GlobalAggregation,
    MissingAggregation,
);
impl_aggregation_builder!(RangeAggregation, FilterAggregation, FiltersAggregation);

impl ValuesSourceBuilder for TermsAggregation {}
impl ValuesSourceBuilder for HistogramAggregation {}
impl ValuesSourceBuilder for DateHistogramAggregation {}
impl ValuesSourceBuilder for RangeAggregation {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregations::{AvgAggregation, TopHitsAggregation};
    use crate::core::{AggregationBuilder, Script, Sort};
    use crate::queries::{MatchQuery, TermQuery};
    use serde_json::json;

    #[test]
    fn test_terms() {
        let agg = TermsAggregation::new("genres", "genre")
            .unwrap()
            .size(10)
            .order("_count", SortOrder::Desc)
            .execution_hint(TermsExecutionHint::Map);
        assert_eq!(
            agg.to_json().unwrap(),
            json!({
                "genres": {
                    "terms": {
                        "field": "genre",
                        "size": 10,
                        "order": { "_count": "desc" },
                        "execution_hint": "map"
                    }
                }
            })
        );
    }

    #[test]
    fn test_terms_multiple_orders_and_filtering() {
        let agg = TermsAggregation::new("tags", "tags")
            .unwrap()
            .orders([("rock>playback_stats.avg", SortOrder::Desc), ("_count", SortOrder::Desc)])
            .include(".*sport.*")
            .exclude(vec!["water_sports"])
            .missing("N/A");
        assert_eq!(
            agg.to_json().unwrap(),
            json!({
                "tags": {
                    "terms": {
                        "field": "tags",
                        "order": [{ "rock>playback_stats.avg": "desc" }, { "_count": "desc" }],
                        "include": ".*sport.*",
                        "exclude": ["water_sports"],
                        "missing": "N/A"
                    }
                }
            })
        );
    }

    #[test]
    fn test_terms_with_script() {
        let agg = TermsAggregation::new("genres", "")
            .unwrap()
            .script(Script::inline("doc['genre'].value").lang("painless"));
        assert_eq!(
            agg.to_json().unwrap(),
            json!({
                "genres": {
                    "terms": { "script": { "source": "doc['genre'].value", "lang": "painless" } }
                }
            })
        );
    }

    #[test]
    fn test_histogram() {
        let agg = HistogramAggregation::new("prices", "price", 50.0)
            .unwrap()
            .min_doc_count(1)
            .extended_bounds(0.0, 500.0);
        assert_eq!(
            agg.to_json().unwrap(),
            json!({
                "prices": {
                    "histogram": {
                        "field": "price",
                        "interval": 50.0,
                        "min_doc_count": 1,
                        "extended_bounds": { "min": 0.0, "max": 500.0 }
                    }
                }
            })
        );
    }

    #[test]
    fn test_date_histogram() {
        let agg = DateHistogramAggregation::new("sales_over_time", "date")
            .unwrap()
            .calendar_interval(CalendarInterval::Month)
            .format("yyyy-MM-dd")
            .time_zone("-01:00");
        assert_eq!(
            agg.to_json().unwrap(),
            json!({
                "sales_over_time": {
                    "date_histogram": {
                        "field": "date",
                        "calendar_interval": "month",
                        "format": "yyyy-MM-dd",
                        "time_zone": "-01:00"
                    }
                }
            })
        );
    }

    #[test]
    fn test_calendar_interval_any_case() {
        assert_eq!(
            "MONTH".parse::<CalendarInterval>().unwrap(),
            CalendarInterval::Month
        );
        assert!("fortnight".parse::<CalendarInterval>().is_err());
    }

    #[test]
    fn test_range() {
        let agg = RangeAggregation::new("price_ranges", "price")
            .unwrap()
            .range(RangeBucket::new().to(100.0))
            .range(RangeBucket::new().from(100.0).to(200.0))
            .range(RangeBucket::new().key("expensive").from(200.0))
            .keyed(true);
        assert_eq!(
            agg.to_json().unwrap(),
            json!({
                "price_ranges": {
                    "range": {
                        "field": "price",
                        "keyed": true,
                        "ranges": [
                            { "to": 100.0 },
                            { "from": 100.0, "to": 200.0 },
                            { "key": "expensive", "from": 200.0 }
                        ]
                    }
                }
            })
        );
    }

    #[test]
    fn test_range_without_buckets_fails_at_serialization() {
        let agg = RangeAggregation::new("price_ranges", "price").unwrap().keyed(true);
        assert_eq!(
            agg.to_json().unwrap_err(),
            DslError::serialization("`ranges` cannot be empty")
        );

        let agg = agg.range(RangeBucket::new().to(50.0));
        assert!(agg.to_json().is_ok());
    }

    #[test]
    fn test_filter() {
        let agg = FilterAggregation::new("t_shirts", TermQuery::new("type", "t-shirt"))
            .unwrap()
            .agg(AvgAggregation::new("avg_price", "price").unwrap());
        assert_eq!(
            serde_json::to_string(&agg).unwrap(),
            r#"{"t_shirts":{"filter":{"term":{"type":"t-shirt"}}},"aggs":{"avg_price":{"avg":{"field":"price"}}}}"#
        );
    }

    #[test]
    fn test_named_filters() {
        let agg = FiltersAggregation::new("messages")
            .unwrap()
            .filter("errors", MatchQuery::new("body", "error"))
            .filter("warnings", MatchQuery::new("body", "warning"))
            .other_bucket_key("other_messages");
        assert_eq!(
            agg.to_json().unwrap(),
            json!({
                "messages": {
                    "filters": {
                        "filters": {
                            "errors": { "match": { "body": "error" } },
                            "warnings": { "match": { "body": "warning" } }
                        },
                        "other_bucket_key": "other_messages"
                    }
                }
            })
        );
    }

    #[test]
    fn test_anonymous_filters() {
        let agg = FiltersAggregation::new("messages")
            .unwrap()
            .anonymous_filter(MatchQuery::new("body", "error"))
            .anonymous_filter(MatchQuery::new("body", "warning"));
        assert_eq!(
            agg.to_json().unwrap()["messages"]["filters"]["filters"],
            json!([
                { "match": { "body": "error" } },
                { "match": { "body": "warning" } }
            ])
        );
    }

    #[test]
    fn test_mixed_filters_fail_at_serialization() {
        let agg = FiltersAggregation::new("messages")
            .unwrap()
            .filter("errors", MatchQuery::new("body", "error"))
            .anonymous_filter(MatchQuery::new("body", "warning"));
        assert!(matches!(agg.to_json(), Err(DslError::Serialization(_))));
    }

    #[test]
    fn test_single_bucket_variants() {
        assert_eq!(
            GlobalAggregation::new("all_products").unwrap().to_json().unwrap(),
            json!({ "all_products": { "global": {} } })
        );
        assert_eq!(
            NestedAggregation::new("resellers", "resellers").unwrap().to_json().unwrap(),
            json!({ "resellers": { "nested": { "path": "resellers" } } })
        );
        assert_eq!(
            MissingAggregation::new("products_without_a_price", "price")
                .unwrap()
                .to_json()
                .unwrap(),
            json!({ "products_without_a_price": { "missing": { "field": "price" } } })
        );
    }

    #[test]
    fn test_deeply_nested_aggregations() {
        let agg = TermsAggregation::new("top_tags", "tags")
            .unwrap()
            .size(3)
            .agg(
                TopHitsAggregation::new("top_sales_hits")
                    .unwrap()
                    .sort(Sort::new("date").order(SortOrder::Desc))
                    .size(1),
            );
        assert_eq!(
            agg.to_json().unwrap(),
            json!({
                "top_tags": { "terms": { "field": "tags", "size": 3 } },
                "aggs": {
                    "top_sales_hits": {
                        "top_hits": { "sort": [{ "date": "desc" }], "size": 1 }
                    }
                }
            })
        );
        assert_eq!(agg.to_json().unwrap(), agg.get_dsl().unwrap());
    }
}
