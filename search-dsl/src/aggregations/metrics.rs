//! Metrics aggregations.

use search_dsl_shared::DslError;

use crate::aggregations::ValuesSourceBuilder;
use crate::core::{
    impl_plain_aggregation, Aggregation, Highlight, Script, Sort, SourceFilter,
};

/// Declare a metrics aggregation computed over a values source.
macro_rules! metric_aggregation {
    ($($(#[$meta:meta])* $name:ident => $kind:literal),+ $(,)?) => {$(
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            inner: Aggregation,
        }

        impl $name {
            /// Aggregate the values of `field`, returned under `label`.
            pub fn new(label: impl Into<String>, field: impl Into<String>) -> Result<Self, DslError> {
                let field = field.into();
                let mut inner = Aggregation::new(label, $kind)?;
                if !field.is_empty() {
                    inner.set("field", field);
                }
                Ok(Self { inner })
            }

            /// Aggregate the values computed by `script`.
            pub fn scripted(label: impl Into<String>, script: Script) -> Result<Self, DslError> {
                Ok(Self::new(label, "")?.script(script))
            }
        }

        impl_plain_aggregation!($name);
        impl ValuesSourceBuilder for $name {}
    )+};
}

metric_aggregation! {
    /// Average of the values.
    AvgAggregation => "avg",
    /// Minimum of the values.
    MinAggregation => "min",
    /// Maximum of the values.
    MaxAggregation => "max",
    /// Sum of the values.
    SumAggregation => "sum",
    /// Number of values.
    ValueCountAggregation => "value_count",
    /// Approximate count of distinct values.
    CardinalityAggregation => "cardinality",
    /// min, max, sum, count and avg of the values.
    StatsAggregation => "stats",
    /// Stats extended with variance, standard deviation and bounds.
    ExtendedStatsAggregation => "extended_stats",
    /// Percentiles of the values.
    PercentilesAggregation => "percentiles",
}

impl CardinalityAggregation {
    /// Count below which counts are expected to be close to accurate.
    pub fn precision_threshold(mut self, threshold: u32) -> Self {
        self.inner.set("precision_threshold", threshold);
        self
    }
}

impl ExtendedStatsAggregation {
    /// Number of standard deviations of the `std_deviation_bounds`.
    pub fn sigma(mut self, sigma: f64) -> Self {
        self.inner.set("sigma", sigma);
        self
    }
}

impl PercentilesAggregation {
    pub fn percents(mut self, percents: impl IntoIterator<Item = f64>) -> Self {
        let percents: Vec<f64> = percents.into_iter().collect();
        self.inner.set("percents", percents);
        self
    }

    /// Return the percentiles as a map keyed by percent instead of a list.
    pub fn keyed(mut self, keyed: bool) -> Self {
        self.inner.set("keyed", keyed);
        self
    }
}

/// Most relevant documents of each bucket.
#[derive(Debug, Clone)]
pub struct TopHitsAggregation {
    inner: Aggregation,
}

impl TopHitsAggregation {
    pub fn new(label: impl Into<String>) -> Result<Self, DslError> {
        Ok(Self {
            inner: Aggregation::new(label, "top_hits")?,
        })
    }

    pub fn from(mut self, from: u32) -> Self {
        self.inner.set("from", from);
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.inner.set("size", size);
        self
    }

    /// Add a sort criterion.
    pub fn sort(mut self, sort: impl Into<Sort>) -> Self {
        self.inner.push("sort", sort.into());
        self
    }

    pub fn source(mut self, source: impl Into<SourceFilter>) -> Self {
        self.inner.set("_source", source.into());
        self
    }

    pub fn highlight(mut self, highlight: Highlight) -> Self {
        self.inner.set("highlight", highlight);
        self
    }

    pub fn explain(mut self, explain: bool) -> Self {
        self.inner.set("explain", explain);
        self
    }

    pub fn version(mut self, version: bool) -> Self {
        self.inner.set("version", version);
        self
    }
}

impl_plain_aggregation!(TopHitsAggregation);
