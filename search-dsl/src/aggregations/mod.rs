//! Concrete aggregations.

use search_dsl_shared::DslValue;

use crate::core::{AggregationBuilder, Script};

pub mod bucket;
pub mod metrics;

pub use bucket::{
    CalendarInterval, CollectMode, DateHistogramAggregation, FilterAggregation,
    FiltersAggregation, GlobalAggregation, HistogramAggregation, MissingAggregation,
    NestedAggregation, RangeAggregation, RangeBucket, TermsAggregation, TermsExecutionHint,
};
pub use metrics::{
    AvgAggregation, CardinalityAggregation, ExtendedStatsAggregation, MaxAggregation,
    MinAggregation, PercentilesAggregation, StatsAggregation, SumAggregation,
    TopHitsAggregation, ValueCountAggregation,
};

/// Setters of aggregations computed over the values of a field or script.
pub trait ValuesSourceBuilder: AggregationBuilder {
    /// Field to take the values from.
    fn field(mut self, field: impl Into<String>) -> Self {
        self.base_mut().set("field", field.into());
        self
    }

    /// Script computing the values, or transforming the field values when a
    /// field is also set.
    fn script(mut self, script: Script) -> Self {
        self.base_mut().set("script", script);
        self
    }

    /// Value used for documents missing the field.
    fn missing(mut self, missing: impl Into<DslValue>) -> Self {
        self.base_mut().set("missing", missing);
        self
    }

    /// Format of the values in the response.
    fn format(mut self, format: impl Into<String>) -> Self {
        self.base_mut().set("format", format.into());
        self
    }
}
