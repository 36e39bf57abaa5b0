pub mod aggregation;
pub mod collapse;
pub mod highlight;
pub mod inner_hits;
pub mod query;
pub mod request_body;
pub mod rescore;
pub mod script;
pub mod sort;
pub mod source;
pub mod suggester;
mod util;

pub use aggregation::{Aggregation, AggregationBuilder, AnyAggregation, AGGREGATION_CAPABILITY};
pub use collapse::Collapse;
pub use highlight::{
    BoundaryScanner, Encoder, Fragmenter, Highlight, HighlightField, HighlightOptions,
    HighlightOrder, HighlightType,
};
pub use inner_hits::InnerHits;
pub use query::{AnyQuery, Query, QueryBuilder, QUERY_CAPABILITY};
pub use request_body::RequestBodySearch;
pub use rescore::{Rescore, RescoreScoreMode};
pub use script::Script;
pub use sort::{ScriptSortType, Sort, SortMode, SortOrder};
pub use source::SourceFilter;
pub use suggester::{
    AnalyzedSuggesterBuilder, AnySuggester, Suggester, SuggesterBuilder, SUGGESTER_CAPABILITY,
};

pub(crate) use aggregation::{impl_aggregation_builder, impl_plain_aggregation};
pub(crate) use query::{impl_plain_query, impl_query_builder};
pub(crate) use suggester::impl_suggester_builder;
