//! Concrete queries.

/// Declare a query scoped to one field with a required main value,
/// serialized as `{ <kind>: { <field>: <value> } }` when nothing else is set
/// and as `{ <kind>: { <field>: { <key>: <value>, .. } } }` otherwise.
macro_rules! field_query {
    (
        $(#[$meta:meta])*
        $name:ident($kind:literal, $key:literal: $value_ty:ty, $missing:expr)
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            inner: $crate::core::Query,
            field: String,
        }

        impl $name {
            pub fn new(field: impl Into<String>, value: impl Into<$value_ty>) -> Self {
                let mut inner = $crate::core::Query::new($kind);
                let value: $value_ty = value.into();
                let value = search_dsl_shared::DslValue::from(value);
                if !matches!(value, search_dsl_shared::DslValue::Json(serde_json::Value::Null)) {
                    inner.set($key, value);
                }
                Self {
                    inner,
                    field: field.into(),
                }
            }

            /// Field this query runs against.
            pub fn field(&self) -> &str {
                &self.field
            }
        }

        impl search_dsl_shared::Serializable for $name {
            fn to_value(
                &self,
            ) -> Result<search_dsl_shared::DslValue, search_dsl_shared::DslError> {
                if self.field.is_empty() {
                    return Err(search_dsl_shared::DslError::serialization($missing));
                }
                self.inner.field_scoped(&self.field, $key, $missing)
            }

            fn capability(&self) -> &'static str {
                $crate::core::QUERY_CAPABILITY
            }
        }

        $crate::core::impl_query_builder!($name);
    };
}

pub mod compound;
pub mod full_text;
pub mod function_score;
pub mod joining;
pub mod match_all;
pub mod rewrite;
pub mod specialized;
pub mod term_level;

pub use compound::{BoolQuery, BoostingQuery, ConstantScoreQuery, DisMaxQuery};
pub use full_text::{
    MatchBoolPrefixQuery, MatchPhrasePrefixQuery, MatchPhraseQuery, MatchQuery, MultiMatchQuery,
    MultiMatchType, Operator, QueryStringBuilder, QueryStringQuery, SimpleQueryStringQuery,
    ZeroTermsQuery,
};
pub use function_score::{
    BoostMode, FieldValueFactorModifier, FunctionScoreMode, FunctionScoreQuery, ScoreFunction,
};
pub use joining::{NestedQuery, NestedScoreMode};
pub use match_all::{MatchAllQuery, MatchNoneQuery};
pub use rewrite::Rewrite;
pub use specialized::{
    DistanceType, GeoDistanceQuery, GeoPoint, GeoValidationMethod, ScriptQuery,
};
pub use term_level::{
    ExistsQuery, FuzzyQuery, IdsQuery, PrefixQuery, RangeQuery, RangeRelation, RegexpQuery,
    TermQuery, TermsQuery, WildcardQuery,
};
