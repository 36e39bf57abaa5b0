//! Base aggregation entity.
//!
//! Unlike queries, aggregations are always labelled and may own nested
//! child aggregations. An aggregation serializes as
//! `{ <label>: { <kind>: { ..options }, meta? }, aggs?: { ..children } }`,
//! with the children hoisted next to the label and keyed by their own labels.

use std::borrow::Cow;
use std::sync::Arc;

use search_dsl_shared::{DslError, DslValue, OptionsBag, Serializable};
use serde_json::Value;
use tracing::warn;

use crate::core::util::merge_labelled;

/// Capability name reported by every aggregation.
pub const AGGREGATION_CAPABILITY: &str = "Aggregation";

/// Base aggregation.
#[derive(Debug, Clone)]
pub struct Aggregation {
    label: String,
    kind: Cow<'static, str>,
    opts: OptionsBag,
    meta: Option<DslValue>,
    children: Vec<AnyAggregation>,
}

impl Aggregation {
    pub(crate) fn new(label: impl Into<String>, kind: &'static str) -> Result<Self, DslError> {
        Self::build(label.into(), Cow::Borrowed(kind))
    }

    /// Create an aggregation of an arbitrary type.
    ///
    /// Fails if `kind` is empty or `label` is blank.
    pub fn custom(label: impl Into<String>, kind: impl Into<String>) -> Result<Self, DslError> {
        Self::build(label.into(), Cow::Owned(kind.into()))
    }

    fn build(label: String, kind: Cow<'static, str>) -> Result<Self, DslError> {
        if kind.is_empty() {
            return Err(DslError::construction("Aggregation `aggType` cannot be empty"));
        }
        if label.trim().is_empty() {
            return Err(DslError::construction("Aggregation name could not be determined"));
        }

        Ok(Self {
            label,
            kind,
            opts: OptionsBag::new(),
            meta: None,
            children: Vec::new(),
        })
    }

    /// Name under which this aggregation's results are returned.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The aggregation type.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Options set so far.
    pub fn opts(&self) -> &OptionsBag {
        &self.opts
    }

    /// Nested child aggregations, in attachment order.
    pub fn children(&self) -> &[AnyAggregation] {
        &self.children
    }

    /// Set an arbitrary option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<DslValue>) -> Self {
        self.opts.set(key, value);
        self
    }

    pub(crate) fn set(&mut self, key: impl Into<String>, value: impl Into<DslValue>) {
        self.opts.set(key, value);
    }

    pub(crate) fn push(&mut self, key: &str, value: impl Into<DslValue>) {
        self.opts.push(key, value);
    }

    /// Render this aggregation with `inner` in place of its options.
    pub(crate) fn render(&self, inner: impl Into<DslValue>) -> Result<DslValue, DslError> {
        let mut envelope = OptionsBag::new();
        envelope.set(self.kind.as_ref(), inner);
        if let Some(meta) = &self.meta {
            envelope.set("meta", meta.clone());
        }

        let mut body = OptionsBag::new();
        body.set(self.label.as_str(), envelope);
        if !self.children.is_empty() {
            body.set("aggs", Value::Object(merge_labelled(&self.children)?));
        }
        Ok(body.into())
    }
}

impl Serializable for Aggregation {
    fn to_value(&self) -> Result<DslValue, DslError> {
        self.render(self.opts.clone())
    }

    fn capability(&self) -> &'static str {
        AGGREGATION_CAPABILITY
    }
}

search_dsl_shared::impl_json_serialize!(Aggregation, AnyAggregation);

/// Setters shared by every aggregation.
pub trait AggregationBuilder: Serializable + Sized {
    /// The wrapped base aggregation.
    fn base(&self) -> &Aggregation;

    /// Mutable access to the wrapped base aggregation.
    fn base_mut(&mut self) -> &mut Aggregation;

    /// Attach a nested child aggregation.
    fn aggregation(mut self, child: impl Into<AnyAggregation>) -> Self {
        self.base_mut().children.push(child.into());
        self
    }

    /// Alias of [`aggregation`](Self::aggregation).
    fn agg(self, child: impl Into<AnyAggregation>) -> Self {
        self.aggregation(child)
    }

    /// Attach several nested child aggregations, in order.
    fn aggregations<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyAggregation>,
    {
        self.base_mut()
            .children
            .extend(children.into_iter().map(Into::into));
        self
    }

    /// Alias of [`aggregations`](Self::aggregations).
    fn aggs<I>(self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<AnyAggregation>,
    {
        self.aggregations(children)
    }

    /// Attach metadata returned as-is with the results.
    fn meta(mut self, meta: impl Into<DslValue>) -> Self {
        self.base_mut().meta = Some(meta.into());
        self
    }

    /// Alias of [`Serializable::to_json`].
    fn get_dsl(&self) -> Result<Value, DslError> {
        self.to_json()
    }
}

impl AggregationBuilder for Aggregation {
    fn base(&self) -> &Aggregation {
        self
    }

    fn base_mut(&mut self) -> &mut Aggregation {
        self
    }
}

/// Implement [`AggregationBuilder`] and `serde::Serialize` for builders
/// keeping their base aggregation in an `inner` field.
macro_rules! impl_aggregation_builder {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::core::AggregationBuilder for $ty {
            fn base(&self) -> &$crate::core::Aggregation {
                &self.inner
            }

            fn base_mut(&mut self) -> &mut $crate::core::Aggregation {
                &mut self.inner
            }
        }

        search_dsl_shared::impl_json_serialize!($ty);
    )+};
}

/// Same as [`impl_aggregation_builder`], for builders that serialize exactly
/// like their base aggregation.
macro_rules! impl_plain_aggregation {
    ($($ty:ty),+ $(,)?) => {$(
        impl search_dsl_shared::Serializable for $ty {
            fn to_value(&self) -> Result<search_dsl_shared::DslValue, search_dsl_shared::DslError> {
                search_dsl_shared::Serializable::to_value(&self.inner)
            }

            fn capability(&self) -> &'static str {
                $crate::core::AGGREGATION_CAPABILITY
            }
        }

        $crate::core::impl_aggregation_builder!($ty);
    )+};
}

pub(crate) use impl_aggregation_builder;
pub(crate) use impl_plain_aggregation;

/// An aggregation of any concrete type.
#[derive(Debug, Clone)]
pub struct AnyAggregation(Arc<dyn Serializable>);

impl<A: AggregationBuilder> From<A> for AnyAggregation {
    fn from(aggregation: A) -> Self {
        Self(Arc::new(aggregation))
    }
}

impl From<AnyAggregation> for DslValue {
    fn from(aggregation: AnyAggregation) -> Self {
        DslValue::Entity(aggregation.0)
    }
}

impl TryFrom<DslValue> for AnyAggregation {
    type Error = DslError;

    fn try_from(value: DslValue) -> Result<Self, Self::Error> {
        match value {
            DslValue::Entity(entity) if entity.capability() == AGGREGATION_CAPABILITY => {
                Ok(Self(entity))
            }
            other => {
                warn!(
                    expected = AGGREGATION_CAPABILITY,
                    actual = %other.describe(),
                    "Was expecting instance of {}", AGGREGATION_CAPABILITY
                );
                Err(DslError::type_constraint(
                    AGGREGATION_CAPABILITY,
                    other.describe(),
                ))
            }
        }
    }
}

impl Serializable for AnyAggregation {
    fn to_value(&self) -> Result<DslValue, DslError> {
        self.0.to_value()
    }

    fn capability(&self) -> &'static str {
        AGGREGATION_CAPABILITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn terms(label: &str, field: &str) -> Aggregation {
        Aggregation::new(label, "terms").unwrap().option("field", field)
    }

    #[test]
    fn test_aggregation_envelope() {
        let agg = terms("colors", "color");
        assert_eq!(
            agg.to_json().unwrap(),
            json!({ "colors": { "terms": { "field": "color" } } })
        );
    }

    #[test]
    fn test_nested_aggregation_is_hoisted() {
        let agg = terms("outer", "color").agg(
            Aggregation::new("inner", "avg")
                .unwrap()
                .option("field", "price"),
        );
        assert_eq!(
            serde_json::to_string(&agg.to_json().unwrap()).unwrap(),
            r#"{"outer":{"terms":{"field":"color"}},"aggs":{"inner":{"avg":{"field":"price"}}}}"#
        );
    }

    #[test]
    fn test_children_keep_attachment_order() {
        let agg = terms("outer", "color").aggs(vec![
            terms("b", "make"),
            terms("a", "model"),
            terms("c", "year"),
        ]);
        let json = agg.to_json().unwrap();
        let keys: Vec<&String> = json["aggs"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_meta_is_separate_from_options() {
        let agg = terms("colors", "color").meta(json!({ "color": "blue" }));
        assert_eq!(
            agg.to_json().unwrap(),
            json!({
                "colors": {
                    "terms": { "field": "color" },
                    "meta": { "color": "blue" }
                }
            })
        );
    }

    #[test]
    fn test_get_dsl_matches_to_json() {
        let agg = terms("outer", "color").agg(terms("inner", "make"));
        assert_eq!(agg.get_dsl().unwrap(), agg.to_json().unwrap());
        assert_eq!(agg.to_json().unwrap(), agg.to_json().unwrap());
    }

    #[test]
    fn test_empty_kind_fails() {
        let err = Aggregation::custom("colors", "").unwrap_err();
        assert_eq!(
            err,
            DslError::construction("Aggregation `aggType` cannot be empty")
        );
    }

    #[test]
    fn test_empty_label_fails() {
        let err = Aggregation::custom("  ", "terms").unwrap_err();
        assert_eq!(
            err,
            DslError::construction("Aggregation name could not be determined")
        );
    }

    #[test]
    fn test_any_aggregation_rejects_queries() {
        let query = crate::core::AnyQuery::from(crate::core::Query::new("match_all"));
        let err = AnyAggregation::try_from(DslValue::from(query)).unwrap_err();
        assert_eq!(err, DslError::type_constraint("Aggregation", "Query"));
    }

    #[test]
    fn test_any_aggregation_accepts_aggregations() {
        let value = DslValue::from(AnyAggregation::from(terms("colors", "color")));
        let agg = AnyAggregation::try_from(value).unwrap();
        assert_eq!(
            agg.to_json().unwrap(),
            json!({ "colors": { "terms": { "field": "color" } } })
        );
    }
}
