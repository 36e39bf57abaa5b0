//! Base query entity.
//!
//! Every query builder wraps a [`Query`]: a fixed query type and the options
//! nested under it. The [`QueryBuilder`] trait exposes the setters common to
//! all queries, and [`AnyQuery`] erases concrete query types so that
//! compound queries can hold a mix of them.

use std::borrow::Cow;
use std::sync::Arc;

use search_dsl_shared::{DslError, DslValue, OptionsBag, Serializable};
use serde_json::Value;
use tracing::warn;

/// Capability name reported by every query.
pub const QUERY_CAPABILITY: &str = "Query";

/// Base query: `{ <kind>: { ..options } }`.
#[derive(Debug, Clone)]
pub struct Query {
    kind: Cow<'static, str>,
    opts: OptionsBag,
}

impl Query {
    pub(crate) fn new(kind: &'static str) -> Self {
        Self {
            kind: Cow::Borrowed(kind),
            opts: OptionsBag::new(),
        }
    }

    /// Create a query of an arbitrary type.
    ///
    /// Useful for query types without a dedicated builder. Options are added
    /// with [`option`](Self::option).
    pub fn custom(kind: impl Into<String>) -> Result<Self, DslError> {
        let kind = kind.into();
        if kind.is_empty() {
            return Err(DslError::construction("Query `queryType` cannot be empty"));
        }
        Ok(Self {
            kind: Cow::Owned(kind),
            opts: OptionsBag::new(),
        })
    }

    /// The query type.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Options set so far.
    pub fn opts(&self) -> &OptionsBag {
        &self.opts
    }

    /// Set an arbitrary option.
    pub fn option(mut self, key: impl Into<String>, value: impl Into<DslValue>) -> Self {
        self.opts.set(key, value);
        self
    }

    pub(crate) fn set(&mut self, key: impl Into<String>, value: impl Into<DslValue>) {
        self.opts.set(key, value);
    }

    /// Wrap `inner` under this query's type.
    pub(crate) fn envelope(&self, inner: impl Into<DslValue>) -> DslValue {
        let mut body = OptionsBag::new();
        body.set(self.kind.as_ref(), inner);
        body.into()
    }

    /// Render `{ <kind>: { <field>: .. } }`.
    ///
    /// When `short_key` is the only option set, its value stands in for the
    /// whole options object. `short_key` must be present.
    pub(crate) fn field_scoped(
        &self,
        field: &str,
        short_key: &str,
        missing: &str,
    ) -> Result<DslValue, DslError> {
        let Some(short) = self.opts.get(short_key) else {
            return Err(DslError::serialization(missing));
        };

        let inner = if self.opts.len() == 1 {
            short.clone()
        } else {
            self.opts.clone().into()
        };

        let mut scoped = OptionsBag::new();
        scoped.set(field, inner);
        Ok(self.envelope(scoped))
    }
}

impl Serializable for Query {
    fn to_value(&self) -> Result<DslValue, DslError> {
        Ok(self.envelope(self.opts.clone()))
    }

    fn capability(&self) -> &'static str {
        QUERY_CAPABILITY
    }
}

search_dsl_shared::impl_json_serialize!(Query, AnyQuery);

/// Setters shared by every query.
pub trait QueryBuilder: Serializable + Sized {
    /// The wrapped base query.
    fn base(&self) -> &Query;

    /// Mutable access to the wrapped base query.
    fn base_mut(&mut self) -> &mut Query;

    /// Set the boost factor of this query.
    fn boost(mut self, factor: f64) -> Self {
        self.base_mut().set("boost", factor);
        self
    }

    /// Name this query so that matching clauses are reported per hit.
    fn name(mut self, name: impl Into<String>) -> Self {
        self.base_mut().set("_name", name.into());
        self
    }

    /// Alias of [`Serializable::to_json`].
    fn get_dsl(&self) -> Result<Value, DslError> {
        self.to_json()
    }
}

impl QueryBuilder for Query {
    fn base(&self) -> &Query {
        self
    }

    fn base_mut(&mut self) -> &mut Query {
        self
    }
}

/// Implement [`QueryBuilder`] and `serde::Serialize` for builders keeping
/// their base query in an `inner` field.
macro_rules! impl_query_builder {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::core::QueryBuilder for $ty {
            fn base(&self) -> &$crate::core::Query {
                &self.inner
            }

            fn base_mut(&mut self) -> &mut $crate::core::Query {
                &mut self.inner
            }
        }

        search_dsl_shared::impl_json_serialize!($ty);
    )+};
}

/// Same as [`impl_query_builder`], for builders that serialize exactly like
/// their base query.
macro_rules! impl_plain_query {
    ($($ty:ty),+ $(,)?) => {$(
        impl search_dsl_shared::Serializable for $ty {
            fn to_value(&self) -> Result<search_dsl_shared::DslValue, search_dsl_shared::DslError> {
                search_dsl_shared::Serializable::to_value(&self.inner)
            }

            fn capability(&self) -> &'static str {
                $crate::core::QUERY_CAPABILITY
            }
        }

        $crate::core::impl_query_builder!($ty);
    )+};
}

pub(crate) use impl_plain_query;
pub(crate) use impl_query_builder;

/// A query of any concrete type.
#[derive(Debug, Clone)]
pub struct AnyQuery(Arc<dyn Serializable>);

impl AnyQuery {
    /// Capability of the wrapped entity.
    pub fn capability(&self) -> &'static str {
        self.0.capability()
    }
}

impl<Q: QueryBuilder> From<Q> for AnyQuery {
    fn from(query: Q) -> Self {
        Self(Arc::new(query))
    }
}

impl From<AnyQuery> for DslValue {
    fn from(query: AnyQuery) -> Self {
        DslValue::Entity(query.0)
    }
}

impl TryFrom<DslValue> for AnyQuery {
    type Error = DslError;

    /// Accept an erased value only if it wraps a query.
    fn try_from(value: DslValue) -> Result<Self, Self::Error> {
        match value {
            DslValue::Entity(entity) if entity.capability() == QUERY_CAPABILITY => Ok(Self(entity)),
            other => {
                warn!(
                    expected = QUERY_CAPABILITY,
                    actual = %other.describe(),
                    "Was expecting instance of {}", QUERY_CAPABILITY
                );
                Err(DslError::type_constraint(QUERY_CAPABILITY, other.describe()))
            }
        }
    }
}

impl Serializable for AnyQuery {
    fn to_value(&self) -> Result<DslValue, DslError> {
        self.0.to_value()
    }

    fn capability(&self) -> &'static str {
        QUERY_CAPABILITY
    }
}
