//! Base suggester entity.
//!
//! A suggester owns a two-level options bag: the outer level keyed by the
//! suggester's label holds request-wide settings such as the text to
//! suggest for, the inner level keyed by the suggester type holds the
//! type-specific settings.

use std::sync::Arc;

use search_dsl_shared::{DslError, DslValue, OptionsBag, Serializable};
use serde_json::Value;
use tracing::warn;

/// Capability name reported by every suggester.
pub const SUGGESTER_CAPABILITY: &str = "Suggester";

/// Base suggester: `{ <label>: { <kind>: { ..options }, ..outer } }`.
#[derive(Debug, Clone)]
pub struct Suggester {
    label: String,
    kind: String,
    outer: OptionsBag,
    opts: OptionsBag,
}

impl Suggester {
    /// Create a suggester of type `kind` returned under `label`.
    ///
    /// Fails if either is empty.
    pub fn new(kind: impl Into<String>, label: impl Into<String>) -> Result<Self, DslError> {
        let kind = kind.into();
        let label = label.into();
        if kind.is_empty() {
            return Err(DslError::construction("Suggester `suggesterType` cannot be empty"));
        }
        if label.is_empty() {
            return Err(DslError::construction("Suggester `name` cannot be empty"));
        }

        Ok(Self {
            label,
            kind,
            outer: OptionsBag::new(),
            opts: OptionsBag::new(),
        })
    }

    /// Name under which suggestions are returned.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The suggester type.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Type-specific options set so far.
    pub fn opts(&self) -> &OptionsBag {
        &self.opts
    }

    /// Set an arbitrary type-specific option.
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

    pub(crate) fn set_outer(&mut self, key: impl Into<String>, value: impl Into<DslValue>) {
        self.outer.set(key, value);
    }

    pub(crate) fn opts_mut(&mut self) -> &mut OptionsBag {
        &mut self.opts
    }
}

impl Serializable for Suggester {
    fn to_value(&self) -> Result<DslValue, DslError> {
        let mut envelope = OptionsBag::new();
        envelope.set(self.kind.as_str(), self.opts.clone());
        for (key, value) in self.outer.iter() {
            envelope.set(key, value.clone());
        }

        let mut body = OptionsBag::new();
        body.set(self.label.as_str(), envelope);
        Ok(body.into())
    }

    fn capability(&self) -> &'static str {
        SUGGESTER_CAPABILITY
    }
}

search_dsl_shared::impl_json_serialize!(Suggester, AnySuggester);

/// Setters shared by every suggester.
pub trait SuggesterBuilder: Serializable + Sized {
    /// The wrapped base suggester.
    fn base(&self) -> &Suggester;

    /// Mutable access to the wrapped base suggester.
    fn base_mut(&mut self) -> &mut Suggester;

    /// Field to fetch candidate suggestions from.
    fn field(mut self, field: impl Into<String>) -> Self {
        self.base_mut().set("field", field.into());
        self
    }

    /// Maximum number of suggestions returned per suggested text token.
    fn size(mut self, size: u32) -> Self {
        self.base_mut().set("size", size);
        self
    }

    /// Alias of [`Serializable::to_json`].
    fn get_dsl(&self) -> Result<Value, DslError> {
        self.to_json()
    }
}

impl SuggesterBuilder for Suggester {
    fn base(&self) -> &Suggester {
        self
    }

    fn base_mut(&mut self) -> &mut Suggester {
        self
    }
}

/// Setters of suggesters that analyze an input text.
pub trait AnalyzedSuggesterBuilder: SuggesterBuilder {
    /// Text to get suggestions for.
    fn text(mut self, text: impl Into<String>) -> Self {
        self.base_mut().set_outer("text", text.into());
        self
    }

    /// Analyzer used on the suggest text.
    fn analyzer(mut self, analyzer: impl Into<String>) -> Self {
        self.base_mut().set("analyzer", analyzer.into());
        self
    }

    /// Maximum number of suggestions retrieved from each shard.
    fn shard_size(mut self, shard_size: u32) -> Self {
        self.base_mut().set("shard_size", shard_size);
        self
    }
}

/// Implement [`SuggesterBuilder`] and `serde::Serialize` for builders keeping
/// their base suggester in an `inner` field.
macro_rules! impl_suggester_builder {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::core::SuggesterBuilder for $ty {
            fn base(&self) -> &$crate::core::Suggester {
                &self.inner
            }

            fn base_mut(&mut self) -> &mut $crate::core::Suggester {
                &mut self.inner
            }
        }

        impl search_dsl_shared::Serializable for $ty {
            fn to_value(&self) -> Result<search_dsl_shared::DslValue, search_dsl_shared::DslError> {
                search_dsl_shared::Serializable::to_value(&self.inner)
            }

            fn capability(&self) -> &'static str {
                $crate::core::SUGGESTER_CAPABILITY
            }
        }

        search_dsl_shared::impl_json_serialize!($ty);
    )+};
}

pub(crate) use impl_suggester_builder;

/// A suggester of any concrete type.
#[derive(Debug, Clone)]
pub struct AnySuggester(Arc<dyn Serializable>);

impl<S: SuggesterBuilder> From<S> for AnySuggester {
    fn from(suggester: S) -> Self {
        Self(Arc::new(suggester))
    }
}

impl From<AnySuggester> for DslValue {
    fn from(suggester: AnySuggester) -> Self {
        DslValue::Entity(suggester.0)
    }
}

impl TryFrom<DslValue> for AnySuggester {
    type Error = DslError;

    fn try_from(value: DslValue) -> Result<Self, Self::Error> {
        match value {
            DslValue::Entity(entity) if entity.capability() == SUGGESTER_CAPABILITY => {
                Ok(Self(entity))
            }
            other => {
                warn!(
                    expected = SUGGESTER_CAPABILITY,
                    actual = %other.describe(),
                    "Was expecting instance of {}", SUGGESTER_CAPABILITY
                );
                Err(DslError::type_constraint(
                    SUGGESTER_CAPABILITY,
                    other.describe(),
                ))
            }
        }
    }
}

impl Serializable for AnySuggester {
    fn to_value(&self) -> Result<DslValue, DslError> {
        self.0.to_value()
    }

    fn capability(&self) -> &'static str {
        SUGGESTER_CAPABILITY
    }
}
