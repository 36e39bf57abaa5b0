//! Recursive serialization of builder trees.
//!
//! Builders keep their options in an [`OptionsBag`], an insertion-ordered map
//! whose values are [`DslValue`]s. A value is either plain data or a nested
//! builder entity implementing [`Serializable`]. [`serialize`] walks the tree
//! depth-first and replaces every entity with its own representation, leaving
//! the input untouched.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number, Value};
use uuid::Uuid;

use crate::errors::DslError;

/// Capability implemented by every builder entity that can appear as a node
/// of the serialized tree.
///
/// Plain data never implements this trait, so a map that happens to carry a
/// key named like a hook is always treated as data.
pub trait Serializable: fmt::Debug + Send + Sync + 'static {
    /// Produce this entity's own representation.
    ///
    /// The returned value may itself contain nested entities. It must not
    /// contain the entity itself.
    fn to_value(&self) -> Result<DslValue, DslError>;

    /// Capability name used in type-constraint diagnostics, e.g. `Query`.
    fn capability(&self) -> &'static str;

    /// Serialize this entity into a plain JSON value.
    fn to_json(&self) -> Result<Value, DslError> {
        serialize(&self.to_value()?)
    }
}

/// A node of a builder tree.
#[derive(Debug, Clone)]
pub enum DslValue {
    /// Plain JSON data, including primitives and null.
    Json(Value),
    /// An ordered list of nodes.
    Array(Vec<DslValue>),
    /// A plain object whose values may contain entities.
    Object(OptionsBag),
    /// A nested builder entity, shared rather than copied.
    Entity(Arc<dyn Serializable>),
}

impl DslValue {
    /// Wrap a builder entity.
    pub fn entity(entity: impl Serializable) -> Self {
        Self::Entity(Arc::new(entity))
    }

    /// The JSON null value.
    pub fn null() -> Self {
        Self::Json(Value::Null)
    }

    /// Whether this node is a nested entity.
    pub fn is_entity(&self) -> bool {
        matches!(self, Self::Entity(_))
    }

    /// Capability of the wrapped entity, if this node is one.
    pub fn capability(&self) -> Option<&'static str> {
        match self {
            Self::Entity(entity) => Some(entity.capability()),
            _ => None,
        }
    }

    /// Short description of what this node holds, for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Self::Json(Value::Null) => "null".to_string(),
            Self::Json(Value::Bool(_)) => "boolean".to_string(),
            Self::Json(Value::Number(_)) => "number".to_string(),
            Self::Json(Value::String(_)) => "string".to_string(),
            Self::Json(Value::Array(_)) | Self::Array(_) => "array".to_string(),
            Self::Json(Value::Object(_)) | Self::Object(_) => "object".to_string(),
            Self::Entity(entity) => entity.capability().to_string(),
        }
    }

    /// Number of elements, if this node is an array.
    pub fn array_len(&self) -> Option<usize> {
        match self {
            Self::Array(items) => Some(items.len()),
            Self::Json(Value::Array(items)) => Some(items.len()),
            _ => None,
        }
    }
}

impl From<Value> for DslValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<OptionsBag> for DslValue {
    fn from(bag: OptionsBag) -> Self {
        Self::Object(bag)
    }
}

impl From<Arc<dyn Serializable>> for DslValue {
    fn from(entity: Arc<dyn Serializable>) -> Self {
        Self::Entity(entity)
    }
}

impl From<&str> for DslValue {
    fn from(value: &str) -> Self {
        Self::Json(Value::String(value.to_string()))
    }
}

impl From<String> for DslValue {
    fn from(value: String) -> Self {
        Self::Json(Value::String(value))
    }
}

impl From<&String> for DslValue {
    fn from(value: &String) -> Self {
        Self::Json(Value::String(value.clone()))
    }
}

impl From<bool> for DslValue {
    fn from(value: bool) -> Self {
        Self::Json(Value::Bool(value))
    }
}

impl From<f64> for DslValue {
    fn from(value: f64) -> Self {
        Self::Json(Number::from_f64(value).map_or(Value::Null, Value::Number))
    }
}

impl From<f32> for DslValue {
    fn from(value: f32) -> Self {
        Self::from(f64::from(value))
    }
}

macro_rules! integer_into_dsl_value {
    ($($int:ty),+) => {$(
        impl From<$int> for DslValue {
            fn from(value: $int) -> Self {
                Self::Json(Value::Number(Number::from(value)))
            }
        }
    )+};
}

integer_into_dsl_value!(i32, i64, u32, u64, usize);

impl From<DateTime<Utc>> for DslValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Json(Value::String(
            value.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        ))
    }
}

impl From<Uuid> for DslValue {
    fn from(value: Uuid) -> Self {
        Self::Json(Value::String(value.to_string()))
    }
}

impl<T: Into<DslValue>> From<Vec<T>> for DslValue {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<DslValue> + Clone> From<&[T]> for DslValue {
    fn from(values: &[T]) -> Self {
        Self::Array(values.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<DslValue>, const N: usize> From<[T; N]> for DslValue {
    fn from(values: [T; N]) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

/// Insertion-ordered options of one entity.
///
/// Setting an existing key replaces its value in place, so the key keeps the
/// position of its first insertion.
#[derive(Debug, Clone, Default)]
pub struct OptionsBag {
    entries: Vec<(String, DslValue)>,
}

impl OptionsBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<DslValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Append `value` to the array stored under `key`, creating it if needed.
    ///
    /// A non-array value already stored under `key` becomes the first element.
    pub fn push(&mut self, key: &str, value: impl Into<DslValue>) {
        let slot = self.get_or_insert_with(key, || DslValue::Array(Vec::new()));
        match slot {
            DslValue::Array(items) => items.push(value.into()),
            other => {
                let previous = std::mem::replace(other, DslValue::Array(Vec::new()));
                *other = DslValue::Array(vec![previous, value.into()]);
            }
        }
    }

    /// Get the value under `key`, inserting the result of `default` if absent.
    pub fn get_or_insert_with(
        &mut self,
        key: &str,
        default: impl FnOnce() -> DslValue,
    ) -> &mut DslValue {
        let index = match self.entries.iter().position(|(k, _)| k == key) {
            Some(index) => index,
            None => {
                self.entries.push((key.to_string(), default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    /// Get the value under `key`.
    pub fn get(&self, key: &str) -> Option<&DslValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Get a mutable reference to the value under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut DslValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Remove and return the value under `key`.
    pub fn remove(&mut self, key: &str) -> Option<DslValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DslValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<DslValue>> FromIterator<(K, V)> for OptionsBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (key, value) in iter {
            bag.set(key, value);
        }
        bag
    }
}

impl IntoIterator for OptionsBag {
    type Item = (String, DslValue);
    type IntoIter = std::vec::IntoIter<(String, DslValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Flatten a builder tree into a plain JSON value.
///
/// Plain data is copied as is, arrays and objects are rebuilt with every
/// element serialized in order, and entities are replaced by the serialized
/// form of their own representation.
pub fn serialize(value: &DslValue) -> Result<Value, DslError> {
    match value {
        DslValue::Json(json) => Ok(json.clone()),
        DslValue::Array(items) => items
            .iter()
            .map(serialize)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        DslValue::Object(bag) => serialize_bag(bag).map(Value::Object),
        DslValue::Entity(entity) => serialize(&entity.to_value()?),
    }
}

/// Serialize every entry of a bag, preserving key order.
pub fn serialize_bag(bag: &OptionsBag) -> Result<Map<String, Value>, DslError> {
    let mut map = Map::with_capacity(bag.len());
    for (key, value) in bag.iter() {
        map.insert(key.to_string(), serialize(value)?);
    }
    Ok(map)
}

/// Implement `serde::Serialize` for entities by delegating to
/// [`Serializable::to_json`].
#[macro_export]
macro_rules! impl_json_serialize {
    ($($ty:ty),+ $(,)?) => {$(
        impl ::serde::Serialize for $ty {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                use ::serde::ser::Error as _;
                let value = $crate::Serializable::to_json(self).map_err(S::Error::custom)?;
                ::serde::Serialize::serialize(&value, serializer)
            }
        }
    )+};
}
