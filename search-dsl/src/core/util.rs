//! Helpers shared by the entity families.

use search_dsl_shared::{DslError, Serializable};
use serde_json::{Map, Value};

/// Merge the serialized forms of labelled entities into one object.
///
/// Each entity serializes to an object keyed by its label; the keys of all
/// of them are collected in attachment order. A later entity with the same
/// label replaces an earlier one.
pub(crate) fn merge_labelled<'a, E, I>(entities: I) -> Result<Map<String, Value>, DslError>
where
    E: Serializable + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let mut merged = Map::new();
    for entity in entities {
        match entity.to_json()? {
            Value::Object(map) => merged.extend(map),
            other => {
                return Err(DslError::serialization(format!(
                    "{} must serialize to an object, got {}",
                    entity.capability(),
                    other
                )))
            }
        }
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_dsl_shared::{DslValue, OptionsBag};
    use serde_json::json;

    #[derive(Debug)]
    struct Labelled(&'static str, i64);

    impl Serializable for Labelled {
        fn to_value(&self) -> Result<DslValue, DslError> {
            let mut body = OptionsBag::new();
            body.set(self.0, self.1);
            Ok(body.into())
        }

        fn capability(&self) -> &'static str {
            "Labelled"
        }
    }

    #[derive(Debug)]
    struct Scalar;

    impl Serializable for Scalar {
        fn to_value(&self) -> Result<DslValue, DslError> {
            Ok(DslValue::from(1))
        }

        fn capability(&self) -> &'static str {
            "Scalar"
        }
    }

    #[test]
    fn test_merge_in_order() {
        let entities = vec![Labelled("b", 1), Labelled("a", 2)];
        let merged = merge_labelled(&entities).unwrap();
        assert_eq!(Value::Object(merged.clone()), json!({ "b": 1, "a": 2 }));
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_later_label_wins() {
        let entities = vec![Labelled("a", 1), Labelled("a", 2)];
        assert_eq!(
            Value::Object(merge_labelled(&entities).unwrap()),
            json!({ "a": 2 })
        );
    }

    #[test]
    fn test_non_object_is_rejected() {
        let entities = vec![Scalar];
        assert!(matches!(
            merge_labelled(&entities),
            Err(DslError::Serialization(_))
        ));
    }
}
