//! Field collapsing.

use search_dsl_shared::{DslError, DslValue, OptionsBag, Serializable};

use crate::core::InnerHits;

/// Collapse search results on the values of a field.
#[derive(Debug, Clone)]
pub struct Collapse {
    field: String,
    inner_hits: Vec<InnerHits>,
    max_concurrent_group_searches: Option<u32>,
}

impl Collapse {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            inner_hits: Vec::new(),
            max_concurrent_group_searches: None,
        }
    }

    /// Expand each collapsed group with inner hits. May be repeated.
    pub fn inner_hits(mut self, inner_hits: InnerHits) -> Self {
        self.inner_hits.push(inner_hits);
        self
    }

    pub fn max_concurrent_group_searches(mut self, max: u32) -> Self {
        self.max_concurrent_group_searches = Some(max);
        self
    }
}

impl Serializable for Collapse {
    fn to_value(&self) -> Result<DslValue, DslError> {
        let mut body = OptionsBag::new();
        body.set("field", self.field.as_str());
        match self.inner_hits.as_slice() {
            [] => {}
            [single] => body.set("inner_hits", single.clone()),
            several => body.set("inner_hits", several.to_vec()),
        }
        if let Some(max) = self.max_concurrent_group_searches {
            body.set("max_concurrent_group_searches", max);
        }
        Ok(body.into())
    }

    fn capability(&self) -> &'static str {
        "Collapse"
    }
}

impl From<Collapse> for DslValue {
    fn from(collapse: Collapse) -> Self {
        DslValue::entity(collapse)
    }
}

search_dsl_shared::impl_json_serialize!(Collapse);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Sort, SortOrder};
    use serde_json::json;

    #[test]
    fn test_collapse_on_field() {
        assert_eq!(
            Collapse::new("user.id").to_json().unwrap(),
            json!({ "field": "user.id" })
        );
    }

    #[test]
    fn test_single_inner_hits_is_object() {
        let collapse = Collapse::new("user.id")
            .inner_hits(
                InnerHits::new()
                    .name("most_recent")
                    .size(5)
                    .sort(Sort::new("@timestamp").order(SortOrder::Desc)),
            )
            .max_concurrent_group_searches(4);
        assert_eq!(
            collapse.to_json().unwrap(),
            json!({
                "field": "user.id",
                "inner_hits": {
                    "name": "most_recent",
                    "size": 5,
                    "sort": [{ "@timestamp": "desc" }]
                },
                "max_concurrent_group_searches": 4
            })
        );
    }

    #[test]
    fn test_several_inner_hits_are_array() {
        let collapse = Collapse::new("user.id")
            .inner_hits(InnerHits::new().name("largest").size(3))
            .inner_hits(InnerHits::new().name("recent").size(3));
        assert_eq!(
            collapse.to_json().unwrap()["inner_hits"],
            json!([
                { "name": "largest", "size": 3 },
                { "name": "recent", "size": 3 }
            ])
        );
    }
}
