//! Joining queries.

use search_dsl_shared::param_enum;

use crate::core::{impl_plain_query, AnyQuery, InnerHits, Query};

param_enum! {
    /// How the scores of matching child objects affect the root document.
    pub enum NestedScoreMode("score_mode", "query-dsl-nested-query.html", Lower) {
        Avg => "avg",
        Max => "max",
        Min => "min",
        None => "none",
        Sum => "sum",
    }
}

/// Searches nested field objects as if they were separate documents.
#[derive(Debug, Clone)]
pub struct NestedQuery {
    inner: Query,
}

impl NestedQuery {
    pub fn new(path: impl Into<String>, query: impl Into<AnyQuery>) -> Self {
        let mut inner = Query::new("nested");
        inner.set("path", path.into());
        inner.set("query", query.into());
        Self { inner }
    }

    pub fn score_mode(mut self, mode: NestedScoreMode) -> Self {
        self.inner.set("score_mode", mode);
        self
    }

    /// Ignore an unmapped `path` instead of failing.
    pub fn ignore_unmapped(mut self, ignore: bool) -> Self {
        self.inner.set("ignore_unmapped", ignore);
        self
    }

    /// Return the matching nested objects with each hit.
    pub fn inner_hits(mut self, inner_hits: InnerHits) -> Self {
        self.inner.set("inner_hits", inner_hits);
        self
    }
}

impl_plain_query!(NestedQuery);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::{BoolQuery, MatchQuery, RangeQuery};
    use search_dsl_shared::Serializable;
    use serde_json::json;

    #[test]
    fn test_nested() {
        let query = NestedQuery::new(
            "obj1",
            BoolQuery::new()
                .must(MatchQuery::new("obj1.name", "blue"))
                .must(RangeQuery::new("obj1.count").gt(5)),
        )
        .score_mode(NestedScoreMode::Avg)
        .inner_hits(InnerHits::new().size(2));
        assert_eq!(
            query.to_json().unwrap(),
            json!({
                "nested": {
                    "path": "obj1",
                    "query": {
                        "bool": {
                            "must": [
                                { "match": { "obj1.name": "blue" } },
                                { "range": { "obj1.count": { "gt": 5 } } }
                            ]
                        }
                    },
                    "score_mode": "avg",
                    "inner_hits": { "size": 2 }
                }
            })
        );
    }

    #[test]
    fn test_score_mode_parsing() {
        assert_eq!("SUM".parse::<NestedScoreMode>().unwrap(), NestedScoreMode::Sum);
        assert_eq!(NestedScoreMode::ALL.len(), 5);
    }
}
