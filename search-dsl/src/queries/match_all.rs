//! Queries matching every document or none.

use crate::core::{impl_plain_query, Query};

/// Matches all documents, giving them all a score of 1.0.
#[derive(Debug, Clone)]
pub struct MatchAllQuery {
    inner: Query,
}

impl MatchAllQuery {
    pub fn new() -> Self {
        Self {
            inner: Query::new("match_all"),
        }
    }
}

impl Default for MatchAllQuery {
    fn default() -> Self {
        Self::new()
    }
}

/// Matches no documents.
#[derive(Debug, Clone)]
pub struct MatchNoneQuery {
    inner: Query,
}

impl MatchNoneQuery {
    pub fn new() -> Self {
        Self {
            inner: Query::new("match_none"),
        }
    }
}

impl Default for MatchNoneQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl_plain_query!(MatchAllQuery, MatchNoneQuery);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QueryBuilder;
    use search_dsl_shared::Serializable;
    use serde_json::json;

    #[test]
    fn test_match_all() {
        assert_eq!(
            MatchAllQuery::new().to_json().unwrap(),
            json!({ "match_all": {} })
        );
        assert_eq!(
            MatchAllQuery::new().boost(1.2).to_json().unwrap(),
            json!({ "match_all": { "boost": 1.2 } })
        );
    }

    #[test]
    fn test_match_none() {
        assert_eq!(
            MatchNoneQuery::new().get_dsl().unwrap(),
            json!({ "match_none": {} })
        );
    }
}
