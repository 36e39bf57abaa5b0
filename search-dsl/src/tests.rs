use proptest::prelude::*;
use serde_json::{json, Value};

use crate::aggregations::{AvgAggregation, TermsAggregation};
use crate::core::{
    AggregationBuilder, AnyQuery, QueryBuilder, RequestBodySearch, SortOrder, SuggesterBuilder,
};
use crate::queries::{BoolQuery, MatchQuery, Operator, RangeQuery, TermQuery};
use crate::suggesters::{SuggestMode, TermSuggester};
use search_dsl_shared::{serialize, DslValue, Serializable};

fn arb_field() -> impl Strategy<Value = String> {
    "[a-z][a-z_]{0,7}"
}

fn arb_term_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{1,12}".prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
    ]
}

fn arb_term() -> impl Strategy<Value = (String, Value)> {
    (arb_field(), arb_term_value())
}

fn arb_clause() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("must"), Just("filter"), Just("must_not"), Just("should")]
}

fn term_query((field, value): &(String, Value)) -> TermQuery {
    TermQuery::new(field.as_str(), value.clone())
}

proptest! {
    #[test]
    fn nested_entities_serialize_recursively(terms in prop::collection::vec(arb_term(), 1..6)) {
        let erased: Vec<DslValue> = terms
            .iter()
            .map(|term| DslValue::entity(term_query(term)))
            .collect();
        let expected: Vec<Value> = terms
            .iter()
            .map(|term| term_query(term).to_json().unwrap())
            .collect();
        prop_assert_eq!(serialize(&erased.into()).unwrap(), Value::Array(expected));

        let body = RequestBodySearch::new()
            .query(BoolQuery::new().filters(terms.iter().map(term_query)))
            .size(10);
        let text = serde_json::to_string(&body).unwrap();
        prop_assert_eq!(serde_json::from_str::<Value>(&text).unwrap(), body.to_json().unwrap());
    }

    #[test]
    fn serialization_is_idempotent(terms in prop::collection::vec(arb_term(), 0..5)) {
        let query = BoolQuery::new()
            .musts(terms.iter().map(term_query))
            .minimum_should_match(1);
        let first = query.to_json().unwrap();
        let second = query.to_json().unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn get_dsl_matches_to_json((field, value) in arb_term(), boost in 0.1f64..10.0) {
        let query = TermQuery::new(field, value).boost(boost);
        prop_assert_eq!(query.get_dsl().unwrap(), query.to_json().unwrap());

        let aggregation = TermsAggregation::new("by_field", "field").unwrap().size(5);
        prop_assert_eq!(aggregation.get_dsl().unwrap(), aggregation.to_json().unwrap());
    }

    #[test]
    fn single_clause_unwraps_to_object(
        clause in arb_clause(),
        terms in prop::collection::vec(arb_term(), 1..6),
    ) {
        let mut query = BoolQuery::new();
        for term in &terms {
            query = query
                .try_clause(clause, AnyQuery::from(term_query(term)).into())
                .unwrap();
        }
        let json = query.to_json().unwrap();
        let children = &json["bool"][clause];

        if terms.len() == 1 {
            prop_assert!(children.is_object());
            prop_assert_eq!(children, &term_query(&terms[0]).to_json().unwrap());
        } else {
            prop_assert_eq!(children.as_array().map(Vec::len), Some(terms.len()));
        }
    }

    #[test]
    fn enum_values_parse_in_any_case(index in 0..SortOrder::ALL.len(), upper in any::<bool>()) {
        let order = SortOrder::ALL[index];
        let text = if upper {
            order.as_str().to_uppercase()
        } else {
            order.as_str().to_string()
        };
        prop_assert_eq!(text.parse::<SortOrder>().unwrap(), order);

        let mode = SuggestMode::ALL[index % SuggestMode::ALL.len()];
        prop_assert_eq!(mode.as_str().to_uppercase().parse::<SuggestMode>().unwrap(), mode);
    }
}

#[test]
fn test_unknown_enum_value_is_rejected() {
    let err = "sideways".parse::<Operator>().unwrap_err();
    assert!(err.to_string().contains("'operator' parameter should be one of"));
}

#[test]
fn test_wrong_capability_is_rejected_at_runtime() {
    let aggregation: DslValue = DslValue::entity(AvgAggregation::new("avg", "price").unwrap());
    let err = RequestBodySearch::new().try_query(aggregation).unwrap_err();
    assert!(err.to_string().contains("Argument must be an instance of"));
}

#[test]
fn test_full_request_body() {
    let id = uuid::Uuid::new_v4();
    let since = chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);

    let body = RequestBodySearch::new()
        .query(
            BoolQuery::new()
                .must(MatchQuery::new("title", "rust search").operator(Operator::And))
                .filter(TermQuery::new("owner_id", id))
                .filter(RangeQuery::new("created_at").gte(since)),
        )
        .agg(
            TermsAggregation::new("by_tag", "tags")
                .unwrap()
                .agg(AvgAggregation::new("avg_score", "score").unwrap()),
        )
        .suggest(
            TermSuggester::new("spelling")
                .unwrap()
                .field("title")
                .suggest_mode(SuggestMode::Popular),
        )
        .suggest_text("rust serch")
        .from(0)
        .size(20);

    let json = body.to_json().unwrap();
    assert_eq!(
        json,
        json!({
            "query": {
                "bool": {
                    "must": { "match": { "title": { "query": "rust search", "operator": "and" } } },
                    "filter": [
                        { "term": { "owner_id": id.to_string() } },
                        { "range": { "created_at": { "gte": serialize(&since.into()).unwrap() } } }
                    ]
                }
            },
            "aggs": {
                "by_tag": { "terms": { "field": "tags" } },
                "aggs": { "avg_score": { "avg": { "field": "score" } } }
            },
            "suggest": {
                "spelling": { "term": { "field": "title", "suggest_mode": "popular" } },
                "text": "rust serch"
            },
            "from": 0,
            "size": 20
        })
    );
    assert_eq!(body.get_dsl().unwrap(), json);
}
