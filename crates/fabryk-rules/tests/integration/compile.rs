//! End-to-end compilation with the default configuration.

use fabryk_rules::{CompilerConfig, EscapeSet, Error, SearchRequest, compile, compile_json};
use serde_json::json;

use crate::common::{self, highlight_template, rules};

#[test]
fn test_empty_rules_compile_to_empty_bool() {
    let document = common::compile(rules(json!([])));

    assert_eq!(
        document,
        json!({
            "index": "contacts",
            "size": 20,
            "body": {
                "query": {"bool": {}},
                "highlight": highlight_template()
            }
        })
    );
}

#[test]
fn test_request_without_rules() {
    let document = common::compile(json!({}));
    assert_eq!(document["body"]["query"], json!({"bool": {}}));
}

#[test]
fn test_full_document() {
    let document = common::compile(json!({
        "params": {"index": "people", "size": 10, "from": 2},
        "query": {
            "rules": [
                {"field": "city", "operator": "AND", "values": ["Paris"]},
                {"field": "city", "operator": "AND", "values": ["Lyon"]},
                {"field": "status", "operator": "NOT", "values": ["closed"]}
            ],
            "geo": {"longitude": 2.35, "latitude": 48.85}
        }
    }));

    assert_eq!(
        document,
        json!({
            "index": "people",
            "size": 10,
            "from": 20,
            "body": {
                "query": {"bool": {
                    "must": [
                        {"term": {"city": "Paris"}},
                        {"term": {"city": "Lyon"}}
                    ],
                    "must_not": [{"term": {"status": "closed"}}]
                }},
                "sort": [{"_geo_distance": {
                    "pin.location": [2.35, 48.85],
                    "order": "asc",
                    "distance": 20.0,
                    "unit": "km",
                    "mode": "min",
                    "distance_type": "arc",
                    "ignore_unmapped": true
                }}],
                "highlight": highlight_template()
            }
        })
    );
}

#[test]
fn test_three_or_rules() {
    let document = common::compile(rules(json!([
        {"field": "city", "operator": "OR", "values": ["Paris"]},
        {"field": "city", "operator": "OR", "values": ["Lyon"]},
        {"field": "city", "operator": "OR", "values": ["Nice"]}
    ])));

    let should = document["body"]["query"]["bool"]["should"].as_array().unwrap();
    assert_eq!(should.len(), 3);
}

#[test]
fn test_xor_pair() {
    let document = common::compile(rules(json!([
        {"field": "tag", "operator": "XOR", "values": ["a", "b"]}
    ])));

    let a = json!({"term": {"tag": "a"}});
    let b = json!({"term": {"tag": "b"}});
    assert_eq!(
        document["body"]["query"],
        json!({"bool": {
            "should": [a, b],
            "must_not": [{"bool": {"should": [a, b], "minimum_should_match": 2}}]
        }})
    );
}

#[test]
fn test_wildcard_only_aborts_compile() {
    let config = CompilerConfig::default();
    let request = rules(json!([
        {"field": "city", "operator": "AND", "values": ["Paris"]},
        {"values": ["john **"]}
    ]));

    let err = compile_json(&request.to_string(), &config).unwrap_err();
    assert!(matches!(err, Error::WildcardOnly { ref token, .. } if token == "**"));
    assert!(err.is_user_error());
}

#[test]
fn test_inner_wildcards_accepted() {
    let document = common::compile(rules(json!([{"values": ["a*b"]}])));
    assert_eq!(
        document["body"]["query"]["bool"]["must"][0]["query_string"]["query"],
        json!("a*b")
    );
}

#[test]
fn test_narrow_escape() {
    let config = CompilerConfig {
        escape: EscapeSet::Narrow,
        ..Default::default()
    };
    let document = common::compile_with(rules(json!([{"values": ["foo(bar)"]}])), &config);

    assert_eq!(
        document["body"]["query"],
        json!({"bool": {"must": [
            {"query_string": {"query": "foo\\(bar\\)", "fields": ["*"]}}
        ]}})
    );
}

#[test]
fn test_paging() {
    let first = common::compile(json!({"params": {"size": 10, "from": 0}}));
    assert!(first.get("from").is_none());
    assert_eq!(first["size"], json!(10));

    let third = common::compile(json!({"params": {"size": 10, "from": 2}}));
    assert_eq!(third["from"], json!(20));
}

#[test]
fn test_used_fields_drive_free_text() {
    let document = common::compile(json!({
        "params": {"usedFields": ["name", "email"]},
        "query": {"rules": [{"values": ["bob"]}]}
    }));
    assert_eq!(
        document["body"]["query"]["bool"]["must"][0]["query_string"]["fields"],
        json!(["name", "email"])
    );
}

#[test]
fn test_scalar_values() {
    let document = common::compile(rules(json!([
        {"field": "age", "values": [42]},
        {"field": "active", "operator": "AND", "values": [true]}
    ])));
    assert_eq!(
        document["body"]["query"],
        json!({"bool": {"must": [{"term": {"age": "42", "active": "true"}}]}})
    );
}

#[test]
fn test_null_rule_fields() {
    let document = common::compile(rules(json!([
        {"field": "city", "values": ["Paris", null], "isKeyword": null},
        {"field": "status", "operator": "NOT", "values": null}
    ])));
    assert_eq!(
        document["body"]["query"],
        json!({"bool": {"must": [{"term": {"city": "Paris"}}]}})
    );
}

#[test]
fn test_nested_groups() {
    let document = common::compile(rules(json!([
        {"operator": "AND", "values": [[
            {"field": "city", "operator": "OR", "values": ["Paris"]},
            {"field": "city", "operator": "OR", "values": ["Lyon"]}
        ]]},
        {"operator": "NOT", "values": [{"field": "status", "values": ["closed"]}]}
    ])));

    assert_eq!(
        document["body"]["query"],
        json!({"bool": {
            "must": [{"bool": {"should": [
                {"term": {"city": "Paris"}},
                {"term": {"city": "Lyon"}}
            ]}}],
            "must_not": [{"bool": {"must": [{"term": {"status": "closed"}}]}}]
        }})
    );
}

#[test]
fn test_keyword_and_multi_field() {
    let document = common::compile(rules(json!([
        {"field": ["name", "nickname"], "operator": "AND", "values": ["Bob"], "isKeyword": true}
    ])));
    assert_eq!(
        document["body"]["query"],
        json!({"bool": {"must": [
            {"term": {"name.keyword": "Bob", "nickname.keyword": "Bob"}}
        ]}})
    );
}

#[test]
fn test_malformed_request() {
    let err = compile_json("{\"query\": ", &CompilerConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
    assert!(!err.is_user_error());
}

#[test]
fn test_compile_is_deterministic() {
    let config = CompilerConfig::default();
    let request = SearchRequest::from_json_str(
        &rules(json!([
            {"field": "a", "operator": "AND", "values": ["1", "2"]},
            {"field": "b", "operator": "XOR", "values": ["3", "4"]},
            {"values": ["free text"]}
        ]))
        .to_string(),
    )
    .unwrap();

    let first = compile(&request, &config).unwrap();
    let second = compile(&request, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_compiles_share_config() {
    let config = CompilerConfig::default();
    let request = rules(json!([{"field": "city", "operator": "AND", "values": ["Paris"]}]));
    let expected = common::compile_with(request.clone(), &config);

    let body = request.to_string();
    let (body, config) = (&body, &config);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || compile_json(body, config).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
