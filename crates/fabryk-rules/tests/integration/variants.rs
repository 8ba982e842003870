//! Configuration switches selecting the historical compiler behaviors.

use fabryk_rules::{
    ClauseStyle, CompilerConfig, EscapeSet, HighlightStrategy, TermKey, XorStrategy,
};
use serde_json::json;

use crate::common::{self, rules};

#[test]
fn test_query_string_style() {
    let config = CompilerConfig {
        clause_style: ClauseStyle::QueryString,
        escape: EscapeSet::Narrow,
        ..Default::default()
    };
    let document = common::compile_with(
        rules(json!([
            {"field": "name", "operator": "AND", "values": ["o'neil"], "isKeyword": true},
            {"field": ["city", "town"], "operator": "NOT", "values": ["Lyon"]}
        ])),
        &config,
    );

    assert_eq!(
        document["body"]["query"],
        json!({"bool": {
            "must": [{"query_string": {"query": "o'neil", "fields": ["*name.keyword"]}}],
            "must_not": [{"query_string": {"query": "Lyon", "fields": ["*city", "*town"]}}]
        }})
    );
}

#[test]
fn test_terms_key() {
    let config = CompilerConfig {
        term_key: TermKey::Terms,
        ..Default::default()
    };
    let document = common::compile_with(
        rules(json!([{"field": "city", "operator": "OR", "values": ["Paris", "Lyon"]}])),
        &config,
    );

    assert_eq!(
        document["body"]["query"],
        json!({"bool": {"should": [
            {"terms": {"city": "Paris"}},
            {"terms": {"city": "Lyon"}}
        ]}})
    );
}

#[test]
fn test_legacy_xor() {
    let config = CompilerConfig {
        xor_strategy: XorStrategy::MinimumShouldMatch,
        ..Default::default()
    };
    let document = common::compile_with(
        rules(json!([{"field": "tag", "operator": "XOR", "values": ["a", "b"]}])),
        &config,
    );

    assert_eq!(
        document["body"]["query"],
        json!({"bool": {
            "should": [{"term": {"tag": "a"}}, {"term": {"tag": "b"}}],
            "minimum_should_match": -1
        }})
    );
}

#[test]
fn test_prefix_free_text() {
    let config = CompilerConfig {
        prefix_free_text: true,
        ..Default::default()
    };
    let document = common::compile_with(rules(json!([{"values": ["jo"]}])), &config);
    assert_eq!(
        document["body"]["query"]["bool"]["must"][0]["query_string"]["query"],
        json!("jo*")
    );
}

#[test]
fn test_used_fields_highlight() {
    let mut config = CompilerConfig::default();
    config.highlight.strategy = HighlightStrategy::UsedFields;

    let document = common::compile_with(
        rules(json!([
            {"field": "name", "operator": "AND", "values": ["Bob"], "isKeyword": true},
            {"field": "city", "operator": "OR", "values": ["Paris"]},
            {"field": "name", "operator": "AND", "values": ["Robert"], "isKeyword": true}
        ])),
        &config,
    );

    let plain = json!({
        "type": "plain",
        "fragment_size": 12,
        "number_of_fragments": 3,
        "fragmenter": "span"
    });
    let highlight = &document["body"]["highlight"];
    assert_eq!(highlight["fields"], json!({"name.keyword": plain, "city": plain}));
    assert!(highlight.get("require_field_match").is_none());
}

#[test]
fn test_used_fields_highlight_without_fields() {
    let mut config = CompilerConfig::default();
    config.highlight.strategy = HighlightStrategy::UsedFields;

    let document = common::compile_with(rules(json!([{"values": ["bob"]}])), &config);
    let highlight = &document["body"]["highlight"];
    assert_eq!(highlight["require_field_match"], json!(false));
    assert!(highlight["fields"].get("*").is_some());
}

#[test]
fn test_configured_defaults() {
    let config = CompilerConfig::from_toml_str(
        r#"
        index = "people"
        default_size = 5
        default_fields = ["name", "email"]
        "#,
    )
    .unwrap();

    let document = common::compile_with(
        json!({"params": {"from": 3}, "query": {"rules": [{"values": ["bob"]}]}}),
        &config,
    );
    assert_eq!(document["index"], json!("people"));
    assert_eq!(document["size"], json!(5));
    assert_eq!(document["from"], json!(15));
    assert_eq!(
        document["body"]["query"]["bool"]["must"][0]["query_string"]["fields"],
        json!(["name", "email"])
    );
}
