//! Nested-path fan-out driven by the configured mapping.

use fabryk_rules::{CompilerConfig, MappingNode};
use serde_json::json;

use crate::common::{self, highlight_template, rules};

fn mapped_config(inner_hits: bool) -> CompilerConfig {
    CompilerConfig {
        mapping: vec![
            MappingNode::branch("sites", vec![MappingNode::leaf("sites.contacts")]),
            MappingNode::leaf("notes"),
        ],
        inner_hits,
        ..Default::default()
    }
}

#[test]
fn test_nested_expansion_with_inner_hits() {
    let document = common::compile_with(
        rules(json!([{"field": "city", "operator": "AND", "values": ["Paris"]}])),
        &mapped_config(true),
    );

    let root = json!({"bool": {"must": [{"term": {"city": "Paris"}}]}});
    let inner_hits = json!({"highlight": highlight_template()});
    assert_eq!(
        document["body"]["query"],
        json!({"bool": {"should": [
            root,
            {"nested": {
                "path": "sites",
                "query": {"bool": {"should": [
                    root,
                    {"nested": {"path": "sites.contacts", "query": root, "inner_hits": inner_hits}}
                ]}},
                "inner_hits": inner_hits
            }},
            {"nested": {"path": "notes", "query": root, "inner_hits": inner_hits}}
        ]}})
    );
}

#[test]
fn test_nested_expansion_without_inner_hits() {
    let document = common::compile_with(
        rules(json!([{"field": "city", "operator": "AND", "values": ["Paris"]}])),
        &mapped_config(false),
    );

    let branches = document["body"]["query"]["bool"]["should"].as_array().unwrap();
    assert_eq!(branches.len(), 3);
    assert!(branches[2]["nested"].get("inner_hits").is_none());
    assert_eq!(branches[2]["nested"]["path"], json!("notes"));
}

#[test]
fn test_empty_root_with_mapping() {
    let document = common::compile_with(rules(json!([])), &mapped_config(true));
    assert_eq!(
        document["body"]["query"],
        json!({"bool": {"should": [{"bool": {}}]}})
    );
}

#[test]
fn test_mapping_from_toml() {
    let config = CompilerConfig::from_toml_str(
        r#"
        inner_hits = false
        mapping = ["notes", { path = "sites", children = ["sites.contacts"] }]
        "#,
    )
    .unwrap();

    let document = common::compile_with(rules(json!([{"values": ["bob"]}])), &config);
    let branches = document["body"]["query"]["bool"]["should"].as_array().unwrap();
    assert_eq!(branches.len(), 3);
    assert_eq!(branches[1]["nested"]["path"], json!("notes"));
    assert_eq!(branches[2]["nested"]["path"], json!("sites"));
    assert_eq!(
        branches[2]["nested"]["query"]["bool"]["should"][1]["nested"]["path"],
        json!("sites.contacts")
    );
}

#[test]
fn test_invalid_mapping_rejected() {
    let result = CompilerConfig::from_toml_str(
        r#"mapping = [{ path = "sites", children = ["contacts"] }]"#,
    );
    assert!(result.is_err());
}
