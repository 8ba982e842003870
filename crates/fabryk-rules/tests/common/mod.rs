//! Common helpers for fabryk-rules integration tests.

use fabryk_rules::{CompilerConfig, compile_json};
use serde_json::{Value, json};

/// Compiles `request` with the default configuration.
pub fn compile(request: Value) -> Value {
    compile_with(request, &CompilerConfig::default())
}

/// Compiles `request` with `config`.
pub fn compile_with(request: Value, config: &CompilerConfig) -> Value {
    compile_json(&request.to_string(), config).expect("request should compile")
}

/// Wraps `rules` in a request without parameters.
pub fn rules(rules: Value) -> Value {
    json!({"params": {}, "query": {"rules": rules}})
}

/// The default highlight template.
pub fn highlight_template() -> Value {
    json!({
        "pre_tags": ["<span class=\"highlighted\">"],
        "post_tags": ["</span>"],
        "order": "score",
        "fields": {
            "*": {"fragment_size": 12, "number_of_fragments": 3, "fragmenter": "span"}
        }
    })
}
