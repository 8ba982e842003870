//! Rule-tree query compiler for Fabryk.
//!
//! This crate turns the rule trees produced by a search front end into
//! search-engine query documents (`bool` / `term` / `query_string` / `nested`
//! clauses, geo-distance sort and highlight options).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      fabryk-rules                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SearchRequest ──┬── OperatorComposer ── NestedPathExpander │
//! │                  │   ├── TermBucketer          │            │
//! │                  │   ├── QueryStringBuilder    │            │
//! │                  │   └── XorEmulator           │            │
//! │                  └── ParamsBuilder             │            │
//! │                              └──── ResultAssembler ─────────┤
//! │                                         └── SearchQuery     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Compilation is a pure function of the request and a read-only
//! [`CompilerConfig`]. It either produces a complete document or fails with
//! [`Error::WildcardOnly`]; there is no partial output.
//!
//! # Example
//!
//! ```rust
//! use fabryk_rules::{compile_json, CompilerConfig};
//!
//! let request = r#"{
//!     "params": {"size": 10, "from": 2},
//!     "query": {"rules": [
//!         {"field": "city", "operator": "AND", "values": ["Paris"]},
//!         {"field": "status", "operator": "NOT", "values": ["closed"]}
//!     ]}
//! }"#;
//!
//! let document = compile_json(request, &CompilerConfig::default()).unwrap();
//! assert_eq!(document["from"], 20);
//! assert_eq!(
//!     document["body"]["query"]["bool"]["must_not"][0]["term"]["status"],
//!     "closed"
//! );
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod assembler;
pub mod bucket;
pub mod clause;
pub mod composer;
pub mod config;
pub mod error;
pub mod highlight;
pub mod nested;
pub mod params;
pub mod query_string;
pub mod request;
pub mod xor;

// Re-exports
pub use assembler::{QueryBody, ResultAssembler, SearchQuery};
pub use bucket::TermBucketer;
pub use clause::{BoolQuery, Clause, NestedQuery, QueryString, Scope, TermKey, TermMatch};
pub use composer::{Composition, OperatorComposer};
pub use config::{ClauseStyle, CompilerConfig, EscapeSet, XorStrategy};
pub use error::{Error, Result};
pub use highlight::{HighlightConfig, HighlightSpec, HighlightStrategy};
pub use nested::{MappingNode, NestedPathExpander};
pub use params::{GeoSort, Params, ParamsBuilder};
pub use query_string::QueryStringBuilder;
pub use request::{FieldRef, GeoFilter, Operator, Rule, SearchRequest, SortOrder, Value};
pub use xor::XorEmulator;

/// Compile a search request into a query document.
///
/// Request `usedFields` replace the configured free-text fields. When the
/// configuration declares nested paths the composed query is fanned out
/// across them.
///
/// # Errors
///
/// Returns [`Error::WildcardOnly`] if any free-text value in the rule tree
/// holds a token made only of wildcards.
pub fn compile(request: &SearchRequest, config: &CompilerConfig) -> Result<SearchQuery> {
    let free_text_fields = request.params.used_fields.clone().unwrap_or_default();
    let composition = OperatorComposer::new(config)
        .with_free_text_fields(free_text_fields)
        .compose(request.rules())?;

    let params_builder = ParamsBuilder::new(config);
    let params = params_builder.params(&request.params);
    let sort = params_builder.geo_sort(request.query.geo.as_ref());

    let mut expander = NestedPathExpander::new(&config.mapping);
    let query = if expander.has_paths() {
        if config.inner_hits {
            expander = expander.with_inner_hits(config.highlight.template());
        }
        expander.expand(&composition.clause).into_clause()
    } else {
        composition.clause.into_clause()
    };

    let highlight = config.highlight.build(&composition.fields);

    log::debug!(
        "Compiled request for index '{}' ({} referenced fields)",
        params.index,
        composition.fields.len()
    );
    Ok(ResultAssembler::new()
        .with_sort(sort)
        .assemble(params, query, highlight))
}

/// Parse a JSON request, compile it and return the document as JSON.
///
/// # Errors
///
/// Returns [`Error::Serialization`] for malformed request JSON, otherwise the
/// errors of [`compile`].
pub fn compile_json(request: &str, config: &CompilerConfig) -> Result<serde_json::Value> {
    let request = SearchRequest::from_json_str(request)?;
    compile(&request, config)?.to_value()
}
