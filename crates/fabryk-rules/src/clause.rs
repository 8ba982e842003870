//! Query clause model.
//!
//! These types mirror the search engine's query DSL closely enough that
//! serializing them with `serde_json` yields the engine's native JSON:
//!
//! | Type | JSON |
//! |------|------|
//! | [`BoolQuery`] | `{"bool": {"must": [..], "should": [..], "must_not": [..]}}` |
//! | [`TermMatch`] | `{"term": {"field": "value", ..}}` |
//! | [`QueryString`] | `{"query_string": {"query": "..", "fields": [..]}}` |
//! | [`NestedQuery`] | `{"nested": {"path": "..", "query": {..}, "inner_hits": {..}}}` |

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::highlight::HighlightSpec;

/// Boolean scope key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Conjunction.
    Must,
    /// Disjunction.
    Should,
    /// Negation.
    MustNot,
}

/// A boolean composition of clauses.
///
/// Empty sequences are never serialized, so an empty query serializes as
/// `{"bool": {}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoolQuery {
    /// Clauses that must all match.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must: Vec<Clause>,

    /// Alternative clauses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<Clause>,

    /// Clauses that must not match.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub must_not: Vec<Clause>,

    /// How many `should` clauses are required; negative values count from
    /// the total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_should_match: Option<i64>,
}

impl BoolQuery {
    /// Create an empty boolean query.
    pub fn new() -> Self {
        Self::default()
    }

    /// A pure disjunction over `clauses`.
    pub fn should_of(clauses: Vec<Clause>) -> Self {
        Self {
            should: clauses,
            ..Default::default()
        }
    }

    /// True when no scope holds a clause.
    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.should.is_empty() && self.must_not.is_empty()
    }

    /// Mutable access to one scope's clause sequence.
    pub fn scope_mut(&mut self, scope: Scope) -> &mut Vec<Clause> {
        match scope {
            Scope::Must => &mut self.must,
            Scope::Should => &mut self.should,
            Scope::MustNot => &mut self.must_not,
        }
    }

    /// Read access to one scope's clause sequence.
    pub fn scope(&self, scope: Scope) -> &[Clause] {
        match scope {
            Scope::Must => &self.must,
            Scope::Should => &self.should,
            Scope::MustNot => &self.must_not,
        }
    }

    /// Wrap into a [`Clause`].
    pub fn into_clause(self) -> Clause {
        Clause::Bool(self)
    }
}

/// Key used for term-match objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKey {
    /// `{"term": {..}}`
    #[default]
    Term,
    /// `{"terms": {..}}`, still one value per field.
    Terms,
}

impl TermKey {
    /// The JSON key.
    pub fn as_str(self) -> &'static str {
        match self {
            TermKey::Term => "term",
            TermKey::Terms => "terms",
        }
    }
}

/// A term-match object: at most one value per field.
#[derive(Debug, Clone, PartialEq)]
pub struct TermMatch {
    key: TermKey,
    entries: Vec<(String, String)>,
}

impl TermMatch {
    /// Create an empty match object.
    pub fn new(key: TermKey) -> Self {
        Self {
            key,
            entries: Vec::new(),
        }
    }

    /// Create a match object holding one `field: value` pair.
    pub fn single(key: TermKey, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key,
            entries: vec![(field.into(), value.into())],
        }
    }

    /// The JSON key convention of this object.
    pub fn key(&self) -> TermKey {
        self.key
    }

    /// Whether the object already defines `field`.
    pub fn contains_field(&self, field: &str) -> bool {
        self.entries.iter().any(|(f, _)| f == field)
    }

    /// Value stored under `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v.as_str())
    }

    /// Add `field: value`. Returns `false` and leaves the object untouched if
    /// the field is already present.
    pub fn try_insert(&mut self, field: &str, value: &str) -> bool {
        if self.contains_field(field) {
            return false;
        }
        self.entries.push((field.to_string(), value.to_string()));
        true
    }

    /// The `(field, value)` pairs in insertion order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Number of fields held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no field is held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for TermMatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

/// A free-text clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryString {
    /// Escaped query text.
    pub query: String,
    /// Field patterns searched.
    pub fields: Vec<String>,
}

/// Highlight options attached to a nested branch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InnerHits {
    /// How matched sub-document fragments are marked.
    pub highlight: HighlightSpec,
}

/// A clause scoped to a nested-document path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedQuery {
    /// Nested object path.
    pub path: String,
    /// Clause evaluated against each sub-document.
    pub query: Box<Clause>,
    /// Sub-document highlighting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner_hits: Option<InnerHits>,
}

/// Any query clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Boolean composition.
    Bool(BoolQuery),
    /// Term-match object.
    Term(TermMatch),
    /// Free-text clause.
    QueryString(QueryString),
    /// Nested-path clause.
    Nested(NestedQuery),
}

impl Clause {
    /// The bucket object, if this clause is one.
    pub fn as_term(&self) -> Option<&TermMatch> {
        match self {
            Clause::Term(term) => Some(term),
            _ => None,
        }
    }

    /// The boolean query, if this clause is one.
    pub fn as_bool(&self) -> Option<&BoolQuery> {
        match self {
            Clause::Bool(query) => Some(query),
            _ => None,
        }
    }
}

impl Serialize for Clause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Clause::Bool(query) => map.serialize_entry("bool", query)?,
            Clause::Term(term) => map.serialize_entry(term.key().as_str(), term)?,
            Clause::QueryString(query) => map.serialize_entry("query_string", query)?,
            Clause::Nested(nested) => map.serialize_entry("nested", nested)?,
        }
        map.end()
    }
}

impl From<BoolQuery> for Clause {
    fn from(query: BoolQuery) -> Self {
        Clause::Bool(query)
    }
}

impl From<TermMatch> for Clause {
    fn from(term: TermMatch) -> Self {
        Clause::Term(term)
    }
}

impl From<QueryString> for Clause {
    fn from(query: QueryString) -> Self {
        Clause::QueryString(query)
    }
}

impl From<NestedQuery> for Clause {
    fn from(nested: NestedQuery) -> Self {
        Clause::Nested(nested)
    }
}

// ============================================================================
// Tests
// ============================================================================
