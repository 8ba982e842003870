//! Free-text clause construction.
//!
//! Free-text values are embedded in the engine's query-string syntax, so
//! reserved characters are escaped with a backslash before use. Wildcards
//! (`*`, `?`) are kept, but a token made only of wildcards would match every
//! document and is rejected with [`Error::WildcardOnly`].

use crate::clause::{BoolQuery, Clause, QueryString};
use crate::config::{CompilerConfig, EscapeSet};
use crate::error::{Error, Result};
use crate::request::FieldRef;

/// Builds free-text clauses for one rule at a time.
#[derive(Debug, Clone)]
pub struct QueryStringBuilder<'a> {
    escape: &'a EscapeSet,
    keyword_suffix: &'a str,
    prefix: bool,
}

impl<'a> QueryStringBuilder<'a> {
    /// Create a builder escaping `escape`.
    pub fn new(escape: &'a EscapeSet) -> Self {
        Self {
            escape,
            keyword_suffix: ".keyword",
            prefix: false,
        }
    }

    /// Create a builder from the compiler configuration.
    pub fn from_config(config: &'a CompilerConfig) -> Self {
        Self {
            escape: &config.escape,
            keyword_suffix: &config.keyword_suffix,
            prefix: config.prefix_free_text,
        }
    }

    /// Set the keyword sub-field suffix.
    pub fn with_keyword_suffix(mut self, suffix: &'a str) -> Self {
        self.keyword_suffix = suffix;
        self
    }

    /// Append `*` to every query for prefix matching.
    pub fn with_prefix(mut self, prefix: bool) -> Self {
        self.prefix = prefix;
        self
    }

    /// Multi-field patterns for a rule: `*field` (plus the keyword suffix)
    /// per named field, or `*` when no field is named.
    pub fn field_patterns(&self, field: Option<&FieldRef>, is_keyword: bool) -> Vec<String> {
        let suffix = if is_keyword { self.keyword_suffix } else { "" };
        match field {
            Some(field) if !field.as_slice().is_empty() => field
                .as_slice()
                .iter()
                .map(|name| format!("*{name}{suffix}"))
                .collect(),
            _ => vec!["*".to_string()],
        }
    }

    /// Backslash-escape every reserved character of `value`.
    pub fn escape(&self, value: &str) -> String {
        let mut escaped = String::with_capacity(value.len());
        for c in value.chars() {
            if self.escape.contains(c) {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped
    }

    /// Build one clause per value over `fields`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WildcardOnly`] as soon as any value holds a
    /// wildcard-only token.
    pub fn clauses<V: AsRef<str>>(&self, fields: &[String], values: &[V]) -> Result<Vec<Clause>> {
        values
            .iter()
            .map(|value| self.clause(fields, value.as_ref()))
            .collect()
    }

    /// Build the free-text clause for a rule: a single clause for one value,
    /// a should-disjunction for several, `None` for none.
    pub fn build<V: AsRef<str>>(&self, fields: &[String], values: &[V]) -> Result<Option<Clause>> {
        Ok(any_of(self.clauses(fields, values)?))
    }

    fn clause(&self, fields: &[String], value: &str) -> Result<Clause> {
        reject_wildcard_only(value)?;

        let mut query = self.escape(value);
        if self.prefix && !query.is_empty() && !query.ends_with('*') {
            query.push('*');
        }

        Ok(QueryString {
            query,
            fields: fields.to_vec(),
        }
        .into())
    }
}

/// Fail if any whitespace-separated token of `value` is made only of `*`
/// and `?`.
pub fn reject_wildcard_only(value: &str) -> Result<()> {
    let wildcard_only = value
        .split_whitespace()
        .find(|token| token.chars().all(|c| c == '*' || c == '?'));

    match wildcard_only {
        Some(token) => {
            log::warn!("Rejecting wildcard-only token '{token}'");
            Err(Error::wildcard_only(token, value))
        }
        None => Ok(()),
    }
}

/// Combine alternatives: nothing for none, the clause itself for one, a
/// should-disjunction otherwise.
pub fn any_of(mut clauses: Vec<Clause>) -> Option<Clause> {
    match clauses.len() {
        0 => None,
        1 => clauses.pop(),
        _ => Some(BoolQuery::should_of(clauses).into_clause()),
    }
}

// ============================================================================
// Tests
// ============================================================================
