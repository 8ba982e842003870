//! Rule-scope composition.
//!
//! `OperatorComposer` turns one sequence of sibling rules into one boolean
//! query. Each rule's operator picks the scope its clauses land in:
//!
//! | Operator | Field | Clauses | Scope |
//! |----------|-------|---------|-------|
//! | none | none | free-text disjunction of the values | `must` |
//! | none | set | term objects | `must` |
//! | `AND` | set | term objects | `must` |
//! | `OR` | set | term objects | `should` |
//! | `NOT` | set | term objects | `must_not` |
//! | `XOR` | set | term objects, then XOR rewrite of the scope | `should` |
//!
//! An operator rule without a field folds one free-text clause per literal
//! into its scope. Group values are composed recursively and folded into the
//! rule's scope as a single nested boolean clause each, at the position the
//! group holds among the rule's values.
//!
//! With [`ClauseStyle::QueryString`] field rules produce free-text clauses over
//! `*field` patterns instead of term objects, folded the same way as field-less
//! rules: one clause per literal under an operator, one disjunction without.
//!
//! Term objects are shared by every rule of a scope, so sibling `OR` rules on
//! distinct fields fill a single object.

use std::borrow::Cow;

use crate::bucket::TermBucketer;
use crate::clause::{BoolQuery, Clause, Scope};
use crate::config::{ClauseStyle, CompilerConfig};
use crate::error::Result;
use crate::query_string::{QueryStringBuilder, any_of};
use crate::request::{Operator, Rule, Value};
use crate::xor::XorEmulator;

/// Output of a composition pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composition {
    /// The composed query.
    pub clause: BoolQuery,
    /// Field names referenced by field rules, keyword suffix included,
    /// deduplicated in first-seen order.
    pub fields: Vec<String>,
}

/// Compiles a rule scope into a boolean query.
///
/// The composer only borrows the configuration; all accumulators live on the
/// stack of a single [`compose`](Self::compose) call, so one composer can
/// serve concurrent compiles.
#[derive(Debug, Clone)]
pub struct OperatorComposer<'a> {
    config: &'a CompilerConfig,
    free_text_fields: Vec<String>,
    bucketer: TermBucketer,
    query_strings: QueryStringBuilder<'a>,
    xor: XorEmulator,
}

impl<'a> OperatorComposer<'a> {
    /// Create a composer for `config`.
    pub fn new(config: &'a CompilerConfig) -> Self {
        Self {
            config,
            free_text_fields: config.free_text_fields(),
            bucketer: TermBucketer::new(config.term_key),
            query_strings: QueryStringBuilder::from_config(config),
            xor: XorEmulator::new(config.xor_strategy),
        }
    }

    /// Override the fields searched by field-less free-text rules.
    pub fn with_free_text_fields(mut self, fields: Vec<String>) -> Self {
        if !fields.is_empty() {
            self.free_text_fields = fields;
        }
        self
    }

    /// Compose `rules` into one boolean query.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WildcardOnly`](crate::Error::WildcardOnly) if any
    /// free-text value anywhere in the tree holds a wildcard-only token.
    pub fn compose(&self, rules: &[Rule]) -> Result<Composition> {
        let mut fields = Vec::new();
        let clause = self.compose_scope(rules, &mut fields)?;
        Ok(Composition { clause, fields })
    }

    fn compose_scope(&self, rules: &[Rule], used: &mut Vec<String>) -> Result<BoolQuery> {
        let mut query = BoolQuery::new();
        let mut exclusive = false;

        for rule in rules {
            if rule.values.is_empty() {
                log::debug!("Skipping rule without values: {rule:?}");
                continue;
            }

            let scope = rule.operator.map_or(Scope::Must, Operator::scope);
            exclusive |= rule.operator == Some(Operator::Xor);

            let fields = self.field_names(rule);
            let literals = match (fields.as_deref(), self.config.clause_style) {
                (Some(names), ClauseStyle::Term) => Literals::Terms(names),
                (Some(_), ClauseStyle::QueryString) => Literals::FreeText(Cow::Owned(
                    self.query_strings
                        .field_patterns(rule.field.as_ref(), rule.is_keyword),
                )),
                (None, _) => Literals::FreeText(Cow::Borrowed(&self.free_text_fields)),
            };

            // Values land in declared order; the alternatives of an
            // operator-less free-text rule sit where its first literal was.
            let clauses = query.scope_mut(scope);
            let mut alternatives = Vec::new();
            let mut alternatives_at = None;
            for value in &rule.values {
                match (value, &literals) {
                    (Value::Literal(literal), Literals::Terms(names)) => {
                        self.bucketer
                            .place_all(clauses, *names, std::slice::from_ref(literal));
                    }
                    (Value::Literal(literal), Literals::FreeText(patterns)) => {
                        let text = self
                            .query_strings
                            .clauses(patterns, std::slice::from_ref(literal))?;
                        if rule.operator.is_some() {
                            clauses.extend(text);
                        } else {
                            alternatives_at.get_or_insert(clauses.len());
                            alternatives.extend(text);
                        }
                    }
                    (Value::Group(inner), _) => {
                        let group = self.compose_scope(inner, used)?;
                        if group.is_empty() {
                            log::debug!("Skipping empty rule group");
                        } else {
                            clauses.push(group.into_clause());
                        }
                    }
                }
            }
            if let (Some(at), Some(disjunction)) = (alternatives_at, any_of(alternatives)) {
                clauses.insert(at, disjunction);
            }
            if let Some(names) = &fields {
                remember(used, names);
            }
        }

        if exclusive {
            query = self.xor.rewrite(query);
        }

        log::trace!(
            "Composed scope: {} must, {} should, {} must_not",
            query.must.len(),
            query.should.len(),
            query.must_not.len()
        );
        Ok(query)
    }

    /// Field names of a rule with the keyword suffix applied, `None` when
    /// the rule names no field.
    fn field_names(&self, rule: &Rule) -> Option<Vec<String>> {
        let names = rule.field.as_ref()?.as_slice();
        if names.is_empty() {
            return None;
        }
        let suffix = if rule.is_keyword {
            self.config.keyword_suffix.as_str()
        } else {
            ""
        };
        Some(names.iter().map(|name| format!("{name}{suffix}")).collect())
    }
}

/// How the literal values of one rule become clauses.
enum Literals<'r> {
    /// Term objects under these field names.
    Terms(&'r [String]),
    /// Free-text clauses over these field patterns.
    FreeText(Cow<'r, [String]>),
}

fn remember(used: &mut Vec<String>, names: &[String]) {
    for name in names {
        if !used.contains(name) {
            used.push(name.clone());
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
