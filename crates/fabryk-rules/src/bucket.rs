//! Term bucketing.
//!
//! A term-match object can hold each field only once, so several values for
//! the same field have to be spread over several objects. The bucketer packs
//! `field: value` pairs greedily: each pair goes into the first object of the
//! scope that does not define the field yet, and a new object is appended only
//! when every existing one already does.
//!
//! ```rust
//! use fabryk_rules::{Clause, TermBucketer, TermKey};
//!
//! let bucketer = TermBucketer::new(TermKey::Term);
//! let mut scope: Vec<Clause> = Vec::new();
//! bucketer.place(&mut scope, "city", "Paris");
//! bucketer.place(&mut scope, "country", "FR");
//! bucketer.place(&mut scope, "city", "Lyon");
//!
//! // {"term": {"city": "Paris", "country": "FR"}}, {"term": {"city": "Lyon"}}
//! assert_eq!(scope.len(), 2);
//! ```

use crate::clause::{Clause, TermKey, TermMatch};

/// Packs field/value constraints into a minimal number of term objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermBucketer {
    key: TermKey,
}

impl TermBucketer {
    /// Create a bucketer emitting objects under `key`.
    pub fn new(key: TermKey) -> Self {
        Self { key }
    }

    /// Place one `field: value` pair into `scope`.
    ///
    /// Only term objects are candidates; other clauses in the scope are left
    /// untouched and keep their position.
    pub fn place(&self, scope: &mut Vec<Clause>, field: &str, value: &str) {
        let slot = scope.iter_mut().find_map(|clause| match clause {
            Clause::Term(term) if !term.contains_field(field) => Some(term),
            _ => None,
        });

        match slot {
            Some(term) => {
                term.try_insert(field, value);
            }
            None => {
                log::trace!("New term object for {field}");
                scope.push(TermMatch::single(self.key, field, value).into());
            }
        }
    }

    /// Place every value under every field, values outermost.
    pub fn place_all<F, V>(&self, scope: &mut Vec<Clause>, fields: &[F], values: &[V])
    where
        F: AsRef<str>,
        V: AsRef<str>,
    {
        for value in values {
            for field in fields {
                self.place(scope, field.as_ref(), value.as_ref());
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
