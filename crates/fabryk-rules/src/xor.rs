//! Exclusive-or emulation.
//!
//! The engine has no XOR operator. "At least one of N, but not all N" is
//! expressed as a disjunction of the alternatives minus the case where all of
//! them match:
//!
//! ```text
//! should:   [A, B, C]
//! must_not: [{ should: [A, B, C], minimum_should_match: 3 }]
//! ```

use crate::clause::{BoolQuery, Clause};
use crate::config::XorStrategy;

/// Rewrites XOR scopes according to the configured strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct XorEmulator {
    strategy: XorStrategy,
}

impl XorEmulator {
    /// Create an emulator using `strategy`.
    pub fn new(strategy: XorStrategy) -> Self {
        Self { strategy }
    }

    /// "Some but not all of `clauses`".
    ///
    /// A single alternative can never satisfy "not all", so the result for
    /// one clause matches nothing; an empty input yields an empty query.
    pub fn emulate(clauses: Vec<Clause>) -> BoolQuery {
        if clauses.is_empty() {
            return BoolQuery::new();
        }

        let all_match = BoolQuery {
            should: clauses.clone(),
            minimum_should_match: Some(clauses.len() as i64),
            ..Default::default()
        };

        BoolQuery {
            should: clauses,
            must_not: vec![all_match.into_clause()],
            ..Default::default()
        }
    }

    /// Rewrite a composed scope whose `should` sequence holds the XOR
    /// alternatives.
    ///
    /// Without `must` clauses the emulation merges into the scope itself,
    /// where at least one `should` clause is already required. Otherwise it is
    /// nested as an extra `must` clause so the alternatives stay mandatory.
    pub fn rewrite(&self, mut scope: BoolQuery) -> BoolQuery {
        match self.strategy {
            XorStrategy::MinimumShouldMatch => {
                scope.minimum_should_match = Some(-1);
                scope
            }
            XorStrategy::Emulate => {
                let alternatives = std::mem::take(&mut scope.should);
                log::debug!("Emulating XOR over {} alternatives", alternatives.len());

                let xor = Self::emulate(alternatives);
                if scope.must.is_empty() {
                    scope.should = xor.should;
                    scope.must_not.extend(xor.must_not);
                } else if !xor.is_empty() {
                    scope.must.push(xor.into_clause());
                }
                scope
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
