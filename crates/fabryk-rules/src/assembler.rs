//! Final query document.

use serde::Serialize;

use crate::clause::Clause;
use crate::error::Result;
use crate::highlight::HighlightSpec;
use crate::params::{GeoSort, Params};

/// A compiled query document, ready to send to the search engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    /// Target index.
    pub index: String,
    /// Page size.
    pub size: u64,
    /// Document offset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,
    /// Search body.
    pub body: QueryBody,
}

/// Body of a [`SearchQuery`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryBody {
    /// Composed (and possibly nested-expanded) query.
    pub query: Clause,
    /// Sort entries, omitted when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<GeoSort>,
    /// Hit highlighting.
    pub highlight: HighlightSpec,
}

impl SearchQuery {
    /// Serialize to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Merges the independently built parts of a query document.
#[derive(Debug, Clone, Default)]
pub struct ResultAssembler {
    sort: Vec<GeoSort>,
}

impl ResultAssembler {
    /// Create an assembler with no sort entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sort entry if present.
    pub fn with_sort(mut self, sort: Option<GeoSort>) -> Self {
        self.sort.extend(sort);
        self
    }

    /// Build the document.
    pub fn assemble(self, params: Params, query: Clause, highlight: HighlightSpec) -> SearchQuery {
        SearchQuery {
            index: params.index,
            size: params.size,
            from: params.from,
            body: QueryBody {
                query,
                sort: self.sort,
                highlight,
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
