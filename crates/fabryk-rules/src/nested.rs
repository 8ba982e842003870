//! Fan-out of a composed clause across nested-document paths.
//!
//! Sub-documents stored under a nested path are invisible to a plain query,
//! so the composed clause is repeated once per path, wrapped in a `nested`
//! scope, and every copy is OR-ed together. A match at the top level or at any
//! depth then satisfies the request.
//!
//! For the mapping `sites { sites.contacts }, notes` the expansion of a root
//! clause `R` is:
//!
//! ```text
//! should:
//! ├── R
//! ├── nested(sites)
//! │   └── should:
//! │       ├── R
//! │       └── nested(sites.contacts) → R
//! └── nested(notes) → R
//! ```

use serde::{Deserialize, Serialize};

use crate::clause::{BoolQuery, Clause, InnerHits, NestedQuery};
use crate::error::{Error, Result};
use crate::highlight::HighlightSpec;

/// One node of the index's nested-object structure.
///
/// In configuration a leaf is a bare path string and a branch is a table
/// with `path` and `children`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MappingNode {
    /// A nested path without nested children.
    Leaf(String),
    /// A nested path holding further nested paths.
    Branch {
        /// Full nested path.
        path: String,
        /// Nested paths below this one.
        #[serde(default)]
        children: Vec<MappingNode>,
    },
}

impl MappingNode {
    /// Create a leaf node.
    pub fn leaf(path: impl Into<String>) -> Self {
        MappingNode::Leaf(path.into())
    }

    /// Create a branch node.
    pub fn branch(path: impl Into<String>, children: Vec<MappingNode>) -> Self {
        MappingNode::Branch {
            path: path.into(),
            children,
        }
    }

    /// Full nested path of this node.
    pub fn path(&self) -> &str {
        match self {
            MappingNode::Leaf(path) => path,
            MappingNode::Branch { path, .. } => path,
        }
    }

    /// Child nodes, empty for a leaf.
    pub fn children(&self) -> &[MappingNode] {
        match self {
            MappingNode::Leaf(_) => &[],
            MappingNode::Branch { children, .. } => children,
        }
    }

    /// Number of nested paths in this subtree, this node included.
    pub fn path_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(MappingNode::path_count)
            .sum::<usize>()
    }

    /// Check that paths are non-empty and that every child path extends its
    /// parent's path.
    pub fn validate(&self) -> Result<()> {
        let path = self.path();
        if path.trim().is_empty() {
            return Err(Error::config("mapping paths must not be empty"));
        }
        for child in self.children() {
            let extends_parent = child
                .path()
                .strip_prefix(path)
                .is_some_and(|rest| rest.starts_with('.') && rest.len() > 1);
            if !extends_parent {
                return Err(Error::config(format!(
                    "mapping path '{}' must be nested under '{}'",
                    child.path(),
                    path
                )));
            }
            child.validate()?;
        }
        Ok(())
    }
}

/// Replicates a composed clause across a static nested-path tree.
#[derive(Debug, Clone)]
pub struct NestedPathExpander<'a> {
    mapping: &'a [MappingNode],
    inner_hits: Option<HighlightSpec>,
}

impl<'a> NestedPathExpander<'a> {
    /// Create an expander over `mapping`.
    pub fn new(mapping: &'a [MappingNode]) -> Self {
        Self {
            mapping,
            inner_hits: None,
        }
    }

    /// Attach `highlight` as `inner_hits` to every nested branch.
    pub fn with_inner_hits(mut self, highlight: HighlightSpec) -> Self {
        self.inner_hits = Some(highlight);
        self
    }

    /// Whether the mapping declares any nested path.
    pub fn has_paths(&self) -> bool {
        !self.mapping.is_empty()
    }

    /// Expand `root` into a should-disjunction over the top level and every
    /// nested path.
    ///
    /// An empty root is returned as the only branch: repeating a match-all
    /// clause inside nested scopes adds nothing.
    pub fn expand(&self, root: &BoolQuery) -> BoolQuery {
        let root = root.clone().into_clause();
        if root.as_bool().is_some_and(BoolQuery::is_empty) {
            log::debug!("Empty root clause, skipping nested expansion");
            return BoolQuery::should_of(vec![root]);
        }

        log::debug!(
            "Expanding clause across {} nested paths",
            self.mapping
                .iter()
                .map(MappingNode::path_count)
                .sum::<usize>()
        );
        self.expand_level(self.mapping, &root)
    }

    fn expand_level(&self, nodes: &[MappingNode], root: &Clause) -> BoolQuery {
        let mut branches = Vec::with_capacity(nodes.len() + 1);
        branches.push(root.clone());

        for node in nodes {
            let query = match node {
                MappingNode::Leaf(_) => root.clone(),
                MappingNode::Branch { children, .. } => {
                    self.expand_level(children, root).into_clause()
                }
            };
            branches.push(self.scoped(node.path(), query));
        }

        BoolQuery::should_of(branches)
    }

    fn scoped(&self, path: &str, query: Clause) -> Clause {
        NestedQuery {
            path: path.to_string(),
            query: Box::new(query),
            inner_hits: self.inner_hits.clone().map(|highlight| InnerHits { highlight }),
        }
        .into()
    }
}

// ============================================================================
// Tests
// ============================================================================
