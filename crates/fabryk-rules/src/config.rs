//! Compiler configuration.
//!
//! The configuration is an immutable input to every compile pass. It unifies
//! the historical compiler variants behind explicit switches instead of
//! separate code paths:
//!
//! | Switch | Default | Alternative |
//! |--------|---------|-------------|
//! | `clause_style` | `term` (bucketed term objects) | `query_string` (free-text per rule) |
//! | `term_key` | `term` | `terms` |
//! | `escape` | `broad` | `narrow`, `{ custom = [..] }` |
//! | `xor_strategy` | `emulate` | `minimum_should_match` |
//! | `highlight.strategy` | `template` | `used_fields` |
//!
//! # Example
//!
//! ```rust
//! use fabryk_rules::{CompilerConfig, XorStrategy};
//!
//! let config = CompilerConfig::from_toml_str(r#"
//!     index = "people"
//!     default_size = 50
//!     xor_strategy = "minimum_should_match"
//!
//!     [[mapping]]
//!     path = "sites"
//!     children = ["sites.contacts"]
//! "#).unwrap();
//!
//! assert_eq!(config.default_size, 50);
//! assert_eq!(config.xor_strategy, XorStrategy::MinimumShouldMatch);
//! assert_eq!(config.mapping.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::clause::TermKey;
use crate::error::{Error, Result};
use crate::highlight::HighlightConfig;
use crate::nested::MappingNode;

/// Characters escaped by the broad preset.
pub const BROAD_ESCAPES: [char; 17] = [
    '\\', '(', ')', '{', '}', '[', ']', '~', '^', '"', '-', '\'', '_', '+', '!', ':', '/',
];

/// Characters escaped by the narrow preset.
pub const NARROW_ESCAPES: [char; 5] = ['(', ')', '~', '^', '"'];

/// How rules that name a field are compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseStyle {
    /// Field rules become bucketed term objects; only field-less rules are
    /// free-text.
    #[default]
    Term,
    /// Every rule becomes a free-text clause over `*field` patterns.
    QueryString,
}

/// How XOR scopes are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XorStrategy {
    /// "At least one but not all" via a negated full-match disjunction.
    #[default]
    Emulate,
    /// OR with `minimum_should_match = -1`.
    MinimumShouldMatch,
}

/// Reserved characters escaped in free-text values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapeSet {
    /// [`BROAD_ESCAPES`]
    #[default]
    Broad,
    /// [`NARROW_ESCAPES`]
    Narrow,
    /// An explicit character list.
    Custom(Vec<char>),
}

impl EscapeSet {
    /// The characters to escape.
    pub fn chars(&self) -> &[char] {
        match self {
            EscapeSet::Broad => &BROAD_ESCAPES,
            EscapeSet::Narrow => &NARROW_ESCAPES,
            EscapeSet::Custom(chars) => chars,
        }
    }

    /// Whether `c` must be escaped.
    pub fn contains(&self, c: char) -> bool {
        self.chars().contains(&c)
    }
}

/// Compiler configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Index used when the request does not name one.
    #[serde(default = "default_index")]
    pub index: String,

    /// Page size used when the request does not give one.
    #[serde(default = "default_size")]
    pub default_size: u64,

    /// Free-text field list; empty means every field (`*`).
    #[serde(default)]
    pub default_fields: Vec<String>,

    /// Suffix addressing a field's exact-match sub-field.
    #[serde(default = "default_keyword_suffix")]
    pub keyword_suffix: String,

    /// How field rules are compiled.
    #[serde(default)]
    pub clause_style: ClauseStyle,

    /// Key of term-match objects.
    #[serde(default)]
    pub term_key: TermKey,

    /// Characters escaped in free-text values.
    #[serde(default)]
    pub escape: EscapeSet,

    /// How XOR scopes are expressed.
    #[serde(default)]
    pub xor_strategy: XorStrategy,

    /// Append `*` to free-text queries for prefix matching.
    #[serde(default)]
    pub prefix_free_text: bool,

    /// Geo-point field used for distance sorting.
    #[serde(default = "default_geo_field")]
    pub geo_field: String,

    /// Distance cap when the request gives none, in kilometres.
    #[serde(default = "default_max_distance_km")]
    pub geo_default_max_distance_km: f64,

    /// Attach `inner_hits` highlighting to nested branches.
    #[serde(default = "default_true")]
    pub inner_hits: bool,

    /// Nested-object structure of the index.
    #[serde(default)]
    pub mapping: Vec<MappingNode>,

    /// Highlighting.
    #[serde(default)]
    pub highlight: HighlightConfig,
}

fn default_index() -> String {
    "contacts".to_string()
}

fn default_size() -> u64 {
    20
}

fn default_keyword_suffix() -> String {
    ".keyword".to_string()
}

fn default_geo_field() -> String {
    "pin.location".to_string()
}

fn default_max_distance_km() -> f64 {
    20.0
}

fn default_true() -> bool {
    true
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            index: default_index(),
            default_size: default_size(),
            default_fields: Vec::new(),
            keyword_suffix: default_keyword_suffix(),
            clause_style: ClauseStyle::default(),
            term_key: TermKey::default(),
            escape: EscapeSet::default(),
            xor_strategy: XorStrategy::default(),
            prefix_free_text: false,
            geo_field: default_geo_field(),
            geo_default_max_distance_km: default_max_distance_km(),
            inner_hits: default_true(),
            mapping: Vec::new(),
            highlight: HighlightConfig::default(),
        }
    }
}

impl CompilerConfig {
    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| Error::config(format!("Failed to parse configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Reject settings that would produce an unusable query document.
    pub fn validate(&self) -> Result<()> {
        if self.index.trim().is_empty() {
            return Err(Error::config("index must not be empty"));
        }
        if self.default_size == 0 {
            return Err(Error::config("default_size must be greater than zero"));
        }
        if self.geo_field.trim().is_empty() {
            return Err(Error::config("geo_field must not be empty"));
        }
        if !self.geo_default_max_distance_km.is_finite() || self.geo_default_max_distance_km < 0.0 {
            return Err(Error::config(
                "geo_default_max_distance_km must be a non-negative number",
            ));
        }
        for node in &self.mapping {
            node.validate()?;
        }
        Ok(())
    }

    /// Field list used by field-less free-text rules.
    pub fn free_text_fields(&self) -> Vec<String> {
        if self.default_fields.is_empty() {
            vec!["*".to_string()]
        } else {
            self.default_fields.clone()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
