//! Highlight specifications.
//!
//! Two strategies exist and a deployment picks one:
//!
//! - `template`: a static specification highlighting every field (`*`).
//! - `used_fields`: one plain highlighter per field referenced by the
//!   compiled rules, falling back to the template when no field was
//!   referenced.

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// How the top-level highlight specification is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightStrategy {
    /// Static `*` template.
    #[default]
    Template,
    /// Built from the fields referenced during compilation.
    UsedFields,
}

/// Highlight configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// Strategy for the top-level highlight.
    #[serde(default)]
    pub strategy: HighlightStrategy,

    /// Markup inserted before a match.
    #[serde(default = "default_pre_tags")]
    pub pre_tags: Vec<String>,

    /// Markup inserted after a match.
    #[serde(default = "default_post_tags")]
    pub post_tags: Vec<String>,

    /// Fragment ordering.
    #[serde(default = "default_order")]
    pub order: String,

    /// Fragment size in characters.
    #[serde(default = "default_fragment_size")]
    pub fragment_size: u32,

    /// Maximum fragments per field.
    #[serde(default = "default_number_of_fragments")]
    pub number_of_fragments: u32,

    /// Fragmenter name.
    #[serde(default = "default_fragmenter")]
    pub fragmenter: String,
}

fn default_pre_tags() -> Vec<String> {
    vec![r#"<span class="highlighted">"#.to_string()]
}

fn default_post_tags() -> Vec<String> {
    vec!["</span>".to_string()]
}

fn default_order() -> String {
    "score".to_string()
}

fn default_fragment_size() -> u32 {
    12
}

fn default_number_of_fragments() -> u32 {
    3
}

fn default_fragmenter() -> String {
    "span".to_string()
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            strategy: HighlightStrategy::default(),
            pre_tags: default_pre_tags(),
            post_tags: default_post_tags(),
            order: default_order(),
            fragment_size: default_fragment_size(),
            number_of_fragments: default_number_of_fragments(),
            fragmenter: default_fragmenter(),
        }
    }
}

impl HighlightConfig {
    /// The static template highlighting every field.
    pub fn template(&self) -> HighlightSpec {
        let field = FieldHighlight {
            kind: None,
            fragment_size: self.fragment_size,
            number_of_fragments: self.number_of_fragments,
            fragmenter: self.fragmenter.clone(),
        };
        self.spec(vec![("*".to_string(), field)])
    }

    /// The top-level specification for a compile pass that referenced
    /// `used_fields`.
    pub fn build(&self, used_fields: &[String]) -> HighlightSpec {
        match self.strategy {
            HighlightStrategy::Template => self.template(),
            HighlightStrategy::UsedFields if used_fields.is_empty() => HighlightSpec {
                require_field_match: Some(false),
                ..self.template()
            },
            HighlightStrategy::UsedFields => {
                let fields = used_fields
                    .iter()
                    .map(|name| {
                        let field = FieldHighlight {
                            kind: Some("plain".to_string()),
                            fragment_size: self.fragment_size,
                            number_of_fragments: self.number_of_fragments,
                            fragmenter: self.fragmenter.clone(),
                        };
                        (name.clone(), field)
                    })
                    .collect();
                self.spec(fields)
            }
        }
    }

    fn spec(&self, fields: Vec<(String, FieldHighlight)>) -> HighlightSpec {
        HighlightSpec {
            pre_tags: self.pre_tags.clone(),
            post_tags: self.post_tags.clone(),
            order: self.order.clone(),
            require_field_match: None,
            fields,
        }
    }
}

/// Per-field highlighter options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldHighlight {
    /// Highlighter type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Fragment size in characters.
    pub fragment_size: u32,
    /// Maximum fragments.
    pub number_of_fragments: u32,
    /// Fragmenter name.
    pub fragmenter: String,
}

/// A highlight specification as sent to the search engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightSpec {
    /// Markup inserted before a match.
    pub pre_tags: Vec<String>,
    /// Markup inserted after a match.
    pub post_tags: Vec<String>,
    /// Fragment ordering.
    pub order: String,
    /// Whether only queried fields are highlighted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_field_match: Option<bool>,
    /// Field patterns and their options, in declaration order.
    #[serde(serialize_with = "serialize_fields")]
    pub fields: Vec<(String, FieldHighlight)>,
}

impl HighlightSpec {
    /// Options for `field`, if highlighted.
    pub fn field(&self, field: &str) -> Option<&FieldHighlight> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, options)| options)
    }
}

fn serialize_fields<S: Serializer>(
    fields: &[(String, FieldHighlight)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(fields.len()))?;
    for (name, options) in fields {
        map.serialize_entry(name, options)?;
    }
    map.end()
}

// ============================================================================
// Tests
// ============================================================================
