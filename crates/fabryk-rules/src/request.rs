//! The front-end search request document.
//!
//! A request carries paging parameters, an optional geo filter and a tree of
//! rules. Rules are deliberately lenient: every field is optional and
//! defaults are applied instead of rejecting the request.
//!
//! ```rust
//! use fabryk_rules::SearchRequest;
//!
//! let request = SearchRequest::from_json_str(r#"{
//!     "params": {"size": 10, "from": 2},
//!     "query": {"rules": [{"field": "city", "operator": "OR", "values": ["Paris", "Lyon"]}]}
//! }"#).unwrap();
//!
//! assert_eq!(request.params.size, Some(10));
//! assert_eq!(request.rules().len(), 1);
//! ```

use serde::{Deserialize, Deserializer, Serialize};

use crate::clause::Scope;
use crate::error::Result;

/// A complete search request as sent by the front end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Paging and index parameters.
    #[serde(default)]
    pub params: RequestParams,

    /// Rule tree and geo filter.
    #[serde(default)]
    pub query: RequestQuery,
}

impl SearchRequest {
    /// Parse a request from its JSON form.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Top-level rules, empty when the request has none.
    pub fn rules(&self) -> &[Rule] {
        self.query.rules.as_deref().unwrap_or_default()
    }
}

/// Request parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestParams {
    /// Target index; the configured index is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,

    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Requested page index (not an offset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,

    /// Fields searched by free-text rules.
    #[serde(
        default,
        rename = "usedFields",
        skip_serializing_if = "Option::is_none"
    )]
    pub used_fields: Option<Vec<String>>,
}

/// The query part of a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestQuery {
    /// Top-level rule scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<Rule>>,

    /// Distance sort around a point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoFilter>,
}

/// Geo-distance filter. Every coordinate defaults to `0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoFilter {
    /// Longitude of the reference point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Latitude of the reference point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// Sort direction, ascending when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,

    /// Maximum distance in kilometres.
    #[serde(
        default,
        rename = "maxDistanceKm",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_distance_km: Option<f64>,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Nearest first.
    #[default]
    Asc,
    /// Farthest first.
    Desc,
}

/// Boolean operator of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    /// Every value must match.
    And,
    /// At least one value must match.
    Or,
    /// No value may match.
    Not,
    /// Some, but not all, values match.
    Xor,
}

impl Operator {
    /// Boolean scope the operator folds its clauses into.
    pub fn scope(self) -> Scope {
        match self {
            Operator::And => Scope::Must,
            Operator::Or | Operator::Xor => Scope::Should,
            Operator::Not => Scope::MustNot,
        }
    }
}

/// One field name or a set of field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldRef {
    /// A single field.
    One(String),
    /// Several fields searched together.
    Many(Vec<String>),
}

impl FieldRef {
    /// The referenced field names, in declaration order.
    pub fn as_slice(&self) -> &[String] {
        match self {
            FieldRef::One(field) => std::slice::from_ref(field),
            FieldRef::Many(fields) => fields,
        }
    }
}

impl From<&str> for FieldRef {
    fn from(field: &str) -> Self {
        FieldRef::One(field.to_string())
    }
}

impl From<Vec<&str>> for FieldRef {
    fn from(fields: Vec<&str>) -> Self {
        FieldRef::Many(fields.into_iter().map(str::to_string).collect())
    }
}

/// A rule value: a literal or a nested group of rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ValueRepr", into = "ValueRepr")]
pub enum Value {
    /// A literal searched for as-is.
    Literal(String),
    /// A nested rule scope compiled recursively.
    Group(Vec<Rule>),
}

impl From<&str> for Value {
    fn from(literal: &str) -> Self {
        Value::Literal(literal.to_string())
    }
}

/// Wire shapes accepted for a value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ValueRepr {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
    Rules(Vec<Rule>),
    Rule(Box<Rule>),
}

impl From<ValueRepr> for Value {
    fn from(repr: ValueRepr) -> Self {
        match repr {
            ValueRepr::Text(text) => Value::Literal(text),
            ValueRepr::Number(number) => Value::Literal(number.to_string()),
            ValueRepr::Flag(flag) => Value::Literal(flag.to_string()),
            ValueRepr::Rules(rules) => Value::Group(rules),
            ValueRepr::Rule(rule) => Value::Group(vec![*rule]),
        }
    }
}

impl From<Value> for ValueRepr {
    fn from(value: Value) -> Self {
        match value {
            Value::Literal(text) => ValueRepr::Text(text),
            Value::Group(rules) => ValueRepr::Rules(rules),
        }
    }
}

/// A single search rule.
///
/// - no operator, no field: free-text search over the default fields
/// - no operator, a field: term match
/// - an operator: values folded into the operator's boolean scope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Field(s) the rule applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldRef>,

    /// Boolean operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,

    /// Values, literals or nested groups. `null` entries are dropped.
    #[serde(default, deserialize_with = "non_null_values")]
    pub values: Vec<Value>,

    /// Match against the exact-match keyword sub-field.
    #[serde(default, rename = "isKeyword", deserialize_with = "null_as_default")]
    pub is_keyword: bool,
}

/// Read a field whose explicit `null` means the default.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_null_values<'de, D>(deserializer: D) -> std::result::Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<Option<Value>> = null_as_default(deserializer)?;
    let total = entries.len();
    let values: Vec<Value> = entries.into_iter().flatten().collect();
    if values.len() < total {
        log::debug!("Dropped {} null rule value(s)", total - values.len());
    }
    Ok(values)
}

impl Rule {
    /// Create an empty rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field(s).
    pub fn with_field(mut self, field: impl Into<FieldRef>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Set the operator.
    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    /// Append a literal value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.push(Value::Literal(value.into()));
        self
    }

    /// Append a nested group of rules.
    pub fn with_group(mut self, rules: Vec<Rule>) -> Self {
        self.values.push(Value::Group(rules));
        self
    }

    /// Target the keyword sub-field.
    pub fn keyword(mut self) -> Self {
        self.is_keyword = true;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
