//! Constraint-table validation
//!
//! Request structs are described by a [`Schema`]: an ordered table of field
//! name to constraint list, checked against a decoded JSON object. Fields are
//! visited in the order they were declared and constraints in the order they
//! were listed, so the first reported failure is deterministic.
//!
//! An absent or `null` field is checked as an empty value: rules such as
//! `OneOf` or `Base64` fail on it, size rules see a size of zero. Listing
//! [`Constraint::OmitEmpty`] skips every rule of a field whose value is empty.
//!
//! ```
//! use host_validation::schema::{Constraint, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .field("stime", [Constraint::Required, Constraint::Min(1.0)])
//!     .field("etime", [Constraint::Required, Constraint::GtField("stime".into())]);
//!
//! assert!(schema.validate(&json!({"stime": 10, "etime": 20})).is_ok());
//! assert!(schema.validate(&json!({"stime": 10, "etime": 5})).is_err());
//! ```

use crate::validators::is_valid_base64;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

lazy_static! {
    static ref NUMERIC: Regex = Regex::new(r"^[-+]?[0-9]+(?:\.[0-9]+)?$").unwrap();
    static ref ALPHA: Regex = Regex::new(r"^[a-zA-Z]+$").unwrap();
    static ref ALPHANUMERIC: Regex = Regex::new(r"^[a-zA-Z0-9]+$").unwrap();
}

/// A single rule applied to one field
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Skip the field's other constraints when its value is empty
    OmitEmpty,
    /// Present and not null, `""`, `0` or `false`
    Required,
    /// Non-empty padded standard base64
    Base64,
    /// One of the listed values
    OneOf(Vec<String>),
    /// Email address
    Email,
    /// Size at least n (value, character count or element count)
    Min(f64),
    /// Size at most n
    Max(f64),
    /// Size exactly n
    Len(usize),
    /// Absolute URL with a scheme
    Url,
    /// Number, or a string holding a decimal number
    Numeric,
    /// ASCII letters only
    Alpha,
    /// ASCII letters and digits only
    Alphanumeric,
    /// Size >= n
    Gte(f64),
    /// Size <= n
    Lte(f64),
    /// Size > n
    Gt(f64),
    /// Size < n
    Lt(f64),
    /// String parsing with the given chrono format
    Datetime(String),
    /// IPv4 or IPv6 address
    Ip,
    /// IPv4 address
    Ipv4,
    /// IPv6 address
    Ipv6,
    /// Array of pairwise distinct items
    Unique,
    /// Number strictly greater than the named sibling field
    GtField(String),
}

impl Constraint {
    /// Build a `OneOf` from a space-separated list (`"traffic bps visit"`)
    pub fn one_of(values: &str) -> Self {
        Constraint::OneOf(values.split_whitespace().map(str::to_string).collect())
    }

    /// Stable tag name of the constraint
    pub fn tag(&self) -> &'static str {
        match self {
            Constraint::OmitEmpty => "omitempty",
            Constraint::Required => "required",
            Constraint::Base64 => "base64",
            Constraint::OneOf(_) => "oneof",
            Constraint::Email => "email",
            Constraint::Min(_) => "min",
            Constraint::Max(_) => "max",
            Constraint::Len(_) => "len",
            Constraint::Url => "url",
            Constraint::Numeric => "numeric",
            Constraint::Alpha => "alpha",
            Constraint::Alphanumeric => "alphanumeric",
            Constraint::Gte(_) => "gte",
            Constraint::Lte(_) => "lte",
            Constraint::Gt(_) => "gt",
            Constraint::Lt(_) => "lt",
            Constraint::Datetime(_) => "datetime",
            Constraint::Ip => "ip",
            Constraint::Ipv4 => "ipv4",
            Constraint::Ipv6 => "ipv6",
            Constraint::Unique => "unique",
            Constraint::GtField(_) => "gtfield",
        }
    }

    /// Constraint parameter as text (`OneOf` values are space-separated)
    pub fn param(&self) -> Option<String> {
        match self {
            Constraint::OneOf(values) => Some(values.join(" ")),
            Constraint::Min(n)
            | Constraint::Max(n)
            | Constraint::Gte(n)
            | Constraint::Lte(n)
            | Constraint::Gt(n)
            | Constraint::Lt(n) => Some(n.to_string()),
            Constraint::Len(n) => Some(n.to_string()),
            Constraint::Datetime(format) => Some(format.clone()),
            Constraint::GtField(field) => Some(field.clone()),
            _ => None,
        }
    }

    /// Check a field value (`Null` when absent). `object` is the enclosing
    /// object, for cross-field rules.
    fn check(&self, value: &Value, object: &Map<String, Value>) -> bool {
        match self {
            Constraint::OmitEmpty => true,
            Constraint::Required => is_present(value),
            Constraint::Base64 => value.as_str().map_or(false, |s| !s.is_empty() && is_valid_base64(s)),
            Constraint::OneOf(values) => match value {
                Value::String(s) => values.iter().any(|v| v == s),
                Value::Number(n) => {
                    let n = n.to_string();
                    values.iter().any(|v| *v == n)
                }
                _ => false,
            },
            Constraint::Email => value.as_str().map_or(false, |s| validator::validate_email(s)),
            Constraint::Url => value.as_str().map_or(false, |s| validator::validate_url(s)),
            Constraint::Numeric => match value {
                Value::Number(_) => true,
                Value::String(s) => NUMERIC.is_match(s),
                _ => false,
            },
            Constraint::Alpha => value.as_str().map_or(false, |s| ALPHA.is_match(s)),
            Constraint::Alphanumeric => value.as_str().map_or(false, |s| ALPHANUMERIC.is_match(s)),
            Constraint::Min(n) | Constraint::Gte(n) => size(value).map_or(false, |size| size >= *n),
            Constraint::Max(n) | Constraint::Lte(n) => size(value).map_or(false, |size| size <= *n),
            Constraint::Gt(n) => size(value).map_or(false, |size| size > *n),
            Constraint::Lt(n) => size(value).map_or(false, |size| size < *n),
            Constraint::Len(n) => size(value).map_or(false, |size| size == *n as f64),
            Constraint::Datetime(format) => value.as_str().map_or(false, |s| {
                chrono::NaiveDateTime::parse_from_str(s, format).is_ok()
                    || chrono::NaiveDate::parse_from_str(s, format).is_ok()
            }),
            Constraint::Ip => value.as_str().map_or(false, |s| validator::validate_ip(s)),
            Constraint::Ipv4 => value.as_str().map_or(false, |s| validator::validate_ip_v4(s)),
            Constraint::Ipv6 => value.as_str().map_or(false, |s| validator::validate_ip_v6(s)),
            Constraint::Unique => match value {
                Value::Null => true,
                Value::Array(items) => {
                    let mut seen = HashSet::new();
                    items.iter().all(|item| seen.insert(item.to_string()))
                }
                _ => false,
            },
            Constraint::GtField(other) => {
                let other = object.get(other).unwrap_or(&Value::Null);
                match (number(value), number(other)) {
                    (Some(this), Some(other)) => this > other,
                    _ => false,
                }
            }
        }
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::Bool(b) => *b,
        Value::Array(_) | Value::Object(_) => true,
    }
}

// Null stands for an absent field's zero value
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        _ => value.as_f64(),
    }
}

// Numbers by value, strings by character count, collections by length
fn size(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(items) => Some(items.len() as f64),
        Value::Object(map) => Some(map.len() as f64),
        _ => None,
    }
}

/// A failed constraint on one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Field name as declared in the schema
    pub field: String,
    /// Tag of the failing constraint
    pub tag: &'static str,
    /// Constraint parameter, if any
    pub param: Option<String>,
    /// Offending value (`Null` when the field was absent)
    pub value: Value,
}

/// Schema validation failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// The value being validated is not a JSON object
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// A field failed one of its constraints
    #[error("field '{}' failed '{}'", .0.field, .0.tag)]
    Field(FieldError),
}

/// Rules for one field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRules {
    name: String,
    constraints: Vec<Constraint>,
}

impl FieldRules {
    /// Field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Constraints in evaluation order
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    fn omits_empty(&self) -> bool {
        self.constraints.contains(&Constraint::OmitEmpty)
    }
}

/// Ordered field -> constraints table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<FieldRules>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field with its constraints
    pub fn field<I>(mut self, name: &str, constraints: I) -> Self
    where
        I: IntoIterator<Item = Constraint>,
    {
        self.fields.push(FieldRules {
            name: name.to_string(),
            constraints: constraints.into_iter().collect(),
        });
        self
    }

    /// Declared fields in order
    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    /// Validate a value, stopping at the first failing constraint
    pub fn validate(&self, value: &Value) -> Result<(), SchemaError> {
        let object = as_object(value)?;
        match self.errors_in(object).next() {
            Some(err) => Err(SchemaError::Field(err)),
            None => Ok(()),
        }
    }

    /// Validate a value and report the first failure of every field
    pub fn validate_all(&self, value: &Value) -> Result<(), Vec<SchemaError>> {
        let object = as_object(value).map_err(|err| vec![err])?;
        let errors: Vec<SchemaError> = self.errors_in(object).map(SchemaError::Field).collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn errors_in<'a>(
        &'a self,
        object: &'a Map<String, Value>,
    ) -> impl Iterator<Item = FieldError> + 'a {
        self.fields.iter().filter_map(move |rules| {
            let value = object.get(&rules.name).unwrap_or(&Value::Null);
            if rules.omits_empty() && !is_present(value) {
                return None;
            }
            rules
                .constraints
                .iter()
                .find(|constraint| !constraint.check(value, object))
                .map(|constraint| FieldError {
                    field: rules.name.clone(),
                    tag: constraint.tag(),
                    param: constraint.param(),
                    value: value.clone(),
                })
        })
    }
}

fn as_object(value: &Value) -> Result<&Map<String, Value>, SchemaError> {
    match value {
        Value::Object(object) => Ok(object),
        Value::Null => Err(SchemaError::NotAnObject("null")),
        Value::Bool(_) => Err(SchemaError::NotAnObject("boolean")),
        Value::Number(_) => Err(SchemaError::NotAnObject("number")),
        Value::String(_) => Err(SchemaError::NotAnObject("string")),
        Value::Array(_) => Err(SchemaError::NotAnObject("array")),
    }
}
