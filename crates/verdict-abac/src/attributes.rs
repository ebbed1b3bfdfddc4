//! Attribute records for ABAC evaluation.
//!
//! A [`Record`] is a flat mapping of attribute name to text, built from one
//! JSON object. Every scalar value is coerced to text by [`coerce_value`]
//! before any rule sees it, so rules only ever compare strings.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::ParseError;

// ============================================================================
// Attribute Names
// ============================================================================

/// Whether the identity provider authenticated the caller (`"true"` when it did).
pub const AUTHENTICATED: &str = "azure.authenticated";
/// The caller's application role (e.g., "admin", "user", "guest").
pub const ROLE: &str = "azure.role";
/// The caller's department (e.g., "Engineering").
pub const DEPARTMENT: &str = "azure.department";
/// Group memberships as free text (e.g., "developers,qa").
pub const GROUPS: &str = "azure.groups";
/// The caller's email address.
pub const EMAIL: &str = "azure.email";

// ============================================================================
// Record
// ============================================================================

/// Attributes describing one authorization request.
///
/// Missing attributes read as the empty string; absence is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    attributes: HashMap<String, String>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute (builder pattern).
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Returns the text of an attribute, or `""` when it is absent.
    pub fn get(&self, name: &str) -> &str {
        self.attributes.get(name).map_or("", String::as_str)
    }

    /// Returns `true` if the attribute was present in the source object.
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Number of attributes in the record.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if the record has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Parses one line of JSON into a record.
    ///
    /// The line must hold a single JSON object whose values are scalars.
    /// Anything else (invalid JSON, a top-level array or scalar, a nested
    /// array or object value) is a [`ParseError`].
    pub fn from_json_line(line: &str) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(line)?;

        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(ParseError::NotAnObject {
                    found: value_kind(&other),
                });
            }
        };

        let mut attributes = HashMap::with_capacity(object.len());
        for (name, value) in object {
            let text = coerce_value(&name, value)?;
            attributes.insert(name, text);
        }

        Ok(Self { attributes })
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// Coercion
// ============================================================================

/// Converts a JSON value into the text a rule compares against.
///
/// - string: passed through unchanged
/// - number: serde_json canonical form (`42`, `-7`, `1.5`)
/// - boolean: `true` / `false`
/// - null: empty text, the same as an absent attribute
/// - array or object: rejected with [`ParseError::NestedValue`]
pub fn coerce_value(attribute: &str, value: Value) -> Result<String, ParseError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => Err(ParseError::NestedValue {
            attribute: attribute.to_string(),
        }),
    }
}

/// Names the JSON kind of a value for diagnostics.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Tests
// ============================================================================
