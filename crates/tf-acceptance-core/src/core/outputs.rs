// crates/tf-acceptance-core/src/core/outputs.rs
// ============================================================================
// Module: Output Projections
// Description: Textual projections of typed module outputs.
// Purpose: Read outputs as text, ordered lists, or string maps.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The provisioning tool reports outputs as JSON. Acceptance checks compare
//! them as text: numbers keep the digits the tool printed (serde_json's
//! `arbitrary_precision`), booleans become their literal form, lists keep
//! their order, and maps become `BTreeMap<String, String>` so comparison is
//! independent of key order. `null` and nested collections have no textual
//! projection and fail closed with [`OutputError::Shape`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A textual snapshot of a module output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputValue {
    /// Scalar output rendered as text.
    Text(String),
    /// Ordered list of scalar outputs rendered as text.
    List(Vec<String>),
    /// String-to-string map.
    Map(BTreeMap<String, String>),
}

/// Renders the value as JSON: quoted text, an array, or an object.
impl fmt::Display for OutputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl From<&str> for OutputValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for OutputValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for OutputValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<BTreeMap<String, String>> for OutputValue {
    fn from(value: BTreeMap<String, String>) -> Self {
        Self::Map(value)
    }
}

/// One expected output value.
///
/// # Invariants
/// - When `key` is set the output is read as a map and only that entry is
///   compared, as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expectation {
    /// Output name.
    pub output: String,
    /// Optional map key within the output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Expected value.
    pub expected: OutputValue,
}

impl Expectation {
    /// Expects a scalar output to equal `value`.
    #[must_use]
    pub fn text(output: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            key: None,
            expected: OutputValue::Text(value.into()),
        }
    }

    /// Expects a list output to equal `items`, in order.
    #[must_use]
    pub fn list<I, S>(output: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            output: output.into(),
            key: None,
            expected: OutputValue::List(items.into_iter().map(Into::into).collect()),
        }
    }

    /// Expects a map output to equal `entries` exactly.
    #[must_use]
    pub fn map<I, K, V>(output: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            output: output.into(),
            key: None,
            expected: OutputValue::Map(
                entries.into_iter().map(|(key, value)| (key.into(), value.into())).collect(),
            ),
        }
    }

    /// Expects one entry of a map output to equal `value`.
    #[must_use]
    pub fn map_entry(
        output: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            output: output.into(),
            key: Some(key.into()),
            expected: OutputValue::Text(value.into()),
        }
    }

    /// Returns a display label such as `processed_outputs.upper_text`.
    #[must_use]
    pub fn label(&self) -> String {
        self.key.as_ref().map_or_else(
            || self.output.clone(),
            |key| format!("{}.{key}", self.output),
        )
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while projecting an output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputError {
    /// The output has a JSON shape the projection cannot represent.
    #[error("output {output} is {found}, expected {expected}")]
    Shape {
        /// Output name.
        output: String,
        /// Projection that was requested.
        expected: &'static str,
        /// JSON kind that was found.
        found: &'static str,
    },
    /// A map output does not contain the requested key.
    #[error("output {output} has no key {key}")]
    MissingKey {
        /// Output name.
        output: String,
        /// Missing key.
        key: String,
    },
}

// ============================================================================
// SECTION: Projections
// ============================================================================

/// Projects a scalar output to text.
///
/// # Errors
///
/// Returns [`OutputError::Shape`] for `null`, arrays, and objects.
pub fn project_text(output: &str, value: &Value) -> Result<String, OutputError> {
    scalar_text(value).ok_or_else(|| shape_error(output, "text", value))
}

/// Projects a list output to an ordered sequence of strings.
///
/// # Errors
///
/// Returns [`OutputError::Shape`] when the output is not an array of scalars.
pub fn project_list(output: &str, value: &Value) -> Result<Vec<String>, OutputError> {
    let Value::Array(items) = value else {
        return Err(shape_error(output, "list", value));
    };
    items
        .iter()
        .map(|item| scalar_text(item).ok_or_else(|| shape_error(output, "list of scalars", item)))
        .collect()
}

/// Projects a map output to a string-to-string mapping.
///
/// # Errors
///
/// Returns [`OutputError::Shape`] when the output is not an object of scalars.
pub fn project_map(output: &str, value: &Value) -> Result<BTreeMap<String, String>, OutputError> {
    let Value::Object(entries) = value else {
        return Err(shape_error(output, "map", value));
    };
    entries
        .iter()
        .map(|(key, item)| {
            scalar_text(item)
                .map(|text| (key.clone(), text))
                .ok_or_else(|| shape_error(output, "map of scalars", item))
        })
        .collect()
}

/// Projects one entry of a map output to text.
///
/// Only the requested entry must be a scalar; sibling entries may hold lists
/// or nested maps.
///
/// # Errors
///
/// Returns [`OutputError::Shape`] when the output is not an object or the
/// entry is not a scalar, and [`OutputError::MissingKey`] when the key is
/// absent.
pub fn project_map_entry(output: &str, key: &str, value: &Value) -> Result<String, OutputError> {
    let Value::Object(entries) = value else {
        return Err(shape_error(output, "map", value));
    };
    let entry = entries.get(key).ok_or_else(|| OutputError::MissingKey {
        output: output.to_string(),
        key: key.to_string(),
    })?;
    scalar_text(entry).ok_or_else(|| shape_error(output, "text", entry))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Renders a JSON scalar as text; returns `None` for non-scalars.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Builds a shape error for `value`.
fn shape_error(output: &str, expected: &'static str, value: &Value) -> OutputError {
    OutputError::Shape {
        output: output.to_string(),
        expected,
        found: json_kind(value),
    }
}

/// Returns a stable label for a JSON value kind.
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
