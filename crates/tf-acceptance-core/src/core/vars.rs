// crates/tf-acceptance-core/src/core/vars.rs
// ============================================================================
// Module: Input Variables
// Description: Typed input variable values passed to the provisioning tool.
// Purpose: Represent the scalar and list values a module accepts as inputs.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Input variables are strings, numbers, or ordered sequences of strings.
//! Numbers keep their JSON representation so that `100` is passed to the tool
//! as `100` and never as `100.0`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Number;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A single input variable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    /// Plain string value.
    String(String),
    /// Numeric value.
    Number(Number),
    /// Ordered sequence of strings.
    List(Vec<String>),
}

impl VarValue {
    /// Renders the value as a tool-facing literal.
    ///
    /// Strings are passed through unquoted, numbers use their decimal form,
    /// and lists render as a JSON array literal (which is also valid HCL).
    #[must_use]
    pub fn to_literal(&self) -> String {
        match self {
            Self::String(value) => value.clone(),
            Self::Number(value) => value.to_string(),
            Self::List(items) => {
                serde_json::to_string(items).unwrap_or_else(|_| String::from("[]"))
            }
        }
    }
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

impl From<&str> for VarValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for VarValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for VarValue {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<u64> for VarValue {
    fn from(value: u64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<i32> for VarValue {
    fn from(value: i32) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<Vec<String>> for VarValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<&[&str]> for VarValue {
    fn from(value: &[&str]) -> Self {
        Self::List(value.iter().map(|item| (*item).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for VarValue {
    fn from(value: [&str; N]) -> Self {
        Self::List(value.iter().map(|item| (*item).to_string()).collect())
    }
}
