// crates/tf-acceptance-core/src/runtime/comparator.rs
// ============================================================================
// Module: Output Comparator
// Description: Exact comparison of observed outputs against expectations.
// Purpose: Turn one expectation and one output read into a verdict.
// Dependencies: crate::core, serde_json
// ============================================================================

//! ## Overview
//! The expected value decides which projection is applied to the raw JSON
//! output: text for scalars, ordered list for lists, string map for maps, and
//! a single map entry when the expectation names a key. Comparison is plain
//! equality on the projected value, so list order matters and map key sets
//! must match exactly.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::Expectation;
use crate::core::Mismatch;
use crate::core::ObservedValue;
use crate::core::OutputError;
use crate::core::OutputValue;
use crate::core::project_list;
use crate::core::project_map;
use crate::core::project_map_entry;
use crate::core::project_text;

// ============================================================================
// SECTION: Comparison
// ============================================================================

/// Projects `value` the way `expectation` reads it.
///
/// # Errors
///
/// Returns [`OutputError`] when the output has no such projection.
pub fn observe(expectation: &Expectation, value: &Value) -> Result<OutputValue, OutputError> {
    let output = expectation.output.as_str();
    if let Some(key) = &expectation.key {
        return project_map_entry(output, key, value).map(OutputValue::Text);
    }
    match &expectation.expected {
        OutputValue::Text(_) => project_text(output, value).map(OutputValue::Text),
        OutputValue::List(_) => project_list(output, value).map(OutputValue::List),
        OutputValue::Map(_) => project_map(output, value).map(OutputValue::Map),
    }
}

/// Compares one expectation with a raw output read.
///
/// `read` carries either the output JSON or the read failure text. Returns
/// `None` when the expectation holds.
#[must_use]
pub fn compare(expectation: &Expectation, read: Result<&Value, &str>) -> Option<Mismatch> {
    let actual = match read {
        Ok(value) => match observe(expectation, value) {
            Ok(observed) if observed == expectation.expected => return None,
            Ok(observed) => ObservedValue::Value(observed),
            Err(err) => ObservedValue::ReadError(err.to_string()),
        },
        Err(message) => ObservedValue::ReadError(message.to_string()),
    };
    Some(Mismatch {
        output: expectation.label(),
        expected: expectation.expected.clone(),
        actual,
    })
}
