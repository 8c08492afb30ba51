// crates/tf-acceptance-core/src/core/plan.rs
// ============================================================================
// Module: Plan Summaries
// Description: Structured view of a provisioning plan.
// Purpose: Report what a plan would change without applying it.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! [`PlanSummary`] keeps the parts of a machine-readable plan that acceptance
//! checks care about: the plan format version, the resource changes with
//! their actions, and the names of planned outputs. Parsing is lenient about
//! fields it does not use.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A single planned resource change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceChange {
    /// Resource address, for example `null_resource.example`.
    pub address: String,
    /// Planned actions such as `create` or `delete`.
    pub actions: Vec<String>,
}

/// Summary of a machine-readable plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlanSummary {
    /// Plan format version reported by the tool.
    pub format_version: String,
    /// Planned resource changes, in tool order.
    pub resource_changes: Vec<ResourceChange>,
    /// Names of outputs the plan would set.
    pub output_names: BTreeSet<String>,
}

impl PlanSummary {
    /// Builds a summary from plan JSON.
    ///
    /// Missing fields are treated as empty.
    #[must_use]
    pub fn from_plan_json(plan: &Value) -> Self {
        let format_version = plan
            .get("format_version")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let resource_changes = plan
            .get("resource_changes")
            .and_then(Value::as_array)
            .map(|changes| changes.iter().filter_map(parse_resource_change).collect())
            .unwrap_or_default();
        let output_names = plan
            .get("output_changes")
            .and_then(Value::as_object)
            .map(|outputs| outputs.keys().cloned().collect())
            .unwrap_or_default();
        Self {
            format_version,
            resource_changes,
            output_names,
        }
    }

    /// Returns true when the tool produced no usable plan.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.format_version.is_empty()
    }

    /// Counts resource changes that include `action`.
    #[must_use]
    pub fn count_action(&self, action: &str) -> usize {
        self.resource_changes
            .iter()
            .filter(|change| change.actions.iter().any(|candidate| candidate == action))
            .count()
    }
}

/// Result of a plan-only scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanReport {
    /// Scenario name.
    pub scenario: String,
    /// Parsed plan.
    pub plan: PlanSummary,
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses one `resource_changes` entry.
fn parse_resource_change(entry: &Value) -> Option<ResourceChange> {
    let address = entry.get("address")?.as_str()?.to_string();
    let actions = entry
        .get("change")
        .and_then(|change| change.get("actions"))
        .and_then(Value::as_array)
        .map(|actions| actions.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();
    Some(ResourceChange {
        address,
        actions,
    })
}
