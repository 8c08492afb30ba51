// crates/tf-acceptance-core/src/core/report.rs
// ============================================================================
// Module: Scenario Reports
// Description: Outcome of a full provisioning scenario.
// Purpose: Collect fatal errors, mismatches, and teardown results together.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`ScenarioReport`] is produced for every full scenario, whether or not
//! it passed. Pass/fail depends only on the fatal error and the mismatches;
//! teardown failures are reported alongside but never flip the verdict.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::lifecycle::LifecycleState;
use crate::core::outputs::OutputValue;

// ============================================================================
// SECTION: Types
// ============================================================================

/// What the runner observed for a failing expectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ObservedValue {
    /// The output was read and differs from the expectation.
    Value(OutputValue),
    /// The output could not be read or projected.
    ReadError(String),
}

impl fmt::Display for ObservedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => value.fmt(f),
            Self::ReadError(message) => write!(f, "<read error: {message}>"),
        }
    }
}

/// A single failed expectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    /// Output label (`output` or `output.key`).
    pub output: String,
    /// Expected value.
    pub expected: OutputValue,
    /// Observed value or read error.
    pub actual: ObservedValue,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: expected {}, actual {}", self.output, self.expected, self.actual)
    }
}

/// Outcome of the teardown step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum TeardownOutcome {
    /// No handle was acquired, so nothing needed tearing down.
    NotRequired,
    /// Destroy completed.
    Destroyed,
    /// Destroy failed with the given diagnostic.
    Failed(String),
}

/// Report for a full scenario run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario name.
    pub scenario: String,
    /// Last lifecycle state reached.
    pub state: LifecycleState,
    /// Fatal provisioning error, if any.
    pub failure: Option<String>,
    /// Expectations that did not hold, in declaration order.
    pub mismatches: Vec<Mismatch>,
    /// Number of expectations checked.
    pub checked: usize,
    /// Teardown outcome.
    pub teardown: TeardownOutcome,
}

impl ScenarioReport {
    /// Returns true when the scenario had no fatal error and no mismatch.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.failure.is_none() && self.mismatches.is_empty()
    }

    /// Returns the teardown error, if teardown failed.
    #[must_use]
    pub fn teardown_error(&self) -> Option<&str> {
        match &self.teardown {
            TeardownOutcome::Failed(message) => Some(message),
            TeardownOutcome::NotRequired | TeardownOutcome::Destroyed => None,
        }
    }

    /// Converts the report into a result keyed on [`Self::passed`].
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioFailure`] describing every failure when the scenario
    /// did not pass.
    pub fn into_result(self) -> Result<Self, ScenarioFailure> {
        if self.passed() { Ok(self) } else { Err(ScenarioFailure::new(self)) }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// A failed scenario, rendered with all diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ScenarioFailure {
    /// Rendered diagnostics.
    message: String,
    /// Underlying report.
    report: Box<ScenarioReport>,
}

impl ScenarioFailure {
    /// Builds a failure from a report.
    fn new(report: ScenarioReport) -> Self {
        Self {
            message: render_failure(&report),
            report: Box::new(report),
        }
    }

    /// Returns the underlying report.
    #[must_use]
    pub fn report(&self) -> &ScenarioReport {
        &self.report
    }
}

/// Renders a multi-line failure description.
fn render_failure(report: &ScenarioReport) -> String {
    let mut lines = vec![format!(
        "scenario {} failed in state {}",
        report.scenario,
        report.state.as_str()
    )];
    if let Some(failure) = &report.failure {
        lines.push(format!("  fatal: {failure}"));
    }
    for mismatch in &report.mismatches {
        lines.push(format!("  mismatch: {mismatch}"));
    }
    if let Some(error) = report.teardown_error() {
        lines.push(format!("  teardown: {error}"));
    }
    lines.join("\n")
}
