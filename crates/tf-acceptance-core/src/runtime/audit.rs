// crates/tf-acceptance-core/src/runtime/audit.rs
// ============================================================================
// Module: Lifecycle Audit Logging
// Description: Structured events for each provisioning step.
// Purpose: Emit JSON-lines lifecycle logs through pluggable sinks.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every provisioning step the runner takes (configure, init, apply, plan,
//! output checks, destroy) produces one [`LifecycleEvent`]. Events go to a
//! [`LifecycleSink`]; the built-in sinks write JSON lines to stderr or to an
//! append-only file, or drop them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Provisioning step classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStep {
    /// Handle creation.
    Configure,
    /// Tool initialization.
    Init,
    /// Configuration apply.
    Apply,
    /// Plan without apply.
    Plan,
    /// One expectation check.
    OutputCheck,
    /// Teardown.
    Destroy,
}

/// Step outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleOutcome {
    /// The step succeeded.
    Ok,
    /// The step failed.
    Error,
    /// An output check ran but the value did not match.
    Mismatch,
}

/// Lifecycle event payload.
#[derive(Debug, Clone, Serialize)]
pub struct LifecycleEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Scenario name.
    pub scenario: String,
    /// Step classification.
    pub step: LifecycleStep,
    /// Step outcome.
    pub outcome: LifecycleOutcome,
    /// Step duration in milliseconds.
    pub duration_ms: u128,
    /// Output label for output checks.
    pub subject: Option<String>,
    /// Error or mismatch description.
    pub message: Option<String>,
}

impl LifecycleEvent {
    /// Creates a new event with a consistent timestamp.
    #[must_use]
    pub fn new(
        scenario: &str,
        step: LifecycleStep,
        outcome: LifecycleOutcome,
        duration: Duration,
    ) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "scenario_lifecycle",
            timestamp_ms,
            scenario: scenario.to_string(),
            step,
            outcome,
            duration_ms: duration.as_millis(),
            subject: None,
            message: None,
        }
    }

    /// Attaches an output label.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Attaches a message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Sink for lifecycle events.
pub trait LifecycleSink: Send + Sync {
    /// Record a lifecycle event.
    fn record(&self, event: &LifecycleEvent);
}

/// Sink that logs JSON lines to stderr.
pub struct StderrLifecycleSink;

impl LifecycleSink for StderrLifecycleSink {
    fn record(&self, event: &LifecycleEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Sink that logs JSON lines to a file.
pub struct FileLifecycleSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileLifecycleSink {
    /// Opens the log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl LifecycleSink for FileLifecycleSink {
    fn record(&self, event: &LifecycleEvent) {
        let Ok(payload) = serde_json::to_string(event) else {
            return;
        };
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{payload}");
        }
    }
}

/// Sink that drops all events.
pub struct NoopLifecycleSink;

impl LifecycleSink for NoopLifecycleSink {
    fn record(&self, _event: &LifecycleEvent) {}
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Runs `op`, records one event for it, and returns its result.
pub(crate) fn record_step<T, E: std::fmt::Display>(
    sink: &dyn LifecycleSink,
    scenario: &str,
    step: LifecycleStep,
    op: impl FnOnce() -> Result<T, E>,
) -> Result<T, E> {
    let started = Instant::now();
    let result = op();
    let elapsed = started.elapsed();
    let event = match &result {
        Ok(_) => LifecycleEvent::new(scenario, step, LifecycleOutcome::Ok, elapsed),
        Err(err) => LifecycleEvent::new(scenario, step, LifecycleOutcome::Error, elapsed)
            .with_message(err.to_string()),
    };
    sink.record(&event);
    result
}
