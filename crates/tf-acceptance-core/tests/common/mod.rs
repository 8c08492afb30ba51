// crates/tf-acceptance-core/tests/common/mod.rs
// ============================================================================
// Module: Core Test Doubles
// Description: In-memory provisioner and lifecycle sink for runner tests.
// Purpose: Observe every provisioning call without touching infrastructure.
// Dependencies: tf-acceptance-core, serde_json
// ============================================================================

//! Shared test doubles for core integration tests.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test binaries.")]
#![allow(clippy::unwrap_used, reason = "Test doubles unwrap poisoned locks directly.")]
#![allow(clippy::panic, reason = "Test doubles can be told to panic mid-scenario.")]

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde_json::Value;
use tf_acceptance_core::LifecycleEvent;
use tf_acceptance_core::LifecycleSink;
use tf_acceptance_core::PlanSummary;
use tf_acceptance_core::ProvisionError;
use tf_acceptance_core::Provisioner;
use tf_acceptance_core::ScenarioConfig;

/// Provisioning step a double can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Configure,
    Init,
    Apply,
    Plan,
    Destroy,
}

/// In-memory provisioner that records every call.
#[derive(Default)]
pub struct RecordingProvisioner {
    calls: Mutex<Vec<String>>,
    outputs: BTreeMap<String, Value>,
    failures: Vec<FailAt>,
    panic_on_output: bool,
    plan: PlanSummary,
}

impl RecordingProvisioner {
    pub fn new() -> Self {
        Self {
            plan: PlanSummary {
                format_version: "1.2".to_string(),
                ..PlanSummary::default()
            },
            ..Self::default()
        }
    }

    pub fn with_output(mut self, name: &str, value: Value) -> Self {
        self.outputs.insert(name.to_string(), value);
        self
    }

    pub fn failing_at(mut self, step: FailAt) -> Self {
        self.failures.push(step);
        self
    }

    pub fn panicking_on_output(mut self) -> Self {
        self.panic_on_output = true;
        self
    }

    pub fn with_plan(mut self, plan: PlanSummary) -> Self {
        self.plan = plan;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|entry| entry.as_str() == call).count()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn check(&self, step: FailAt, call: &str) -> Result<(), ProvisionError> {
        if self.failures.contains(&step) {
            return Err(ProvisionError::Tool {
                command: format!("fake {call}"),
                status: "exit status: 1".to_string(),
                diagnostics: format!("{call} exploded"),
            });
        }
        Ok(())
    }
}

impl Provisioner for RecordingProvisioner {
    type Handle = String;

    fn configure(&self, config: &ScenarioConfig) -> Result<Self::Handle, ProvisionError> {
        self.record("configure");
        self.check(FailAt::Configure, "configure")?;
        Ok(config.name.clone())
    }

    fn init(&self, _handle: &Self::Handle) -> Result<(), ProvisionError> {
        self.record("init");
        self.check(FailAt::Init, "init")
    }

    fn apply(&self, _handle: &Self::Handle) -> Result<(), ProvisionError> {
        self.record("apply");
        self.check(FailAt::Apply, "apply")
    }

    fn plan(&self, _handle: &Self::Handle) -> Result<PlanSummary, ProvisionError> {
        self.record("plan");
        self.check(FailAt::Plan, "plan")?;
        Ok(self.plan.clone())
    }

    fn destroy(&self, _handle: &Self::Handle) -> Result<(), ProvisionError> {
        self.record("destroy");
        self.check(FailAt::Destroy, "destroy")
    }

    fn output_json(&self, _handle: &Self::Handle, name: &str) -> Result<Value, ProvisionError> {
        self.record(&format!("output:{name}"));
        if self.panic_on_output {
            panic!("output read for {name} panicked");
        }
        self.outputs.get(name).cloned().ok_or_else(|| ProvisionError::Tool {
            command: format!("fake output {name}"),
            status: "exit status: 1".to_string(),
            diagnostics: format!("output {name} not found"),
        })
    }
}

/// Lifecycle sink that keeps events in memory.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<LifecycleEvent>>,
}

impl MemorySink {
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl LifecycleSink for MemorySink {
    fn record(&self, event: &LifecycleEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
