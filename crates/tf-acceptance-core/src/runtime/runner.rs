// crates/tf-acceptance-core/src/runtime/runner.rs
// ============================================================================
// Module: Scenario Runner
// Description: Drives a provisioning lifecycle and verifies outputs.
// Purpose: Apply, assert, and always destroy; or plan without applying.
// Dependencies: crate::core, crate::interfaces, thiserror
// ============================================================================

//! ## Overview
//! [`ScenarioRunner::run_full_scenario`] arms a [`TeardownGuard`] as soon as
//! a handle exists, before anything mutates infrastructure. Init and apply
//! failures are fatal; expectation mismatches are collected one per
//! expectation. The guard is released on every path and its result is stored
//! on the report without affecting the verdict.
//! [`ScenarioRunner::run_plan_only`] never applies and therefore never
//! destroys.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use thiserror::Error;

use crate::core::Expectation;
use crate::core::LifecycleError;
use crate::core::LifecycleState;
use crate::core::Mismatch;
use crate::core::PlanReport;
use crate::core::ScenarioConfig;
use crate::core::ScenarioReport;
use crate::core::TeardownOutcome;
use crate::interfaces::ProvisionError;
use crate::interfaces::Provisioner;
use crate::runtime::audit::LifecycleEvent;
use crate::runtime::audit::LifecycleOutcome;
use crate::runtime::audit::LifecycleSink;
use crate::runtime::audit::LifecycleStep;
use crate::runtime::audit::NoopLifecycleSink;
use crate::runtime::audit::record_step;
use crate::runtime::comparator::compare;
use crate::runtime::teardown::TeardownGuard;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors that stop a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    /// The provisioning tool failed.
    #[error(transparent)]
    Provision(#[from] ProvisionError),
    /// The runner attempted an illegal lifecycle step.
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    /// Planning succeeded but produced no plan.
    #[error("scenario {scenario} produced an empty plan")]
    EmptyPlan {
        /// Scenario name.
        scenario: String,
    },
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Runs scenarios against a provisioning client.
pub struct ScenarioRunner<P> {
    /// Provisioning client.
    provisioner: P,
    /// Lifecycle event sink.
    sink: Arc<dyn LifecycleSink>,
}

impl<P: Provisioner> ScenarioRunner<P> {
    /// Creates a runner that discards lifecycle events.
    #[must_use]
    pub fn new(provisioner: P) -> Self {
        Self {
            provisioner,
            sink: Arc::new(NoopLifecycleSink),
        }
    }

    /// Routes lifecycle events to `sink`.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn LifecycleSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Initializes, applies, checks every expectation, and destroys.
    ///
    /// Never returns early without destroying once a handle exists.
    #[must_use]
    pub fn run_full_scenario(
        &self,
        config: &ScenarioConfig,
        expectations: &[Expectation],
    ) -> ScenarioReport {
        let scenario = config.name.as_str();
        let sink = self.sink.as_ref();
        let handle = match record_step(sink, scenario, LifecycleStep::Configure, || {
            self.provisioner.configure(config)
        }) {
            Ok(handle) => handle,
            Err(err) => {
                return ScenarioReport {
                    scenario: scenario.to_string(),
                    state: LifecycleState::NotStarted,
                    failure: Some(err.to_string()),
                    mismatches: Vec::new(),
                    checked: 0,
                    teardown: TeardownOutcome::NotRequired,
                };
            }
        };

        let guard = TeardownGuard::arm(&self.provisioner, handle, scenario, sink);
        let mut state = LifecycleState::NotStarted;
        let mut mismatches = Vec::new();
        let failure = self
            .apply_and_check(scenario, guard.handle(), expectations, &mut state, &mut mismatches)
            .err()
            .map(|err| err.to_string());
        let checked = if state == LifecycleState::Asserted { expectations.len() } else { 0 };

        let teardown = match guard.release() {
            Ok(()) => match state.advance(LifecycleState::Destroyed) {
                Ok(next) => {
                    state = next;
                    TeardownOutcome::Destroyed
                }
                Err(err) => TeardownOutcome::Failed(err.to_string()),
            },
            Err(err) => TeardownOutcome::Failed(err.to_string()),
        };

        ScenarioReport {
            scenario: scenario.to_string(),
            state,
            failure,
            checked,
            mismatches,
            teardown,
        }
    }

    /// Initializes and plans without applying.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError`] when configure, init, or plan fails, or when
    /// the plan is empty.
    pub fn run_plan_only(&self, config: &ScenarioConfig) -> Result<PlanReport, ScenarioError> {
        let scenario = config.name.as_str();
        let sink = self.sink.as_ref();
        let handle = record_step(sink, scenario, LifecycleStep::Configure, || {
            self.provisioner.configure(config)
        })?;
        let state = LifecycleState::NotStarted;
        record_step(sink, scenario, LifecycleStep::Init, || self.provisioner.init(&handle))?;
        let state = state.advance(LifecycleState::Initialized)?;
        let plan =
            record_step(sink, scenario, LifecycleStep::Plan, || self.provisioner.plan(&handle))?;
        if plan.is_empty() {
            return Err(ScenarioError::EmptyPlan {
                scenario: scenario.to_string(),
            });
        }
        state.advance(LifecycleState::PlanOnly)?;
        Ok(PlanReport {
            scenario: scenario.to_string(),
            plan,
        })
    }

    /// Runs init, apply, and the expectation checks against `handle`.
    fn apply_and_check(
        &self,
        scenario: &str,
        handle: &P::Handle,
        expectations: &[Expectation],
        state: &mut LifecycleState,
        mismatches: &mut Vec<Mismatch>,
    ) -> Result<(), ScenarioError> {
        let sink = self.sink.as_ref();
        record_step(sink, scenario, LifecycleStep::Init, || self.provisioner.init(handle))?;
        *state = state.advance(LifecycleState::Initialized)?;
        record_step(sink, scenario, LifecycleStep::Apply, || self.provisioner.apply(handle))?;
        *state = state.advance(LifecycleState::Applied)?;
        mismatches.extend(self.check_outputs(scenario, handle, expectations));
        *state = state.advance(LifecycleState::Asserted)?;
        Ok(())
    }

    /// Checks every expectation, reading each output name once.
    fn check_outputs(
        &self,
        scenario: &str,
        handle: &P::Handle,
        expectations: &[Expectation],
    ) -> Vec<Mismatch> {
        let mut reads: BTreeMap<&str, Result<Value, String>> = BTreeMap::new();
        let mut mismatches = Vec::new();
        for expectation in expectations {
            let started = Instant::now();
            let read = reads.entry(expectation.output.as_str()).or_insert_with(|| {
                self.provisioner
                    .output_json(handle, &expectation.output)
                    .map_err(|err| err.to_string())
            });
            let verdict = compare(expectation, read.as_ref().map_err(String::as_str));
            let event = match &verdict {
                None => LifecycleEvent::new(
                    scenario,
                    LifecycleStep::OutputCheck,
                    LifecycleOutcome::Ok,
                    started.elapsed(),
                ),
                Some(mismatch) => LifecycleEvent::new(
                    scenario,
                    LifecycleStep::OutputCheck,
                    LifecycleOutcome::Mismatch,
                    started.elapsed(),
                )
                .with_message(mismatch.to_string()),
            };
            self.sink.record(&event.with_subject(expectation.label()));
            mismatches.extend(verdict);
        }
        mismatches
    }
}
