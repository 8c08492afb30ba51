// crates/tf-acceptance-core/src/lib.rs
// ============================================================================
// Module: tf-acceptance Core Library
// Description: Scenario model, provisioning interface, and scenario runner.
// Purpose: Drive one provisioning lifecycle per scenario and verify outputs.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `tf-acceptance-core` defines the backend-agnostic pieces of an
//! infrastructure acceptance test: the scenario configuration, the
//! [`Provisioner`] seam used to talk to a provisioning tool, the textual
//! projections of module outputs, and the [`ScenarioRunner`] that applies a
//! scenario, checks its outputs and always tears it down again.
//! Invariants:
//! - Every scenario that reaches apply is destroyed exactly once.
//! - Output comparison is exact; the first mismatch never hides later ones.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;
pub use interfaces::ProvisionError;
pub use interfaces::Provisioner;
pub use runtime::FileLifecycleSink;
pub use runtime::LifecycleEvent;
pub use runtime::LifecycleOutcome;
pub use runtime::LifecycleSink;
pub use runtime::LifecycleStep;
pub use runtime::NoopLifecycleSink;
pub use runtime::ScenarioError;
pub use runtime::ScenarioRunner;
pub use runtime::StderrLifecycleSink;
pub use runtime::TeardownGuard;
