// crates/tf-acceptance-core/src/runtime/mod.rs
// ============================================================================
// Module: Scenario Runtime
// Description: Runner, teardown guard, comparator, and lifecycle logging.
// Purpose: Execute scenarios against any provisioning client.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The runtime executes scenarios: it sequences provisioning steps, guards
//! teardown, compares outputs, and emits lifecycle events.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod comparator;
pub mod runner;
pub mod teardown;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileLifecycleSink;
pub use audit::LifecycleEvent;
pub use audit::LifecycleOutcome;
pub use audit::LifecycleSink;
pub use audit::LifecycleStep;
pub use audit::NoopLifecycleSink;
pub use audit::StderrLifecycleSink;
pub use comparator::compare;
pub use comparator::observe;
pub use runner::ScenarioError;
pub use runner::ScenarioRunner;
pub use teardown::TeardownGuard;
