// crates/tf-acceptance-core/src/core/mod.rs
// ============================================================================
// Module: Scenario Model
// Description: Data types shared by the runner and provisioning clients.
// Purpose: Keep scenario inputs, outputs, and reports in one place.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The scenario model covers what goes into a scenario (configuration and
//! input variables), what comes back (output projections), what the runner
//! checks (expectations), and what it reports (mismatches, teardown outcome,
//! plan summaries).

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod lifecycle;
pub mod outputs;
pub mod plan;
pub mod report;
pub mod scenario;
pub mod vars;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use lifecycle::LifecycleError;
pub use lifecycle::LifecycleState;
pub use outputs::Expectation;
pub use outputs::OutputError;
pub use outputs::OutputValue;
pub use outputs::project_list;
pub use outputs::project_map;
pub use outputs::project_map_entry;
pub use outputs::project_text;
pub use plan::PlanReport;
pub use plan::PlanSummary;
pub use plan::ResourceChange;
pub use report::Mismatch;
pub use report::ObservedValue;
pub use report::ScenarioFailure;
pub use report::ScenarioReport;
pub use report::TeardownOutcome;
pub use scenario::ScenarioConfig;
pub use vars::VarValue;
