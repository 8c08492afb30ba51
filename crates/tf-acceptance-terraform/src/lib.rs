// crates/tf-acceptance-terraform/src/lib.rs
// ============================================================================
// Module: tf-acceptance Terraform Client
// Description: Provisioning client backed by the terraform CLI.
// Purpose: Run init, apply, plan, destroy, and output reads as subprocesses.
// Dependencies: tf-acceptance-core, serde_json, tempfile, walkdir
// ============================================================================

//! ## Overview
//! [`TerraformCli`] implements [`tf_acceptance_core::Provisioner`] by invoking
//! the `terraform` binary in a scenario's working directory. Every invocation
//! runs non-interactively (`TF_IN_AUTOMATION=1`, `TF_INPUT=0`, `-input=false`).
//! Invariants:
//! - Input variables are passed as `-var name=value` in name order.
//! - A non-zero exit maps to [`tf_acceptance_core::ProvisionError::Tool`] with
//!   the tool's diagnostics attached.
//! - Plan files and isolated module copies live in a per-handle scratch
//!   directory removed when the handle drops.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod args;
pub mod cli;
pub mod workspace;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use args::ArgContext;
pub use cli::TerraformCli;
pub use cli::TerraformCliConfig;
pub use cli::TerraformHandle;
pub use workspace::copy_module_into;
