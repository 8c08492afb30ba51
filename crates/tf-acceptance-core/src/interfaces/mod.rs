// crates/tf-acceptance-core/src/interfaces/mod.rs
// ============================================================================
// Module: Provisioning Interfaces
// Description: Backend-agnostic seam between the runner and a provisioning tool.
// Purpose: Let scenarios run against Terraform or an in-memory double alike.
// Dependencies: crate::core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`Provisioner`] turns a [`ScenarioConfig`] into an opaque handle and
//! then runs init, apply, plan, destroy, and output reads against that handle.
//! All calls are blocking. Implementations own retry policy, if any; the
//! runner never retries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::core::PlanSummary;
use crate::core::ScenarioConfig;

// ============================================================================
// SECTION: Provisioner
// ============================================================================

/// Client for a provisioning tool.
///
/// # Invariants
/// - A handle refers to one isolated infrastructure instance.
/// - `destroy` is the last call made with a handle.
pub trait Provisioner {
    /// Opaque reference to one configured infrastructure instance.
    type Handle;

    /// Prepares a handle for `config` without touching infrastructure.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError`] when the configuration cannot be used.
    fn configure(&self, config: &ScenarioConfig) -> Result<Self::Handle, ProvisionError>;

    /// Initializes the tool against the handle's working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError`] when initialization fails.
    fn init(&self, handle: &Self::Handle) -> Result<(), ProvisionError>;

    /// Applies the configuration, creating real resources.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError`] when apply fails.
    fn apply(&self, handle: &Self::Handle) -> Result<(), ProvisionError>;

    /// Produces a plan without applying it.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError`] when planning fails.
    fn plan(&self, handle: &Self::Handle) -> Result<PlanSummary, ProvisionError>;

    /// Destroys every resource created through the handle.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError`] when destroy fails.
    fn destroy(&self, handle: &Self::Handle) -> Result<(), ProvisionError>;

    /// Reads one named output as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError`] when the output cannot be read.
    fn output_json(&self, handle: &Self::Handle, name: &str) -> Result<Value, ProvisionError>;
}

impl<P: Provisioner + ?Sized> Provisioner for &P {
    type Handle = P::Handle;

    fn configure(&self, config: &ScenarioConfig) -> Result<Self::Handle, ProvisionError> {
        (**self).configure(config)
    }

    fn init(&self, handle: &Self::Handle) -> Result<(), ProvisionError> {
        (**self).init(handle)
    }

    fn apply(&self, handle: &Self::Handle) -> Result<(), ProvisionError> {
        (**self).apply(handle)
    }

    fn plan(&self, handle: &Self::Handle) -> Result<PlanSummary, ProvisionError> {
        (**self).plan(handle)
    }

    fn destroy(&self, handle: &Self::Handle) -> Result<(), ProvisionError> {
        (**self).destroy(handle)
    }

    fn output_json(&self, handle: &Self::Handle, name: &str) -> Result<Value, ProvisionError> {
        (**self).output_json(handle, name)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Provisioning tool errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvisionError {
    /// The tool ran and exited unsuccessfully.
    #[error("{command} failed ({status}): {diagnostics}")]
    Tool {
        /// Rendered command line.
        command: String,
        /// Exit status description.
        status: String,
        /// Diagnostic text reported by the tool.
        diagnostics: String,
    },
    /// The tool could not be started.
    #[error("failed to start {command}: {message}")]
    Spawn {
        /// Rendered command line.
        command: String,
        /// Operating system error.
        message: String,
    },
    /// The tool produced output that could not be parsed.
    #[error("failed to parse {what}: {message}")]
    Parse {
        /// What was being parsed.
        what: String,
        /// Parser error.
        message: String,
    },
    /// The scenario configuration cannot be used.
    #[error("invalid scenario configuration: {0}")]
    Config(String),
}
