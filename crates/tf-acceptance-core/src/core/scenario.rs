// crates/tf-acceptance-core/src/core/scenario.rs
// ============================================================================
// Module: Scenario Configuration
// Description: Working directory, input variables, and output verbosity.
// Purpose: Describe one provisioning lifecycle before it starts.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`ScenarioConfig`] is assembled once with consuming builder methods and
//! then only borrowed. Variables are kept in a `BTreeMap` so the argument
//! order handed to the provisioning tool is deterministic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::core::vars::VarValue;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Configuration for a single scenario.
///
/// # Invariants
/// - Immutable once handed to a runner.
/// - Variable names are unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Scenario name used in reports and lifecycle events.
    pub name: String,
    /// Directory containing the module under test.
    pub working_dir: PathBuf,
    /// Input variables keyed by variable name.
    #[serde(default)]
    pub vars: BTreeMap<String, VarValue>,
    /// Disable colored output from the provisioning tool.
    #[serde(default)]
    pub no_color: bool,
}

impl ScenarioConfig {
    /// Creates a configuration with no variables and colored output enabled.
    #[must_use]
    pub fn new(name: impl Into<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            working_dir: working_dir.into(),
            vars: BTreeMap::new(),
            no_color: false,
        }
    }

    /// Adds or replaces an input variable.
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<VarValue>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Sets the no-color flag.
    #[must_use]
    pub fn with_no_color(mut self, no_color: bool) -> Self {
        self.no_color = no_color;
        self
    }

    /// Returns the module directory.
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}
