// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed settings for terraform system tests.
// Purpose: Parse overrides for the terraform binary, fixture, and run root.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`SystemTestConfig`] is built from a variable lookup so the parsing rules
//! can be exercised without mutating the process environment.
//! Rules:
//! - Set values must be UTF-8 and non-blank.
//! - `TF_ACCEPTANCE_SYSTEM_TEST_NO_COLOR` accepts `1`, `0`, `true`, or
//!   `false` in any case and defaults to `true`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

// ============================================================================
// SECTION: Variables
// ============================================================================

/// Environment variables read by [`SystemTestConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Directory that receives per-test artifacts.
    RunRoot,
    /// Terraform binary used instead of the one on `PATH`.
    TerraformBin,
    /// Module directory used instead of the bundled fixture.
    FixtureDir,
    /// Passes `-no-color` to terraform.
    NoColor,
}

impl SystemTestEnv {
    /// Every variable, in documentation order.
    pub const ALL: [Self; 4] = [Self::RunRoot, Self::TerraformBin, Self::FixtureDir, Self::NoColor];

    /// Returns the environment variable name.
    #[must_use]
    pub const fn var_name(self) -> &'static str {
        match self {
            Self::RunRoot => "TF_ACCEPTANCE_SYSTEM_TEST_RUN_ROOT",
            Self::TerraformBin => "TF_ACCEPTANCE_SYSTEM_TEST_TERRAFORM_BIN",
            Self::FixtureDir => "TF_ACCEPTANCE_SYSTEM_TEST_FIXTURE_DIR",
            Self::NoColor => "TF_ACCEPTANCE_SYSTEM_TEST_NO_COLOR",
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Rejected environment values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    /// The value is not UTF-8.
    #[error("{0} must be valid UTF-8")]
    NotUtf8(&'static str),
    /// The value is set but blank.
    #[error("{0} must not be empty")]
    Empty(&'static str),
    /// The value is not a boolean literal.
    #[error("{name} must be 1, 0, true, or false, got '{value}'")]
    NotBool {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },
}

// ============================================================================
// SECTION: Config
// ============================================================================

/// Settings shared by every system test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemTestConfig {
    /// Artifact root; tests default to a directory under the cargo target dir.
    pub run_root: Option<PathBuf>,
    /// Explicit terraform binary.
    pub terraform_bin: Option<PathBuf>,
    /// Explicit fixture module directory.
    pub fixture_dir: Option<PathBuf>,
    /// Passes `-no-color` to terraform.
    pub no_color: bool,
}

impl Default for SystemTestConfig {
    fn default() -> Self {
        Self {
            run_root: None,
            terraform_bin: None,
            fixture_dir: None,
            no_color: true,
        }
    }
}

impl SystemTestConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError`] when a set variable is rejected.
    pub fn load() -> Result<Self, EnvError> {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError`] when a set variable is rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EnvError>
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let read = |var: SystemTestEnv| read_value(var, lookup(var.var_name()));
        let no_color = match read(SystemTestEnv::NoColor)? {
            Some(raw) => parse_bool(SystemTestEnv::NoColor, &raw)?,
            None => true,
        };
        Ok(Self {
            run_root: read(SystemTestEnv::RunRoot)?.map(PathBuf::from),
            terraform_bin: read(SystemTestEnv::TerraformBin)?.map(PathBuf::from),
            fixture_dir: read(SystemTestEnv::FixtureDir)?.map(PathBuf::from),
            no_color,
        })
    }
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Reads one variable, rejecting non-UTF-8 and blank values.
fn read_value(var: SystemTestEnv, raw: Option<OsString>) -> Result<Option<String>, EnvError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let value = raw.into_string().map_err(|_| EnvError::NotUtf8(var.var_name()))?;
    if value.trim().is_empty() {
        return Err(EnvError::Empty(var.var_name()));
    }
    Ok(Some(value))
}

/// Parses a boolean literal.
fn parse_bool(var: SystemTestEnv, raw: &str) -> Result<bool, EnvError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => Err(EnvError::NotBool {
            name: var.var_name(),
            value: raw.to_string(),
        }),
    }
}
