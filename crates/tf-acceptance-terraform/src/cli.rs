// crates/tf-acceptance-terraform/src/cli.rs
// ============================================================================
// Module: Terraform CLI Client
// Description: Provisioner implementation that shells out to terraform.
// Purpose: Run each lifecycle step as a blocking terraform subprocess.
// Dependencies: tf-acceptance-core, serde, serde_json, tempfile
// ============================================================================

//! ## Overview
//! [`TerraformCli`] resolves each [`ScenarioConfig`] into a
//! [`TerraformHandle`] that owns a scratch directory. When isolation is
//! enabled the module is copied into that directory so concurrent scenarios
//! never share `.terraform/` or local state.
//! Invariants:
//! - Subprocesses never read stdin.
//! - Diagnostics attached to errors are capped at [`MAX_DIAGNOSTIC_BYTES`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;
use std::process::Stdio;

use serde::Deserialize;
use serde_json::Value;
use tempfile::TempDir;
use tf_acceptance_core::PlanSummary;
use tf_acceptance_core::ProvisionError;
use tf_acceptance_core::Provisioner;
use tf_acceptance_core::ScenarioConfig;
use tf_acceptance_core::VarValue;

use crate::args::ArgContext;
use crate::args::apply_args;
use crate::args::destroy_args;
use crate::args::init_args;
use crate::args::output_args;
use crate::args::plan_args;
use crate::args::render_command;
use crate::args::show_json_args;
use crate::workspace::copy_module_into;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum bytes of tool diagnostics kept on an error.
pub const MAX_DIAGNOSTIC_BYTES: usize = 16 * 1024;

/// File name of the saved plan inside a handle's scratch directory.
const PLAN_FILE_NAME: &str = "tfplan";

/// Directory name of the isolated module copy inside the scratch directory.
const MODULE_DIR_NAME: &str = "module";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the terraform CLI client.
///
/// # Invariants
/// - `env` entries are applied after `TF_IN_AUTOMATION` and `TF_INPUT`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TerraformCliConfig {
    /// Path or name of the terraform binary.
    pub binary: PathBuf,
    /// Extra environment passed to every invocation.
    pub env: BTreeMap<String, String>,
    /// Value of `-lock` for apply, plan, and destroy.
    pub lock: bool,
    /// Copies each module into a private scratch directory before init.
    pub isolate: bool,
}

impl Default for TerraformCliConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("terraform"),
            env: BTreeMap::new(),
            lock: false,
            isolate: false,
        }
    }
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// One configured terraform working directory.
#[derive(Debug)]
pub struct TerraformHandle {
    /// Directory terraform runs in.
    working_dir: PathBuf,
    /// Input variables.
    vars: BTreeMap<String, VarValue>,
    /// Suppresses colored output.
    no_color: bool,
    /// Scratch directory holding the plan file and any module copy.
    scratch: TempDir,
}

impl TerraformHandle {
    /// Returns the directory terraform runs in.
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Returns the path of the saved plan file.
    #[must_use]
    pub fn plan_file(&self) -> PathBuf {
        self.scratch.path().join(PLAN_FILE_NAME)
    }

    /// Builds the argument context for this handle.
    const fn arg_context(&self, lock: bool) -> ArgContext<'_> {
        ArgContext {
            vars: &self.vars,
            no_color: self.no_color,
            lock,
        }
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Provisioner that invokes the terraform CLI.
#[derive(Debug, Clone, Default)]
pub struct TerraformCli {
    /// Client configuration.
    config: TerraformCliConfig,
}

impl TerraformCli {
    /// Creates a client with the given configuration.
    #[must_use]
    pub const fn new(config: TerraformCliConfig) -> Self {
        Self {
            config,
        }
    }

    /// Runs terraform with `args` and returns its stdout.
    fn run(&self, handle: &TerraformHandle, args: &[String]) -> Result<String, ProvisionError> {
        let command = render_command(&self.config.binary, args);
        let output = Command::new(&self.config.binary)
            .args(args)
            .current_dir(&handle.working_dir)
            .env("TF_IN_AUTOMATION", "1")
            .env("TF_INPUT", "0")
            .envs(&self.config.env)
            .stdin(Stdio::null())
            .output()
            .map_err(|err| ProvisionError::Spawn {
                command: command.clone(),
                message: err.to_string(),
            })?;
        if !output.status.success() {
            return Err(ProvisionError::Tool {
                command,
                status: output.status.to_string(),
                diagnostics: diagnostics(&output),
            });
        }
        String::from_utf8(output.stdout).map_err(|err| ProvisionError::Parse {
            what: format!("{command} stdout"),
            message: err.to_string(),
        })
    }
}

impl Provisioner for TerraformCli {
    type Handle = TerraformHandle;

    fn configure(&self, config: &ScenarioConfig) -> Result<Self::Handle, ProvisionError> {
        let source = config.working_dir();
        if !source.is_dir() {
            return Err(ProvisionError::Config(format!(
                "working directory {} does not exist",
                source.display()
            )));
        }
        let scratch = tempfile::Builder::new()
            .prefix("tf-acceptance-")
            .tempdir()
            .map_err(|err| ProvisionError::Config(format!("failed to create scratch dir: {err}")))?;
        let working_dir = if self.config.isolate {
            let target = scratch.path().join(MODULE_DIR_NAME);
            copy_module_into(source, &target).map_err(|err| {
                ProvisionError::Config(format!("failed to copy {}: {err}", source.display()))
            })?;
            target
        } else {
            source.to_path_buf()
        };
        Ok(TerraformHandle {
            working_dir,
            vars: config.vars.clone(),
            no_color: config.no_color,
            scratch,
        })
    }

    fn init(&self, handle: &Self::Handle) -> Result<(), ProvisionError> {
        self.run(handle, &init_args(&handle.arg_context(self.config.lock))).map(drop)
    }

    fn apply(&self, handle: &Self::Handle) -> Result<(), ProvisionError> {
        self.run(handle, &apply_args(&handle.arg_context(self.config.lock))).map(drop)
    }

    fn plan(&self, handle: &Self::Handle) -> Result<PlanSummary, ProvisionError> {
        let ctx = handle.arg_context(self.config.lock);
        let plan_file = handle.plan_file();
        self.run(handle, &plan_args(&ctx, &plan_file))?;
        let stdout = self.run(handle, &show_json_args(&ctx, &plan_file))?;
        let plan = parse_json("plan json", &stdout)?;
        Ok(PlanSummary::from_plan_json(&plan))
    }

    fn destroy(&self, handle: &Self::Handle) -> Result<(), ProvisionError> {
        self.run(handle, &destroy_args(&handle.arg_context(self.config.lock))).map(drop)
    }

    fn output_json(&self, handle: &Self::Handle, name: &str) -> Result<Value, ProvisionError> {
        let stdout = self.run(handle, &output_args(&handle.arg_context(self.config.lock), name))?;
        parse_json(&format!("output {name}"), &stdout)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses JSON printed by terraform.
fn parse_json(what: &str, stdout: &str) -> Result<Value, ProvisionError> {
    serde_json::from_str(stdout.trim()).map_err(|err| ProvisionError::Parse {
        what: what.to_string(),
        message: err.to_string(),
    })
}

/// Extracts diagnostics from a failed invocation, preferring stderr.
fn diagnostics(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let text = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr.trim().to_string()
    };
    truncate_diagnostics(text)
}

/// Caps diagnostics at [`MAX_DIAGNOSTIC_BYTES`] on a character boundary.
pub(crate) fn truncate_diagnostics(mut text: String) -> String {
    if text.len() <= MAX_DIAGNOSTIC_BYTES {
        return text;
    }
    let mut cut = MAX_DIAGNOSTIC_BYTES;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
    text.push_str(" [truncated]");
    text
}
