// crates/tf-acceptance-cli/src/main.rs
// ============================================================================
// Module: tf-acceptance CLI Entry Point
// Description: Command dispatcher for running acceptance suites.
// Purpose: Run, plan, and validate tf-acceptance.toml suites from a shell.
// Dependencies: clap, serde_jcs, tf-acceptance-config, tf-acceptance-core,
// tf-acceptance-terraform, thiserror
// ============================================================================

//! ## Overview
//! The CLI loads a suite file and drives each selected scenario through the
//! terraform client. Every scenario produces one canonical JSON line on
//! stdout; lifecycle events go to stderr or to an append-only audit log. The
//! process exits non-zero when any scenario fails.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use serde::Serialize;
use serde_json::json;
use tf_acceptance_config::ConfigError;
use tf_acceptance_config::ScenarioEntry;
use tf_acceptance_config::ScenarioMode;
use tf_acceptance_config::SuiteConfig;
use tf_acceptance_core::FileLifecycleSink;
use tf_acceptance_core::LifecycleSink;
use tf_acceptance_core::NoopLifecycleSink;
use tf_acceptance_core::ScenarioRunner;
use tf_acceptance_core::StderrLifecycleSink;
use tf_acceptance_terraform::TerraformCli;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "tf-acceptance", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply, assert, and destroy each apply-mode scenario.
    Run(RunCommand),
    /// Plan each plan-mode scenario without applying.
    Plan(RunCommand),
    /// Load and validate the suite file.
    Validate(ValidateCommand),
}

/// Arguments shared by `run` and `plan`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Suite file path (defaults to `TF_ACCEPTANCE_CONFIG`, then `tf-acceptance.toml`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Run only the named scenarios (repeatable).
    #[arg(long = "scenario", value_name = "NAME")]
    scenarios: Vec<String>,
    /// Append lifecycle events to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    audit_log: Option<PathBuf>,
    /// Discard lifecycle events.
    #[arg(long, conflicts_with = "audit_log")]
    quiet: bool,
}

/// Arguments for `validate`.
#[derive(Args, Debug)]
struct ValidateCommand {
    /// Suite file path (defaults to `TF_ACCEPTANCE_CONFIG`, then `tf-acceptance.toml`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Scenario totals for one command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
struct RunSummary {
    /// Scenarios executed.
    total: usize,
    /// Scenarios that failed.
    failed: usize,
}

impl RunSummary {
    /// Maps the summary to a process exit code.
    fn exit_code(self) -> ExitCode {
        if self.failed == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::new(format!("failed to load suite: {err}"))
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run(cli: Cli) -> CliResult<ExitCode> {
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Commands::Run(command) => command_run(&command, &mut stdout).map(RunSummary::exit_code),
        Commands::Plan(command) => command_plan(&command, &mut stdout).map(RunSummary::exit_code),
        Commands::Validate(command) => command_validate(&command, &mut stdout),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes `run`, writing one report line per scenario to `out`.
fn command_run(command: &RunCommand, out: &mut impl Write) -> CliResult<RunSummary> {
    let suite = SuiteConfig::load(command.config.as_deref())?;
    let entries = selected(&suite, ScenarioMode::Apply, &command.scenarios)?;
    let runner = build_runner(&suite, command)?;
    let mut summary = RunSummary::default();
    for entry in entries {
        let config = entry.to_scenario_config(&suite.base_dir);
        let report = runner.run_full_scenario(&config, &entry.expectations);
        summary.total += 1;
        if !report.passed() {
            summary.failed += 1;
        }
        write_json_line(out, &report)?;
    }
    Ok(summary)
}

/// Executes `plan`, writing one report or error line per scenario to `out`.
fn command_plan(command: &RunCommand, out: &mut impl Write) -> CliResult<RunSummary> {
    let suite = SuiteConfig::load(command.config.as_deref())?;
    let entries = selected(&suite, ScenarioMode::Plan, &command.scenarios)?;
    let runner = build_runner(&suite, command)?;
    let mut summary = RunSummary::default();
    for entry in entries {
        let config = entry.to_scenario_config(&suite.base_dir);
        summary.total += 1;
        match runner.run_plan_only(&config) {
            Ok(report) => write_json_line(out, &report)?,
            Err(err) => {
                summary.failed += 1;
                write_json_line(out, &json!({
                    "scenario": entry.name,
                    "error": err.to_string(),
                }))?;
            }
        }
    }
    Ok(summary)
}

/// Executes `validate`.
fn command_validate(command: &ValidateCommand, out: &mut impl Write) -> CliResult<ExitCode> {
    let suite = SuiteConfig::load(command.config.as_deref())?;
    writeln!(out, "suite valid: {} scenarios", suite.scenarios.len())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Selects scenarios, rejecting an empty selection.
fn selected<'a>(
    suite: &'a SuiteConfig,
    mode: ScenarioMode,
    names: &[String],
) -> CliResult<Vec<&'a ScenarioEntry>> {
    let entries = suite.select(mode, names)?;
    if entries.is_empty() {
        return Err(CliError::new(format!("suite has no {} scenarios", mode.as_str())));
    }
    Ok(entries)
}

/// Builds a terraform-backed runner with the requested lifecycle sink.
fn build_runner(
    suite: &SuiteConfig,
    command: &RunCommand,
) -> CliResult<ScenarioRunner<TerraformCli>> {
    let sink = lifecycle_sink(command.audit_log.as_deref(), command.quiet)?;
    Ok(ScenarioRunner::new(TerraformCli::new(suite.terraform.clone())).with_sink(sink))
}

/// Resolves the lifecycle sink for a command.
fn lifecycle_sink(audit_log: Option<&Path>, quiet: bool) -> CliResult<Arc<dyn LifecycleSink>> {
    if let Some(path) = audit_log {
        let sink = FileLifecycleSink::new(path).map_err(|err| {
            CliError::new(format!("failed to open audit log {}: {err}", path.display()))
        })?;
        return Ok(Arc::new(sink));
    }
    if quiet { Ok(Arc::new(NoopLifecycleSink)) } else { Ok(Arc::new(StderrLifecycleSink)) }
}

/// Writes one canonical JSON line to `out`.
fn write_json_line<T: Serialize>(out: &mut impl Write, value: &T) -> CliResult<()> {
    let mut bytes = serde_jcs::to_vec(value)
        .map_err(|err| CliError::new(format!("failed to serialize report: {err}")))?;
    bytes.push(b'\n');
    out.write_all(&bytes).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
