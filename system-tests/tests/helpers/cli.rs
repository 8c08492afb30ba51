// system-tests/tests/helpers/cli.rs
// ============================================================================
// Module: CLI Helpers
// Description: Locates, builds, and invokes the tf-acceptance binary.
// Purpose: Drive suite files through the same binary users run.
// Dependencies: serde_json
// ============================================================================

//! Helpers for invoking the tf-acceptance CLI in system-tests.

use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;
use std::process::Stdio;
use std::sync::OnceLock;

use serde_json::Value;

const BINARY_NAME: &str = "tf-acceptance";

/// Returns the tf-acceptance binary next to this test binary, building it once if absent.
pub fn cli_binary() -> Option<PathBuf> {
    static BINARY: OnceLock<Option<PathBuf>> = OnceLock::new();
    BINARY
        .get_or_init(|| {
            let profile_dir = profile_dir()?;
            let file_name = format!("{BINARY_NAME}{}", std::env::consts::EXE_SUFFIX);
            let candidate = profile_dir.join(file_name);
            if !candidate.is_file() {
                build_cli(&profile_dir).ok()?;
            }
            candidate.is_file().then_some(candidate)
        })
        .clone()
}

/// Runs the CLI with `args`, detached from stdin and from any ambient suite override.
pub fn run_cli(binary: &Path, args: &[&str]) -> io::Result<Output> {
    Command::new(binary)
        .args(args)
        .env_remove("TF_ACCEPTANCE_CONFIG")
        .stdin(Stdio::null())
        .output()
}

/// Parses each non-empty stdout line as JSON.
pub fn stdout_json_lines(output: &Output) -> Result<Vec<Value>, serde_json::Error> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(serde_json::from_str)
        .collect()
}

/// Returns the cargo profile directory holding this test binary.
fn profile_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent()?.parent().map(Path::to_path_buf)
}

/// Builds the CLI into the same target directory and profile.
fn build_cli(profile_dir: &Path) -> io::Result<()> {
    let target_dir = profile_dir.parent().ok_or_else(|| io::Error::other("no target dir"))?;
    let mut command = Command::new(option_env!("CARGO").unwrap_or("cargo"));
    command
        .args(["build", "-p", "tf-acceptance-cli", "--bin", BINARY_NAME, "--target-dir"])
        .arg(target_dir);
    if profile_dir.file_name().is_some_and(|name| name == "release") {
        command.arg("--release");
    }
    let status = command.status()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("cargo build for {BINARY_NAME} failed: {status}")))
    }
}
