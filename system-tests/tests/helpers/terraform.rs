// system-tests/tests/helpers/terraform.rs
// ============================================================================
// Module: Terraform Helpers
// Description: Terraform discovery, fixture paths, and runner construction.
// Purpose: Give every suite the same client settings and lifecycle log.
// Dependencies: system-tests, tf-acceptance-core, tf-acceptance-terraform
// ============================================================================

//! Helpers for running scenarios against a real terraform binary.

use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use system_tests::config::SystemTestConfig;
use tf_acceptance_core::FileLifecycleSink;
use tf_acceptance_core::ScenarioRunner;
use tf_acceptance_terraform::TerraformCli;
use tf_acceptance_terraform::TerraformCliConfig;

use super::artifacts::TestReporter;

/// Locates terraform: the configured override, else the first `terraform` on `PATH`.
pub fn terraform_binary(config: &SystemTestConfig) -> Option<PathBuf> {
    if let Some(binary) = &config.terraform_bin {
        return binary.is_file().then(|| binary.clone());
    }
    let file_name = format!("terraform{}", std::env::consts::EXE_SUFFIX);
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(&file_name))
        .find(|candidate| candidate.is_file())
}

/// Returns the fixture module directory.
pub fn fixture_dir(config: &SystemTestConfig) -> PathBuf {
    config
        .fixture_dir
        .clone()
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join("basic"))
}

/// Builds a client that runs each scenario in a private module copy.
pub fn terraform_client(binary: PathBuf) -> TerraformCli {
    TerraformCli::new(TerraformCliConfig {
        binary,
        isolate: true,
        ..TerraformCliConfig::default()
    })
}

/// Builds a runner that logs lifecycle events into the test's artifacts.
pub fn terraform_runner(
    reporter: &TestReporter,
    binary: PathBuf,
) -> io::Result<ScenarioRunner<TerraformCli>> {
    let sink = FileLifecycleSink::new(&reporter.artifacts().lifecycle_log())?;
    Ok(ScenarioRunner::new(terraform_client(binary)).with_sink(Arc::new(sink)))
}
