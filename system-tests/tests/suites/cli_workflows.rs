// system-tests/tests/suites/cli_workflows.rs
// ============================================================================
// Module: CLI Workflow Tests
// Description: End-to-end tf-acceptance CLI command coverage.
// Purpose: Validate run, plan, and validate against a generated suite file.
// Dependencies: system-tests helpers, serial_test, tempfile
// ============================================================================

//! CLI workflow coverage for tf-acceptance system-tests.

use std::fs;
use std::path::Path;

use serial_test::serial;
use tempfile::TempDir;

use crate::helpers::artifacts::TestReporter;
use crate::helpers::artifacts::Verdict;
use crate::helpers::cli::cli_binary;
use crate::helpers::cli::run_cli;
use crate::helpers::cli::stdout_json_lines;
use crate::helpers::terraform::fixture_dir;
use crate::helpers::terraform::terraform_binary;

fn write_suite(path: &Path, terraform: &Path, module: &Path) -> Result<(), String> {
    let contents = format!(
        r#"[terraform]
binary = "{terraform}"
isolate = true

[[scenario]]
name = "cli_basic"
working_dir = "{module}"
no_color = true
vars = {{ example_text = "Hello from Terratest!", example_number = 100 }}

[[scenario.expect]]
output = "example_text_output"
expected = "Hello from Terratest!"

[[scenario.expect]]
output = "processed_outputs"
key = "doubled_number"
expected = "200"

[[scenario]]
name = "cli_plan"
working_dir = "{module}"
mode = "plan"
"#,
        terraform = terraform.display(),
        module = module.display(),
    );
    fs::write(path, contents).map_err(|err| format!("write suite: {err}"))
}

#[test]
#[serial]
fn cli_workflows_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("cli_workflows_end_to_end")?;
    let Some(terraform) = terraform_binary(reporter.config()) else {
        reporter.skip("terraform binary unavailable")?;
        return Ok(());
    };
    let Some(cli) = cli_binary() else {
        reporter.skip("tf-acceptance CLI binary unavailable")?;
        return Ok(());
    };
    let temp_dir = TempDir::new()?;
    let suite_path = temp_dir.path().join("tf-acceptance.toml");
    write_suite(&suite_path, &terraform, &fixture_dir(reporter.config()))?;
    let suite_arg = suite_path.display().to_string();
    let audit_log = reporter.artifacts().lifecycle_log().display().to_string();

    let validate = run_cli(&cli, &["validate", "--config", &suite_arg])?;
    let validate_stdout = String::from_utf8_lossy(&validate.stdout);
    assert!(validate.status.success(), "validate failed: {validate_stdout}");
    assert!(validate_stdout.contains("suite valid: 2 scenarios"));

    let run = run_cli(&cli, &["run", "--config", &suite_arg, "--audit-log", &audit_log])?;
    reporter.artifacts().write_text("run_stdout.jsonl", &String::from_utf8_lossy(&run.stdout))?;
    assert!(run.status.success(), "run exited with {}", run.status);
    let reports = stdout_json_lines(&run)?;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["scenario"], "cli_basic");
    assert_eq!(reports[0]["state"], "destroyed");
    assert!(reports[0]["failure"].is_null());

    let plan = run_cli(&cli, &["plan", "--config", &suite_arg, "--quiet"])?;
    reporter.artifacts().write_text("plan_stdout.jsonl", &String::from_utf8_lossy(&plan.stdout))?;
    assert!(plan.status.success(), "plan exited with {}", plan.status);
    let plans = stdout_json_lines(&plan)?;
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0]["scenario"], "cli_plan");

    reporter.note("validate, run, and plan succeeded");
    reporter.finish(Verdict::Pass)?;
    Ok(())
}
