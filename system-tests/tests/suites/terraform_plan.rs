// system-tests/tests/suites/terraform_plan.rs
// ============================================================================
// Module: Terraform Plan Scenario
// Description: Init and plan without applying.
// Purpose: Validate that plan-only runs produce a plan and create nothing.
// Dependencies: system-tests helpers, tf-acceptance-core, serial_test
// ============================================================================

//! Plan-only scenario against the basic fixture module.

use serial_test::parallel;
use tf_acceptance_core::ScenarioConfig;

use crate::helpers::artifacts::TestReporter;
use crate::helpers::artifacts::Verdict;
use crate::helpers::terraform::fixture_dir;
use crate::helpers::terraform::terraform_binary;
use crate::helpers::terraform::terraform_runner;

#[test]
#[parallel]
fn terraform_plan_only() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("terraform_plan_only")?;
    let Some(binary) = terraform_binary(reporter.config()) else {
        reporter.skip("terraform binary unavailable")?;
        return Ok(());
    };
    let runner = terraform_runner(&reporter, binary)?;
    let config = reporter.config();
    let scenario = ScenarioConfig::new("terraform_plan", fixture_dir(config))
        .with_var("example_text", "Plan Test")
        .with_no_color(config.no_color);

    let report = runner.run_plan_only(&scenario)?;
    reporter.artifacts().write_json("plan_report.json", &report)?;

    assert!(!report.plan.is_empty());
    assert_eq!(report.plan.count_action("create"), 1);
    assert!(report.plan.output_names.contains("example_text_output"));
    reporter.note(format!("plan format {}", report.plan.format_version));
    reporter.finish(Verdict::Pass)?;
    Ok(())
}
