// system-tests/tests/suites/terraform_defaults.rs
// ============================================================================
// Module: Terraform Defaults Scenario
// Description: Full cycle with no input variables.
// Purpose: Validate that module defaults flow through to outputs.
// Dependencies: system-tests helpers, tf-acceptance-core, serial_test
// ============================================================================

//! Default-variable scenario against the basic fixture module.

use serial_test::parallel;
use tf_acceptance_core::Expectation;
use tf_acceptance_core::ScenarioConfig;

use crate::helpers::artifacts::TestReporter;
use crate::helpers::terraform::fixture_dir;
use crate::helpers::terraform::terraform_binary;
use crate::helpers::terraform::terraform_runner;

#[test]
#[parallel]
fn terraform_with_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("terraform_with_defaults")?;
    let Some(binary) = terraform_binary(reporter.config()) else {
        reporter.skip("terraform binary unavailable")?;
        return Ok(());
    };
    let runner = terraform_runner(&reporter, binary)?;
    let config = reporter.config();
    let scenario = ScenarioConfig::new("terraform_defaults", fixture_dir(config))
        .with_no_color(config.no_color);
    let expectations = vec![
        Expectation::text("example_text_output", "Hello, World from Terratest!"),
        Expectation::text("example_number_output", "42"),
        Expectation::list("example_list_output", ["item1", "item2", "item3"]),
    ];

    let report = runner.run_full_scenario(&scenario, &expectations);
    reporter.record(&report)?;

    report.into_result()?;
    Ok(())
}
