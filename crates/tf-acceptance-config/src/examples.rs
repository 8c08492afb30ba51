// crates/tf-acceptance-config/src/examples.rs
// ============================================================================
// Module: Suite Examples
// Description: Canonical example suite file.
// Purpose: Document the suite format with a file that is known to validate.
// Dependencies: none
// ============================================================================

//! ## Overview
//! The example mirrors the bundled basic fixture module: one fully asserted
//! scenario, one scenario relying on variable defaults, and one plan-only
//! scenario.

/// Returns the canonical example `tf-acceptance.toml`.
#[must_use]
pub const fn suite_toml_example() -> &'static str {
    r#"[terraform]
binary = "terraform"
lock = false
isolate = true

[[scenario]]
name = "terraform_basic"
working_dir = "fixtures/basic"
no_color = true
vars = { example_text = "Hello from Terratest!", example_number = 100, example_list = ["test1", "test2", "test3", "test4"] }

[[scenario.expect]]
output = "example_text_output"
expected = "Hello from Terratest!"

[[scenario.expect]]
output = "example_number_output"
expected = "100"

[[scenario.expect]]
output = "example_list_output"
expected = ["test1", "test2", "test3", "test4"]

[[scenario.expect]]
output = "example_map_output"
expected = { environment = "test", project = "terratest-example", created_by = "terraform" }

[[scenario.expect]]
output = "processed_outputs"
key = "upper_text"
expected = "HELLO FROM TERRATEST!"

[[scenario.expect]]
output = "processed_outputs"
key = "doubled_number"
expected = "200"

[[scenario.expect]]
output = "processed_outputs"
key = "list_length"
expected = "4"

[[scenario]]
name = "terraform_defaults"
working_dir = "fixtures/basic"
no_color = true

[[scenario.expect]]
output = "example_text_output"
expected = "Hello, World from Terratest!"

[[scenario.expect]]
output = "example_number_output"
expected = "42"

[[scenario.expect]]
output = "example_list_output"
expected = ["item1", "item2", "item3"]

[[scenario]]
name = "terraform_plan"
working_dir = "fixtures/basic"
mode = "plan"
vars = { example_text = "Plan Test" }
"#
}
