// crates/tf-acceptance-terraform/src/args.rs
// ============================================================================
// Module: Terraform Arguments
// Description: Argument vectors for each terraform subcommand.
// Purpose: Keep command-line construction pure and independently testable.
// Dependencies: tf-acceptance-core
// ============================================================================

//! ## Overview
//! Builders in this module return owned argument vectors and never touch the
//! filesystem or spawn processes. Flag order is fixed: subcommand, mode
//! flags, `-lock`, `-no-color`, variables, then positional arguments.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;

use tf_acceptance_core::VarValue;

// ============================================================================
// SECTION: Context
// ============================================================================

/// Per-invocation settings shared by every builder.
#[derive(Debug, Clone, Copy)]
pub struct ArgContext<'a> {
    /// Input variables, passed in name order.
    pub vars: &'a BTreeMap<String, VarValue>,
    /// Appends `-no-color` when set.
    pub no_color: bool,
    /// Value of the `-lock` flag for state-mutating commands.
    pub lock: bool,
}

impl ArgContext<'_> {
    /// Pushes `-no-color` when requested.
    fn push_no_color(&self, args: &mut Vec<String>) {
        if self.no_color {
            args.push("-no-color".to_string());
        }
    }

    /// Pushes the `-lock` flag.
    fn push_lock(&self, args: &mut Vec<String>) {
        args.push(format!("-lock={}", self.lock));
    }
}

// ============================================================================
// SECTION: Builders
// ============================================================================

/// `terraform init -upgrade=false -input=false [-no-color]`.
#[must_use]
pub fn init_args(ctx: &ArgContext<'_>) -> Vec<String> {
    let mut args = strings(&["init", "-upgrade=false", "-input=false"]);
    ctx.push_no_color(&mut args);
    args
}

/// `terraform apply -input=false -auto-approve -lock=<bool> [-no-color] -var...`.
#[must_use]
pub fn apply_args(ctx: &ArgContext<'_>) -> Vec<String> {
    let mut args = strings(&["apply", "-input=false", "-auto-approve"]);
    ctx.push_lock(&mut args);
    ctx.push_no_color(&mut args);
    args.extend(var_args(ctx.vars));
    args
}

/// `terraform plan -input=false -lock=<bool> [-no-color] -out=<file> -var...`.
#[must_use]
pub fn plan_args(ctx: &ArgContext<'_>, plan_file: &Path) -> Vec<String> {
    let mut args = strings(&["plan", "-input=false"]);
    ctx.push_lock(&mut args);
    ctx.push_no_color(&mut args);
    args.push(format!("-out={}", plan_file.display()));
    args.extend(var_args(ctx.vars));
    args
}

/// `terraform show -json [-no-color] <file>`.
#[must_use]
pub fn show_json_args(ctx: &ArgContext<'_>, plan_file: &Path) -> Vec<String> {
    let mut args = strings(&["show", "-json"]);
    ctx.push_no_color(&mut args);
    args.push(plan_file.display().to_string());
    args
}

/// `terraform destroy -input=false -auto-approve -lock=<bool> [-no-color] -var...`.
#[must_use]
pub fn destroy_args(ctx: &ArgContext<'_>) -> Vec<String> {
    let mut args = strings(&["destroy", "-input=false", "-auto-approve"]);
    ctx.push_lock(&mut args);
    ctx.push_no_color(&mut args);
    args.extend(var_args(ctx.vars));
    args
}

/// `terraform output -json [-no-color] <name>`.
#[must_use]
pub fn output_args(ctx: &ArgContext<'_>, name: &str) -> Vec<String> {
    let mut args = strings(&["output", "-json"]);
    ctx.push_no_color(&mut args);
    args.push(name.to_string());
    args
}

/// Formats input variables as `-var name=value` pairs.
///
/// Strings are passed raw, numbers in decimal form, and lists as a JSON array
/// literal, which terraform accepts as an HCL tuple.
#[must_use]
pub fn var_args(vars: &BTreeMap<String, VarValue>) -> Vec<String> {
    vars.iter()
        .flat_map(|(name, value)| ["-var".to_string(), format!("{name}={}", value.to_literal())])
        .collect()
}

/// Renders a command line for diagnostics.
#[must_use]
pub fn render_command(binary: &Path, args: &[String]) -> String {
    let program = binary.file_name().unwrap_or(binary.as_os_str()).to_string_lossy();
    if args.is_empty() { program.into_owned() } else { format!("{program} {}", args.join(" ")) }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}
