// crates/tf-acceptance-config/src/config.rs
// ============================================================================
// Module: Suite Configuration
// Description: Loading and validation for tf-acceptance suite files.
// Purpose: Provide strict, fail-closed suite parsing with hard limits.
// Dependencies: tf-acceptance-core, tf-acceptance-terraform, serde, toml
// ============================================================================

//! ## Overview
//! A suite file lists scenarios, each either applied and asserted or only
//! planned, plus shared settings for the terraform client. Relative working
//! directories resolve against the directory containing the suite file.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use tf_acceptance_core::Expectation;
use tf_acceptance_core::OutputValue;
use tf_acceptance_core::ScenarioConfig;
use tf_acceptance_core::VarValue;
use tf_acceptance_terraform::TerraformCliConfig;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default suite filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "tf-acceptance.toml";
/// Environment variable used to override the suite path.
pub(crate) const CONFIG_ENV_VAR: &str = "TF_ACCEPTANCE_CONFIG";
/// Maximum suite file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of scenarios in one suite.
pub(crate) const MAX_SCENARIOS: usize = 256;
/// Maximum length of a scenario name.
pub(crate) const MAX_SCENARIO_NAME_LENGTH: usize = 128;

// ============================================================================
// SECTION: Suite
// ============================================================================

/// Parsed and validated suite file.
///
/// # Invariants
/// - At least one scenario; scenario names are unique and non-empty.
/// - Plan scenarios carry no expectations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfig {
    /// Terraform client settings shared by every scenario.
    #[serde(default)]
    pub terraform: TerraformCliConfig,
    /// Scenarios in declaration order.
    #[serde(default, rename = "scenario")]
    pub scenarios: Vec<ScenarioEntry>,
    /// Directory relative working directories resolve against (not serialized).
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl SuiteConfig {
    /// Loads a suite from disk.
    ///
    /// The path is `path` when given, else `TF_ACCEPTANCE_CONFIG` when set and
    /// non-empty, else `tf-acceptance.toml` in the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, is too large, is
    /// not UTF-8, or fails parsing or validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = suite_path(path);
        check_path_limits(&path)?;
        let content = read_suite_file(&path)?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self::parse(&content, &base_dir)
    }

    /// Parses and validates suite TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn parse(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut suite: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        suite.base_dir = base_dir.to_path_buf();
        suite.validate()?;
        Ok(suite)
    }

    /// Validates the suite for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the suite is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scenarios.is_empty() {
            return Err(ConfigError::Invalid("suite must define at least one scenario".to_string()));
        }
        if self.scenarios.len() > MAX_SCENARIOS {
            return Err(ConfigError::Invalid("suite exceeds max scenarios".to_string()));
        }
        if self.terraform.binary.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("terraform.binary must be non-empty".to_string()));
        }
        let mut names = BTreeSet::new();
        for scenario in &self.scenarios {
            scenario.validate()?;
            if !names.insert(scenario.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate scenario name: {}",
                    scenario.name
                )));
            }
        }
        Ok(())
    }

    /// Selects scenarios in `mode`, restricted to `names` when non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a requested name is unknown or
    /// names a scenario in a different mode.
    pub fn select(
        &self,
        mode: ScenarioMode,
        names: &[String],
    ) -> Result<Vec<&ScenarioEntry>, ConfigError> {
        if names.is_empty() {
            return Ok(self.scenarios.iter().filter(|scenario| scenario.mode == mode).collect());
        }
        names
            .iter()
            .map(|name| {
                let scenario = self
                    .scenarios
                    .iter()
                    .find(|scenario| &scenario.name == name)
                    .ok_or_else(|| ConfigError::Invalid(format!("unknown scenario: {name}")))?;
                if scenario.mode == mode {
                    Ok(scenario)
                } else {
                    Err(ConfigError::Invalid(format!(
                        "scenario {name} runs in {} mode",
                        scenario.mode.as_str()
                    )))
                }
            })
            .collect()
    }
}

// ============================================================================
// SECTION: Scenarios
// ============================================================================

/// How a scenario exercises its module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioMode {
    /// Init, apply, assert outputs, destroy.
    #[default]
    Apply,
    /// Init and plan only.
    Plan,
}

impl ScenarioMode {
    /// Returns the mode label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apply => "apply",
            Self::Plan => "plan",
        }
    }
}

/// One scenario in a suite file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioEntry {
    /// Scenario name.
    pub name: String,
    /// Module directory.
    pub working_dir: PathBuf,
    /// Scenario mode.
    #[serde(default)]
    pub mode: ScenarioMode,
    /// Suppresses colored terraform output.
    #[serde(default)]
    pub no_color: bool,
    /// Input variables.
    #[serde(default)]
    pub vars: BTreeMap<String, VarValue>,
    /// Output expectations, checked in order.
    #[serde(default, rename = "expect")]
    pub expectations: Vec<Expectation>,
}

impl ScenarioEntry {
    /// Builds the core scenario configuration, resolving `working_dir`
    /// against `base_dir` when relative.
    #[must_use]
    pub fn to_scenario_config(&self, base_dir: &Path) -> ScenarioConfig {
        let working_dir = if self.working_dir.is_absolute() {
            self.working_dir.clone()
        } else {
            base_dir.join(&self.working_dir)
        };
        let config =
            ScenarioConfig::new(self.name.clone(), working_dir).with_no_color(self.no_color);
        self.vars
            .iter()
            .fold(config, |config, (name, value)| config.with_var(name.clone(), value.clone()))
    }

    /// Validates one scenario entry.
    fn validate(&self) -> Result<(), ConfigError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ConfigError::Invalid("scenario name must be non-empty".to_string()));
        }
        if name.len() > MAX_SCENARIO_NAME_LENGTH {
            return Err(ConfigError::Invalid(format!("scenario {name} name exceeds max length")));
        }
        check_path_field(&format!("scenario {name} working_dir"), &self.working_dir)?;
        if self.vars.keys().any(|key| key.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "scenario {name} has an empty variable name"
            )));
        }
        if self.mode == ScenarioMode::Plan && !self.expectations.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "scenario {name} is a plan scenario and cannot declare expectations"
            )));
        }
        for expectation in &self.expectations {
            if expectation.output.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "scenario {name} has an expectation with an empty output name"
                )));
            }
            if expectation.key.is_some() && !matches!(expectation.expected, OutputValue::Text(_)) {
                return Err(ConfigError::Invalid(format!(
                    "scenario {name} expectation {} must expect text",
                    expectation.label()
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Suite loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading the suite.
    #[error("suite io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("suite parse error: {0}")]
    Parse(String),
    /// Invalid suite data.
    #[error("invalid suite: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Picks the suite path from the argument, the environment, or the default name.
fn suite_path(path: Option<&Path>) -> PathBuf {
    match (path, env::var_os(CONFIG_ENV_VAR)) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(raw)) if !raw.is_empty() => PathBuf::from(raw),
        _ => PathBuf::from(DEFAULT_CONFIG_NAME),
    }
}

/// Rejects suite paths that exceed the length limits.
fn check_path_limits(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!(
            "suite path is longer than {MAX_TOTAL_PATH_LENGTH} bytes"
        )));
    }
    let oversized = path
        .components()
        .any(|component| component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH);
    if oversized {
        return Err(ConfigError::Invalid(format!(
            "suite path has a component longer than {MAX_PATH_COMPONENT_LENGTH} bytes"
        )));
    }
    Ok(())
}

/// Reads at most [`MAX_CONFIG_FILE_SIZE`] bytes of UTF-8 suite text.
fn read_suite_file(path: &Path) -> Result<String, ConfigError> {
    let io_error = |err: std::io::Error| ConfigError::Io(format!("{}: {err}", path.display()));
    let file = File::open(path).map_err(io_error)?;
    let mut bytes = Vec::new();
    file.take(MAX_CONFIG_FILE_SIZE as u64 + 1).read_to_end(&mut bytes).map_err(io_error)?;
    if bytes.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::Invalid(format!(
            "suite file {} is larger than {MAX_CONFIG_FILE_SIZE} bytes",
            path.display()
        )));
    }
    String::from_utf8(bytes).map_err(|_| {
        ConfigError::Invalid(format!("suite file {} is not valid UTF-8", path.display()))
    })
}

/// Rejects blank or overlong path fields.
fn check_path_field(field: &str, value: &Path) -> Result<(), ConfigError> {
    let text = value.to_string_lossy();
    if text.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    Ok(())
}
