// system-tests/tests/helpers/artifacts.rs
// ============================================================================
// Module: Test Artifacts
// Description: Per-test artifact directories and verdict summaries.
// Purpose: Leave a readable record of every scenario run, including panics.
// Dependencies: system-tests, tf-acceptance-core, serde, serde_jcs
// ============================================================================

//! ## Overview
//! Every test owns an [`ArtifactDir`] under one directory per test process.
//! A [`TestReporter`] always writes `summary.json` (canonical JSON) and
//! `summary.md` there, from `Drop` if the test never reached a verdict.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Instant;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;
use system_tests::config::SystemTestConfig;
use tf_acceptance_core::ScenarioReport;

const SUMMARY_JSON: &str = "summary.json";
const SUMMARY_MD: &str = "summary.md";
const LIFECYCLE_LOG: &str = "lifecycle.jsonl";
const SCENARIO_REPORT: &str = "scenario_report.json";

// ============================================================================
// SECTION: Artifact Directory
// ============================================================================

/// Directory that collects one test's artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactDir {
    root: PathBuf,
}

impl ArtifactDir {
    /// Creates the directory for `test` under the configured or default run root.
    pub fn create(test: &str, config: &SystemTestConfig) -> io::Result<Self> {
        let root = match &config.run_root {
            Some(run_root) => run_root.join(test),
            None => Path::new(env!("CARGO_TARGET_TMPDIR"))
                .join("system-tests")
                .join(process_run_dir())
                .join(test),
        };
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
        })
    }

    /// Returns the directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the lifecycle event log.
    pub fn lifecycle_log(&self) -> PathBuf {
        self.root.join(LIFECYCLE_LOG)
    }

    /// Writes `value` as canonical JSON.
    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> io::Result<PathBuf> {
        let bytes = serde_jcs::to_vec(value).map_err(io::Error::other)?;
        let path = self.root.join(name);
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Writes `text` verbatim.
    pub fn write_text(&self, name: &str, text: &str) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, text)?;
        Ok(path)
    }

    /// Lists artifact file names, sorted, excluding the summaries.
    fn files(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name != SUMMARY_JSON && name != SUMMARY_MD {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Returns the directory name shared by every test in this process.
fn process_run_dir() -> &'static str {
    static RUN_DIR: OnceLock<String> = OnceLock::new();
    RUN_DIR.get_or_init(|| {
        let millis = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        format!("run_{millis}_{}", std::process::id())
    })
}

// ============================================================================
// SECTION: Reporter
// ============================================================================

/// Final verdict of a system test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Every check held.
    Pass,
    /// A check failed.
    Fail,
    /// The test could not run in this environment.
    Skip,
    /// The test panicked before reaching a verdict.
    Panic,
    /// The test returned without reaching a verdict.
    Incomplete,
}

impl Verdict {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Skip => "skip",
            Self::Panic => "panic",
            Self::Incomplete => "incomplete",
        }
    }
}

#[derive(Debug, Serialize)]
struct TestSummary<'a> {
    test: &'a str,
    verdict: Verdict,
    elapsed_ms: u128,
    notes: &'a [String],
    files: Vec<String>,
}

/// Writes a verdict summary for one test, even when the test panics.
pub struct TestReporter {
    artifacts: ArtifactDir,
    config: SystemTestConfig,
    test: String,
    started: Instant,
    notes: Vec<String>,
    finished: bool,
}

impl TestReporter {
    /// Loads the system-test configuration and creates the test's artifact dir.
    pub fn new(test: &str) -> io::Result<Self> {
        let config = SystemTestConfig::load().map_err(io::Error::other)?;
        Ok(Self {
            artifacts: ArtifactDir::create(test, &config)?,
            config,
            test: test.to_string(),
            started: Instant::now(),
            notes: Vec::new(),
            finished: false,
        })
    }

    /// Returns the loaded system-test configuration.
    pub const fn config(&self) -> &SystemTestConfig {
        &self.config
    }

    /// Returns the artifact directory.
    pub const fn artifacts(&self) -> &ArtifactDir {
        &self.artifacts
    }

    /// Adds a note to the summary.
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Stores a scenario report and finishes with its verdict.
    pub fn record(&mut self, report: &ScenarioReport) -> io::Result<Verdict> {
        self.artifacts.write_json(SCENARIO_REPORT, report)?;
        if let Some(failure) = &report.failure {
            self.note(format!("fatal: {failure}"));
        }
        for mismatch in &report.mismatches {
            self.note(format!("mismatch: {mismatch}"));
        }
        if let Some(error) = report.teardown_error() {
            self.note(format!("teardown: {error}"));
        }
        let verdict = if report.passed() { Verdict::Pass } else { Verdict::Fail };
        self.finish(verdict)?;
        Ok(verdict)
    }

    /// Writes the summary with `verdict`.
    pub fn finish(&mut self, verdict: Verdict) -> io::Result<()> {
        self.finished = true;
        let summary = TestSummary {
            test: &self.test,
            verdict,
            elapsed_ms: self.started.elapsed().as_millis(),
            notes: &self.notes,
            files: self.artifacts.files()?,
        };
        self.artifacts.write_json(SUMMARY_JSON, &summary)?;
        self.artifacts.write_text(SUMMARY_MD, &render_markdown(&summary))?;
        Ok(())
    }

    /// Finishes as skipped with `reason`.
    pub fn skip(mut self, reason: &str) -> io::Result<()> {
        self.note(reason);
        self.finish(Verdict::Skip)
    }
}

impl Drop for TestReporter {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let verdict = if std::thread::panicking() { Verdict::Panic } else { Verdict::Incomplete };
        let _ = self.finish(verdict);
    }
}

fn render_markdown(summary: &TestSummary<'_>) -> String {
    let mut out = format!("# {}: {}\n\n", summary.test, summary.verdict.as_str());
    let _ = writeln!(out, "Elapsed: {} ms", summary.elapsed_ms);
    for (title, items) in [("Notes", summary.notes), ("Files", summary.files.as_slice())] {
        let _ = writeln!(out, "\n## {title}\n");
        if items.is_empty() {
            out.push_str("(none)\n");
        }
        for item in items {
            let _ = writeln!(out, "- {item}");
        }
    }
    out
}
