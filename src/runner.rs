//! Sequential scan batch driver.
//!
//! This module drives the one-shot scan workflow: for each target it spawns
//! SpiderFoot as a subprocess with a fixed module set, waits for completion,
//! and persists the captured output as a report file. Execution is strictly
//! sequential; one subprocess runs to completion before the next target is
//! considered, and a single target's failure never aborts the batch.

use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result};
use colored::Colorize;
use humansize::{DECIMAL, format_size};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{DATABASE_FILE, ToolConfig, module_csv};
use crate::report;

/// How one scan invocation ended.
#[derive(Debug)]
pub enum ScanStatus {
    /// The tool exited 0 and its output was archived
    ReportWritten {
        /// Where the report landed
        path: PathBuf,

        /// Report size in bytes
        bytes: u64,
    },

    /// The tool ran but exited non-zero; no report file was created
    ToolFailed {
        /// The tool's exit code, if one was available
        code: Option<i32>,

        /// Captured standard output (diagnostic text, not scan results)
        stdout: String,

        /// Captured standard error
        stderr: String,
    },

    /// The invocation itself failed (launch error, report write error)
    Failed {
        /// Human-readable description of what went wrong
        message: String,
    },
}

/// The result of one target's scan, kept for the end-of-run summary.
#[derive(Debug)]
pub struct ScanOutcome {
    /// The hostname that was scanned
    pub target: String,

    /// How the invocation ended
    pub status: ScanStatus,
}

impl ScanOutcome {
    /// Whether this scan produced a report file.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self.status, ScanStatus::ReportWritten { .. })
    }
}

/// Sequential batch driver for SpiderFoot scans.
///
/// The `ScanRunner` encapsulates the per-target workflow: timestamp, report
/// path, subprocess invocation with captured output, and persistence. It
/// holds a verified [`ToolConfig`] and never mutates it; each scan is fully
/// independent of the others.
pub struct ScanRunner {
    /// Location of the SpiderFoot installation and the report directory
    config: ToolConfig,

    /// Print each command line before it runs
    verbose: bool,

    /// When `true`, suppresses the progress bar and status lines (used by
    /// `--json` mode).
    quiet: bool,
}

impl ScanRunner {
    /// Create a new runner over a verified tool configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - The SpiderFoot installation to drive; callers should
    ///   have run [`ToolConfig::verify`] first
    /// * `verbose` - Print each command line before it runs
    #[must_use]
    pub const fn new(config: ToolConfig, verbose: bool) -> Self {
        Self {
            config,
            verbose,
            quiet: false,
        }
    }

    /// Enable or disable quiet mode (suppresses progress and status lines).
    ///
    /// Quiet mode is required for `--json` output so that only the final
    /// summary document reaches stdout.
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Scan every target in order, one subprocess at a time.
    ///
    /// Targets are processed in the order given, each to completion before
    /// the next starts. Failures are reported and recorded but never stop
    /// the batch: the returned vector always holds exactly one outcome per
    /// target.
    ///
    /// # Panics
    ///
    /// This method may panic if the progress bar template string is
    /// invalid, though this should not occur under normal circumstances as
    /// the template is hardcoded and valid.
    pub fn run_all(&self, targets: &[&str]) -> Vec<ScanOutcome> {
        let progress = if self.quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(targets.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("█▉▊▋▌▍▎▏  "),
            );
            pb
        };

        let mut outcomes = Vec::with_capacity(targets.len());

        for &target in targets {
            progress.set_message(format!("Scanning {target}"));

            if self.verbose && !self.quiet {
                progress.println(format!("🔍 {}", self.render_command(target)));
            }

            let outcome = match self.run_scan(target) {
                Ok(outcome) => outcome,
                Err(e) => ScanOutcome {
                    target: target.to_string(),
                    status: ScanStatus::Failed {
                        message: format!("{e:#}"),
                    },
                },
            };

            Self::report_outcome(&progress, &outcome);
            progress.inc(1);
            outcomes.push(outcome);
        }

        progress.finish_with_message("✅ Scan batch complete");

        outcomes
    }

    /// Run one scan against `target`.
    ///
    /// This performs the full per-target workflow:
    /// 1. Compute a one-second-resolution timestamp
    /// 2. Derive the report path `<output_dir>/<target>_<timestamp>.json`
    /// 3. Launch SpiderFoot with captured stdout/stderr, its working
    ///    directory set to the installation directory
    /// 4. On exit 0, write the captured stdout verbatim to the report path
    ///
    /// # Returns
    ///
    /// - `Ok(ScanOutcome)` describing either a written report or a tool
    ///   failure (non-zero exit, no file created)
    /// - `Err(anyhow::Error)` if the subprocess could not be launched or
    ///   the report could not be written; callers treat this as
    ///   recoverable and move on to the next target
    ///
    /// # Errors
    ///
    /// This function can return errors from:
    /// - Subprocess spawning (missing interpreter, permission problems)
    /// - Writing the report file
    pub fn run_scan(&self, target: &str) -> Result<ScanOutcome> {
        let stamp = report::timestamp();
        let path = report::report_path(&self.config.output_dir, target, &stamp);

        let output = self
            .command(target)
            .output()
            .with_context(|| format!("failed to launch {}", self.config.interpreter))?;

        let status = if output.status.success() {
            let bytes = report::write_report(&path, &output.stdout)?;
            ScanStatus::ReportWritten { path, bytes }
        } else {
            ScanStatus::ToolFailed {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
        };

        Ok(ScanOutcome {
            target: target.to_string(),
            status,
        })
    }

    /// Build the SpiderFoot command for one target.
    ///
    /// The command runs the configured interpreter against the entry point
    /// with the fixed module selector, JSON output format, and database
    /// filename, from the installation directory.
    fn command(&self, target: &str) -> Command {
        let mut command = Command::new(&self.config.interpreter);
        command
            .arg(self.config.script_path())
            .arg("-s")
            .arg(target)
            .arg("-m")
            .arg(module_csv())
            .arg("-o")
            .arg("json")
            .arg("-D")
            .arg(DATABASE_FILE)
            .current_dir(self.config.install_dir());

        command
    }

    /// The command line for one target, for `--verbose` display.
    fn render_command(&self, target: &str) -> String {
        format!(
            "{} {} -s {} -m {} -o json -D {}",
            self.config.interpreter,
            self.config.script_path().display(),
            target,
            module_csv(),
            DATABASE_FILE
        )
    }

    /// Print one scan's result through the progress bar.
    ///
    /// Lines printed this way persist above the bar instead of being
    /// overdrawn by it; a hidden bar (quiet mode) swallows them.
    fn report_outcome(progress: &ProgressBar, outcome: &ScanOutcome) {
        match &outcome.status {
            ScanStatus::ReportWritten { path, bytes } => {
                progress.println(format!(
                    "📝 Report generated for {}: {} ({})",
                    outcome.target,
                    path.display(),
                    format_size(*bytes, DECIMAL)
                ));
            }
            ScanStatus::ToolFailed { stdout, stderr, .. } => {
                progress.println(format!(
                    "{}",
                    format!("❌ Error scanning {}:", outcome.target).red()
                ));
                progress.println(format!("stderr: {stderr}"));
                progress.println(format!("stdout: {stdout}"));
            }
            ScanStatus::Failed { message } => {
                progress.println(format!(
                    "{}",
                    format!("❌ Error processing {}: {message}", outcome.target).red()
                ));
            }
        }
    }
}
