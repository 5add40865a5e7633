//! # cti-scan
//!
//! A CLI tool for batch-running SpiderFoot OSINT scans against a fixed
//! watchlist of CTI-relevant hostnames and archiving the JSON reports.
//!
//! The tool verifies the local SpiderFoot installation, then scans each
//! watchlist entry sequentially with a fixed module set, writing one
//! timestamped report file per successful scan into the report directory.
//! A failed scan is reported and skipped; it never aborts the batch.
//!
//! ## Usage
//!
//! ```bash
//! # Basic usage - scan the whole watchlist
//! cti-scan
//!
//! # Point at a non-default SpiderFoot checkout
//! cti-scan --spiderfoot /opt/spiderfoot/sf.py
//!
//! # Machine-readable run summary
//! cti-scan --json
//! ```

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use cti_scan::{cli::Cli, config, output::RunSummary, report, runner::ScanRunner};
use std::process::exit;

/// Entry point for the cti-scan application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and
/// printing any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// This function:
/// 1. Parses command-line arguments
/// 2. Verifies the SpiderFoot installation (entry point and modules
///    directory) before anything else runs
/// 3. Creates the report directory if it does not exist
/// 4. Scans every watchlist target sequentially
/// 5. Prints a human summary, or a single JSON document if `--json` is
///    active
///
/// Individual scan failures are handled inside the batch loop and do not
/// surface here; once the batch has begun, the process exits 0 regardless
/// of how many scans failed.
///
/// # Returns
///
/// - `Ok(())` if the batch was attempted (even with per-target failures)
/// - `Err(anyhow::Error)` if a pre-flight check or setup step failed
///
/// # Errors
///
/// This function can return errors from:
/// - Pre-flight verification of the SpiderFoot installation
/// - Report directory creation
/// - JSON serialization of the run summary
fn inner_main() -> Result<()> {
    let args = Cli::parse();
    let options = args.run_options();

    let mut tool_config = args.tool_config();
    tool_config.verify()?;
    tool_config.output_dir = report::ensure_output_dir(&tool_config.output_dir)?;

    let output_dir = tool_config.output_dir.clone();

    if !options.json {
        println!("\n{}\n", "🚀 Starting CTI scans...".bold());
    }

    let runner = ScanRunner::new(tool_config, options.verbose).with_quiet(options.json);
    let outcomes = runner.run_all(config::WATCHLIST);

    if options.json {
        let summary = RunSummary::from_outcomes(&outcomes);
        println!("{}", serde_json::to_string_pretty(&summary)?);

        return Ok(());
    }

    let succeeded = outcomes.iter().filter(|o| o.succeeded()).count();
    let failed = outcomes.len() - succeeded;

    println!("\n{}", "📊 Scan Summary:".bold());
    println!(
        "  ✅ Successful scans: {}",
        succeeded.to_string().green()
    );

    if failed > 0 {
        println!("  ❌ Failed scans: {}", failed.to_string().red());
    }

    println!(
        "\n{} Check your '{}' directory for the results.",
        "✅ All scans completed!".green(),
        output_dir.display()
    );

    Ok(())
}
