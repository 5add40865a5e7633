use std::path::PathBuf;

use clap::Parser;

use crate::config::{DEFAULT_INTERPRETER, RunOptions, ToolConfig};

#[derive(Parser)]
struct ToolArgs {
    /// Path to the SpiderFoot entry point (defaults to ~/spiderfoot/sf.py)
    #[arg(long, value_name = "PATH")]
    spiderfoot: Option<PathBuf>,

    /// Interpreter used to launch SpiderFoot
    #[arg(long, default_value = DEFAULT_INTERPRETER)]
    python: String,
}

#[derive(Parser)]
struct OutputArgs {
    /// Directory where scan reports are written
    #[arg(short = 'o', long, default_value = "reports")]
    output_dir: PathBuf,

    /// Emit a machine-readable run summary instead of status lines
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
#[command(name = "cti-scan")]
#[command(about = "Batch-run SpiderFoot OSINT scans against the CTI watchlist")]
pub struct Cli {
    /// Tool location options
    #[command(flatten)]
    tool: ToolArgs,

    /// Output options
    #[command(flatten)]
    output: OutputArgs,

    /// Print each SpiderFoot command line before it runs
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    pub fn tool_config(&self) -> ToolConfig {
        ToolConfig {
            script: self
                .tool
                .spiderfoot
                .clone()
                .unwrap_or_else(default_script_path),
            interpreter: self.tool.python.clone(),
            output_dir: self.output.output_dir.clone(),
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            json: self.output.json,
            verbose: self.verbose,
        }
    }
}

/// The compiled-in SpiderFoot location: `~/spiderfoot/sf.py`.
///
/// Falls back to a path relative to the current directory when no home
/// directory can be determined.
fn default_script_path() -> PathBuf {
    dirs::home_dir()
        .map_or_else(|| PathBuf::from("spiderfoot"), |home| home.join("spiderfoot"))
        .join("sf.py")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_yields_compiled_in_defaults() {
        let cli = Cli::parse_from(["cti-scan"]);
        let config = cli.tool_config();
        let options = cli.run_options();

        assert_eq!(config.script, default_script_path());
        assert_eq!(config.interpreter, DEFAULT_INTERPRETER);
        assert_eq!(config.output_dir, PathBuf::from("reports"));
        assert!(!options.json);
        assert!(!options.verbose);
    }

    #[test]
    fn test_overrides_are_honored() {
        let cli = Cli::parse_from([
            "cti-scan",
            "--spiderfoot",
            "/opt/spiderfoot/sf.py",
            "--python",
            "python3.12",
            "-o",
            "archive",
            "--json",
        ]);
        let config = cli.tool_config();

        assert_eq!(config.script, PathBuf::from("/opt/spiderfoot/sf.py"));
        assert_eq!(config.interpreter, "python3.12");
        assert_eq!(config.output_dir, PathBuf::from("archive"));
        assert!(cli.run_options().json);
    }

    #[test]
    fn test_default_script_path_ends_with_entry_point() {
        assert!(default_script_path().ends_with("sf.py"));
    }
}
