//! Tool configuration and pre-flight verification.
//!
//! This module contains the configuration structures used throughout the
//! application, the hard-coded scan inputs (target watchlist, module
//! selector, database filename), and the pre-flight checks that must pass
//! before any scan is attempted.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Hostnames scanned on every run, in batch order.
///
/// The watchlist is compiled into the program; there is no runtime surface
/// for adding or removing entries.
pub const WATCHLIST: &[&str] = &[
    "contagiodump.blogspot.com",
    "sellstuff.su",
    "darkjob.org",
    "mozi.malware.org.cn",
    "ayylmao.ninja",
    "btc-address.org",
    "ns1.nasa-gov.org",
    "apt28updates.com",
    "attackerserver.dynalias.com",
];

/// SpiderFoot modules activated for every scan.
///
/// The two storage modules are required for SpiderFoot to emit results at
/// all; `sfp_dns` performs the actual DNS resolution.
pub const SCAN_MODULES: &[&str] = &["sfp__stor_db", "sfp__stor_stdout", "sfp_dns"];

/// Database filename passed to SpiderFoot via `-D`, resolved by the tool
/// relative to its own installation directory.
pub const DATABASE_FILE: &str = "spiderfoot.db";

/// Interpreter used to launch the SpiderFoot entry point.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// The module selector in the comma-separated form SpiderFoot expects.
#[must_use]
pub fn module_csv() -> String {
    SCAN_MODULES.join(",")
}

/// Location of the external SpiderFoot installation and where reports go.
///
/// A `ToolConfig` is built once at startup from the CLI defaults (or their
/// overrides) and is immutable for the rest of the run.
#[derive(Clone, Debug)]
pub struct ToolConfig {
    /// Path to the SpiderFoot entry point (`sf.py`)
    pub script: PathBuf,

    /// Interpreter used to run the entry point
    pub interpreter: String,

    /// Directory where report files are written
    pub output_dir: PathBuf,
}

impl ToolConfig {
    /// Run the pre-flight checks for the SpiderFoot installation.
    ///
    /// Both checks must pass before any scan is attempted:
    /// 1. The entry point itself exists on disk
    /// 2. Its sibling `modules/` directory exists
    ///
    /// # Errors
    ///
    /// Returns an error naming the expected path if either check fails.
    /// Callers are expected to treat this as fatal and exit without
    /// launching any subprocess.
    pub fn verify(&self) -> Result<()> {
        if !self.script.exists() {
            bail!(
                "SpiderFoot not found at {}\nPlease install SpiderFoot: \
                 git clone https://github.com/smicallef/spiderfoot.git",
                self.script.display()
            );
        }

        let modules_dir = self.modules_dir();
        if !modules_dir.exists() {
            bail!(
                "SpiderFoot modules directory not found at {}",
                modules_dir.display()
            );
        }

        Ok(())
    }

    /// The entry-point path in absolute form.
    ///
    /// The subprocess runs with its working directory set to the
    /// installation directory, so a relative entry-point path would no
    /// longer resolve from inside the child. Falls back to the configured
    /// path if the current directory cannot be determined.
    #[must_use]
    pub fn script_path(&self) -> PathBuf {
        std::path::absolute(&self.script).unwrap_or_else(|_| self.script.clone())
    }

    /// The SpiderFoot installation directory (the entry point's parent).
    ///
    /// SpiderFoot resolves some of its own resources relative to its
    /// installation directory, so every scan runs from here.
    #[must_use]
    pub fn install_dir(&self) -> PathBuf {
        self.script_path()
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }

    /// The `modules/` directory sitting next to the entry point.
    #[must_use]
    pub fn modules_dir(&self) -> PathBuf {
        self.install_dir().join("modules")
    }
}

/// Options controlling the run's output behavior.
#[derive(Clone, Copy, Debug)]
pub struct RunOptions {
    /// Emit a machine-readable run summary instead of status lines
    pub json: bool,

    /// Print each SpiderFoot command line before it runs
    pub verbose: bool,
}
