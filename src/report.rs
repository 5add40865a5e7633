//! Report file naming and persistence.
//!
//! This module owns the on-disk shape of the report archive: one
//! `<target>_<YYYYMMDD_HHMMSS>.json` file per successful scan, written
//! verbatim from the tool's captured standard output.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

/// Timestamp format used in report filenames, at one-second resolution.
///
/// Two scans of the same target within the same second produce the same
/// filename and the later write wins; this is an accepted limitation.
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A filename-safe timestamp for the current local time.
#[must_use]
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// The report path for one scan of `target` taken at `stamp`.
#[must_use]
pub fn report_path(output_dir: &Path, target: &str, stamp: &str) -> PathBuf {
    output_dir.join(format!("{target}_{stamp}.json"))
}

/// Create the report directory if it does not exist and return it in
/// absolute form.
///
/// Safe to call on every startup; an existing directory is left untouched.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the process's
/// current directory cannot be determined.
pub fn ensure_output_dir(output_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "failed to create report directory {}",
            output_dir.display()
        )
    })?;

    std::path::absolute(output_dir).with_context(|| {
        format!(
            "failed to resolve report directory {}",
            output_dir.display()
        )
    })
}

/// Write captured scan output verbatim to `path`.
///
/// The bytes are persisted exactly as the tool produced them; no parsing,
/// validation, or re-encoding happens on the way to disk.
///
/// # Arguments
///
/// * `path` - Destination report path
/// * `bytes` - The subprocess's captured standard output
///
/// # Returns
///
/// The number of bytes written.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_report(path: &Path, bytes: &[u8]) -> Result<u64> {
    fs::write(path, bytes)
        .with_context(|| format!("failed to write report {}", path.display()))?;

    Ok(bytes.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_report_path_format() {
        let path = report_path(Path::new("reports"), "darkjob.org", "20260808_120000");
        assert_eq!(
            path,
            PathBuf::from("reports/darkjob.org_20260808_120000.json")
        );
    }

    #[test]
    fn test_report_paths_differ_across_seconds() {
        let dir = Path::new("reports");
        let first = report_path(dir, "darkjob.org", "20260808_120000");
        let second = report_path(dir, "darkjob.org", "20260808_120001");
        assert_ne!(first, second);
    }

    #[test]
    fn test_timestamp_shape() {
        let stamp = timestamp();
        // YYYYMMDD_HHMMSS
        assert_eq!(stamp.len(), 15);
        assert_eq!(stamp.as_bytes()[8], b'_');
        assert!(
            stamp
                .chars()
                .all(|c| c.is_ascii_digit() || c == '_')
        );
    }

    #[test]
    fn test_ensure_output_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("reports");

        let first = ensure_output_dir(&dir).unwrap();
        let second = ensure_output_dir(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(first, second);
        assert!(first.is_absolute());
    }

    #[test]
    fn test_write_report_is_verbatim() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("target_20260808_120000.json");
        let bytes = b"{\"ok\":true}\nnot even valid json on this line";

        let written = write_report(&path, bytes).unwrap();

        assert_eq!(written, bytes.len() as u64);
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }
}
