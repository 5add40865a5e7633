//! Machine-readable run summary for `--json` mode.
//!
//! These types describe the batch driver's own outcomes (which targets were
//! scanned, where reports landed, how failures ended). The scan results
//! inside each report remain opaque bytes; nothing here parses them.

use std::path::PathBuf;

use serde::Serialize;

use crate::runner::{ScanOutcome, ScanStatus};

/// Top-level JSON document emitted once at the end of a `--json` run.
#[derive(Serialize)]
pub struct RunSummary {
    /// Number of targets attempted
    pub targets: usize,

    /// Number of scans that produced a report file
    pub succeeded: usize,

    /// Number of scans that failed for any reason
    pub failed: usize,

    /// One entry per target, in batch order
    pub scans: Vec<TargetReport>,
}

/// One target's outcome in the JSON summary.
#[derive(Serialize)]
pub struct TargetReport {
    /// The hostname that was scanned
    pub target: String,

    /// `"report_written"`, `"tool_failed"`, or `"error"`
    pub status: &'static str,

    /// Report path, present only when a report was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,

    /// Report size in bytes, present only when a report was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,

    /// The tool's exit code, present only for tool failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,

    /// Captured standard error, present only for tool failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,

    /// Launch/IO error text, present only for invocation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RunSummary {
    /// Build the summary document from a finished batch.
    #[must_use]
    pub fn from_outcomes(outcomes: &[ScanOutcome]) -> Self {
        let scans: Vec<TargetReport> = outcomes.iter().map(TargetReport::from_outcome).collect();
        let succeeded = outcomes.iter().filter(|o| o.succeeded()).count();

        Self {
            targets: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
            scans,
        }
    }
}

impl TargetReport {
    fn from_outcome(outcome: &ScanOutcome) -> Self {
        let mut entry = Self {
            target: outcome.target.clone(),
            status: "error",
            report: None,
            bytes: None,
            exit_code: None,
            stderr: None,
            error: None,
        };

        match &outcome.status {
            ScanStatus::ReportWritten { path, bytes } => {
                entry.status = "report_written";
                entry.report = Some(path.clone());
                entry.bytes = Some(*bytes);
            }
            ScanStatus::ToolFailed { code, stderr, .. } => {
                entry.status = "tool_failed";
                entry.exit_code = *code;
                entry.stderr = Some(stderr.clone());
            }
            ScanStatus::Failed { message } => {
                entry.error = Some(message.clone());
            }
        }

        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(target: &str, status: ScanStatus) -> ScanOutcome {
        ScanOutcome {
            target: target.to_string(),
            status,
        }
    }

    #[test]
    fn test_summary_counts() {
        let outcomes = vec![
            outcome(
                "a.example",
                ScanStatus::ReportWritten {
                    path: PathBuf::from("reports/a.example_20260808_120000.json"),
                    bytes: 11,
                },
            ),
            outcome(
                "b.example",
                ScanStatus::ToolFailed {
                    code: Some(1),
                    stdout: String::new(),
                    stderr: "boom".to_string(),
                },
            ),
            outcome(
                "c.example",
                ScanStatus::Failed {
                    message: "failed to launch python3".to_string(),
                },
            ),
        ];

        let summary = RunSummary::from_outcomes(&outcomes);

        assert_eq!(summary.targets, 3);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.scans[0].status, "report_written");
        assert_eq!(summary.scans[1].status, "tool_failed");
        assert_eq!(summary.scans[2].status, "error");
    }

    #[test]
    fn test_summary_serializes_without_absent_fields() {
        let outcomes = vec![outcome(
            "a.example",
            ScanStatus::ReportWritten {
                path: PathBuf::from("reports/a.example_20260808_120000.json"),
                bytes: 11,
            },
        )];

        let json = serde_json::to_string(&RunSummary::from_outcomes(&outcomes)).unwrap();

        assert!(json.contains("\"report_written\""));
        assert!(!json.contains("exit_code"));
        assert!(!json.contains("stderr"));
        assert!(!json.contains("\"error\""));
    }
}
