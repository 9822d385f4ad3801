// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Run summary
//!
//! What happened to every expected file, for `--format json` and for the
//! completion banner counts.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of one upload run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub kernel_version: String,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub drivers: Vec<DriverReport>,
}

/// Outcomes for one driver
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverReport {
    pub name: String,
    pub remote_dir: String,
    pub files: Vec<FileReport>,
}

/// Outcome for one expected file
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub file_name: String,
    pub outcome: FileOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspection: Option<InspectionStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOutcome {
    Uploaded,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum InspectionStatus {
    /// Temporary copy made and removed; inspector disabled
    Disabled,
    Passed,
    Failed(String),
    Skipped(String),
}

impl RunSummary {
    pub fn new(kernel_version: impl Into<String>, dry_run: bool) -> Self {
        Self {
            kernel_version: kernel_version.into(),
            dry_run,
            started_at: Utc::now(),
            finished_at: None,
            drivers: Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    fn count(&self, outcome: FileOutcome) -> usize {
        self.drivers
            .iter()
            .flat_map(|d| d.files.iter())
            .filter(|f| f.outcome == outcome)
            .count()
    }

    pub fn uploaded_count(&self) -> usize {
        self.count(FileOutcome::Uploaded)
    }

    pub fn missing_count(&self) -> usize {
        self.count(FileOutcome::Missing)
    }

    /// Uploaded file names, in upload order.
    pub fn uploaded_files(&self) -> Vec<&str> {
        self.drivers
            .iter()
            .flat_map(|d| d.files.iter())
            .filter(|f| f.outcome == FileOutcome::Uploaded)
            .map(|f| f.file_name.as_str())
            .collect()
    }
}

impl DriverReport {
    pub fn new(name: impl Into<String>, remote_dir: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            remote_dir: remote_dir.into(),
            files: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunSummary {
        let mut summary = RunSummary::new("5.15.0", false);
        let mut igb = DriverReport::new("igb", "base/igb-5.17.4");
        igb.files.push(FileReport {
            file_name: "igb.ko.5.15.0".to_string(),
            outcome: FileOutcome::Uploaded,
            inspection: Some(InspectionStatus::Disabled),
        });
        let mut ice = DriverReport::new("ice", "base/ice-1.14.13");
        ice.files.push(FileReport {
            file_name: "README.5.15.0".to_string(),
            outcome: FileOutcome::Missing,
            inspection: None,
        });
        summary.drivers = vec![igb, ice];
        summary
    }

    #[test]
    fn test_counts() {
        let summary = sample();
        assert_eq!(summary.uploaded_count(), 1);
        assert_eq!(summary.missing_count(), 1);
        assert_eq!(summary.uploaded_files(), vec!["igb.ko.5.15.0"]);
    }

    #[test]
    fn test_finish_sets_timestamp() {
        let mut summary = sample();
        assert!(summary.finished_at.is_none());
        summary.finish();
        assert!(summary.finished_at.unwrap() >= summary.started_at);
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["kernelVersion"], "5.15.0");
        assert_eq!(value["dryRun"], false);
        assert_eq!(value["drivers"][0]["remoteDir"], "base/igb-5.17.4");
        assert_eq!(value["drivers"][0]["files"][0]["outcome"], "uploaded");
        assert_eq!(
            value["drivers"][0]["files"][0]["inspection"]["status"],
            "disabled"
        );
        assert_eq!(value["drivers"][1]["files"][0]["outcome"], "missing");
        assert!(value["drivers"][1]["files"][0].get("inspection").is_none());
    }

    #[test]
    fn test_inspection_failure_detail() {
        let status = InspectionStatus::Failed("exit status: 1".to_string());
        let value = serde_json::to_value(status).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["detail"], "exit status: 1");
    }
}
