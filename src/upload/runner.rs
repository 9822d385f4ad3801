// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Driver upload runner
//!
//! Walks the plan driver by driver and file by file: check the file exists,
//! inspect kernel modules through a temporary copy, publish. Missing files
//! and inspection problems are warnings; a publish failure ends the run.

use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::upload::inspect::Inspector;
use crate::upload::plan::{DriverPlan, ExpectedFile, UploadPlan};
use crate::upload::publisher::{Publisher, UploadRequest};
use crate::upload::summary::{DriverReport, FileOutcome, FileReport, InspectionStatus, RunSummary};
use crate::upload::temp::TempCopy;

const RULE: &str = "==========================================";

/// Whether the expected file exists as a regular file in `work_dir`.
pub fn is_present(work_dir: &Path, file: &ExpectedFile) -> bool {
    work_dir.join(&file.file_name).is_file()
}

/// Runs one upload pass over a plan
pub struct UploadRunner<'a> {
    plan: &'a UploadPlan,
    work_dir: &'a Path,
    publisher: &'a dyn Publisher,
    inspector: &'a dyn Inspector,
}

impl<'a> UploadRunner<'a> {
    pub fn new(
        plan: &'a UploadPlan,
        work_dir: &'a Path,
        publisher: &'a dyn Publisher,
        inspector: &'a dyn Inspector,
    ) -> Self {
        Self {
            plan,
            work_dir,
            publisher,
            inspector,
        }
    }

    /// Process every driver in the plan, writing progress lines to `out`.
    ///
    /// Returns the first publish error unchanged; drivers after the failing
    /// file are never touched.
    pub fn run(&self, out: &mut dyn Write) -> Result<RunSummary> {
        let mut summary = RunSummary::new(&self.plan.kernel_version, self.publisher.is_dry_run());

        tracing::info!(
            drivers = self.plan.drivers.len(),
            files = self.plan.file_count(),
            work_dir = %self.work_dir.display(),
            "starting upload run"
        );

        for driver in &self.plan.drivers {
            let report = self.run_driver(driver, out)?;
            summary.drivers.push(report);
        }

        summary.finish();

        writeln!(out, "{}", RULE)?;
        if summary.dry_run {
            writeln!(
                out,
                "🎉 Dry run complete! ({} would be uploaded, {} missing)",
                summary.uploaded_count(),
                summary.missing_count()
            )?;
        } else {
            writeln!(
                out,
                "🎉 All uploads done! ({} uploaded, {} missing)",
                summary.uploaded_count(),
                summary.missing_count()
            )?;
        }

        tracing::info!(
            uploaded = summary.uploaded_count(),
            missing = summary.missing_count(),
            "upload run finished"
        );

        Ok(summary)
    }

    fn run_driver(&self, driver: &DriverPlan, out: &mut dyn Write) -> Result<DriverReport> {
        writeln!(out, "{}", RULE)?;
        writeln!(out, "Driver: {}", driver.name)?;
        writeln!(out, "Artifactory Directory: {}", driver.remote_dir)?;
        writeln!(out, "Files to upload and verify:")?;

        let mut report = DriverReport::new(&driver.name, &driver.remote_dir);
        let target = driver.upload_target();

        for file in &driver.files {
            let file_report = self.run_file(file, &target, out)?;
            report.files.push(file_report);
        }

        writeln!(out)?;
        Ok(report)
    }

    fn run_file(
        &self,
        file: &ExpectedFile,
        target: &str,
        out: &mut dyn Write,
    ) -> Result<FileReport> {
        if !is_present(self.work_dir, file) {
            tracing::warn!(file = %file.file_name, "expected file not found");
            writeln!(out, "   ❌ WARNING: {} not found!", file.file_name)?;
            return Ok(FileReport {
                file_name: file.file_name.clone(),
                outcome: FileOutcome::Missing,
                inspection: None,
            });
        }

        writeln!(out, "   ✔️ Found file: {}", file.file_name)?;

        let inspection = if file.is_kernel_module() {
            Some(self.inspect_module(file, out)?)
        } else {
            None
        };

        let request = UploadRequest {
            work_dir: self.work_dir,
            file_name: &file.file_name,
            target,
        };

        writeln!(out, "     Uploading {} to {}", file.file_name, target)?;
        if self.publisher.is_dry_run() {
            writeln!(out, "     (dry run) {}", self.publisher.describe(&request))?;
        }

        if let Err(e) = self.publisher.publish(&request) {
            tracing::error!(file = %file.file_name, error = %e, "upload failed, aborting run");
            return Err(e);
        }

        Ok(FileReport {
            file_name: file.file_name.clone(),
            outcome: FileOutcome::Uploaded,
            inspection,
        })
    }

    /// Copy the module to its bare base name, inspect the copy, remove it.
    /// Never fails the run except on output errors.
    fn inspect_module(
        &self,
        file: &ExpectedFile,
        out: &mut dyn Write,
    ) -> Result<InspectionStatus> {
        writeln!(
            out,
            "     Inspecting kernel module {} ({}):",
            file.file_name,
            self.inspector.name()
        )?;

        let source = self.work_dir.join(&file.file_name);
        let dest = self.work_dir.join(file.temp_name());

        let copy = match TempCopy::create(&source, dest) {
            Ok(copy) => copy,
            Err(e) => {
                tracing::warn!(file = %file.file_name, error = %e, "skipping inspection");
                writeln!(out, "     ⚠️ Skipping inspection: {}", e)?;
                return Ok(InspectionStatus::Skipped(e.to_string()));
            }
        };

        let status = match self.inspector.inspect(copy.path()) {
            Ok(report) => {
                for line in report.lines() {
                    writeln!(out, "       {}", line)?;
                }
                if self.inspector.is_enabled() {
                    InspectionStatus::Passed
                } else {
                    InspectionStatus::Disabled
                }
            }
            Err(e) => {
                tracing::warn!(file = %file.file_name, error = %e, "inspection failed");
                writeln!(out, "     ⚠️ WARNING: {}", e)?;
                InspectionStatus::Failed(e.to_string())
            }
        };

        drop(copy);
        Ok(status)
    }
}
