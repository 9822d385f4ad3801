// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! List command: show the upload plan and which files are present

use std::path::Path;

use serde::Serialize;

use crate::cli::args::{ListArgs, OutputFormat};
use crate::error::Result;
use crate::upload::runner::is_present;
use crate::upload::UploadPlan;

use super::CommandContext;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanListing {
    pub kernel_version: String,
    pub drivers: Vec<DriverListing>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverListing {
    pub name: String,
    pub remote_dir: String,
    pub files: Vec<FileListing>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListing {
    pub file_name: String,
    pub present: bool,
    pub kernel_module: bool,
}

/// Check every expected file of the plan against `work_dir`.
pub fn build_listing(plan: &UploadPlan, work_dir: &Path) -> PlanListing {
    PlanListing {
        kernel_version: plan.kernel_version.clone(),
        drivers: plan
            .drivers
            .iter()
            .map(|driver| DriverListing {
                name: driver.name.clone(),
                remote_dir: driver.remote_dir.clone(),
                files: driver
                    .files
                    .iter()
                    .map(|file| FileListing {
                        file_name: file.file_name.clone(),
                        present: is_present(work_dir, file),
                        kernel_module: file.is_kernel_module(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// Execute the list command
pub fn execute(args: &ListArgs, ctx: &CommandContext) -> Result<PlanListing> {
    let mut settings = ctx.settings.clone();
    settings.apply_overrides(&args.settings_overrides());

    let plan = UploadPlan::build_for(&settings, &args.overrides.drivers)?;
    let listing = build_listing(&plan, &ctx.work_dir);

    if matches!(ctx.format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(listing);
    }

    println!("Kernel version: {}", listing.kernel_version);
    for driver in &listing.drivers {
        println!("\n=== {} ===", driver.name);
        println!("Artifactory Directory: {}/", driver.remote_dir);
        if driver.files.is_empty() {
            println!("  (no files configured)");
        }
        for file in &driver.files {
            let marker = if file.present { "✓" } else { "✗" };
            let module = if file.kernel_module { " [module]" } else { "" };
            println!("  {} {}{}", marker, file.file_name, module);
        }
    }

    let present = listing
        .drivers
        .iter()
        .flat_map(|d| d.files.iter())
        .filter(|f| f.present)
        .count();
    let total = plan.file_count();
    println!("\n{} of {} expected files present", present, total);

    Ok(listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DriverSpec, Settings};
    use tempfile::TempDir;

    #[test]
    fn test_build_listing_marks_presence() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("ice.ko.5.15.0"), "module").unwrap();

        let settings = Settings {
            kernel_version: "5.15.0".to_string(),
            drivers: vec![DriverSpec::new(
                "ice",
                "ice-1.14.13",
                &["ice.ko", "LICENSE"],
            )],
            ..Settings::default()
        };
        let plan = UploadPlan::build(&settings).unwrap();
        let listing = build_listing(&plan, temp_dir.path());

        let files = &listing.drivers[0].files;
        assert!(files[0].present);
        assert!(files[0].kernel_module);
        assert!(!files[1].present);
        assert!(!files[1].kernel_module);
    }

    #[test]
    fn test_listing_json_shape() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings {
            kernel_version: "5.15.0".to_string(),
            drivers: vec![DriverSpec::new("igb", "igb-5.17.4", &["igb.ko"])],
            ..Settings::default()
        };
        let plan = UploadPlan::build(&settings).unwrap();
        let value = serde_json::to_value(build_listing(&plan, temp_dir.path())).unwrap();

        assert_eq!(value["kernelVersion"], "5.15.0");
        assert_eq!(value["drivers"][0]["files"][0]["fileName"], "igb.ko.5.15.0");
        assert_eq!(value["drivers"][0]["files"][0]["present"], false);
    }
}
