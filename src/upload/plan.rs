// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Upload plan
//!
//! Derives, from the settings, which local files each driver expects and
//! where they go remotely. Nothing here touches the filesystem.

use std::path::Path;

use crate::config::{DriverSpec, Settings};
use crate::error::{Result, UploadError};

const KERNEL_MODULE_SUFFIX: &str = ".ko";

/// A file expected for a driver, named for one kernel version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedFile {
    /// Configured base name (e.g. "igb.ko")
    pub base_name: String,
    /// Base name with the kernel version appended (e.g. "igb.ko.5.15.0-140-rubrik7-generic")
    pub file_name: String,
}

impl ExpectedFile {
    pub fn new(base_name: &str, kernel_version: &str) -> Self {
        Self {
            base_name: base_name.to_string(),
            file_name: expected_file_name(base_name, kernel_version),
        }
    }

    /// Whether the base name designates a kernel module.
    pub fn is_kernel_module(&self) -> bool {
        self.base_name.ends_with(KERNEL_MODULE_SUFFIX)
    }

    /// Name of the temporary copy used for inspection: the base name with
    /// any directory component stripped.
    pub fn temp_name(&self) -> &str {
        Path::new(&self.base_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.base_name)
    }
}

/// One driver's remote target and expected files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverPlan {
    pub name: String,
    /// Remote directory without trailing slash
    pub remote_dir: String,
    pub files: Vec<ExpectedFile>,
}

impl DriverPlan {
    fn from_spec(spec: &DriverSpec, settings: &Settings) -> Self {
        Self {
            name: spec.name.clone(),
            remote_dir: remote_dir(&settings.artifactory_base, &spec.version_dir),
            files: spec
                .files
                .iter()
                .map(|f| ExpectedFile::new(f, &settings.kernel_version))
                .collect(),
        }
    }

    /// Upload target handed to the publisher (remote dir with trailing slash).
    pub fn upload_target(&self) -> String {
        format!("{}/", self.remote_dir)
    }
}

/// All drivers selected for a run, in processing order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPlan {
    pub kernel_version: String,
    pub drivers: Vec<DriverPlan>,
}

impl UploadPlan {
    /// Build the plan for every configured driver.
    pub fn build(settings: &Settings) -> Result<Self> {
        Self::build_for(settings, &[])
    }

    /// Build the plan for the named drivers only (all drivers when `only` is
    /// empty). Unknown names fail before anything is uploaded.
    pub fn build_for(settings: &Settings, only: &[String]) -> Result<Self> {
        settings.validate()?;

        if let Some(unknown) = only.iter().find(|name| settings.driver(name).is_none()) {
            return Err(UploadError::Config(format!(
                "unknown driver '{}' (configured: {})",
                unknown,
                settings.driver_names().join(", ")
            )));
        }

        let drivers = settings
            .drivers
            .iter()
            .filter(|d| only.is_empty() || only.contains(&d.name))
            .map(|d| DriverPlan::from_spec(d, settings))
            .collect();

        Ok(Self {
            kernel_version: settings.kernel_version.clone(),
            drivers,
        })
    }

    /// Total number of expected files across all drivers.
    pub fn file_count(&self) -> usize {
        self.drivers.iter().map(|d| d.files.len()).sum()
    }
}

/// `base + "." + kernel_version`
pub fn expected_file_name(base_name: &str, kernel_version: &str) -> String {
    format!("{}.{}", base_name, kernel_version)
}

/// `artifactory_base + "/" + version_dir`, without doubled slashes
pub fn remote_dir(artifactory_base: &str, version_dir: &str) -> String {
    format!(
        "{}/{}",
        artifactory_base.trim_end_matches('/'),
        version_dir.trim_matches('/')
    )
}
