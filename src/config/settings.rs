// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for driver-upload
//!
//! Built-in defaults describe the production driver set. A TOML file at
//! ~/.driver-upload/drivers.toml (or `--config`) replaces them.

use serde::{Deserialize, Serialize};

mod io;
mod migration;
mod validation;

/// Environment variable overriding `kernel_version`
pub const KERNEL_VERSION_ENV: &str = "DRIVER_UPLOAD_KERNEL_VERSION";

/// Environment variable overriding `artifactory_base`
pub const ARTIFACTORY_BASE_ENV: &str = "DRIVER_UPLOAD_ARTIFACTORY_BASE";

/// Environment variable overriding the settings home directory
pub const HOME_ENV: &str = "DRIVER_UPLOAD_HOME";

/// Main settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Suffix appended to every expected file name
    #[serde(default = "default_kernel_version")]
    pub kernel_version: String,

    /// Root of every remote upload path
    #[serde(default = "default_artifactory_base")]
    pub artifactory_base: String,

    /// Kernel module inspection
    #[serde(default)]
    pub inspection: InspectionConfig,

    /// External upload tool
    #[serde(default)]
    pub publisher: PublisherConfig,

    /// Drivers to upload, in processing order
    #[serde(default = "default_drivers")]
    pub drivers: Vec<DriverSpec>,
}

/// One driver: its remote version directory and the files built for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSpec {
    /// Driver name (e.g. "igb")
    pub name: String,

    /// Remote subdirectory under the artifactory base (e.g. "igb-5.17.4")
    pub version_dir: String,

    /// Base file names; the kernel version is appended at lookup time
    #[serde(default)]
    pub files: Vec<String>,
}

impl DriverSpec {
    pub fn new(name: impl Into<String>, version_dir: impl Into<String>, files: &[&str]) -> Self {
        Self {
            name: name.into(),
            version_dir: version_dir.into(),
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }
}

/// Kernel module inspection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionConfig {
    /// Run the inspection command on each `.ko` file
    #[serde(default)]
    pub enabled: bool,

    /// Command invoked with the temporary module copy as its only argument
    #[serde(default = "default_inspection_command")]
    pub command: String,
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: default_inspection_command(),
        }
    }
}

/// Artifact upload tool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// Upload executable
    #[serde(default = "default_publisher_command")]
    pub command: String,

    /// Arguments placed before the local file and remote directory
    #[serde(default = "default_publisher_args")]
    pub args: Vec<String>,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            command: default_publisher_command(),
            args: default_publisher_args(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            kernel_version: default_kernel_version(),
            artifactory_base: default_artifactory_base(),
            inspection: InspectionConfig::default(),
            publisher: PublisherConfig::default(),
            drivers: default_drivers(),
        }
    }
}

/// Command-line overrides, applied after the file and the environment
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub kernel_version: Option<String>,
    pub artifactory_base: Option<String>,
    pub inspect: bool,
}

impl Settings {
    /// Look up a driver by name.
    pub fn driver(&self, name: &str) -> Option<&DriverSpec> {
        self.drivers.iter().find(|d| d.name == name)
    }

    /// Names of all configured drivers, in processing order.
    pub fn driver_names(&self) -> Vec<&str> {
        self.drivers.iter().map(|d| d.name.as_str()).collect()
    }
}

fn default_kernel_version() -> String {
    "5.15.0-140-rubrik7-generic".to_string()
}

fn default_artifactory_base() -> String {
    "legacy-archive-local/manufacturing/drivers".to_string()
}

fn default_inspection_command() -> String {
    "modinfo".to_string()
}

fn default_publisher_command() -> String {
    "jfrog".to_string()
}

fn default_publisher_args() -> Vec<String> {
    vec!["rt".to_string(), "upload".to_string(), "--flat".to_string()]
}

fn default_drivers() -> Vec<DriverSpec> {
    vec![
        DriverSpec::new("mpt3sas", "mpt3sas-51.00.00.00", &["mpt3sas.ko"]),
        DriverSpec::new(
            "mellanox",
            "mlx-5.8-5.1.1.2",
            &[
                "mlx5_core.ko",
                "mlx_compat.ko",
                "mlxfw.ko",
                "mlx5_ib.ko",
                "mlxdevm.ko",
            ],
        ),
        DriverSpec::new(
            "ice",
            "ice-1.14.13",
            &[
                "ice.ko",
                "ice-vfio-pci.ko",
                "ice-1.3.36.0.pkg",
                "LICENSE",
                "Module.symvers",
                "README",
            ],
        ),
        DriverSpec::new("bnxt_en", "bnxt_en-1.10.3-231.0.162.0", &["bnxt_en.ko"]),
        DriverSpec::new("mpi3mr", "mpi3mr-8.6.1.0.0", &["mpi3mr.ko"]),
        DriverSpec::new("igb", "igb-5.17.4", &["igb.ko"]),
    ]
}
