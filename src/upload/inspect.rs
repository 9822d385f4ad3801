// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Kernel module inspection
//!
//! Inspection is read-only and never fatal to a run. Disabled inspection is
//! a `NoopInspector`, not a missing step.

use std::path::Path;
use std::process::Command;

use crate::config::InspectionConfig;
use crate::error::{Result, UploadError};

/// Inspects a kernel module file and returns human-readable metadata
pub trait Inspector {
    /// Short name for progress output (e.g. "modinfo")
    fn name(&self) -> &str;

    /// Whether inspection actually runs anything
    fn is_enabled(&self) -> bool {
        true
    }

    /// Inspect the module at `module`. Returned text is echoed to the user.
    fn inspect(&self, module: &Path) -> Result<String>;
}

/// Inspector that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInspector;

impl Inspector for NoopInspector {
    fn name(&self) -> &str {
        "none"
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn inspect(&self, _module: &Path) -> Result<String> {
        Ok(String::new())
    }
}

/// Inspector that runs an external command (normally `modinfo`) on the module
#[derive(Debug, Clone)]
pub struct CommandInspector {
    command: String,
}

impl CommandInspector {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Inspector for CommandInspector {
    fn name(&self) -> &str {
        &self.command
    }

    fn inspect(&self, module: &Path) -> Result<String> {
        tracing::debug!(
            command = %self.command,
            module = %module.display(),
            "inspecting module"
        );

        // Run in the module's directory on its bare file name.
        let mut command = Command::new(&self.command);
        match (module.parent(), module.file_name()) {
            (Some(dir), Some(name)) if !dir.as_os_str().is_empty() => {
                command.arg(name).current_dir(dir);
            }
            _ => {
                command.arg(module);
            }
        }

        let output = command
            .output()
            .map_err(|e| {
                UploadError::Inspection(format!("failed to run {}: {}", self.command, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(UploadError::Inspection(format!(
                "{} {} exited with {}: {}",
                self.command,
                module.display(),
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Build the inspector the settings ask for.
pub fn from_config(config: &InspectionConfig) -> Box<dyn Inspector> {
    if config.enabled {
        Box::new(CommandInspector::new(config.command.clone()))
    } else {
        Box::new(NoopInspector)
    }
}
