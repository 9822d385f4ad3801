// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Artifact publishers
//!
//! A publisher copies one local file into a remote directory under its own
//! base name. Any error it returns aborts the run.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::config::PublisherConfig;
use crate::error::{Result, UploadError};

/// One upload: a local file (relative to `work_dir`) and its remote directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadRequest<'a> {
    pub work_dir: &'a Path,
    pub file_name: &'a str,
    /// Remote directory, with trailing slash
    pub target: &'a str,
}

/// Uploads files to the artifact repository
pub trait Publisher {
    /// Human-readable rendering of what `publish` does for `request`
    fn describe(&self, request: &UploadRequest<'_>) -> String;

    /// Whether `publish` skips the actual upload
    fn is_dry_run(&self) -> bool {
        false
    }

    /// Upload the file. Errors are fatal to the run.
    fn publish(&self, request: &UploadRequest<'_>) -> Result<()>;
}

/// Publisher that runs an external upload tool
/// (`jfrog rt upload --flat <file> <dir>/` by default)
#[derive(Debug, Clone)]
pub struct CommandPublisher {
    command: String,
    args: Vec<String>,
    stdout_to_stderr: bool,
}

impl CommandPublisher {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            stdout_to_stderr: false,
        }
    }

    /// Send the tool's stdout to our stderr, keeping stdout machine-readable.
    pub fn with_stdout_to_stderr(mut self) -> Self {
        self.stdout_to_stderr = true;
        self
    }

    pub fn from_config(config: &PublisherConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }

    fn argv<'a>(&'a self, request: &UploadRequest<'a>) -> Vec<&'a str> {
        let mut argv: Vec<&str> = self.args.iter().map(String::as_str).collect();
        argv.push(request.file_name);
        argv.push(request.target);
        argv
    }
}

impl Publisher for CommandPublisher {
    fn describe(&self, request: &UploadRequest<'_>) -> String {
        let mut line = self.command.clone();
        for arg in self.argv(request) {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    fn publish(&self, request: &UploadRequest<'_>) -> Result<()> {
        tracing::info!(
            file = request.file_name,
            target = request.target,
            "uploading"
        );

        let mut command = Command::new(&self.command);
        command.args(self.argv(request)).current_dir(request.work_dir);
        if self.stdout_to_stderr {
            command.stdout(Stdio::from(std::io::stderr()));
        }
        let status = command.status()?;

        if !status.success() {
            return Err(UploadError::Upload {
                file: request.file_name.to_string(),
                status: status.to_string(),
            });
        }

        Ok(())
    }
}

/// Publisher that only reports the command it would run
#[derive(Debug, Clone)]
pub struct DryRunPublisher {
    inner: CommandPublisher,
}

impl DryRunPublisher {
    pub fn new(inner: CommandPublisher) -> Self {
        Self { inner }
    }
}

impl Publisher for DryRunPublisher {
    fn describe(&self, request: &UploadRequest<'_>) -> String {
        self.inner.describe(request)
    }

    fn is_dry_run(&self) -> bool {
        true
    }

    fn publish(&self, request: &UploadRequest<'_>) -> Result<()> {
        tracing::info!(command = %self.describe(request), "dry run, skipping upload");
        Ok(())
    }
}

/// Build the publisher the settings ask for.
pub fn from_config(
    config: &PublisherConfig,
    dry_run: bool,
    quiet_stdout: bool,
) -> Box<dyn Publisher> {
    let mut publisher = CommandPublisher::from_config(config);
    if quiet_stdout {
        publisher = publisher.with_stdout_to_stderr();
    }
    if dry_run {
        Box::new(DryRunPublisher::new(publisher))
    } else {
        Box::new(publisher)
    }
}
