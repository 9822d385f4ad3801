// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Subcommand handlers
//!
//! Each handler takes its clap arguments plus a `CommandContext` holding the
//! settings and working directory resolved once in `main`.

pub mod config;
pub mod list;
pub mod upload;

use std::path::{Path, PathBuf};

use crate::cli::{Cli, OutputFormat};
use crate::config::Settings;
use crate::error::{Result, UploadError};

/// State shared by every subcommand
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Settings after the file and environment overrides
    pub settings: Settings,
    /// Directory holding the artifacts; temporary copies are made here too
    pub work_dir: PathBuf,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Resolve settings and working directory from the global CLI flags.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self {
            settings: load_settings(cli.config.as_deref())?,
            work_dir: resolve_work_dir(cli.directory.as_deref())?,
            format: cli.format.clone(),
        })
    }
}

/// Load settings from an explicit path (which must exist) or the default
/// location, then apply environment overrides.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    let mut settings = match explicit {
        Some(path) => Settings::load_required(path)?,
        None => Settings::load()?,
    };
    settings.apply_env_overrides();
    Ok(settings)
}

/// The artifact directory: `-C` if given (must be a directory), else ".".
pub fn resolve_work_dir(directory: Option<&Path>) -> Result<PathBuf> {
    match directory {
        Some(dir) if dir.is_dir() => Ok(dir.to_path_buf()),
        Some(dir) => Err(UploadError::InvalidInput(format!(
            "{} is not a directory",
            dir.display()
        ))),
        None => Ok(PathBuf::from(".")),
    }
}
