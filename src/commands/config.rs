// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Config command

use std::path::{Path, PathBuf};

use crate::cli::args::{ConfigArgs, ConfigCommands, OutputFormat};
use crate::config::Settings;
use crate::error::{Result, UploadError};

use super::load_settings;

/// Execute the config command. Settings are only loaded for `show`, so a
/// broken settings file can still be replaced with `init --force`.
pub fn execute(
    args: &ConfigArgs,
    settings_path: Option<&Path>,
    format: &OutputFormat,
) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => {
            let settings = load_settings(settings_path)?;
            if matches!(format, OutputFormat::Json) {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                print!("{}", settings.to_toml_string()?);
            }
        }
        ConfigCommands::Path => {
            println!("{}", Settings::default_path().display());
        }
        ConfigCommands::Init { path, force } => {
            let path = path
                .clone()
                .or_else(|| settings_path.map(Path::to_path_buf))
                .unwrap_or_else(Settings::default_path);
            let written = init(&path, *force)?;
            println!("Wrote default settings to {}", written.display());
        }
    }
    Ok(())
}

/// Write the built-in defaults to `path`. An existing file is only replaced
/// with `force`.
pub fn init(path: &Path, force: bool) -> Result<PathBuf> {
    if path.exists() && !force {
        return Err(UploadError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Settings::default().save_to(path)?;
    tracing::info!(path = %path.display(), "wrote default settings");
    Ok(path.to_path_buf())
}
