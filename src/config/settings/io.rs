// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::{Path, PathBuf};

use crate::error::{Result, UploadError};

use super::migration;
use super::{Settings, HOME_ENV};

impl Settings {
    /// Get the default settings file path.
    pub fn default_path() -> PathBuf {
        Self::home().join("drivers.toml")
    }

    /// Get the settings home directory (~/.driver-upload or $DRIVER_UPLOAD_HOME).
    pub fn home() -> PathBuf {
        if let Ok(home) = std::env::var(HOME_ENV) {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".driver-upload")
    }

    /// Load settings from the default path, falling back to built-in defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load settings from a specific path, falling back to built-in defaults
    /// when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using built-in defaults");
            return Ok(Self::default());
        }
        Self::load_required(path)
    }

    /// Load settings from a path that must exist.
    pub fn load_required(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(UploadError::Config(format!(
                "settings file {} does not exist",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            drivers = settings.drivers.len(),
            "loaded settings"
        );
        Ok(settings)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw_value: toml::Value = toml::from_str(content)?;
        let migrated = migration::migrate_on_load(raw_value)?;
        let settings: Settings = migrated.try_into()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Render settings as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save settings to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}
