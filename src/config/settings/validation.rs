// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::collections::HashSet;

use crate::error::{Result, UploadError};

use super::{Settings, SettingsOverrides, ARTIFACTORY_BASE_ENV, KERNEL_VERSION_ENV};

impl Settings {
    /// Check the settings before anything touches the filesystem or network.
    pub fn validate(&self) -> Result<()> {
        if self.kernel_version.trim().is_empty() {
            return Err(UploadError::Config(
                "kernel_version must not be empty".to_string(),
            ));
        }
        if self.kernel_version.contains('/') {
            return Err(UploadError::Config(format!(
                "kernel_version '{}' must not contain '/'",
                self.kernel_version
            )));
        }
        if self.artifactory_base.trim_matches('/').trim().is_empty() {
            return Err(UploadError::Config(
                "artifactory_base must not be empty".to_string(),
            ));
        }
        if self.publisher.command.trim().is_empty() {
            return Err(UploadError::Config(
                "publisher.command must not be empty".to_string(),
            ));
        }
        if self.inspection.enabled && self.inspection.command.trim().is_empty() {
            return Err(UploadError::Config(
                "inspection.command must not be empty when inspection is enabled".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for driver in &self.drivers {
            if driver.name.trim().is_empty() {
                return Err(UploadError::Config(
                    "driver name must not be empty".to_string(),
                ));
            }
            if !seen.insert(driver.name.as_str()) {
                return Err(UploadError::Config(format!(
                    "driver '{}' is defined more than once",
                    driver.name
                )));
            }
            if driver.version_dir.trim_matches('/').trim().is_empty() {
                return Err(UploadError::Config(format!(
                    "driver '{}' has no version_dir",
                    driver.name
                )));
            }
            if let Some(file) = driver.files.iter().find(|f| f.trim().is_empty()) {
                return Err(UploadError::Config(format!(
                    "driver '{}' lists an empty file name {:?}",
                    driver.name, file
                )));
            }
        }

        Ok(())
    }

    /// Apply environment overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply environment overrides from an arbitrary lookup.
    /// Priority: env var > config file.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(version) = lookup(KERNEL_VERSION_ENV).filter(|v| !v.is_empty()) {
            self.kernel_version = version;
        }
        if let Some(base) = lookup(ARTIFACTORY_BASE_ENV).filter(|v| !v.is_empty()) {
            self.artifactory_base = base;
        }
    }

    /// Apply command-line overrides. Priority: flag > env var > config file.
    pub fn apply_overrides(&mut self, overrides: &SettingsOverrides) {
        if let Some(ref version) = overrides.kernel_version {
            self.kernel_version = version.clone();
        }
        if let Some(ref base) = overrides.artifactory_base {
            self.artifactory_base = base.clone();
        }
        if overrides.inspect {
            self.inspection.enabled = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DriverSpec;

    #[test]
    fn test_empty_kernel_version_rejected() {
        let mut settings = Settings::default();
        settings.kernel_version = "  ".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_kernel_version_with_slash_rejected() {
        let mut settings = Settings::default();
        settings.kernel_version = "5.15/evil".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_empty_base_rejected() {
        let mut settings = Settings::default();
        settings.artifactory_base = "/".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_empty_version_dir_rejected() {
        let mut settings = Settings::default();
        settings.drivers = vec![DriverSpec::new("igb", "", &["igb.ko"])];
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("igb"));
    }

    #[test]
    fn test_empty_file_name_rejected() {
        let mut settings = Settings::default();
        settings.drivers = vec![DriverSpec::new("igb", "igb-5.17.4", &["igb.ko", ""])];
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_empty_inspection_command_only_matters_when_enabled() {
        let mut settings = Settings::default();
        settings.inspection.command = String::new();
        assert!(settings.validate().is_ok());
        settings.inspection.enabled = true;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_empty_driver_list_is_valid() {
        let mut settings = Settings::default();
        settings.drivers.clear();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        settings.apply_env_overrides_from(|key| match key {
            KERNEL_VERSION_ENV => Some("6.2.0-env".to_string()),
            ARTIFACTORY_BASE_ENV => Some("env/base".to_string()),
            _ => None,
        });
        assert_eq!(settings.kernel_version, "6.2.0-env");
        assert_eq!(settings.artifactory_base, "env/base");
    }

    #[test]
    fn test_empty_env_value_ignored() {
        let mut settings = Settings::default();
        settings.apply_env_overrides_from(|_| Some(String::new()));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_flag_beats_env() {
        let mut settings = Settings::default();
        settings.apply_env_overrides_from(|key| {
            (key == KERNEL_VERSION_ENV).then(|| "from-env".to_string())
        });
        settings.apply_overrides(&SettingsOverrides {
            kernel_version: Some("from-flag".to_string()),
            ..Default::default()
        });
        assert_eq!(settings.kernel_version, "from-flag");
    }
}
