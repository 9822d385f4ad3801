// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for driver-upload.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::SettingsOverrides;

/// driver-upload - publish prebuilt kernel driver artifacts to Artifactory
#[derive(Parser, Debug)]
#[command(name = "driver-upload")]
#[command(
    version,
    about = "Upload prebuilt kernel driver artifacts, organized by driver and version"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the built artifacts (defaults to current)
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Settings file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload every found driver artifact (default when no command given)
    Upload(UploadArgs),

    /// Show drivers, upload targets, and which expected files are present
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Settings overrides shared by `upload` and `list`
#[derive(clap::Args, Debug, Default, Clone)]
pub struct OverrideArgs {
    /// Kernel version suffix of the artifact files
    #[arg(short, long)]
    pub kernel_version: Option<String>,

    /// Artifactory base directory
    #[arg(short, long)]
    pub base: Option<String>,

    /// Only process these drivers (repeatable)
    #[arg(short, long = "driver", num_args = 1..)]
    pub drivers: Vec<String>,
}

/// Arguments for the upload subcommand
#[derive(clap::Args, Debug, Default)]
pub struct UploadArgs {
    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Run the inspection command on each kernel module before uploading
    #[arg(long)]
    pub inspect: bool,

    /// Print the upload commands without running them
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl UploadArgs {
    pub fn settings_overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            kernel_version: self.overrides.kernel_version.clone(),
            artifactory_base: self.overrides.base.clone(),
            inspect: self.inspect,
        }
    }
}

/// Arguments for the list subcommand
#[derive(clap::Args, Debug, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub overrides: OverrideArgs,
}

impl ListArgs {
    pub fn settings_overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            kernel_version: self.overrides.kernel_version.clone(),
            artifactory_base: self.overrides.base.clone(),
            inspect: false,
        }
    }
}

/// Arguments for the config subcommand
#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,

    /// Print the default settings file path
    Path,

    /// Write the built-in defaults to a settings file
    Init {
        /// Destination (defaults to the default settings path)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for results
#[derive(ValueEnum, Clone, Debug, Default, PartialEq)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,

    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::parse_from(["driver-upload"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_upload_overrides() {
        let cli = Cli::parse_from([
            "driver-upload",
            "upload",
            "-k",
            "6.1.0",
            "--base",
            "repo/drivers",
            "--inspect",
        ]);
        if let Some(Commands::Upload(args)) = cli.command {
            let overrides = args.settings_overrides();
            assert_eq!(overrides.kernel_version.as_deref(), Some("6.1.0"));
            assert_eq!(overrides.artifactory_base.as_deref(), Some("repo/drivers"));
            assert!(overrides.inspect);
            assert!(!args.dry_run);
        } else {
            panic!("Expected Upload command");
        }
    }

    #[test]
    fn test_list_never_enables_inspection() {
        let cli = Cli::parse_from(["driver-upload", "list", "-d", "igb"]);
        if let Some(Commands::List(args)) = cli.command {
            assert_eq!(args.overrides.drivers, vec!["igb"]);
            assert!(!args.settings_overrides().inspect);
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["driver-upload", "config", "init", "--force"]);
        if let Some(Commands::Config(args)) = cli.command {
            assert!(matches!(
                args.command,
                ConfigCommands::Init {
                    path: None,
                    force: true
                }
            ));
        } else {
            panic!("Expected Config command");
        }
    }

    #[test]
    fn test_global_args_after_subcommand() {
        let cli = Cli::parse_from(["driver-upload", "list", "-C", "/tmp/out", "--format", "json"]);
        assert_eq!(cli.directory, Some(PathBuf::from("/tmp/out")));
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
