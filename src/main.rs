// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! driver-upload - upload prebuilt kernel driver artifacts
//!
//! Entry point for the driver-upload CLI.

use clap::Parser;

use driver_upload::cli::{Cli, Commands, UploadArgs};
use driver_upload::commands::{self, CommandContext};
use driver_upload::error::Result;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    if cli.verbose > 0 {
        let directive = if cli.verbose > 1 {
            "driver_upload=trace"
        } else {
            "driver_upload=debug"
        };
        if let Ok(parsed) = directive.parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Dispatch to appropriate command. Config management works without a
    // loadable settings file; everything else resolves settings first.
    match &cli.command {
        Some(Commands::Config(args)) => {
            commands::config::execute(args, cli.config.as_deref(), &cli.format)?;
        }
        Some(Commands::List(args)) => {
            let ctx = CommandContext::from_cli(&cli)?;
            commands::list::execute(args, &ctx)?;
        }
        Some(Commands::Upload(args)) => {
            let ctx = CommandContext::from_cli(&cli)?;
            commands::upload::execute(args, &ctx)?;
        }
        None => {
            let ctx = CommandContext::from_cli(&cli)?;
            commands::upload::execute(&UploadArgs::default(), &ctx)?;
        }
    }

    Ok(())
}
