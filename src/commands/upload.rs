// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Upload command

use std::io;

use crate::cli::args::{OutputFormat, UploadArgs};
use crate::error::Result;
use crate::upload::{inspect, publisher, RunSummary, UploadPlan, UploadRunner};

use super::CommandContext;

/// Execute the upload command
pub fn execute(args: &UploadArgs, ctx: &CommandContext) -> Result<RunSummary> {
    let mut settings = ctx.settings.clone();
    settings.apply_overrides(&args.settings_overrides());

    let plan = UploadPlan::build_for(&settings, &args.overrides.drivers)?;
    let json = matches!(ctx.format, OutputFormat::Json);

    let publisher = publisher::from_config(&settings.publisher, args.dry_run, json);
    let inspector = inspect::from_config(&settings.inspection);
    let runner = UploadRunner::new(&plan, &ctx.work_dir, publisher.as_ref(), inspector.as_ref());

    if json {
        let summary = runner.run(&mut io::sink())?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(summary);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    runner.run(&mut out)
}
