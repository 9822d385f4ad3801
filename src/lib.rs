// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! driver-upload - publish prebuilt kernel driver artifacts to Artifactory.
//!
//! For every configured driver, the files named `<base>.<kernel version>` are
//! looked up in the working directory, kernel modules are optionally
//! inspected through a temporary copy, and each found file is uploaded to
//! `<artifactory base>/<version dir>/` with an external upload tool.
//!
//! - `config`: driver table and tool settings (TOML, env overrides)
//! - `upload`: plan, runner, publisher and inspector seams
//! - `cli`, `commands`: the `driver-upload` binary's surface

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod upload;

pub use error::{Result, UploadError};
