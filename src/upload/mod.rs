// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Driver artifact upload
//!
//! - `plan`: expected file names and upload targets derived from settings
//! - `runner`: the sequential driver/file loop
//! - `publisher`: external upload tool (and dry run)
//! - `inspect`: optional kernel module inspection
//! - `temp`: scoped temporary copies used by inspection
//! - `summary`: per-file outcomes of a run

pub mod inspect;
pub mod plan;
pub mod publisher;
pub mod runner;
pub mod summary;
pub mod temp;

pub use inspect::{CommandInspector, Inspector, NoopInspector};
pub use plan::{DriverPlan, ExpectedFile, UploadPlan};
pub use publisher::{CommandPublisher, DryRunPublisher, Publisher, UploadRequest};
pub use runner::UploadRunner;
pub use summary::{DriverReport, FileOutcome, FileReport, InspectionStatus, RunSummary};
pub use temp::TempCopy;
