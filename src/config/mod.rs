// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Configuration module for driver-upload
//!
//! Handles loading, saving, and validating the driver table.

pub mod settings;

pub use settings::*;
