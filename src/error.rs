// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for driver-upload
//!
//! This module defines all error types used throughout the application.

use thiserror::Error;

/// Main error type for driver-upload operations
#[derive(Error, Debug)]
pub enum UploadError {
    /// Configuration errors (bad settings file, missing version for a driver, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The artifact publisher exited unsuccessfully
    #[error("Upload of {file} failed: {status}")]
    Upload { file: String, status: String },

    /// Module inspection failed (never fatal to a run)
    #[error("Inspection failed: {0}")]
    Inspection(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for driver-upload operations
pub type Result<T> = std::result::Result<T, UploadError>;

impl From<toml::de::Error> for UploadError {
    fn from(err: toml::de::Error) -> Self {
        UploadError::Toml(err.to_string())
    }
}

impl From<toml::ser::Error> for UploadError {
    fn from(err: toml::ser::Error) -> Self {
        UploadError::Toml(err.to_string())
    }
}
