// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use toml::{Table, Value};

use crate::error::{Result, UploadError};

const LEGACY_VERSIONS_KEY: &str = "driver_versions";
const LEGACY_FILES_KEY: &str = "driver_files";

/// Rewrite older settings layouts into the current schema.
///
/// Older settings files keep two tables keyed by
/// driver name: `driver_versions` (name -> version dir) and `driver_files`
/// (name -> file list). They are folded into `[[drivers]]` records here.
pub(super) fn migrate_on_load(value: Value) -> Result<Value> {
    let Value::Table(mut root) = value else {
        return Err(UploadError::Config(
            "settings file must be a TOML table".to_string(),
        ));
    };

    let versions = root.remove(LEGACY_VERSIONS_KEY);
    let files = root.remove(LEGACY_FILES_KEY);

    if versions.is_none() && files.is_none() {
        return Ok(Value::Table(root));
    }

    if root.contains_key("drivers") {
        return Err(UploadError::Config(format!(
            "`drivers` cannot be combined with `{}`/`{}`",
            LEGACY_VERSIONS_KEY, LEGACY_FILES_KEY
        )));
    }

    let versions = expect_table(versions, LEGACY_VERSIONS_KEY)?;
    let files = expect_table(files, LEGACY_FILES_KEY)?;

    let drivers = legacy_tables_to_drivers(&versions, &files)?;
    root.insert("drivers".to_string(), Value::Array(drivers));
    Ok(Value::Table(root))
}

fn expect_table(value: Option<Value>, key: &str) -> Result<Table> {
    match value {
        Some(Value::Table(table)) => Ok(table),
        Some(_) => Err(UploadError::Config(format!("`{}` must be a table", key))),
        None => Ok(Table::new()),
    }
}

/// Join the two legacy tables on driver name. Every driver with files must
/// have a version directory; versions without files are ignored.
fn legacy_tables_to_drivers(versions: &Table, files: &Table) -> Result<Vec<Value>> {
    let mut drivers = Vec::with_capacity(files.len());

    for (name, file_list) in files {
        let version_dir = match versions.get(name) {
            Some(Value::String(dir)) => dir.clone(),
            Some(_) => {
                return Err(UploadError::Config(format!(
                    "{}.{} must be a string",
                    LEGACY_VERSIONS_KEY, name
                )))
            }
            None => {
                return Err(UploadError::Config(format!(
                    "driver '{}' has files but no entry in {}",
                    name, LEGACY_VERSIONS_KEY
                )))
            }
        };

        let mut record = Table::new();
        record.insert("name".to_string(), Value::String(name.clone()));
        record.insert("version_dir".to_string(), Value::String(version_dir));
        record.insert(
            "files".to_string(),
            Value::Array(file_names(name, file_list)?),
        );
        drivers.push(Value::Table(record));
    }

    for name in versions.keys().filter(|name| !files.contains_key(*name)) {
        tracing::debug!(driver = %name, "ignoring version entry without files");
    }

    Ok(drivers)
}

/// Accept either an array of names or one whitespace-separated string.
fn file_names(driver: &str, value: &Value) -> Result<Vec<Value>> {
    match value {
        Value::String(list) => Ok(list
            .split_whitespace()
            .map(|f| Value::String(f.to_string()))
            .collect()),
        Value::Array(items) if items.iter().all(Value::is_str) => Ok(items.clone()),
        _ => Err(UploadError::Config(format!(
            "{}.{} must be a string or a list of strings",
            LEGACY_FILES_KEY, driver
        ))),
    }
}
