// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Scoped temporary copies
//!
//! `TempCopy` copies a file under a new name and deletes the copy when the
//! guard is dropped, so the copy never outlives the iteration that made it.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A temporary copy of a file, removed on drop
#[derive(Debug)]
pub struct TempCopy {
    path: PathBuf,
}

impl TempCopy {
    /// Copy `source` to `dest`. Fails with `AlreadyExists` if anything,
    /// including a dangling symlink, already occupies `dest`.
    pub fn create(source: &Path, dest: PathBuf) -> io::Result<Self> {
        let mut reader = File::open(source)?;
        let mut writer = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&dest)
            .map_err(|e| {
                if e.kind() == io::ErrorKind::AlreadyExists {
                    io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        format!("{} already exists", dest.display()),
                    )
                } else {
                    e
                }
            })?;

        // From here on `dest` is ours; the guard removes it on any failure.
        let copy = Self { path: dest };
        io::copy(&mut reader, &mut writer)?;
        writer.flush()?;
        tracing::debug!(
            source = %source.display(),
            copy = %copy.path.display(),
            "created temporary copy"
        );
        Ok(copy)
    }

    /// Path of the temporary copy.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempCopy {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(copy = %self.path.display(), "removed temporary copy"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                copy = %self.path.display(),
                error = %e,
                "failed to remove temporary copy"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_copy_exists_until_drop() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("igb.ko.5.15.0");
        std::fs::write(&source, b"module").unwrap();
        let dest = temp_dir.path().join("igb.ko");

        {
            let copy = TempCopy::create(&source, dest.clone()).unwrap();
            assert_eq!(copy.path(), dest.as_path());
            assert_eq!(std::fs::read(copy.path()).unwrap(), b"module");
        }

        assert!(!dest.exists());
        assert!(source.exists());
    }

    #[test]
    fn test_removed_on_early_return() {
        fn inspect_and_fail(source: &Path, dest: PathBuf) -> io::Result<()> {
            let _copy = TempCopy::create(source, dest)?;
            Err(io::Error::new(io::ErrorKind::Other, "inspection failed"))
        }

        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("ice.ko.5.15.0");
        std::fs::write(&source, b"module").unwrap();
        let dest = temp_dir.path().join("ice.ko");

        assert!(inspect_and_fail(&source, dest.clone()).is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn test_refuses_to_clobber_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("igb.ko.5.15.0");
        std::fs::write(&source, b"module").unwrap();
        let dest = temp_dir.path().join("igb.ko");
        std::fs::write(&dest, b"keep me").unwrap();

        let err = TempCopy::create(&source, dest.clone()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(std::fs::read(&dest).unwrap(), b"keep me");
    }

    #[test]
    #[cfg(unix)]
    fn test_refuses_to_write_through_dangling_symlink() {
        let work_dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let source = work_dir.path().join("igb.ko.5.15.0");
        std::fs::write(&source, b"module").unwrap();
        let target = outside.path().join("escaped.ko");
        let dest = work_dir.path().join("igb.ko");
        std::os::unix::fs::symlink(&target, &dest).unwrap();

        let err = TempCopy::create(&source, dest.clone()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert!(std::fs::symlink_metadata(&dest).unwrap().file_type().is_symlink());
        assert!(!target.exists());
    }

    #[test]
    fn test_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("igb.ko");
        assert!(TempCopy::create(&temp_dir.path().join("nope"), dest.clone()).is_err());
        assert!(!dest.exists());
    }

    #[test]
    fn test_drop_tolerates_already_removed_copy() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("mlxfw.ko.5.15.0");
        std::fs::write(&source, b"module").unwrap();
        let dest = temp_dir.path().join("mlxfw.ko");

        let copy = TempCopy::create(&source, dest.clone()).unwrap();
        std::fs::remove_file(&dest).unwrap();
        drop(copy);
        assert!(!dest.exists());
    }
}
