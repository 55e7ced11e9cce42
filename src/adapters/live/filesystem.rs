//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use crate::ports::{FileSystem, HostError};

/// Filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, HostError> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Writes to a sibling temp file and renames it over the target, so a
    /// failed commit never leaves a half-written layer behind.
    fn write(&self, path: &Path, contents: &str) -> Result<(), HostError> {
        let mut staging = path.as_os_str().to_owned();
        staging.push(".tmp");
        std::fs::write(&staging, contents)?;
        std::fs::rename(&staging, path)?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, HostError> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    entries.push(name.to_string());
                }
            }
        }
        entries.sort();
        Ok(entries)
    }
}
