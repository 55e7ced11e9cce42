//! Filesystem port used by file-backed layer hosts.

use std::path::Path;

use super::layers::HostError;

/// Reads and writes the files that back a workspace of layers.
///
/// Swapping the implementation lets the GeoJSON host run against an
/// in-memory tree in tests.
pub trait FileSystem: Send + Sync {
    /// Reads a whole file as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or not valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, HostError>;

    /// Replaces the contents of a file, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn write(&self, path: &Path, contents: &str) -> Result<(), HostError>;

    /// Returns `true` if the path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Lists entry names directly under a directory, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a readable directory.
    fn list_dir(&self, path: &Path) -> Result<Vec<String>, HostError>;
}
