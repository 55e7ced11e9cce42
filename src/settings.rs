//! Assignment defaults and environment lookups.
//!
//! Built-in defaults are field `BSM`, prefix `130129`, length 18 and global
//! scope. A workspace may override them with a `uidgen.yaml` file:
//!
//! ```yaml
//! field: CODE
//! prefix: "4401"
//! length: 16
//! scope: layer
//! ```

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assign::Scope;
use crate::ports::FileSystem;

/// Name of the optional settings file inside a workspace.
pub const SETTINGS_FILE: &str = "uidgen.yaml";

/// Identifier lengths the tool accepts.
pub const LENGTH_RANGE: RangeInclusive<usize> = 10..=30;

/// Defaults applied when the command line leaves an option out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Target field name.
    pub field: String,
    /// Identifier prefix.
    pub prefix: String,
    /// Total identifier length.
    pub length: usize,
    /// Numbering scope.
    pub scope: Scope,
}

impl Default for Settings {
    fn default() -> Self {
        Self { field: "BSM".into(), prefix: "130129".into(), length: 18, scope: Scope::Global }
    }
}

impl Settings {
    /// Loads `<workspace>/uidgen.yaml`, falling back to built-in defaults
    /// when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if its length is outside [`LENGTH_RANGE`].
    pub fn load(fs: &dyn FileSystem, workspace: &Path) -> Result<Self, String> {
        let path = workspace.join(SETTINGS_FILE);
        if !fs.exists(&path) {
            return Ok(Self::default());
        }
        let contents = fs
            .read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        let settings: Self = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {e}", path.display()))?;
        check_length(settings.length)
            .map_err(|e| format!("Invalid {}: {e}", path.display()))?;
        Ok(settings)
    }
}

/// Checks an identifier length against [`LENGTH_RANGE`].
///
/// # Errors
///
/// Returns a message naming the accepted range.
pub fn check_length(length: usize) -> Result<usize, String> {
    if LENGTH_RANGE.contains(&length) {
        Ok(length)
    } else {
        Err(format!(
            "length {length} is outside {}..={}",
            LENGTH_RANGE.start(),
            LENGTH_RANGE.end()
        ))
    }
}

/// Workspace directory from `UIDGEN_WORKSPACE`, or the current directory.
#[must_use]
pub fn workspace_root() -> PathBuf {
    std::env::var("UIDGEN_WORKSPACE").map_or_else(|_| PathBuf::from("."), PathBuf::from)
}

/// Journal path from `UIDGEN_JOURNAL`, if set.
#[must_use]
pub fn journal_path() -> Option<PathBuf> {
    std::env::var_os("UIDGEN_JOURNAL").filter(|v| !v.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::LiveFileSystem;

    fn temp_workspace(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = temp_workspace("uidgen_settings_missing");
        let settings = Settings::load(&LiveFileSystem, &dir).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.field, "BSM");
        assert_eq!(settings.prefix, "130129");
        assert_eq!(settings.length, 18);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn partial_file_overrides_some_defaults() {
        let dir = temp_workspace("uidgen_settings_partial");
        std::fs::write(dir.join(SETTINGS_FILE), "prefix: \"4401\"\nscope: layer\n").unwrap();

        let settings = Settings::load(&LiveFileSystem, &dir).unwrap();
        assert_eq!(settings.prefix, "4401");
        assert_eq!(settings.scope, Scope::Layer);
        assert_eq!(settings.field, "BSM");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn out_of_range_length_is_rejected() {
        let dir = temp_workspace("uidgen_settings_range");
        std::fs::write(dir.join(SETTINGS_FILE), "length: 40\n").unwrap();

        let err = Settings::load(&LiveFileSystem, &dir).unwrap_err();
        assert!(err.contains("outside 10..=30"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = temp_workspace("uidgen_settings_unknown");
        std::fs::write(dir.join(SETTINGS_FILE), "prefx: \"1\"\n").unwrap();

        assert!(Settings::load(&LiveFileSystem, &dir).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn check_length_bounds() {
        assert!(check_length(10).is_ok());
        assert!(check_length(30).is_ok());
        assert!(check_length(9).is_err());
        assert!(check_length(31).is_err());
    }
}
