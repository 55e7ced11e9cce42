//! Journal session shared between a recording host and its owner.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::recorder::JournalRecorder;

/// Owns the journal for one run until every recording host is dropped.
pub struct JournalSession {
    recorder: Arc<Mutex<JournalRecorder>>,
}

impl JournalSession {
    /// Starts a journal that will be written to `path`.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self { recorder: Arc::new(Mutex::new(JournalRecorder::new(path, name))) }
    }

    /// Handle for a `RecordingHost`.
    #[must_use]
    pub fn recorder(&self) -> Arc<Mutex<JournalRecorder>> {
        Arc::clone(&self.recorder)
    }

    /// Writes the journal. All recorder handles must have been dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if a recording host is still alive or the file
    /// cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Journal is still in use by a recording host".to_string())?
            .into_inner()
            .map_err(|_| "Journal lock poisoned".to_string())?;
        recorder.finish().map_err(|e| format!("Failed to write journal: {e}"))
    }
}
