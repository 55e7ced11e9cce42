//! Service context bundling the port trait objects a command needs.

use std::path::{Path, PathBuf};

use crate::adapters::geojson::GeoJsonWorkspace;
use crate::adapters::live::LiveFileSystem;
use crate::adapters::recording::RecordingHost;
use crate::journal::JournalSession;
use crate::ports::{FileSystem, LayerHost};

/// Bundles the host and filesystem ports.
///
/// Constructors wire up different adapters: a live GeoJSON workspace, the
/// same workspace behind a journaling wrapper, or any injected host.
pub struct ServiceContext {
    /// Layer host the assigner edits.
    pub host: Box<dyn LayerHost>,
    /// Filesystem for reading workspace settings.
    pub fs: Box<dyn FileSystem>,
}

impl ServiceContext {
    /// Creates a context over the GeoJSON workspace at `workspace`.
    #[must_use]
    pub fn live(workspace: &Path) -> Self {
        Self {
            host: Box::new(GeoJsonWorkspace::new(Box::new(LiveFileSystem), workspace)),
            fs: Box::new(LiveFileSystem),
        }
    }

    /// Creates a live context whose host calls are journaled to `journal`.
    ///
    /// The returned session must be finished after the context is dropped.
    #[must_use]
    pub fn recording_at(workspace: &Path, journal: PathBuf) -> (Self, JournalSession) {
        let name = format!("uidgen {}", workspace.display());
        let session = JournalSession::new(journal, name);
        let ctx = Self::live(workspace);
        let host = RecordingHost::new(ctx.host, session.recorder());
        (Self { host: Box::new(host), fs: ctx.fs }, session)
    }

    /// Creates a context around an injected host, e.g. an embedding application's layers.
    #[must_use]
    pub fn with_host(host: Box<dyn LayerHost>, fs: Box<dyn FileSystem>) -> Self {
        Self { host, fs }
    }
}
