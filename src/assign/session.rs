//! Scoped edit session on a single layer.

use tracing::warn;

use super::error::HostOperation;
use crate::ports::{HostError, LayerHost, LayerId};

/// Keeps a layer editable for the duration of its processing.
///
/// Committing consumes the guard. Dropping it while still open (an early
/// return, or a failed commit) rolls the layer back so no edit session is
/// left dangling in the host.
pub(crate) struct EditSession<'a> {
    host: &'a dyn LayerHost,
    layer: &'a LayerId,
    open: bool,
}

impl<'a> EditSession<'a> {
    /// Makes the layer editable, reusing an edit session the host already has open.
    pub(crate) fn open(
        host: &'a dyn LayerHost,
        layer: &'a LayerId,
    ) -> Result<Self, (HostOperation, HostError)> {
        let editable =
            host.is_editable(layer).map_err(|e| (HostOperation::CheckEditable, e))?;
        if !editable {
            host.begin_edit(layer).map_err(|e| (HostOperation::BeginEdit, e))?;
        }
        Ok(Self { host, layer, open: true })
    }

    /// Commits staged changes. On failure the guard still rolls back when dropped.
    pub(crate) fn commit(mut self) -> Result<(), HostError> {
        self.host.commit_edit(self.layer)?;
        self.open = false;
        Ok(())
    }
}

impl Drop for EditSession<'_> {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        if let Err(err) = self.host.rollback_edit(self.layer) {
            warn!(layer = %self.layer, error = %err, "rollback after failed assignment also failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryHost;

    #[test]
    fn commit_closes_session() {
        let host = MemoryHost::new().with_layer("roads", [1, 2]);
        let layer = LayerId::new("roads");

        let session = EditSession::open(&host, &layer).unwrap();
        assert!(host.is_editable(&layer).unwrap());
        session.commit().unwrap();

        assert!(!host.is_editable(&layer).unwrap());
    }

    #[test]
    fn drop_without_commit_rolls_back() {
        let host = MemoryHost::new().with_layer("roads", [1]);
        let layer = LayerId::new("roads");

        {
            let _session = EditSession::open(&host, &layer).unwrap();
            host.add_text_field(&layer, "BSM").unwrap();
            host.write_attribute(&layer, 1, "BSM", "x").unwrap();
        }

        assert!(!host.is_editable(&layer).unwrap());
        assert!(!host.fields(&layer).contains(&"BSM".to_string()));
    }

    #[test]
    fn reuses_session_already_open() {
        let host = MemoryHost::new().with_layer("roads", [1]);
        let layer = LayerId::new("roads");
        host.begin_edit(&layer).unwrap();

        let session = EditSession::open(&host, &layer).unwrap();
        session.commit().unwrap();

        assert!(!host.is_editable(&layer).unwrap());
    }

    #[test]
    fn unknown_layer_reports_check_editable() {
        let host = MemoryHost::new();
        let layer = LayerId::new("missing");

        let Err((operation, _)) = EditSession::open(&host, &layer) else {
            panic!("expected failure for unknown layer");
        };
        assert_eq!(operation, HostOperation::CheckEditable);
    }
}
