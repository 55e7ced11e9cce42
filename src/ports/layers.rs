//! Layer host port: the editing surface a GIS host exposes for vector layers.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Error type returned by host operations.
pub type HostError = Box<dyn std::error::Error + Send + Sync>;

/// Opaque handle naming a layer inside its host.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    /// Wraps a host-specific layer handle.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable integer identifier of a feature within its layer.
pub type FeatureId = u64;

/// A layer as listed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerInfo {
    /// Handle used for every other host call.
    pub id: LayerId,
    /// Display name shown to the user.
    pub name: String,
}

/// Capability interface over host-owned vector layers.
///
/// Layers belong to the host; implementations mutate them only between
/// `begin_edit` and `commit_edit` / `rollback_edit`. Callers must not drive
/// the same layer set from more than one place at a time.
pub trait LayerHost: Send + Sync {
    /// Lists the vector layers the host currently knows about, in host order.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot enumerate its layers.
    fn enumerate_layers(&self) -> Result<Vec<LayerInfo>, HostError>;

    /// Returns the attribute field names of a layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer is unknown or unreadable.
    fn field_names(&self, layer: &LayerId) -> Result<BTreeSet<String>, HostError>;

    /// Returns `true` while the layer has an open edit session.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer is unknown.
    fn is_editable(&self, layer: &LayerId) -> Result<bool, HostError>;

    /// Opens an edit session on the layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer is unknown or cannot be made editable.
    fn begin_edit(&self, layer: &LayerId) -> Result<(), HostError>;

    /// Adds a text-typed attribute field. Only valid inside an edit session.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer is not editable or the schema change fails.
    fn add_text_field(&self, layer: &LayerId, name: &str) -> Result<(), HostError>;

    /// Lists the identifiers of every feature in the layer.
    ///
    /// No ordering is promised; callers sort when order matters.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer is unknown or unreadable.
    fn iterate_features(&self, layer: &LayerId) -> Result<Vec<FeatureId>, HostError>;

    /// Sets one attribute value on one feature. Only valid inside an edit session.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer is not editable, or the feature or field
    /// does not exist.
    fn write_attribute(
        &self,
        layer: &LayerId,
        feature: FeatureId,
        field: &str,
        value: &str,
    ) -> Result<(), HostError>;

    /// Persists staged changes and closes the edit session.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer is not editable or persisting fails.
    fn commit_edit(&self, layer: &LayerId) -> Result<(), HostError>;

    /// Discards staged changes and closes the edit session.
    ///
    /// # Errors
    ///
    /// Returns an error if the layer is not editable.
    fn rollback_edit(&self, layer: &LayerId) -> Result<(), HostError>;
}
