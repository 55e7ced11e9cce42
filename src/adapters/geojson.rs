//! GeoJSON workspace host.
//!
//! A workspace is a directory where every `*.geojson` file is one layer,
//! named after its file stem. Each file must hold a `FeatureCollection`.
//!
//! ```text
//! <workspace>/
//!   ├── parcels.geojson
//!   └── roads.geojson
//! ```
//!
//! Feature ids come from the features' own `id` members when every feature
//! has a distinct non-negative integer id; otherwise they are the zero-based
//! positions in the `features` array. An edit session loads the document
//! into memory, and commit writes it back through the `FileSystem` port.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde_json::{Map, Value};
use tracing::debug;

use crate::ports::{FeatureId, FileSystem, HostError, LayerHost, LayerId, LayerInfo};

const EXTENSION: &str = ".geojson";

/// One parsed layer file.
#[derive(Debug, Clone)]
struct LayerDocument {
    doc: Value,
    ids: Vec<FeatureId>,
    /// Position in the `features` array for each feature id.
    positions: BTreeMap<FeatureId, usize>,
    /// Union of property keys, plus fields added during the session.
    fields: BTreeSet<String>,
}

impl LayerDocument {
    fn parse(layer: &LayerId, text: &str) -> Result<Self, HostError> {
        let doc: Value = serde_json::from_str(text)
            .map_err(|e| format!("Failed to parse layer {layer}: {e}"))?;
        if doc.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
            return Err(format!("Layer {layer} is not a FeatureCollection").into());
        }
        let features = doc
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| format!("Layer {layer} has no features array"))?;
        let ids = feature_ids(features);
        let positions = ids.iter().enumerate().map(|(index, id)| (*id, index)).collect();
        let fields = features
            .iter()
            .filter_map(|f| f.get("properties").and_then(Value::as_object))
            .flat_map(|props| props.keys().cloned())
            .collect();
        Ok(Self { doc, ids, positions, fields })
    }

    fn features_mut(&mut self) -> Result<&mut Vec<Value>, HostError> {
        self.doc
            .get_mut("features")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| "features array missing".into())
    }

    fn field_names(&self) -> BTreeSet<String> {
        self.fields.clone()
    }

    fn add_text_field(&mut self, name: &str) -> Result<(), HostError> {
        for feature in self.features_mut()? {
            properties_mut(feature)?.entry(name.to_string()).or_insert(Value::Null);
        }
        self.fields.insert(name.to_string());
        Ok(())
    }

    fn write_attribute(
        &mut self,
        feature: FeatureId,
        field: &str,
        value: &str,
    ) -> Result<(), HostError> {
        if !self.fields.contains(field) {
            return Err(format!("no field {field}").into());
        }
        let index =
            *self.positions.get(&feature).ok_or_else(|| format!("no feature {feature}"))?;
        let target = self
            .features_mut()?
            .get_mut(index)
            .ok_or_else(|| format!("no feature {feature}"))?;
        properties_mut(target)?.insert(field.to_string(), Value::String(value.to_string()));
        Ok(())
    }

    fn to_text(&self) -> Result<String, HostError> {
        let mut text = serde_json::to_string_pretty(&self.doc)?;
        text.push('\n');
        Ok(text)
    }
}

fn feature_ids(features: &[Value]) -> Vec<FeatureId> {
    let own: Vec<FeatureId> =
        features.iter().filter_map(|f| f.get("id").and_then(Value::as_u64)).collect();
    let distinct: BTreeSet<&FeatureId> = own.iter().collect();
    if own.len() == features.len() && distinct.len() == own.len() {
        own
    } else {
        (0..features.len() as u64).collect()
    }
}

fn properties_mut(feature: &mut Value) -> Result<&mut Map<String, Value>, HostError> {
    let object = feature.as_object_mut().ok_or("feature is not a JSON object")?;
    let props = object.entry("properties").or_insert_with(|| Value::Object(Map::new()));
    if props.is_null() {
        *props = Value::Object(Map::new());
    }
    props.as_object_mut().ok_or_else(|| "feature properties are not an object".into())
}

/// Layer host over a directory of GeoJSON files.
///
/// All I/O goes through the `FileSystem` port so the workspace works with
/// the live disk and with in-memory trees.
pub struct GeoJsonWorkspace {
    fs: Box<dyn FileSystem>,
    root: PathBuf,
    sessions: Mutex<BTreeMap<LayerId, LayerDocument>>,
}

impl GeoJsonWorkspace {
    /// Opens the workspace rooted at `root`.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, root: &Path) -> Self {
        Self { fs, root: root.to_path_buf(), sessions: Mutex::new(BTreeMap::new()) }
    }

    fn layer_path(&self, layer: &LayerId) -> PathBuf {
        self.root.join(format!("{layer}{EXTENSION}"))
    }

    fn load(&self, layer: &LayerId) -> Result<LayerDocument, HostError> {
        let path = self.layer_path(layer);
        let text = self
            .fs
            .read_to_string(&path)
            .map_err(|e| format!("Failed to read layer {layer}: {e}"))?;
        LayerDocument::parse(layer, &text)
    }

    fn sessions(&self) -> Result<MutexGuard<'_, BTreeMap<LayerId, LayerDocument>>, HostError> {
        self.sessions.lock().map_err(|_| "workspace session lock poisoned".into())
    }

    /// Runs `read` against the staged document if a session is open, else a fresh load.
    fn with_current<T>(
        &self,
        layer: &LayerId,
        read: impl FnOnce(&LayerDocument) -> T,
    ) -> Result<T, HostError> {
        if let Some(doc) = self.sessions()?.get(layer) {
            return Ok(read(doc));
        }
        Ok(read(&self.load(layer)?))
    }

    fn with_staged<T>(
        &self,
        layer: &LayerId,
        edit: impl FnOnce(&mut LayerDocument) -> Result<T, HostError>,
    ) -> Result<T, HostError> {
        let mut sessions = self.sessions()?;
        let doc =
            sessions.get_mut(layer).ok_or_else(|| format!("layer {layer} is not editable"))?;
        edit(doc)
    }
}

impl LayerHost for GeoJsonWorkspace {
    fn enumerate_layers(&self) -> Result<Vec<LayerInfo>, HostError> {
        let entries = self
            .fs
            .list_dir(&self.root)
            .map_err(|e| format!("Failed to list workspace {}: {e}", self.root.display()))?;
        Ok(entries
            .into_iter()
            .filter_map(|name| name.strip_suffix(EXTENSION).map(String::from))
            .filter(|stem| !stem.is_empty())
            .map(|stem| LayerInfo { id: LayerId::new(stem.as_str()), name: stem })
            .collect())
    }

    fn field_names(&self, layer: &LayerId) -> Result<BTreeSet<String>, HostError> {
        self.with_current(layer, LayerDocument::field_names)
    }

    fn is_editable(&self, layer: &LayerId) -> Result<bool, HostError> {
        if self.sessions()?.contains_key(layer) {
            return Ok(true);
        }
        if self.fs.exists(&self.layer_path(layer)) {
            Ok(false)
        } else {
            Err(format!("unknown layer: {layer}").into())
        }
    }

    fn begin_edit(&self, layer: &LayerId) -> Result<(), HostError> {
        if self.sessions()?.contains_key(layer) {
            return Err(format!("layer {layer} is already editable").into());
        }
        let doc = self.load(layer)?;
        self.sessions()?.insert(layer.clone(), doc);
        debug!(layer = %layer, "edit session opened");
        Ok(())
    }

    fn add_text_field(&self, layer: &LayerId, name: &str) -> Result<(), HostError> {
        self.with_staged(layer, |doc| doc.add_text_field(name))
    }

    fn iterate_features(&self, layer: &LayerId) -> Result<Vec<FeatureId>, HostError> {
        self.with_current(layer, |doc| doc.ids.clone())
    }

    fn write_attribute(
        &self,
        layer: &LayerId,
        feature: FeatureId,
        field: &str,
        value: &str,
    ) -> Result<(), HostError> {
        self.with_staged(layer, |doc| {
            doc.write_attribute(feature, field, value)
                .map_err(|e| -> HostError { format!("layer {layer}: {e}").into() })
        })
    }

    fn commit_edit(&self, layer: &LayerId) -> Result<(), HostError> {
        let mut sessions = self.sessions()?;
        let doc =
            sessions.get(layer).ok_or_else(|| format!("layer {layer} is not editable"))?;
        let text = doc.to_text()?;
        self.fs
            .write(&self.layer_path(layer), &text)
            .map_err(|e| format!("Failed to write layer {layer}: {e}"))?;
        sessions.remove(layer);
        debug!(layer = %layer, "edit session committed");
        Ok(())
    }

    fn rollback_edit(&self, layer: &LayerId) -> Result<(), HostError> {
        if self.sessions()?.remove(layer).is_none() {
            return Err(format!("layer {layer} is not editable").into());
        }
        debug!(layer = %layer, "edit session rolled back");
        Ok(())
    }
}
