//! In-memory layer host.
//!
//! Holds layers as plain vectors with a staged copy per open edit session,
//! which is how desktop hosts buffer edits until commit. Used as the test
//! harness for the assigner and for embedding without a real host.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use crate::ports::{FeatureId, HostError, LayerHost, LayerId, LayerInfo};

#[derive(Debug, Clone, Default)]
struct LayerData {
    fields: Vec<String>,
    features: Vec<(FeatureId, BTreeMap<String, String>)>,
    /// Feature id to index in `features`; the first occurrence wins.
    positions: BTreeMap<FeatureId, usize>,
}

impl LayerData {
    fn new(features: impl IntoIterator<Item = FeatureId>) -> Self {
        let features: Vec<_> = features.into_iter().map(|f| (f, BTreeMap::new())).collect();
        let mut positions = BTreeMap::new();
        for (index, (id, _)) in features.iter().enumerate() {
            positions.entry(*id).or_insert(index);
        }
        Self { fields: Vec::new(), features, positions }
    }

    fn attributes(&self, feature: FeatureId) -> Option<&BTreeMap<String, String>> {
        self.positions.get(&feature).map(|&index| &self.features[index].1)
    }

    fn attributes_mut(&mut self, feature: FeatureId) -> Option<&mut BTreeMap<String, String>> {
        let index = *self.positions.get(&feature)?;
        Some(&mut self.features[index].1)
    }
}

#[derive(Debug)]
struct MemoryLayer {
    info: LayerInfo,
    committed: LayerData,
    staged: Option<LayerData>,
}

impl MemoryLayer {
    fn current(&self) -> &LayerData {
        self.staged.as_ref().unwrap_or(&self.committed)
    }

    fn staged_mut(&mut self) -> Result<&mut LayerData, HostError> {
        let id = &self.info.id;
        self.staged.as_mut().ok_or_else(|| format!("layer {id} is not editable").into())
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    layers: Vec<MemoryLayer>,
    mutations: usize,
}

impl MemoryState {
    fn layer(&self, id: &LayerId) -> Result<&MemoryLayer, HostError> {
        self.layers
            .iter()
            .find(|l| &l.info.id == id)
            .ok_or_else(|| format!("unknown layer: {id}").into())
    }

    fn layer_mut(&mut self, id: &LayerId) -> Result<&mut MemoryLayer, HostError> {
        self.layers
            .iter_mut()
            .find(|l| &l.info.id == id)
            .ok_or_else(|| format!("unknown layer: {id}").into())
    }
}

/// Layer host backed entirely by memory. Layer ids equal layer names.
#[derive(Debug, Default)]
pub struct MemoryHost {
    state: Mutex<MemoryState>,
}

impl MemoryHost {
    /// Creates a host with no layers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a layer whose features carry the given ids, in the given order.
    #[must_use]
    pub fn with_layer(self, name: &str, features: impl IntoIterator<Item = FeatureId>) -> Self {
        self.add_layer(name, features);
        self
    }

    /// Adds a layer and returns its handle.
    pub fn add_layer(
        &self,
        name: &str,
        features: impl IntoIterator<Item = FeatureId>,
    ) -> LayerId {
        let id = LayerId::new(name);
        let data = LayerData::new(features);
        let mut state = self.state.lock().expect("memory host lock poisoned");
        state.layers.push(MemoryLayer {
            info: LayerInfo { id: id.clone(), name: name.to_string() },
            committed: data,
            staged: None,
        });
        id
    }

    /// Committed value of one attribute, if set.
    #[must_use]
    pub fn attribute(&self, layer: &LayerId, feature: FeatureId, field: &str) -> Option<String> {
        let state = self.state.lock().expect("memory host lock poisoned");
        let layer = state.layer(layer).ok()?;
        layer.committed.attributes(feature).and_then(|attrs| attrs.get(field).cloned())
    }

    /// Committed field names of a layer, in creation order.
    #[must_use]
    pub fn fields(&self, layer: &LayerId) -> Vec<String> {
        let state = self.state.lock().expect("memory host lock poisoned");
        state.layer(layer).map(|l| l.committed.fields.clone()).unwrap_or_default()
    }

    /// Number of successful mutating calls (begin, add field, write, commit, rollback).
    #[must_use]
    pub fn mutation_count(&self) -> usize {
        self.state.lock().expect("memory host lock poisoned").mutations
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>, HostError> {
        self.state.lock().map_err(|_| "memory host lock poisoned".into())
    }
}

impl LayerHost for MemoryHost {
    fn enumerate_layers(&self) -> Result<Vec<LayerInfo>, HostError> {
        Ok(self.lock()?.layers.iter().map(|l| l.info.clone()).collect())
    }

    fn field_names(&self, layer: &LayerId) -> Result<BTreeSet<String>, HostError> {
        let state = self.lock()?;
        Ok(state.layer(layer)?.current().fields.iter().cloned().collect())
    }

    fn is_editable(&self, layer: &LayerId) -> Result<bool, HostError> {
        Ok(self.lock()?.layer(layer)?.staged.is_some())
    }

    fn begin_edit(&self, layer: &LayerId) -> Result<(), HostError> {
        let mut state = self.lock()?;
        let entry = state.layer_mut(layer)?;
        if entry.staged.is_some() {
            return Err(format!("layer {layer} is already editable").into());
        }
        entry.staged = Some(entry.committed.clone());
        state.mutations += 1;
        Ok(())
    }

    fn add_text_field(&self, layer: &LayerId, name: &str) -> Result<(), HostError> {
        let mut state = self.lock()?;
        let staged = state.layer_mut(layer)?.staged_mut()?;
        if staged.fields.iter().any(|f| f == name) {
            return Err(format!("field {name} already exists on {layer}").into());
        }
        staged.fields.push(name.to_string());
        state.mutations += 1;
        Ok(())
    }

    fn iterate_features(&self, layer: &LayerId) -> Result<Vec<FeatureId>, HostError> {
        let state = self.lock()?;
        Ok(state.layer(layer)?.current().features.iter().map(|(id, _)| *id).collect())
    }

    fn write_attribute(
        &self,
        layer: &LayerId,
        feature: FeatureId,
        field: &str,
        value: &str,
    ) -> Result<(), HostError> {
        let mut state = self.lock()?;
        let staged = state.layer_mut(layer)?.staged_mut()?;
        if !staged.fields.iter().any(|f| f == field) {
            return Err(format!("no field {field} on {layer}").into());
        }
        let attrs = staged
            .attributes_mut(feature)
            .ok_or_else(|| format!("no feature {feature} on {layer}"))?;
        attrs.insert(field.to_string(), value.to_string());
        state.mutations += 1;
        Ok(())
    }

    fn commit_edit(&self, layer: &LayerId) -> Result<(), HostError> {
        let mut state = self.lock()?;
        let entry = state.layer_mut(layer)?;
        let staged = entry.staged.take().ok_or_else(|| format!("layer {layer} is not editable"))?;
        entry.committed = staged;
        state.mutations += 1;
        Ok(())
    }

    fn rollback_edit(&self, layer: &LayerId) -> Result<(), HostError> {
        let mut state = self.lock()?;
        let entry = state.layer_mut(layer)?;
        entry.staged.take().ok_or_else(|| format!("layer {layer} is not editable"))?;
        state.mutations += 1;
        Ok(())
    }
}
