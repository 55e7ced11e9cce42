//! Recording wrapper for the `LayerHost` port.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::journal::JournalRecorder;
use crate::ports::{FeatureId, HostError, LayerHost, LayerId, LayerInfo};

/// Journals every host call while delegating to an inner host.
pub struct RecordingHost {
    inner: Box<dyn LayerHost>,
    recorder: Arc<Mutex<JournalRecorder>>,
}

impl RecordingHost {
    /// Wraps `inner`, appending each call to `recorder`.
    pub fn new(inner: Box<dyn LayerHost>, recorder: Arc<Mutex<JournalRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct NoInput {}

#[derive(Serialize)]
struct LayerInput<'a> {
    layer: &'a LayerId,
}

#[derive(Serialize)]
struct FieldInput<'a> {
    layer: &'a LayerId,
    name: &'a str,
}

#[derive(Serialize)]
struct WriteInput<'a> {
    layer: &'a LayerId,
    feature: FeatureId,
    field: &'a str,
    value: &'a str,
}

impl LayerHost for RecordingHost {
    fn enumerate_layers(&self) -> Result<Vec<LayerInfo>, HostError> {
        let result = self.inner.enumerate_layers();
        record_result(&self.recorder, "enumerate_layers", &NoInput {}, &result);
        result
    }

    fn field_names(&self, layer: &LayerId) -> Result<BTreeSet<String>, HostError> {
        let result = self.inner.field_names(layer);
        record_result(&self.recorder, "field_names", &LayerInput { layer }, &result);
        result
    }

    fn is_editable(&self, layer: &LayerId) -> Result<bool, HostError> {
        let result = self.inner.is_editable(layer);
        record_result(&self.recorder, "is_editable", &LayerInput { layer }, &result);
        result
    }

    fn begin_edit(&self, layer: &LayerId) -> Result<(), HostError> {
        let result = self.inner.begin_edit(layer);
        record_result(&self.recorder, "begin_edit", &LayerInput { layer }, &result);
        result
    }

    fn add_text_field(&self, layer: &LayerId, name: &str) -> Result<(), HostError> {
        let result = self.inner.add_text_field(layer, name);
        record_result(&self.recorder, "add_text_field", &FieldInput { layer, name }, &result);
        result
    }

    fn iterate_features(&self, layer: &LayerId) -> Result<Vec<FeatureId>, HostError> {
        let result = self.inner.iterate_features(layer);
        record_result(&self.recorder, "iterate_features", &LayerInput { layer }, &result);
        result
    }

    fn write_attribute(
        &self,
        layer: &LayerId,
        feature: FeatureId,
        field: &str,
        value: &str,
    ) -> Result<(), HostError> {
        let result = self.inner.write_attribute(layer, feature, field, value);
        let input = WriteInput { layer, feature, field, value };
        record_result(&self.recorder, "write_attribute", &input, &result);
        result
    }

    fn commit_edit(&self, layer: &LayerId) -> Result<(), HostError> {
        let result = self.inner.commit_edit(layer);
        record_result(&self.recorder, "commit_edit", &LayerInput { layer }, &result);
        result
    }

    fn rollback_edit(&self, layer: &LayerId) -> Result<(), HostError> {
        let result = self.inner.rollback_edit(layer);
        record_result(&self.recorder, "rollback_edit", &LayerInput { layer }, &result);
        result
    }
}
