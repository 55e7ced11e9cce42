//! Identifier assignment.
//!
//! Walks the selected layers in order, sorts each layer's features by id and
//! writes `prefix + zero-padded sequence` into the target field, one edit
//! session per layer.

pub mod error;
pub mod format;
pub(crate) mod session;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ports::{HostError, LayerHost, LayerId};

pub use error::{AssignError, HostOperation};
pub use format::{format_identifier, suffix_width};
use session::EditSession;

/// How far a sequence number stays unique.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// One counter runs across every selected layer.
    #[default]
    Global,
    /// Each layer restarts at 1.
    Layer,
}

impl Scope {
    /// Returns `true` for a single counter across all layers.
    #[must_use]
    pub fn is_global(self) -> bool {
        self == Self::Global
    }
}

/// One assignment run: what to write and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRequest {
    /// Attribute field receiving the identifiers; created as text if missing.
    pub field_name: String,
    /// Fixed leading part of every identifier.
    pub prefix: String,
    /// Target identifier length in characters.
    pub total_length: usize,
    /// Numbering scope.
    pub scope: Scope,
    /// Layers to process, in numbering order.
    pub layers: Vec<LayerId>,
}

impl AssignmentRequest {
    /// Checks the request before any layer is touched.
    ///
    /// # Errors
    ///
    /// Returns `EmptySelection`, `EmptyFieldName` or `InvalidLength`.
    pub fn validate(&self) -> Result<(), AssignError> {
        if self.layers.is_empty() {
            return Err(AssignError::EmptySelection);
        }
        self.validate_format()
    }

    /// Checks the field name and length only, ignoring the layer selection.
    ///
    /// # Errors
    ///
    /// Returns `EmptyFieldName` or `InvalidLength`.
    pub fn validate_format(&self) -> Result<(), AssignError> {
        if self.field_name.trim().is_empty() {
            return Err(AssignError::EmptyFieldName);
        }
        let prefix_len = self.prefix.chars().count();
        if self.total_length <= prefix_len {
            return Err(AssignError::InvalidLength { total_length: self.total_length, prefix_len });
        }
        Ok(())
    }

    /// Identifier the request gives to sequence number `seq`.
    #[must_use]
    pub fn identifier(&self, seq: u64) -> String {
        format_identifier(&self.prefix, self.total_length, seq)
    }
}

/// Totals for a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentResult {
    /// Features that received an identifier.
    pub updated_feature_count: usize,
    /// Layers committed.
    pub updated_layer_count: usize,
    /// Layers on which the target field had to be created.
    pub created_fields: Vec<LayerId>,
}

struct LayerOutcome {
    features: usize,
    created_field: bool,
}

/// Assigns identifiers to every feature of the requested layers.
///
/// The request is validated first; a rejected request leaves every layer
/// untouched. Layers are then processed one at a time, each inside its own
/// edit session. A host failure rolls back the failing layer and stops the
/// run; layers committed before it keep their identifiers.
///
/// # Errors
///
/// Returns a precondition error for an invalid request, or
/// [`AssignError::Host`] when a host call fails.
pub fn assign(
    host: &dyn LayerHost,
    request: &AssignmentRequest,
) -> Result<AssignmentResult, AssignError> {
    request.validate()?;

    let mut result = AssignmentResult::default();
    let mut next_global: u64 = 1;

    for layer in &request.layers {
        let start = if request.scope.is_global() { next_global } else { 1 };
        let outcome = assign_layer(host, layer, request, start).map_err(|(operation, source)| {
            AssignError::Host {
                layer: layer.clone(),
                operation,
                committed_layers: result.updated_layer_count,
                source,
            }
        })?;

        next_global = start + outcome.features as u64;
        result.updated_feature_count += outcome.features;
        result.updated_layer_count += 1;
        if outcome.created_field {
            result.created_fields.push(layer.clone());
        }
    }

    info!(
        features = result.updated_feature_count,
        layers = result.updated_layer_count,
        "identifiers assigned"
    );
    Ok(result)
}

fn assign_layer(
    host: &dyn LayerHost,
    layer: &LayerId,
    request: &AssignmentRequest,
    start: u64,
) -> Result<LayerOutcome, (HostOperation, HostError)> {
    let at = |operation: HostOperation| move |err: HostError| (operation, err);

    let session = EditSession::open(host, layer)?;

    let fields = host.field_names(layer).map_err(at(HostOperation::ReadFields))?;
    let created_field = !fields.contains(&request.field_name);
    if created_field {
        host.add_text_field(layer, &request.field_name).map_err(at(HostOperation::AddField))?;
        debug!(layer = %layer, field = %request.field_name, "added text field");
    }

    let mut features = host.iterate_features(layer).map_err(at(HostOperation::ReadFeatures))?;
    features.sort();

    for (seq, feature) in (start..).zip(&features) {
        let value = request.identifier(seq);
        host.write_attribute(layer, *feature, &request.field_name, &value)
            .map_err(at(HostOperation::WriteAttribute))?;
    }

    session.commit().map_err(at(HostOperation::Commit))?;
    debug!(layer = %layer, features = features.len(), first = start, "layer committed");

    Ok(LayerOutcome { features: features.len(), created_field })
}
