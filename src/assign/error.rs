//! Errors raised by identifier assignment.

use thiserror::Error;

use crate::ports::{HostError, LayerId};

/// Host operation that failed while a layer was being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOperation {
    /// Checking whether the layer already has an open edit session.
    CheckEditable,
    /// Opening the edit session.
    BeginEdit,
    /// Reading the layer's field names.
    ReadFields,
    /// Adding the target text field.
    AddField,
    /// Listing the layer's features.
    ReadFeatures,
    /// Writing an identifier to a feature.
    WriteAttribute,
    /// Committing the edit session.
    Commit,
}

impl std::fmt::Display for HostOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::CheckEditable => "check editable",
            Self::BeginEdit => "begin edit",
            Self::ReadFields => "read fields",
            Self::AddField => "add field",
            Self::ReadFeatures => "read features",
            Self::WriteAttribute => "write attribute",
            Self::Commit => "commit",
        };
        f.write_str(name)
    }
}

/// Why an assignment request was rejected or stopped.
#[derive(Debug, Error)]
pub enum AssignError {
    /// No layers were selected.
    #[error("No layers selected.")]
    EmptySelection,

    /// The target field name is empty.
    #[error("Field name must not be empty.")]
    EmptyFieldName,

    /// The total length leaves no room for the numeric suffix.
    #[error(
        "Total length {total_length} must be greater than the prefix length {prefix_len}."
    )]
    InvalidLength {
        /// Requested identifier length.
        total_length: usize,
        /// Prefix length in characters.
        prefix_len: usize,
    },

    /// A host call failed; the layer's edit session was rolled back.
    #[error("Layer {layer}: {operation} failed: {source}")]
    Host {
        /// Layer being processed when the failure happened.
        layer: LayerId,
        /// Which host call failed.
        operation: HostOperation,
        /// Layers fully committed before this one.
        committed_layers: usize,
        /// Underlying host error.
        #[source]
        source: HostError,
    },
}

impl AssignError {
    /// Returns `true` for failures detected before any host mutation.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        !matches!(self, Self::Host { .. })
    }
}
