//! Port traits defining external boundaries.
//!
//! The assigner only ever talks to a [`LayerHost`]; file-backed hosts reach
//! the disk through a [`FileSystem`]. Implementations live in `src/adapters/`.

pub mod filesystem;
pub mod layers;

pub use filesystem::FileSystem;
pub use layers::{FeatureId, HostError, LayerHost, LayerId, LayerInfo};
