//! Adapters implementing the port traits.
//!
//! - `memory`: in-process layers, used by tests and embedders
//! - `geojson`: a directory of GeoJSON files, used by the CLI
//! - `live`: real disk access for file-backed hosts
//! - `recording`: wraps any host and journals every call

pub mod geojson;
pub mod live;
pub mod memory;
pub mod recording;
