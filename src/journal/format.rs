//! Journal data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single call made against the layer host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    /// Position in the journal, starting at 0.
    pub seq: u64,
    /// Host method invoked (e.g. `begin_edit`, `write_attribute`).
    pub method: String,
    /// Arguments passed to the host.
    pub input: serde_json::Value,
    /// Returned value, as `{"Ok": ..}` or `{"Err": message}` for fallible calls.
    pub output: serde_json::Value,
}

/// A complete journal for one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Journal {
    /// Human-readable run name.
    pub name: String,
    /// When the journal was written.
    pub recorded_at: DateTime<Utc>,
    /// Calls in the order they were made.
    pub interactions: Vec<Interaction>,
}

impl Journal {
    /// Interactions for one host method, in call order.
    pub fn calls<'a>(&'a self, method: &'a str) -> impl Iterator<Item = &'a Interaction> + 'a {
        self.interactions.iter().filter(move |i| i.method == method)
    }
}
