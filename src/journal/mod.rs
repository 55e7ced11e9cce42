//! Journal of layer host interactions.
//!
//! Every call the assigner makes against a host can be captured and written
//! out as YAML, giving an audit trail of exactly which layers were opened,
//! which fields were added and which values were written.

pub mod format;
pub mod recorder;
pub mod session;

pub use format::{Interaction, Journal};
pub use recorder::JournalRecorder;
pub use session::JournalSession;
