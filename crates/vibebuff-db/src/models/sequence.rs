//! Monotonic id sequences.
//!
//! native_db has no auto-increment; each named sequence is a single row
//! bumped inside the same transaction as the insert that consumes the id.

use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};

/// Sequence name for battle record ids.
pub const SEQ_BATTLES: &str = "battles";
/// Sequence name for notification ids.
pub const SEQ_NOTIFICATIONS: &str = "notifications";
/// Sequence name for XP activity log ids.
pub const SEQ_XP_EVENTS: &str = "xp_events";

/// A named monotonic counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 9, version = 1)]
#[native_db]
pub struct StoredSequence {
    /// Primary key - sequence name.
    #[primary_key]
    pub name: String,
    /// Last value handed out.
    pub value: u64,
}
