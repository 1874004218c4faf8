//! Error types for vibebuff-core

use crate::identity::ToolId;
use crate::stats::StatKey;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid weight for {stat}: {value} (must be finite and >= 0)")]
    InvalidWeight { stat: StatKey, value: f64 },

    #[error("a tool cannot battle itself: {0}")]
    SameTool(ToolId),

    #[error("XP award amount must be positive")]
    ZeroXpAward,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
