//! Error types for vibebuff-arena

use thiserror::Error;
use vibebuff_core::ToolId;

/// Result type for arena operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the arena
#[derive(Debug, Error)]
pub enum Error {
    /// Referenced tool is not in the catalog
    #[error("tool not found: {0}")]
    ToolNotFound(ToolId),

    /// Rule violation from the core engine
    #[error("core error: {0}")]
    Core(#[from] vibebuff_core::Error),

    /// Store failure
    #[error("database error: {0}")]
    Db(#[from] vibebuff_db::Error),

    /// Catalog data failure
    #[error("catalog error: {0}")]
    Content(#[from] vibebuff_content::Error),
}
