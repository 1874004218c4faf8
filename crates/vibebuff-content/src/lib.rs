//! VibeBuff Content - RON catalogs
//!
//! Static configuration data for the arena, shipped as versioned RON
//! files instead of executable seed code:
//! - The achievement catalog (slugs, requirements, XP rewards)
//! - A starter tool catalog for demos and tests
//!
//! `Loader` reads catalog files from disk; [`builtin`] returns the data
//! files compiled into this crate.

mod error;
mod loader;
mod schema;

pub use error::{Error, Result};
pub use loader::{builtin, Catalog, Loader};
pub use schema::{AchievementEntry, ToolEntry};
