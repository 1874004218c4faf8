//! VibeBuff Arena - Battle and progression orchestrator
//!
//! The arena wires the pure rules engine (`vibebuff-core`) to the store
//! (`vibebuff-db`): it reads the wall clock, runs simulations against the
//! tool catalog, persists outcomes, credits counters and XP, and runs the
//! achievement unlock check. It is the only layer that logs (`tracing`)
//! and the only layer that knows what time it is.

mod arena;
mod config;
mod error;

pub use arena::{ActionReport, Arena, BattleReport, BootstrapReport, ToolBattleStats};
pub use config::ArenaConfig;
pub use error::{Error, Result};
