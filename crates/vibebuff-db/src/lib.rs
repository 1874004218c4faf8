//! VibeBuff DB - Persistence layer using native_db
//!
//! Provides transactional storage for:
//! - The tool catalog (read-mostly, seeded from content files)
//! - The achievement catalog (immutable after seeding)
//! - User profiles: the XP ledger plus per-action progress counters
//! - Battle records and the per-tool win/loss aggregates
//! - Achievement unlocks, the XP activity log, and notifications
//!
//! Every multi-row mutation (battle insert + counter bumps, achievement
//! unlock + XP award + notifications) happens inside a single
//! `rw_transaction`, so partial effects are never visible and concurrent
//! writers serialize on the database's single-writer lock.

mod error;
mod models;
mod queries;
mod store;

pub use error::{Error, Result};
pub use models::{BattleRecord, StoredXpEvent};
pub use queries::{ToolStanding, UnlockedAchievement};
pub use store::Store;
