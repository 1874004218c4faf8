//! VibeBuff Core - Battle and progression rules
//!
//! This crate provides the pure rules engine for the VibeBuff tools arena:
//! - Derived battle stats computed from a tool's real-world signals
//! - Power-level classification from the stat total
//! - Weighted battle scoring with a deterministic tie-break
//! - Achievement qualification against a static catalog
//! - The XP ledger formulas (level and title derivation)
//!
//! Everything here is deterministic and free of I/O: the same inputs always
//! produce the same outputs. Persistence lives in `vibebuff-db`, wall-clock
//! time in `vibebuff-arena` - functions that depend on "now" take an explicit
//! `now_ms` argument instead of reading a clock.

mod achievement;
mod battle;
mod error;
mod identity;
mod ledger;
mod notification;
mod profile;
mod stats;
mod tool;

pub use achievement::{
    qualifying, AchievementCategory, AchievementDef, ActionType, Rarity, Requirement,
};
pub use battle::{score, simulate_battle, BattleOutcome, BattleWeights, StatComparison};
pub use error::{Error, Result};
pub use identity::{AchievementId, BattleId, NotificationId, ToolId, UserId};
pub use ledger::{apply_xp, level_for_xp, title_for_level, XpGain, XP_PER_LEVEL};
pub use notification::{Notification, NotificationKind, NotificationMeta};
pub use profile::{ActionCounters, Profile};
pub use stats::{compute_stats, PowerLevel, StatKey, StatVector, STAT_MAX, STAT_MIN};
pub use tool::{PricingModel, ToolSnapshot};
