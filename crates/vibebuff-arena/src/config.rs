//! Arena configuration

use serde::{Deserialize, Serialize};

/// Configuration for arena policy knobs
///
/// # Example
///
/// ```
/// use vibebuff_arena::ArenaConfig;
///
/// let config = ArenaConfig::default();
/// assert_eq!(config.battle_xp_reward(), 25);
///
/// let config = ArenaConfig::default().with_battle_xp_reward(0);
/// assert_eq!(config.battle_xp_reward(), 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// XP granted to the initiating user for every saved battle,
    /// win or lose. `0` disables the reward.
    battle_xp_reward: u64,

    /// Default row cap for history queries. Clamped to at least 1.
    history_limit: usize,
}

impl ArenaConfig {
    /// Set the per-battle XP reward
    pub fn with_battle_xp_reward(mut self, amount: u64) -> Self {
        self.battle_xp_reward = amount;
        self
    }

    /// Set the history query row cap, clamped to at least 1
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    /// XP granted per saved battle
    pub fn battle_xp_reward(&self) -> u64 {
        self.battle_xp_reward
    }

    /// Row cap for history queries
    pub fn history_limit(&self) -> usize {
        self.history_limit
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            battle_xp_reward: 25,
            history_limit: 20,
        }
    }
}
