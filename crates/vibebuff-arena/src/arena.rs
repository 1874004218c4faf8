//! Arena - battle and progression coordinator
//!
//! Owns the store and exposes the user-facing operations: per-tool battle
//! stats, battle simulation, battle saves with their progression side
//! effects, and generic action recording with the unlock check.

use crate::config::ArenaConfig;
use crate::error::{Error, Result};
use chrono::Utc;
use tracing::{debug, info};
use vibebuff_content::Catalog;
use vibebuff_core::{
    compute_stats, simulate_battle, AchievementDef, ActionType, BattleId, BattleOutcome,
    BattleWeights, PowerLevel, Profile, StatVector, ToolId, ToolSnapshot, UserId, XpGain,
};
use vibebuff_db::{BattleRecord, Store};

/// Stats card for one tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolBattleStats {
    pub tool: ToolSnapshot,
    pub stats: StatVector,
    pub total_power: u32,
    pub power_level: PowerLevel,
}

/// What happened when a battle was saved
#[derive(Debug, Clone)]
pub struct BattleReport {
    pub id: BattleId,
    /// XP credited to the initiating user, if any
    pub xp: Option<XpGain>,
    /// Achievements this save newly unlocked
    pub unlocked: Vec<AchievementDef>,
}

/// What happened when an action was recorded
#[derive(Debug, Clone)]
pub struct ActionReport {
    /// New cumulative count for the action
    pub count: u64,
    /// Achievements this action newly unlocked
    pub unlocked: Vec<AchievementDef>,
}

/// Result of seeding the catalogs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    pub tools_added: usize,
    pub achievements_added: usize,
}

/// Battle and progression coordinator
///
/// The only layer that reads the wall clock: every store call receives a
/// timestamp captured once per operation, and the pure core functions
/// stay reproducible under a pinned clock in tests.
pub struct Arena {
    store: Store,
    config: ArenaConfig,
}

impl Arena {
    /// Create an arena with default configuration
    pub fn new(store: Store) -> Self {
        Self {
            store,
            config: ArenaConfig::default(),
        }
    }

    /// Create an arena with a specific configuration
    pub fn with_config(store: Store, config: ArenaConfig) -> Self {
        Self { store, config }
    }

    /// The underlying store, for read-side queries
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The active configuration
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Seed the tool and achievement catalogs from loaded content.
    /// Already-present entries are left untouched.
    pub fn bootstrap(&self, catalog: &Catalog) -> Result<BootstrapReport> {
        let tools_added = self.store.seed_tools(&catalog.tools)?;
        let achievements_added = self.store.seed_achievements(&catalog.achievements)?;
        info!(tools_added, achievements_added, "catalogs seeded");
        Ok(BootstrapReport {
            tools_added,
            achievements_added,
        })
    }

    /// Seed from the catalog data compiled into `vibebuff-content`
    pub fn bootstrap_builtin(&self) -> Result<BootstrapReport> {
        let catalog = vibebuff_content::builtin(Self::now_ms())?;
        self.bootstrap(&catalog)
    }

    /// Get or create a user profile
    pub fn enroll(&self, user: &UserId, username: Option<&str>) -> Result<Profile> {
        Ok(self.store.enroll(user, username, Self::now_ms())?)
    }

    /// Stats card for one tool: derived stats, total power, and tier
    pub fn tool_stats(&self, id: &ToolId) -> Result<ToolBattleStats> {
        let tool = self
            .store
            .tool(id)?
            .ok_or_else(|| Error::ToolNotFound(id.clone()))?;
        let stats = compute_stats(&tool, Self::now_ms());
        let total_power = stats.total();
        Ok(ToolBattleStats {
            tool,
            stats,
            total_power,
            power_level: PowerLevel::classify(total_power),
        })
    }

    /// Simulate a battle between two catalog tools
    ///
    /// Read-only: displaying a result does not require saving it, and a
    /// later failed save does not invalidate the simulation.
    pub fn simulate(
        &self,
        tool1: &ToolId,
        tool2: &ToolId,
        weights: Option<BattleWeights>,
    ) -> Result<BattleOutcome> {
        let tool1 = self
            .store
            .tool(tool1)?
            .ok_or_else(|| Error::ToolNotFound(tool1.clone()))?;
        let tool2 = self
            .store
            .tool(tool2)?
            .ok_or_else(|| Error::ToolNotFound(tool2.clone()))?;
        let weights = weights.unwrap_or_default();
        Ok(simulate_battle(&tool1, &tool2, &weights, Self::now_ms())?)
    }

    /// Persist a battle outcome and apply its progression side effects.
    ///
    /// The record and the per-tool aggregates always land. For a signed-in
    /// initiating user (whose challenger is `tool1`) this also increments
    /// their battles_won or battles_lost counter, credits the configured
    /// battle XP (win or lose), and runs the achievement unlock check.
    pub fn save_battle(
        &self,
        user: Option<&UserId>,
        outcome: &BattleOutcome,
    ) -> Result<BattleReport> {
        let now_ms = Self::now_ms();
        let id = self.store.record_battle(user, outcome, now_ms)?;
        info!(battle = %id, winner = %outcome.winner, "battle saved");

        let Some(user) = user else {
            return Ok(BattleReport {
                id,
                xp: None,
                unlocked: Vec::new(),
            });
        };

        let won = outcome.winner == outcome.tool1;
        let action = if won {
            ActionType::BattlesWon
        } else {
            ActionType::BattlesLost
        };
        let count = self.store.increment_action(user, action)?;

        let xp = if self.config.battle_xp_reward() > 0 {
            let detail = format!("{} vs {}", outcome.tool1, outcome.tool2);
            Some(self.store.award_xp(
                user,
                self.config.battle_xp_reward(),
                "battle",
                Some(&detail),
                now_ms,
            )?)
        } else {
            None
        };

        let unlocked = self.store.check_and_unlock(user, action, count, now_ms)?;
        for def in &unlocked {
            debug!(user = %user, achievement = %def.slug, "achievement unlocked");
        }

        Ok(BattleReport { id, xp, unlocked })
    }

    /// Record one countable action and run the unlock check
    pub fn record_action(&self, user: &UserId, action: ActionType) -> Result<ActionReport> {
        let now_ms = Self::now_ms();
        let count = self.store.increment_action(user, action)?;
        let unlocked = self.store.check_and_unlock(user, action, count, now_ms)?;
        for def in &unlocked {
            debug!(user = %user, achievement = %def.slug, "achievement unlocked");
        }
        Ok(ActionReport { count, unlocked })
    }

    /// Record a tool page view, verifying the tool exists
    pub fn view_tool(&self, user: &UserId, tool: &ToolId) -> Result<ActionReport> {
        if self.store.tool(tool)?.is_none() {
            return Err(Error::ToolNotFound(tool.clone()));
        }
        self.record_action(user, ActionType::ToolsViewed)
    }

    /// A user's saved battles, newest first, capped by the configured limit
    pub fn battle_history(&self, user: &UserId) -> Result<Vec<BattleRecord>> {
        Ok(self
            .store
            .battle_history(user, self.config.history_limit())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibebuff_core::NotificationKind;

    fn arena() -> Arena {
        let arena = Arena::new(Store::in_memory().unwrap());
        arena.bootstrap_builtin().unwrap();
        arena
    }

    fn alice(arena: &Arena) -> UserId {
        let user = UserId::new("alice");
        arena.enroll(&user, Some("Alice")).unwrap();
        user
    }

    #[test]
    fn test_bootstrap_is_idempotent() {
        let arena = arena();
        let report = arena.bootstrap_builtin().unwrap();
        assert_eq!(report.tools_added, 0);
        assert_eq!(report.achievements_added, 0);
    }

    #[test]
    fn test_tool_stats_card() {
        let arena = arena();
        let card = arena.tool_stats(&ToolId::new("react")).unwrap();
        assert_eq!(card.total_power, card.stats.total());
        assert_eq!(card.power_level, PowerLevel::classify(card.total_power));
        assert!(matches!(
            arena.tool_stats(&ToolId::new("vaporware")),
            Err(Error::ToolNotFound(_))
        ));
    }

    #[test]
    fn test_winning_battle_credits_and_unlocks() {
        let arena = arena();
        let user = alice(&arena);

        // React (huge, fresh, featured) against Datadog (closed enterprise):
        // the challenger wins.
        let outcome = arena
            .simulate(&ToolId::new("react"), &ToolId::new("datadog"), None)
            .unwrap();
        assert_eq!(outcome.winner.as_str(), "react");

        let report = arena.save_battle(Some(&user), &outcome).unwrap();
        assert_eq!(report.xp.unwrap().new_xp, 25);
        assert_eq!(report.unlocked.len(), 1);
        assert_eq!(report.unlocked[0].slug.as_str(), "first-blood");

        let profile = arena.store().profile(&user).unwrap().unwrap();
        assert_eq!(profile.counters.battles_won, 1);
        assert_eq!(profile.counters.battles_lost, 0);
        assert_eq!(profile.xp, 125);

        let kinds: Vec<_> = arena
            .store()
            .notifications(&user, 10, false)
            .unwrap()
            .into_iter()
            .map(|n| n.kind)
            .collect();
        assert!(kinds.contains(&NotificationKind::AchievementUnlocked));
    }

    #[test]
    fn test_losing_battle_still_rewards_play() {
        let arena = arena();
        let user = alice(&arena);

        let outcome = arena
            .simulate(&ToolId::new("datadog"), &ToolId::new("react"), None)
            .unwrap();
        assert_eq!(outcome.winner.as_str(), "react");

        // Challenger (tool1 = datadog) lost, but the play reward stands.
        let report = arena.save_battle(Some(&user), &outcome).unwrap();
        assert_eq!(report.xp.unwrap().new_xp, 25);
        assert!(report.unlocked.is_empty());

        let profile = arena.store().profile(&user).unwrap().unwrap();
        assert_eq!(profile.counters.battles_won, 0);
        assert_eq!(profile.counters.battles_lost, 1);
    }

    #[test]
    fn test_zero_reward_config_disables_battle_xp() {
        let store = Store::in_memory().unwrap();
        let arena =
            Arena::with_config(store, ArenaConfig::default().with_battle_xp_reward(0));
        arena.bootstrap_builtin().unwrap();
        let user = alice(&arena);

        let outcome = arena
            .simulate(&ToolId::new("react"), &ToolId::new("datadog"), None)
            .unwrap();
        let report = arena.save_battle(Some(&user), &outcome).unwrap();
        assert!(report.xp.is_none());
        // The unlock path still awards achievement XP.
        assert_eq!(arena.store().profile(&user).unwrap().unwrap().xp, 100);
    }

    #[test]
    fn test_anonymous_battle_persists_without_progression() {
        let arena = arena();
        let outcome = arena
            .simulate(&ToolId::new("vite"), &ToolId::new("webpack"), None)
            .unwrap();

        let report = arena.save_battle(None, &outcome).unwrap();
        assert!(report.xp.is_none());
        assert!(report.unlocked.is_empty());

        let standings = arena.store().battle_leaderboard(10).unwrap();
        assert_eq!(standings.iter().map(|s| s.wins).sum::<u64>(), 1);
    }

    #[test]
    fn test_view_tool_fans_out_achievements() {
        let arena = arena();
        let user = alice(&arena);

        for _ in 0..9 {
            let report = arena.view_tool(&user, &ToolId::new("vite")).unwrap();
            assert!(report.unlocked.is_empty());
        }
        let report = arena.view_tool(&user, &ToolId::new("vite")).unwrap();
        assert_eq!(report.count, 10);
        assert_eq!(report.unlocked.len(), 1);
        assert_eq!(report.unlocked[0].slug.as_str(), "tool-scout");

        assert!(matches!(
            arena.view_tool(&user, &ToolId::new("vaporware")),
            Err(Error::ToolNotFound(_))
        ));
    }

    #[test]
    fn test_battle_history_respects_limit() {
        let store = Store::in_memory().unwrap();
        let arena = Arena::with_config(store, ArenaConfig::default().with_history_limit(2));
        arena.bootstrap_builtin().unwrap();
        let user = alice(&arena);

        let outcome = arena
            .simulate(&ToolId::new("vite"), &ToolId::new("jest"), None)
            .unwrap();
        for _ in 0..4 {
            arena.save_battle(Some(&user), &outcome).unwrap();
        }
        assert_eq!(arena.battle_history(&user).unwrap().len(), 2);
    }
}
