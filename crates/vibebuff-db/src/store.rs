//! Database store wrapper.
//!
//! Every public mutation runs inside a single `rw_transaction`: either all
//! of its rows land or none do. native_db serializes writers, so
//! check-then-insert sequences inside one transaction cannot race.

use crate::error::{Error, Result};
use crate::models::*;
use native_db::transaction::RwTransaction;
use native_db::*;
use std::path::Path;
use std::sync::LazyLock;
use vibebuff_core::{
    apply_xp, qualifying, title_for_level, AchievementDef, ActionType, BattleId, BattleOutcome,
    NotificationId, NotificationKind, NotificationMeta, Profile, ToolId, ToolSnapshot, UserId,
    XpGain,
};

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models.define::<StoredTool>().unwrap();
    models.define::<StoredAchievementDef>().unwrap();
    models.define::<StoredProfile>().unwrap();
    models.define::<StoredUserAchievement>().unwrap();
    models.define::<StoredXpEvent>().unwrap();
    models.define::<StoredBattleRecord>().unwrap();
    models.define::<StoredToolRecord>().unwrap();
    models.define::<StoredNotification>().unwrap();
    models.define::<StoredSequence>().unwrap();
    models
});

/// Database store for the arena's persistent state.
pub struct Store {
    pub(crate) db: Database<'static>,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Builder::new()
            .create(&MODELS, path.as_ref())
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    // ========================================================================
    // Catalogs
    // ========================================================================

    /// Insert or replace a tool catalog row.
    pub fn upsert_tool(&self, tool: &ToolSnapshot) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredTool::from_snapshot(tool))?;
        rw.commit()?;
        Ok(())
    }

    /// Insert tools that are not yet present. Returns how many were added.
    pub fn seed_tools(&self, tools: &[ToolSnapshot]) -> Result<usize> {
        let rw = self.db.rw_transaction()?;
        let mut added = 0;
        for tool in tools {
            let existing: Option<StoredTool> =
                rw.get().primary(tool.id.as_str().to_string())?;
            if existing.is_none() {
                rw.insert(StoredTool::from_snapshot(tool))?;
                added += 1;
            }
        }
        rw.commit()?;
        Ok(added)
    }

    /// Load a tool by id.
    pub fn tool(&self, id: &ToolId) -> Result<Option<ToolSnapshot>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredTool> = r.get().primary(id.as_str().to_string())?;
        stored.map(|s| s.to_snapshot()).transpose()
    }

    /// Load the whole tool catalog.
    pub fn tools(&self) -> Result<Vec<ToolSnapshot>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredTool>()?;
        let iter = scan.all()?;
        let rows: std::result::Result<Vec<StoredTool>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;
        rows.iter().map(|s| s.to_snapshot()).collect()
    }

    /// Insert achievement definitions that are not yet present.
    /// Returns how many were added.
    pub fn seed_achievements(&self, defs: &[AchievementDef]) -> Result<usize> {
        let rw = self.db.rw_transaction()?;
        let mut added = 0;
        for def in defs {
            let existing: Option<StoredAchievementDef> =
                rw.get().primary(def.slug.as_str().to_string())?;
            if existing.is_none() {
                rw.insert(StoredAchievementDef::from_def(def))?;
                added += 1;
            }
        }
        rw.commit()?;
        Ok(added)
    }

    /// Load the full achievement catalog, in slug order.
    pub fn achievement_catalog(&self) -> Result<Vec<AchievementDef>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredAchievementDef>()?;
        let iter = scan.all()?;
        let rows: std::result::Result<Vec<StoredAchievementDef>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;
        rows.iter().map(|s| s.to_def()).collect()
    }

    // ========================================================================
    // Profiles and the XP ledger
    // ========================================================================

    /// Get or create a profile.
    ///
    /// First creation also emits the welcome notification, in the same
    /// transaction as the profile row. A later call with a new username
    /// updates it; everything else is left untouched.
    pub fn enroll(
        &self,
        user: &UserId,
        username: Option<&str>,
        now_ms: i64,
    ) -> Result<Profile> {
        let rw = self.db.rw_transaction()?;
        let existing: Option<StoredProfile> = rw.get().primary(user.as_str().to_string())?;
        if let Some(mut stored) = existing {
            if let Some(name) = username {
                if stored.username.as_deref() != Some(name) {
                    stored.username = Some(name.to_string());
                    rw.upsert(stored.clone())?;
                }
            }
            rw.commit()?;
            return Ok(stored.to_profile());
        }

        let profile = Profile::new(user.clone(), username.map(str::to_string));
        rw.insert(StoredProfile::from_profile(&profile))?;
        push_notification(
            &rw,
            user,
            NotificationKind::Welcome,
            "Welcome to VibeBuff!",
            "Start your quest to discover the perfect tech stack. \
             Explore tools, run battles, and level up!",
            NotificationMeta {
                link: Some("/quest".to_string()),
                ..NotificationMeta::default()
            },
            now_ms,
        )?;
        rw.commit()?;
        Ok(profile)
    }

    /// Load a profile.
    pub fn profile(&self, user: &UserId) -> Result<Option<Profile>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredProfile> = r.get().primary(user.as_str().to_string())?;
        Ok(stored.map(|s| s.to_profile()))
    }

    /// Increment one progress counter, returning the new cumulative count.
    pub fn increment_action(&self, user: &UserId, action: ActionType) -> Result<u64> {
        let rw = self.db.rw_transaction()?;
        let stored: Option<StoredProfile> = rw.get().primary(user.as_str().to_string())?;
        let stored =
            stored.ok_or_else(|| Error::NotFound(format!("profile for user {}", user)))?;
        let mut profile = stored.to_profile();
        let count = profile.counters.increment(action);
        rw.upsert(StoredProfile::from_profile(&profile))?;
        rw.commit()?;
        Ok(count)
    }

    /// Award XP to a user.
    ///
    /// Updates the ledger (xp, level, title in lockstep), appends an XP
    /// activity log entry, and emits a level-up notification when the
    /// level changed - all in one transaction. Fails with `NotFound` if
    /// the profile does not exist; nothing is written in that case.
    pub fn award_xp(
        &self,
        user: &UserId,
        amount: u64,
        source: &str,
        description: Option<&str>,
        now_ms: i64,
    ) -> Result<XpGain> {
        let rw = self.db.rw_transaction()?;
        let gain = apply_xp_tx(&rw, user, amount, source, description, now_ms)?;
        rw.commit()?;
        Ok(gain)
    }

    // ========================================================================
    // Battles
    // ========================================================================

    /// Persist a completed battle.
    ///
    /// The record insert and both tools' win/loss counter bumps commit
    /// together, so aggregate queries never drift from the history.
    pub fn record_battle(
        &self,
        user: Option<&UserId>,
        outcome: &BattleOutcome,
        now_ms: i64,
    ) -> Result<BattleId> {
        let rw = self.db.rw_transaction()?;
        let id = next_id(&rw, SEQ_BATTLES)?;
        rw.insert(StoredBattleRecord::from_outcome(id, user, outcome, now_ms))?;

        let mut winner: StoredToolRecord = rw
            .get()
            .primary(outcome.winner.as_str().to_string())?
            .unwrap_or_else(|| StoredToolRecord::empty(outcome.winner.as_str()));
        winner.wins += 1;
        rw.upsert(winner)?;

        let mut loser: StoredToolRecord = rw
            .get()
            .primary(outcome.loser.as_str().to_string())?
            .unwrap_or_else(|| StoredToolRecord::empty(outcome.loser.as_str()));
        loser.losses += 1;
        rw.upsert(loser)?;

        rw.commit()?;
        Ok(BattleId::new(id))
    }

    // ========================================================================
    // Achievements
    // ========================================================================

    /// Unlock every qualifying achievement the user does not yet hold.
    ///
    /// For each newly qualified achievement this inserts the unlock row,
    /// awards its XP, appends the activity log entry, and emits the
    /// notifications - all in one transaction. Returns the newly unlocked
    /// definitions; an empty list means nothing new qualified, which is
    /// the normal result of a repeated call.
    pub fn check_and_unlock(
        &self,
        user: &UserId,
        action: ActionType,
        count: u64,
        now_ms: i64,
    ) -> Result<Vec<AchievementDef>> {
        let rw = self.db.rw_transaction()?;

        let catalog: Vec<AchievementDef> = {
            let scan = rw.scan().primary::<StoredAchievementDef>()?;
            let iter = scan.all()?;
            let rows: std::result::Result<Vec<StoredAchievementDef>, _> = iter.collect();
            let rows = rows.map_err(|e| Error::Database(e.to_string()))?;
            rows.iter().map(|s| s.to_def()).collect::<Result<_>>()?
        };

        let mut unlocked = Vec::new();
        for def in qualifying(&catalog, action, count) {
            let key = StoredUserAchievement::compose_key(user, &def.slug);
            let existing: Option<StoredUserAchievement> = rw.get().primary(key.clone())?;
            if existing.is_some() {
                continue;
            }

            rw.insert(StoredUserAchievement {
                key,
                user_id: user.as_str().to_string(),
                achievement: def.slug.as_str().to_string(),
                unlocked_at: now_ms,
            })?;
            push_notification(
                &rw,
                user,
                NotificationKind::AchievementUnlocked,
                "Achievement Unlocked!",
                format!("{}: {}", def.name, def.description),
                NotificationMeta {
                    achievement: Some(def.slug.clone()),
                    xp_amount: Some(def.xp_reward),
                    ..NotificationMeta::default()
                },
                now_ms,
            )?;
            let detail = format!("Unlocked {}", def.name);
            apply_xp_tx(&rw, user, def.xp_reward, "achievement", Some(&detail), now_ms)?;
            unlocked.push(def.clone());
        }

        rw.commit()?;
        Ok(unlocked)
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Mark one notification read.
    pub fn mark_read(&self, id: NotificationId) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        let stored: Option<StoredNotification> = rw.get().primary(id.raw())?;
        let mut stored = stored.ok_or_else(|| Error::NotFound(format!("{}", id)))?;
        stored.is_read = true;
        rw.upsert(stored)?;
        rw.commit()?;
        Ok(())
    }

    /// Mark all of a user's notifications read. Returns how many changed.
    pub fn mark_all_read(&self, user: &UserId) -> Result<usize> {
        let rw = self.db.rw_transaction()?;
        let unread: Vec<StoredNotification> = {
            let scan = rw
                .scan()
                .secondary::<StoredNotification>(StoredNotificationKey::user_id)?;
            let iter = scan.start_with(user.as_str())?;
            let rows: std::result::Result<Vec<StoredNotification>, _> = iter.collect();
            rows.map_err(|e| Error::Database(e.to_string()))?
                .into_iter()
                .filter(|n| n.user_id == user.as_str() && !n.is_read)
                .collect()
        };
        let changed = unread.len();
        for mut notification in unread {
            notification.is_read = true;
            rw.upsert(notification)?;
        }
        rw.commit()?;
        Ok(changed)
    }
}

/// Hand out the next id from a named sequence, inside the caller's
/// transaction.
fn next_id(rw: &RwTransaction<'_>, name: &str) -> Result<u64> {
    let current: Option<StoredSequence> = rw.get().primary(name.to_string())?;
    let value = current.map(|s| s.value).unwrap_or(0) + 1;
    rw.upsert(StoredSequence {
        name: name.to_string(),
        value,
    })?;
    Ok(value)
}

/// Insert a notification row inside the caller's transaction.
fn push_notification(
    rw: &RwTransaction<'_>,
    user: &UserId,
    kind: NotificationKind,
    title: impl Into<String>,
    message: impl Into<String>,
    meta: NotificationMeta,
    now_ms: i64,
) -> Result<NotificationId> {
    let id = next_id(rw, SEQ_NOTIFICATIONS)?;
    rw.insert(StoredNotification::new(
        id, user, kind, title, message, meta, now_ms,
    ))?;
    Ok(NotificationId::new(id))
}

/// Apply an XP award inside the caller's transaction: ledger update,
/// activity log entry, and the level-up notification when one happened.
fn apply_xp_tx(
    rw: &RwTransaction<'_>,
    user: &UserId,
    amount: u64,
    source: &str,
    description: Option<&str>,
    now_ms: i64,
) -> Result<XpGain> {
    let stored: Option<StoredProfile> = rw.get().primary(user.as_str().to_string())?;
    let mut stored =
        stored.ok_or_else(|| Error::NotFound(format!("profile for user {}", user)))?;

    let gain = apply_xp(stored.xp, amount)?;
    stored.xp = gain.new_xp;
    stored.level = gain.new_level;
    stored.title = title_for_level(gain.new_level).to_string();
    rw.upsert(stored)?;

    let event_id = next_id(rw, SEQ_XP_EVENTS)?;
    rw.insert(StoredXpEvent {
        id: event_id,
        user_id: user.as_str().to_string(),
        amount,
        source: source.to_string(),
        description: description.map(str::to_string),
        created_at: now_ms,
    })?;

    if gain.leveled_up {
        push_notification(
            rw,
            user,
            NotificationKind::LevelUp,
            "Level Up!",
            format!(
                "You reached level {} - {}",
                gain.new_level,
                title_for_level(gain.new_level)
            ),
            NotificationMeta {
                level: Some(gain.new_level),
                ..NotificationMeta::default()
            },
            now_ms,
        )?;
    }

    Ok(gain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibebuff_core::{
        simulate_battle, AchievementCategory, AchievementId, BattleWeights, NotificationKind,
        PricingModel, Rarity, Requirement,
    };

    const NOW: i64 = 1_700_000_000_000;

    fn user(id: &str) -> UserId {
        UserId::new(id)
    }

    fn tool(id: &str, stars: u64) -> ToolSnapshot {
        let mut tool = ToolSnapshot::new(id, id, PricingModel::OpenSource);
        tool.github_stars = Some(stars);
        tool.open_source = true;
        tool.updated_at = NOW;
        tool
    }

    fn def(slug: &str, action: ActionType, threshold: u64, xp: u64) -> AchievementDef {
        AchievementDef {
            slug: AchievementId::new(slug),
            name: slug.to_string(),
            description: format!("Reach {} {}", threshold, action),
            icon: "trophy".to_string(),
            category: AchievementCategory::Mastery,
            requirement: Requirement { action, threshold },
            xp_reward: xp,
            rarity: Rarity::Common,
        }
    }

    fn battle_defs() -> Vec<AchievementDef> {
        vec![
            def("first-blood", ActionType::BattlesWon, 1, 100),
            def("battle-veteran", ActionType::BattlesWon, 5, 400),
            def("champion", ActionType::BattlesWon, 10, 1500),
        ]
    }

    #[test]
    fn test_enroll_creates_profile_and_welcome_once() {
        let store = Store::in_memory().unwrap();
        let alice = user("alice");

        let profile = store.enroll(&alice, Some("Alice"), NOW).unwrap();
        assert_eq!(profile.xp, 0);
        assert_eq!(profile.level, 1);

        let notifications = store.notifications(&alice, 10, false).unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].kind, NotificationKind::Welcome);

        // Second enroll is a read, not a second welcome.
        let again = store.enroll(&alice, Some("Alice"), NOW + 1).unwrap();
        assert_eq!(again, profile);
        assert_eq!(store.notifications(&alice, 10, false).unwrap().len(), 1);
    }

    #[test]
    fn test_award_xp_keeps_level_formula_in_lockstep() {
        let store = Store::in_memory().unwrap();
        let alice = user("alice");
        store.enroll(&alice, None, NOW).unwrap();

        for amount in [25, 999, 1, 2500] {
            let gain = store.award_xp(&alice, amount, "test", None, NOW).unwrap();
            let profile = store.profile(&alice).unwrap().unwrap();
            assert_eq!(profile.xp, gain.new_xp);
            assert_eq!(profile.level as u64, profile.xp / 1000 + 1);
            assert_eq!(profile.title, title_for_level(profile.level));
        }
    }

    #[test]
    fn test_award_xp_zero_rejected_and_unknown_user_not_found() {
        let store = Store::in_memory().unwrap();
        let alice = user("alice");
        store.enroll(&alice, None, NOW).unwrap();

        assert!(matches!(
            store.award_xp(&alice, 0, "test", None, NOW),
            Err(Error::Core(vibebuff_core::Error::ZeroXpAward))
        ));
        assert!(matches!(
            store.award_xp(&user("nobody"), 50, "test", None, NOW),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_level_up_emits_notification_and_logs_event() {
        let store = Store::in_memory().unwrap();
        let alice = user("alice");
        store.enroll(&alice, None, NOW).unwrap();

        let gain = store.award_xp(&alice, 1050, "battle", None, NOW).unwrap();
        assert!(gain.leveled_up);
        assert_eq!(gain.new_level, 2);

        let kinds: Vec<_> = store
            .notifications(&alice, 10, false)
            .unwrap()
            .into_iter()
            .map(|n| n.kind)
            .collect();
        assert!(kinds.contains(&NotificationKind::LevelUp));

        let events = store.xp_events(&alice, 10).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].amount, 1050);
        assert_eq!(events[0].source, "battle");
    }

    #[test]
    fn test_record_battle_updates_counters_atomically() {
        let store = Store::in_memory().unwrap();
        let alice = user("alice");
        let a = tool("alpha", 50_000);
        let b = tool("beta", 200);

        let outcome = simulate_battle(&a, &b, &BattleWeights::default(), NOW).unwrap();
        let id = store.record_battle(Some(&alice), &outcome, NOW).unwrap();
        assert_eq!(id.raw(), 1);
        store.record_battle(None, &outcome, NOW + 1).unwrap();

        let standings = store.battle_leaderboard(10).unwrap();
        assert_eq!(standings[0].tool, a.id);
        assert_eq!(standings[0].wins, 2);
        assert_eq!(standings[0].losses, 0);
        assert_eq!(standings[1].tool, b.id);
        assert_eq!(standings[1].losses, 2);

        let history = store.battle_history(&alice, 10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].winner, a.id);
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let store = Store::in_memory().unwrap();
        let alice = user("alice");
        store.enroll(&alice, None, NOW).unwrap();
        store.seed_achievements(&battle_defs()).unwrap();

        let first = store
            .check_and_unlock(&alice, ActionType::BattlesWon, 1, NOW)
            .unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].slug.as_str(), "first-blood");

        let second = store
            .check_and_unlock(&alice, ActionType::BattlesWon, 1, NOW)
            .unwrap();
        assert!(second.is_empty());

        // XP granted exactly once.
        let profile = store.profile(&alice).unwrap().unwrap();
        assert_eq!(profile.xp, 100);
    }

    #[test]
    fn test_unlock_fans_out_across_tiers() {
        let store = Store::in_memory().unwrap();
        let alice = user("alice");
        store.enroll(&alice, None, NOW).unwrap();
        store.seed_achievements(&battle_defs()).unwrap();

        let unlocked = store
            .check_and_unlock(&alice, ActionType::BattlesWon, 10, NOW)
            .unwrap();
        assert_eq!(unlocked.len(), 3);

        let profile = store.profile(&alice).unwrap().unwrap();
        assert_eq!(profile.xp, 2000);
        assert_eq!(profile.level, 3);

        // One unlock notification per achievement plus the level-ups.
        let unlock_count = store
            .notifications(&alice, 20, false)
            .unwrap()
            .into_iter()
            .filter(|n| n.kind == NotificationKind::AchievementUnlocked)
            .count();
        assert_eq!(unlock_count, 3);
    }

    #[test]
    fn test_unlock_without_profile_fails_atomically() {
        let store = Store::in_memory().unwrap();
        store.seed_achievements(&battle_defs()).unwrap();
        let ghost = user("ghost");

        let err = store
            .check_and_unlock(&ghost, ActionType::BattlesWon, 1, NOW)
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        // The failed transaction left no unlock row behind.
        assert!(store.user_achievements(&ghost).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_action_matches_nothing() {
        let store = Store::in_memory().unwrap();
        let alice = user("alice");
        store.enroll(&alice, None, NOW).unwrap();
        store.seed_achievements(&battle_defs()).unwrap();

        let unlocked = store
            .check_and_unlock(&alice, ActionType::PartiesJoined, 99, NOW)
            .unwrap();
        assert!(unlocked.is_empty());
    }

    #[test]
    fn test_seed_achievements_is_idempotent() {
        let store = Store::in_memory().unwrap();
        assert_eq!(store.seed_achievements(&battle_defs()).unwrap(), 3);
        assert_eq!(store.seed_achievements(&battle_defs()).unwrap(), 0);
        assert_eq!(store.achievement_catalog().unwrap().len(), 3);
    }

    #[test]
    fn test_mark_read() {
        let store = Store::in_memory().unwrap();
        let alice = user("alice");
        store.enroll(&alice, None, NOW).unwrap();
        store.award_xp(&alice, 1500, "test", None, NOW).unwrap();

        assert_eq!(store.unread_count(&alice).unwrap(), 2);

        let first = store.notifications(&alice, 1, true).unwrap().remove(0);
        store.mark_read(first.id).unwrap();
        assert_eq!(store.unread_count(&alice).unwrap(), 1);

        assert_eq!(store.mark_all_read(&alice).unwrap(), 1);
        assert_eq!(store.unread_count(&alice).unwrap(), 0);
        assert_eq!(store.mark_all_read(&alice).unwrap(), 0);
    }

    #[test]
    fn test_increment_action() {
        let store = Store::in_memory().unwrap();
        let alice = user("alice");
        store.enroll(&alice, None, NOW).unwrap();

        assert_eq!(
            store.increment_action(&alice, ActionType::ToolsViewed).unwrap(),
            1
        );
        assert_eq!(
            store.increment_action(&alice, ActionType::ToolsViewed).unwrap(),
            2
        );
        let profile = store.profile(&alice).unwrap().unwrap();
        assert_eq!(profile.counters.tools_viewed, 2);
    }
}
