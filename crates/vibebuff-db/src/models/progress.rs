//! Progression models: profiles, unlocks, and the XP activity log.

use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};
use vibebuff_core::{AchievementId, ActionCounters, Profile, UserId};

/// Stored user profile: the XP ledger plus progress counters.
///
/// `level` and `title` are stored for query convenience but recomputed
/// from `xp` inside every writing transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 3, version = 1)]
#[native_db]
pub struct StoredProfile {
    /// Primary key - external user id.
    #[primary_key]
    pub user_id: String,
    /// Optional display name.
    pub username: Option<String>,
    /// XP balance (monotonic non-decreasing).
    pub xp: u64,
    /// Derived level, kept in lockstep with `xp`.
    pub level: u32,
    /// Derived title, kept in lockstep with `level`.
    pub title: String,
    pub tools_viewed: u64,
    pub battles_won: u64,
    pub battles_lost: u64,
    pub decks_created: u64,
    pub quests_completed: u64,
    pub votes_cast: u64,
    pub legendary_tools_collected: u64,
    pub parties_created: u64,
    pub parties_joined: u64,
    pub budget_decks_created: u64,
    pub oss_decks_created: u64,
}

impl StoredProfile {
    /// Create from a core Profile.
    pub fn from_profile(profile: &Profile) -> Self {
        let counters = profile.counters;
        Self {
            user_id: profile.id.as_str().to_string(),
            username: profile.username.clone(),
            xp: profile.xp,
            level: profile.level,
            title: profile.title.clone(),
            tools_viewed: counters.tools_viewed,
            battles_won: counters.battles_won,
            battles_lost: counters.battles_lost,
            decks_created: counters.decks_created,
            quests_completed: counters.quests_completed,
            votes_cast: counters.votes_cast,
            legendary_tools_collected: counters.legendary_tools_collected,
            parties_created: counters.parties_created,
            parties_joined: counters.parties_joined,
            budget_decks_created: counters.budget_decks_created,
            oss_decks_created: counters.oss_decks_created,
        }
    }

    /// Convert to a core Profile.
    pub fn to_profile(&self) -> Profile {
        Profile {
            id: UserId::new(self.user_id.clone()),
            username: self.username.clone(),
            xp: self.xp,
            level: self.level,
            title: self.title.clone(),
            counters: ActionCounters {
                tools_viewed: self.tools_viewed,
                battles_won: self.battles_won,
                battles_lost: self.battles_lost,
                decks_created: self.decks_created,
                quests_completed: self.quests_completed,
                votes_cast: self.votes_cast,
                legendary_tools_collected: self.legendary_tools_collected,
                parties_created: self.parties_created,
                parties_joined: self.parties_joined,
                budget_decks_created: self.budget_decks_created,
                oss_decks_created: self.oss_decks_created,
            },
        }
    }
}

/// One unlocked achievement for one user.
///
/// The primary key is the composite `"user/achievement"` string, so a
/// second unlock attempt for the same pair cannot create a second row -
/// this is the idempotency guard the unlock mutation relies on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 4, version = 1)]
#[native_db]
pub struct StoredUserAchievement {
    /// Primary key - `"user_id/achievement_slug"`.
    #[primary_key]
    pub key: String,
    /// External user id.
    #[secondary_key]
    pub user_id: String,
    /// Achievement slug.
    pub achievement: String,
    /// Unlock time (ms since epoch).
    pub unlocked_at: i64,
}

impl StoredUserAchievement {
    /// Composite primary key for a `(user, achievement)` pair.
    pub fn compose_key(user: &UserId, achievement: &AchievementId) -> String {
        format!("{}/{}", user.as_str(), achievement.as_str())
    }
}

/// One append-only XP activity log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 5, version = 1)]
#[native_db]
pub struct StoredXpEvent {
    /// Primary key - sequence-assigned id.
    #[primary_key]
    pub id: u64,
    /// External user id.
    #[secondary_key]
    pub user_id: String,
    /// XP amount granted.
    pub amount: u64,
    /// Award source ("battle", "achievement", ...).
    pub source: String,
    /// Optional human-readable detail.
    pub description: Option<String>,
    /// Award time (ms since epoch).
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_round_trip() {
        let mut profile = Profile::new(UserId::new("u1"), Some("dev".into()));
        profile.xp = 2500;
        profile.level = 3;
        profile.counters.battles_won = 7;

        let stored = StoredProfile::from_profile(&profile);
        assert_eq!(stored.to_profile(), profile);
    }

    #[test]
    fn test_compose_key() {
        let key = StoredUserAchievement::compose_key(
            &UserId::new("user_1"),
            &AchievementId::new("first-blood"),
        );
        assert_eq!(key, "user_1/first-blood");
    }
}
