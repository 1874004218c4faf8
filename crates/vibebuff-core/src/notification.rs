//! User-facing notification events
//!
//! Notifications are write-once records emitted as side effects of
//! progression mutations. Marking them read belongs to the UI layer; the
//! engines here only ever create them.

use crate::identity::{AchievementId, NotificationId, UserId};
use serde::{Deserialize, Serialize};

/// The kinds of notification this engine emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Welcome,
    AchievementUnlocked,
    LevelUp,
    XpEarned,
    BattleResult,
}

impl NotificationKind {
    /// Stable string form, used for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Welcome => "welcome",
            NotificationKind::AchievementUnlocked => "achievement_unlocked",
            NotificationKind::LevelUp => "level_up",
            NotificationKind::XpEarned => "xp_earned",
            NotificationKind::BattleResult => "battle_result",
        }
    }

    /// Parse the stable string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "welcome" => Some(NotificationKind::Welcome),
            "achievement_unlocked" => Some(NotificationKind::AchievementUnlocked),
            "level_up" => Some(NotificationKind::LevelUp),
            "xp_earned" => Some(NotificationKind::XpEarned),
            "battle_result" => Some(NotificationKind::BattleResult),
            _ => None,
        }
    }
}

/// Typed notification metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationMeta {
    pub link: Option<String>,
    pub achievement: Option<AchievementId>,
    pub level: Option<u32>,
    pub xp_amount: Option<u64>,
}

/// One persisted notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub user: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub meta: NotificationMeta,
    pub is_read: bool,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            NotificationKind::Welcome,
            NotificationKind::AchievementUnlocked,
            NotificationKind::LevelUp,
            NotificationKind::XpEarned,
            NotificationKind::BattleResult,
        ] {
            assert_eq!(NotificationKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(NotificationKind::parse("poke"), None);
    }
}
