//! Achievement catalog types and qualification rules
//!
//! The catalog itself is static data (seeded from `vibebuff-content`);
//! this module defines its shape and the pure qualification filter the
//! unlock mutation runs.

use crate::identity::AchievementId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A countable user action that achievements can gate on
///
/// A closed enum rather than a free-form string: adding an action type is
/// a compile-time change, and every variant has a matching progress
/// counter on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    ToolsViewed,
    BattlesWon,
    BattlesLost,
    DecksCreated,
    QuestsCompleted,
    VotesCast,
    LegendaryToolsCollected,
    PartiesCreated,
    PartiesJoined,
    BudgetDeckCreated,
    OssDeckCreated,
}

impl ActionType {
    /// Every action type, in declaration order
    pub const ALL: [ActionType; 11] = [
        ActionType::ToolsViewed,
        ActionType::BattlesWon,
        ActionType::BattlesLost,
        ActionType::DecksCreated,
        ActionType::QuestsCompleted,
        ActionType::VotesCast,
        ActionType::LegendaryToolsCollected,
        ActionType::PartiesCreated,
        ActionType::PartiesJoined,
        ActionType::BudgetDeckCreated,
        ActionType::OssDeckCreated,
    ];

    /// Stable string form, used for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::ToolsViewed => "tools_viewed",
            ActionType::BattlesWon => "battles_won",
            ActionType::BattlesLost => "battles_lost",
            ActionType::DecksCreated => "decks_created",
            ActionType::QuestsCompleted => "quests_completed",
            ActionType::VotesCast => "votes_cast",
            ActionType::LegendaryToolsCollected => "legendary_tools_collected",
            ActionType::PartiesCreated => "parties_created",
            ActionType::PartiesJoined => "parties_joined",
            ActionType::BudgetDeckCreated => "budget_deck_created",
            ActionType::OssDeckCreated => "oss_deck_created",
        }
    }

    /// Parse the stable string form
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.as_str() == s)
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How rare an achievement is, for display and sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    /// Stable string form, used for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Legendary => "legendary",
        }
    }

    /// Parse the stable string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "common" => Some(Rarity::Common),
            "uncommon" => Some(Rarity::Uncommon),
            "rare" => Some(Rarity::Rare),
            "legendary" => Some(Rarity::Legendary),
            _ => None,
        }
    }
}

/// Grouping for the achievement gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    Exploration,
    Collection,
    Mastery,
    Social,
}

impl AchievementCategory {
    /// Stable string form, used for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementCategory::Exploration => "exploration",
            AchievementCategory::Collection => "collection",
            AchievementCategory::Mastery => "mastery",
            AchievementCategory::Social => "social",
        }
    }

    /// Parse the stable string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "exploration" => Some(AchievementCategory::Exploration),
            "collection" => Some(AchievementCategory::Collection),
            "mastery" => Some(AchievementCategory::Mastery),
            "social" => Some(AchievementCategory::Social),
            _ => None,
        }
    }
}

/// What it takes to unlock an achievement
///
/// Threshold semantics are "at least N": any cumulative count at or above
/// the threshold qualifies, so one large count can unlock several tiers of
/// the same action type in a single pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub action: ActionType,
    pub threshold: u64,
}

/// One immutable achievement catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementDef {
    pub slug: AchievementId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: AchievementCategory,
    pub requirement: Requirement,
    pub xp_reward: u64,
    pub rarity: Rarity,
}

/// Catalog entries qualified by an action and its cumulative count
///
/// Returns entries in catalog order. An action type with no catalog
/// entries simply matches nothing - an empty result is not an error.
pub fn qualifying(
    catalog: &[AchievementDef],
    action: ActionType,
    count: u64,
) -> Vec<&AchievementDef> {
    catalog
        .iter()
        .filter(|def| def.requirement.action == action && def.requirement.threshold <= count)
        .collect()
}
