//! Achievement catalog entry schema

use serde::{Deserialize, Serialize};
use vibebuff_core::{
    AchievementCategory, AchievementDef, AchievementId, ActionType, Rarity, Requirement,
};

/// One achievement as written in a RON catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementEntry {
    /// Unique slug
    pub slug: String,
    /// Display name
    pub name: String,
    /// How to unlock it
    #[serde(default)]
    pub description: String,
    /// Icon identifier for the UI
    #[serde(default)]
    pub icon: String,
    /// Gallery category
    pub category: AchievementCategory,
    /// Counted action the requirement gates on
    pub action: ActionType,
    /// Required cumulative count ("at least N")
    pub threshold: u64,
    /// XP granted on unlock
    pub xp_reward: u64,
    /// Rarity tier
    pub rarity: Rarity,
}

impl AchievementEntry {
    /// Convert to the core definition
    pub fn into_def(self) -> AchievementDef {
        AchievementDef {
            slug: AchievementId::new(self.slug),
            name: self.name,
            description: self.description,
            icon: self.icon,
            category: self.category,
            requirement: Requirement {
                action: self.action,
                threshold: self.threshold,
            },
            xp_reward: self.xp_reward,
            rarity: self.rarity,
        }
    }
}

/// A collection of achievement entries
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AchievementFile {
    pub achievements: Vec<AchievementEntry>,
}
