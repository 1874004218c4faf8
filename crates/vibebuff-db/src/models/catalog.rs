//! Catalog models: tools and achievement definitions.

use crate::error::{Error, Result};
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};
use vibebuff_core::{
    AchievementCategory, AchievementDef, AchievementId, ActionType, PricingModel, Rarity,
    Requirement, ToolId, ToolSnapshot,
};

/// Stored tool catalog row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredTool {
    /// Primary key - the tool slug.
    #[primary_key]
    pub slug: String,
    /// Display name.
    pub name: String,
    /// GitHub stargazer count, if known.
    pub github_stars: Option<u64>,
    /// Weekly npm downloads, if known.
    pub npm_downloads_weekly: Option<u64>,
    /// Pricing model (stable string form).
    pub pricing: String,
    /// Open-source flag.
    pub open_source: bool,
    /// Featured flag.
    pub featured: bool,
    /// Catalog insertion time (ms since epoch).
    pub created_at: i64,
    /// Last observed tool update (ms since epoch).
    pub updated_at: i64,
}

impl StoredTool {
    /// Create from a core ToolSnapshot.
    pub fn from_snapshot(tool: &ToolSnapshot) -> Self {
        Self {
            slug: tool.id.as_str().to_string(),
            name: tool.name.clone(),
            github_stars: tool.github_stars,
            npm_downloads_weekly: tool.npm_downloads_weekly,
            pricing: tool.pricing.as_str().to_string(),
            open_source: tool.open_source,
            featured: tool.featured,
            created_at: tool.created_at,
            updated_at: tool.updated_at,
        }
    }

    /// Convert to a core ToolSnapshot.
    pub fn to_snapshot(&self) -> Result<ToolSnapshot> {
        let pricing = PricingModel::parse(&self.pricing)
            .ok_or_else(|| Error::Corrupted(format!("unknown pricing model: {}", self.pricing)))?;
        Ok(ToolSnapshot {
            id: ToolId::new(self.slug.clone()),
            name: self.name.clone(),
            github_stars: self.github_stars,
            npm_downloads_weekly: self.npm_downloads_weekly,
            pricing,
            open_source: self.open_source,
            featured: self.featured,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Stored achievement definition. Immutable after seeding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 2, version = 1)]
#[native_db]
pub struct StoredAchievementDef {
    /// Primary key - the achievement slug.
    #[primary_key]
    pub slug: String,
    /// Display name.
    pub name: String,
    /// Unlock description.
    pub description: String,
    /// Display icon.
    pub icon: String,
    /// Category (stable string form).
    pub category: String,
    /// Required action type (stable string form).
    pub action: String,
    /// Required cumulative count ("at least N").
    pub threshold: u64,
    /// XP granted on unlock.
    pub xp_reward: u64,
    /// Rarity (stable string form).
    pub rarity: String,
}

impl StoredAchievementDef {
    /// Create from a core AchievementDef.
    pub fn from_def(def: &AchievementDef) -> Self {
        Self {
            slug: def.slug.as_str().to_string(),
            name: def.name.clone(),
            description: def.description.clone(),
            icon: def.icon.clone(),
            category: def.category.as_str().to_string(),
            action: def.requirement.action.as_str().to_string(),
            threshold: def.requirement.threshold,
            xp_reward: def.xp_reward,
            rarity: def.rarity.as_str().to_string(),
        }
    }

    /// Convert to a core AchievementDef.
    pub fn to_def(&self) -> Result<AchievementDef> {
        let category = AchievementCategory::parse(&self.category)
            .ok_or_else(|| Error::Corrupted(format!("unknown category: {}", self.category)))?;
        let action = ActionType::parse(&self.action)
            .ok_or_else(|| Error::Corrupted(format!("unknown action type: {}", self.action)))?;
        let rarity = Rarity::parse(&self.rarity)
            .ok_or_else(|| Error::Corrupted(format!("unknown rarity: {}", self.rarity)))?;
        Ok(AchievementDef {
            slug: AchievementId::new(self.slug.clone()),
            name: self.name.clone(),
            description: self.description.clone(),
            icon: self.icon.clone(),
            category,
            requirement: Requirement {
                action,
                threshold: self.threshold,
            },
            xp_reward: self.xp_reward,
            rarity,
        })
    }
}
