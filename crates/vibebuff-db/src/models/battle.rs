//! Battle history and per-tool aggregate models.

use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};
use vibebuff_core::{BattleId, BattleOutcome, BattleWeights, ToolId, UserId};

/// Stored battle record. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 6, version = 1)]
#[native_db]
pub struct StoredBattleRecord {
    /// Primary key - sequence-assigned id.
    #[primary_key]
    pub id: u64,
    /// Initiating user, if the battle was run signed-in.
    #[secondary_key(optional)]
    pub user_id: Option<String>,
    /// Challenger tool slug.
    pub tool1: String,
    /// Opponent tool slug.
    pub tool2: String,
    /// Winning tool slug.
    pub winner: String,
    /// Challenger weighted score.
    pub tool1_score: f64,
    /// Opponent weighted score.
    pub tool2_score: f64,
    pub weight_hp: f64,
    pub weight_attack: f64,
    pub weight_defense: f64,
    pub weight_speed: f64,
    pub weight_mana: f64,
    /// Save time (ms since epoch).
    pub created_at: i64,
}

impl StoredBattleRecord {
    /// Create from a scored outcome.
    pub fn from_outcome(
        id: u64,
        user: Option<&UserId>,
        outcome: &BattleOutcome,
        now_ms: i64,
    ) -> Self {
        Self {
            id,
            user_id: user.map(|u| u.as_str().to_string()),
            tool1: outcome.tool1.as_str().to_string(),
            tool2: outcome.tool2.as_str().to_string(),
            winner: outcome.winner.as_str().to_string(),
            tool1_score: outcome.score1,
            tool2_score: outcome.score2,
            weight_hp: outcome.weights.hp,
            weight_attack: outcome.weights.attack,
            weight_defense: outcome.weights.defense,
            weight_speed: outcome.weights.speed,
            weight_mana: outcome.weights.mana,
            created_at: now_ms,
        }
    }

    /// Convert to the read model.
    pub fn to_record(&self) -> BattleRecord {
        BattleRecord {
            id: BattleId::new(self.id),
            user: self.user_id.clone().map(UserId::new),
            tool1: ToolId::new(self.tool1.clone()),
            tool2: ToolId::new(self.tool2.clone()),
            winner: ToolId::new(self.winner.clone()),
            tool1_score: self.tool1_score,
            tool2_score: self.tool2_score,
            weights: BattleWeights {
                hp: self.weight_hp,
                attack: self.weight_attack,
                defense: self.weight_defense,
                speed: self.weight_speed,
                mana: self.weight_mana,
            },
            created_at: self.created_at,
        }
    }
}

/// A saved battle, as returned by history queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleRecord {
    pub id: BattleId,
    pub user: Option<UserId>,
    pub tool1: ToolId,
    pub tool2: ToolId,
    pub winner: ToolId,
    pub tool1_score: f64,
    pub tool2_score: f64,
    pub weights: BattleWeights,
    pub created_at: i64,
}

/// Per-tool win/loss aggregate, updated in the same transaction as every
/// battle insert so it never drifts from the history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 7, version = 1)]
#[native_db]
pub struct StoredToolRecord {
    /// Primary key - the tool slug.
    #[primary_key]
    pub slug: String,
    pub wins: u64,
    pub losses: u64,
}

impl StoredToolRecord {
    /// Empty record for a tool with no battles yet.
    pub fn empty(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            wins: 0,
            losses: 0,
        }
    }
}
