//! Weighted battle scoring
//!
//! A battle compares two tools' derived stat vectors under a caller-supplied
//! weight vector. The scorer is pure: no randomness, no I/O, and a fixed
//! tie-break, so the same pair and weights always produce the same outcome.

use crate::error::{Error, Result};
use crate::identity::ToolId;
use crate::stats::{compute_stats, StatKey, StatVector};
use crate::tool::ToolSnapshot;
use serde::{Deserialize, Serialize};

/// Per-stat weights applied when scoring a battle
///
/// A weight of `0` fully excludes a stat; all weights default to `1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattleWeights {
    pub hp: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub mana: f64,
}

impl Default for BattleWeights {
    fn default() -> Self {
        Self {
            hp: 1.0,
            attack: 1.0,
            defense: 1.0,
            speed: 1.0,
            mana: 1.0,
        }
    }
}

impl BattleWeights {
    /// Weight for one dimension
    pub fn get(&self, key: StatKey) -> f64 {
        match key {
            StatKey::Hp => self.hp,
            StatKey::Attack => self.attack,
            StatKey::Defense => self.defense,
            StatKey::Speed => self.speed,
            StatKey::Mana => self.mana,
        }
    }

    /// A weight vector focusing on a single stat
    pub fn only(key: StatKey, weight: f64) -> Self {
        let mut weights = Self {
            hp: 0.0,
            attack: 0.0,
            defense: 0.0,
            speed: 0.0,
            mana: 0.0,
        };
        match key {
            StatKey::Hp => weights.hp = weight,
            StatKey::Attack => weights.attack = weight,
            StatKey::Defense => weights.defense = weight,
            StatKey::Speed => weights.speed = weight,
            StatKey::Mana => weights.mana = weight,
        }
        weights
    }

    /// Reject negative or non-finite weights
    pub fn validate(&self) -> Result<()> {
        for key in StatKey::ALL {
            let value = self.get(key);
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidWeight { stat: key, value });
            }
        }
        Ok(())
    }
}

/// Head-to-head comparison of one stat dimension
///
/// `winner` names the tool with the higher raw value, independent of the
/// weighted outcome - a tool can lose the battle while winning most rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatComparison {
    pub stat: StatKey,
    pub val1: u32,
    pub val2: u32,
    pub winner: ToolId,
}

/// The complete result of one simulated battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub tool1: ToolId,
    pub tool2: ToolId,
    pub stats1: StatVector,
    pub stats2: StatVector,
    pub score1: f64,
    pub score2: f64,
    pub winner: ToolId,
    pub loser: ToolId,
    pub score_diff: f64,
    pub comparisons: Vec<StatComparison>,
    pub weights: BattleWeights,
}

/// Weighted score of one stat vector: the dot product with the weights
pub fn score(stats: &StatVector, weights: &BattleWeights) -> f64 {
    StatKey::ALL
        .iter()
        .map(|&key| stats.get(key) as f64 * weights.get(key))
        .sum()
}

/// Simulate a battle between two tools
///
/// Stats are derived fresh from both snapshots, scored against `weights`,
/// and the higher score wins. Exactly equal scores (including the all-zero
/// weight vector) resolve to the lexicographically smaller tool id, and
/// per-stat ties in the comparison rows use the same rule.
pub fn simulate_battle(
    tool1: &ToolSnapshot,
    tool2: &ToolSnapshot,
    weights: &BattleWeights,
    now_ms: i64,
) -> Result<BattleOutcome> {
    if tool1.id == tool2.id {
        return Err(Error::SameTool(tool1.id.clone()));
    }
    weights.validate()?;

    let stats1 = compute_stats(tool1, now_ms);
    let stats2 = compute_stats(tool2, now_ms);

    let score1 = score(&stats1, weights);
    let score2 = score(&stats2, weights);

    let winner = if score1 > score2 {
        tool1.id.clone()
    } else if score2 > score1 {
        tool2.id.clone()
    } else {
        tie_break(&tool1.id, &tool2.id)
    };
    let loser = if winner == tool1.id {
        tool2.id.clone()
    } else {
        tool1.id.clone()
    };

    let comparisons = StatKey::ALL
        .iter()
        .map(|&key| {
            let val1 = stats1.get(key);
            let val2 = stats2.get(key);
            let row_winner = if val1 > val2 {
                tool1.id.clone()
            } else if val2 > val1 {
                tool2.id.clone()
            } else {
                tie_break(&tool1.id, &tool2.id)
            };
            StatComparison {
                stat: key,
                val1,
                val2,
                winner: row_winner,
            }
        })
        .collect();

    Ok(BattleOutcome {
        tool1: tool1.id.clone(),
        tool2: tool2.id.clone(),
        stats1,
        stats2,
        score1,
        score2,
        winner,
        loser,
        score_diff: (score1 - score2).abs(),
        comparisons,
        weights: *weights,
    })
}

fn tie_break(a: &ToolId, b: &ToolId) -> ToolId {
    if a <= b {
        a.clone()
    } else {
        b.clone()
    }
}
