//! Derived battle stats
//!
//! Battle stats are a pure function of a tool's catalog snapshot. They are
//! NOT stored - always recomputed on demand, so a stale row can never
//! disagree with the formulas here.
//!
//! Components: HP, Attack, Defense, Speed, Mana

use crate::tool::{PricingModel, ToolSnapshot};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound for every stat after clamping
pub const STAT_MIN: u32 = 1;
/// Upper bound for every stat after clamping
pub const STAT_MAX: u32 = 100;

/// Baseline HP for tools with no star count
const BASELINE_HP: i64 = 40;
/// Baseline Attack for tools with no download count
const BASELINE_ATTACK: i64 = 40;
/// Defense before open-source and pricing adjustments
const BASE_DEFENSE: i64 = 50;
/// Mana before featured and recency bonuses
const BASE_MANA: i64 = 40;

const MS_PER_DAY: i64 = 86_400_000;

/// One of the five stat dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    Hp,
    Attack,
    Defense,
    Speed,
    Mana,
}

impl StatKey {
    /// All five dimensions, in fixed display order
    pub const ALL: [StatKey; 5] = [
        StatKey::Hp,
        StatKey::Attack,
        StatKey::Defense,
        StatKey::Speed,
        StatKey::Mana,
    ];

    /// Short display label
    pub fn as_str(&self) -> &'static str {
        match self {
            StatKey::Hp => "HP",
            StatKey::Attack => "ATK",
            StatKey::Defense => "DEF",
            StatKey::Speed => "SPD",
            StatKey::Mana => "MANA",
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The five derived battle stats, each clamped to `[STAT_MIN, STAT_MAX]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatVector {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: u32,
    pub mana: u32,
}

impl StatVector {
    /// Value for one dimension
    pub fn get(&self, key: StatKey) -> u32 {
        match key {
            StatKey::Hp => self.hp,
            StatKey::Attack => self.attack,
            StatKey::Defense => self.defense,
            StatKey::Speed => self.speed,
            StatKey::Mana => self.mana,
        }
    }

    /// Stat total, in `[5 * STAT_MIN, 5 * STAT_MAX]`
    pub fn total(&self) -> u32 {
        self.hp + self.attack + self.defense + self.speed + self.mana
    }
}

/// Rarity tier derived from a stat total
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PowerLevel {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl PowerLevel {
    /// Minimum stat total for the Rare tier
    pub const RARE_AT: u32 = 200;
    /// Minimum stat total for the Epic tier
    pub const EPIC_AT: u32 = 300;
    /// Minimum stat total for the Legendary tier
    pub const LEGENDARY_AT: u32 = 400;

    /// Classify a stat total into a tier
    ///
    /// The bands partition `[5, 500]` and are monotonic: a higher total
    /// never yields a lower tier.
    pub fn classify(total: u32) -> Self {
        if total >= Self::LEGENDARY_AT {
            PowerLevel::Legendary
        } else if total >= Self::EPIC_AT {
            PowerLevel::Epic
        } else if total >= Self::RARE_AT {
            PowerLevel::Rare
        } else {
            PowerLevel::Common
        }
    }

    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerLevel::Common => "Common",
            PowerLevel::Rare => "Rare",
            PowerLevel::Epic => "Epic",
            PowerLevel::Legendary => "Legendary",
        }
    }
}

impl fmt::Display for PowerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compute battle stats from a tool snapshot
///
/// Deterministic: identical snapshot and `now_ms` always produce the same
/// vector. `now_ms` only feeds the mana recency bonus; callers that need
/// reproducible output (tests, replays) pin it.
///
/// Formulas:
/// - HP: `log10(stars) * 20`, community size compressed so a million-star
///   repo does not dominate outright; baseline 40 without a star count
/// - Attack: `log10(weekly downloads) * 12.5`, same compression; baseline 40
/// - Defense: 50, +20 open source, +10 free/open-source pricing,
///   -10 paid, -20 enterprise
/// - Speed: adoption-friction proxy keyed on pricing (free 90, open-source
///   85, freemium 70, paid 55, enterprise 30)
/// - Mana: 40, +25 featured, +35/+25/+10 for updates within 30/90/365 days
///
/// Every component is clamped to `[STAT_MIN, STAT_MAX]` after the
/// transform. A tool with no signals at all resolves to the baselines,
/// never an error.
pub fn compute_stats(tool: &ToolSnapshot, now_ms: i64) -> StatVector {
    let hp = match tool.github_stars {
        Some(stars) if stars > 0 => log_scaled(stars, 20.0),
        _ => BASELINE_HP,
    };

    let attack = match tool.npm_downloads_weekly {
        Some(downloads) if downloads > 0 => log_scaled(downloads, 12.5),
        _ => BASELINE_ATTACK,
    };

    let mut defense = BASE_DEFENSE;
    if tool.open_source {
        defense += 20;
    }
    defense += match tool.pricing {
        PricingModel::Free | PricingModel::OpenSource => 10,
        PricingModel::Freemium => 0,
        PricingModel::Paid => -10,
        PricingModel::Enterprise => -20,
    };

    let speed = match tool.pricing {
        PricingModel::Free => 90,
        PricingModel::OpenSource => 85,
        PricingModel::Freemium => 70,
        PricingModel::Paid => 55,
        PricingModel::Enterprise => 30,
    };

    let mut mana = BASE_MANA;
    if tool.featured {
        mana += 25;
    }
    mana += recency_bonus(tool.updated_at, now_ms);

    StatVector {
        hp: clamp_stat(hp),
        attack: clamp_stat(attack),
        defense: clamp_stat(defense),
        speed: clamp_stat(speed),
        mana: clamp_stat(mana),
    }
}

fn log_scaled(value: u64, factor: f64) -> i64 {
    ((value as f64).log10() * factor).floor() as i64
}

fn clamp_stat(raw: i64) -> u32 {
    raw.clamp(STAT_MIN as i64, STAT_MAX as i64) as u32
}

/// Momentum bonus for recently updated tools
fn recency_bonus(updated_at: i64, now_ms: i64) -> i64 {
    let days = (now_ms - updated_at).max(0) / MS_PER_DAY;
    if days <= 30 {
        35
    } else if days <= 90 {
        25
    } else if days <= 365 {
        10
    } else {
        0
    }
}
