//! Read-side query patterns for the store.

use crate::error::{Error, Result};
use crate::models::*;
use crate::store::Store;
use indexmap::IndexMap;
use vibebuff_core::{AchievementDef, Notification, Profile, ToolId, UserId};

/// One row of the battle leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolStanding {
    pub tool: ToolId,
    pub wins: u64,
    pub losses: u64,
    /// Win percentage in `[0, 100]`; 0 for a tool with no battles.
    pub win_rate: f64,
}

/// One unlocked achievement joined with its catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct UnlockedAchievement {
    pub achievement: AchievementDef,
    pub unlocked_at: i64,
}

impl Store {
    /// A user's saved battles, newest first.
    pub fn battle_history(&self, user: &UserId, limit: usize) -> Result<Vec<BattleRecord>> {
        let r = self.db.r_transaction()?;
        let scan = r
            .scan()
            .secondary::<StoredBattleRecord>(StoredBattleRecordKey::user_id)?;
        let iter = scan.start_with(Some(user.as_str().to_string()))?;
        let rows: std::result::Result<Vec<StoredBattleRecord>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;

        // start_with is a prefix scan; keep exact matches only.
        let mut records: Vec<BattleRecord> = rows
            .iter()
            .filter(|r| r.user_id.as_deref() == Some(user.as_str()))
            .map(|r| r.to_record())
            .collect();
        records.sort_by(|a, b| b.id.raw().cmp(&a.id.raw()));
        records.truncate(limit);
        Ok(records)
    }

    /// Global battle standings, most wins first.
    ///
    /// Reads the per-tool aggregates maintained transactionally by
    /// `record_battle` instead of rescanning the history.
    pub fn battle_leaderboard(&self, limit: usize) -> Result<Vec<ToolStanding>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredToolRecord>()?;
        let iter = scan.all()?;
        let rows: std::result::Result<Vec<StoredToolRecord>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;

        let mut standings: Vec<ToolStanding> = rows
            .into_iter()
            .map(|rec| {
                let played = rec.wins + rec.losses;
                let win_rate = if played > 0 {
                    rec.wins as f64 / played as f64 * 100.0
                } else {
                    0.0
                };
                ToolStanding {
                    tool: ToolId::new(rec.slug),
                    wins: rec.wins,
                    losses: rec.losses,
                    win_rate,
                }
            })
            .collect();
        standings.sort_by(|a, b| b.wins.cmp(&a.wins).then(a.tool.cmp(&b.tool)));
        standings.truncate(limit);
        Ok(standings)
    }

    /// Top profiles by XP.
    pub fn xp_leaderboard(&self, limit: usize) -> Result<Vec<Profile>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredProfile>()?;
        let iter = scan.all()?;
        let rows: std::result::Result<Vec<StoredProfile>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;

        let mut profiles: Vec<Profile> = rows.iter().map(|p| p.to_profile()).collect();
        profiles.sort_by(|a, b| b.xp.cmp(&a.xp).then(a.id.as_str().cmp(b.id.as_str())));
        profiles.truncate(limit);
        Ok(profiles)
    }

    /// Everything a user has unlocked, joined with the catalog.
    ///
    /// Unlocks whose catalog entry has disappeared are skipped rather
    /// than surfaced as errors.
    pub fn user_achievements(&self, user: &UserId) -> Result<Vec<UnlockedAchievement>> {
        let r = self.db.r_transaction()?;
        let scan = r
            .scan()
            .secondary::<StoredUserAchievement>(StoredUserAchievementKey::user_id)?;
        let iter = scan.start_with(user.as_str())?;
        let rows: std::result::Result<Vec<StoredUserAchievement>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;

        let mut unlocked = Vec::new();
        for row in rows {
            if row.user_id != user.as_str() {
                continue;
            }
            let def: Option<StoredAchievementDef> = r.get().primary(row.achievement.clone())?;
            if let Some(def) = def {
                unlocked.push(UnlockedAchievement {
                    achievement: def.to_def()?,
                    unlocked_at: row.unlocked_at,
                });
            }
        }
        Ok(unlocked)
    }

    /// A user's notifications, newest first.
    pub fn notifications(
        &self,
        user: &UserId,
        limit: usize,
        unread_only: bool,
    ) -> Result<Vec<Notification>> {
        let r = self.db.r_transaction()?;
        let scan = r
            .scan()
            .secondary::<StoredNotification>(StoredNotificationKey::user_id)?;
        let iter = scan.start_with(user.as_str())?;
        let rows: std::result::Result<Vec<StoredNotification>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;

        let mut notifications: Vec<Notification> = rows
            .iter()
            .filter(|n| n.user_id == user.as_str())
            .filter(|n| !unread_only || !n.is_read)
            .map(|n| n.to_notification())
            .collect::<Result<_>>()?;
        notifications.sort_by(|a, b| b.id.raw().cmp(&a.id.raw()));
        notifications.truncate(limit);
        Ok(notifications)
    }

    /// How many of a user's notifications are unread.
    pub fn unread_count(&self, user: &UserId) -> Result<usize> {
        let r = self.db.r_transaction()?;
        let scan = r
            .scan()
            .secondary::<StoredNotification>(StoredNotificationKey::user_id)?;
        let iter = scan.start_with(user.as_str())?;
        let mut count = 0;
        for row in iter {
            let row = row.map_err(|e| Error::Database(e.to_string()))?;
            if row.user_id == user.as_str() && !row.is_read {
                count += 1;
            }
        }
        Ok(count)
    }

    /// A user's XP activity log, newest first.
    pub fn xp_events(&self, user: &UserId, limit: usize) -> Result<Vec<StoredXpEvent>> {
        let r = self.db.r_transaction()?;
        let scan = r
            .scan()
            .secondary::<StoredXpEvent>(StoredXpEventKey::user_id)?;
        let iter = scan.start_with(user.as_str())?;
        let rows: std::result::Result<Vec<StoredXpEvent>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Database(e.to_string()))?;

        let mut events: Vec<StoredXpEvent> = rows
            .into_iter()
            .filter(|e| e.user_id == user.as_str())
            .collect();
        events.sort_by(|a, b| b.id.cmp(&a.id));
        events.truncate(limit);
        Ok(events)
    }

    /// Total XP a user has earned, grouped by award source in first-seen
    /// order.
    pub fn xp_by_source(&self, user: &UserId) -> Result<IndexMap<String, u64>> {
        let r = self.db.r_transaction()?;
        let scan = r
            .scan()
            .secondary::<StoredXpEvent>(StoredXpEventKey::user_id)?;
        let iter = scan.start_with(user.as_str())?;

        let mut totals: IndexMap<String, u64> = IndexMap::new();
        for row in iter {
            let row = row.map_err(|e| Error::Database(e.to_string()))?;
            if row.user_id == user.as_str() {
                *totals.entry(row.source).or_insert(0) += row.amount;
            }
        }
        Ok(totals)
    }
}
