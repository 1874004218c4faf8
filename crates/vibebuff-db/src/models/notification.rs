//! Notification model.

use crate::error::{Error, Result};
use native_db::*;
use native_model::{native_model, Model};
use serde::{Deserialize, Serialize};
use vibebuff_core::{
    AchievementId, Notification, NotificationId, NotificationKind, NotificationMeta, UserId,
};

/// Stored notification. Created by progression mutations; only the
/// read flag ever changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 8, version = 1)]
#[native_db]
pub struct StoredNotification {
    /// Primary key - sequence-assigned id.
    #[primary_key]
    pub id: u64,
    /// Recipient user id.
    #[secondary_key]
    pub user_id: String,
    /// Kind (stable string form).
    pub kind: String,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    pub meta_link: Option<String>,
    pub meta_achievement: Option<String>,
    pub meta_level: Option<u32>,
    pub meta_xp_amount: Option<u64>,
    /// Read flag, flipped by the UI layer.
    pub is_read: bool,
    /// Creation time (ms since epoch).
    pub created_at: i64,
}

impl StoredNotification {
    /// Create an unread notification row.
    pub fn new(
        id: u64,
        user: &UserId,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        meta: NotificationMeta,
        now_ms: i64,
    ) -> Self {
        Self {
            id,
            user_id: user.as_str().to_string(),
            kind: kind.as_str().to_string(),
            title: title.into(),
            message: message.into(),
            meta_link: meta.link,
            meta_achievement: meta.achievement.map(|a| a.as_str().to_string()),
            meta_level: meta.level,
            meta_xp_amount: meta.xp_amount,
            is_read: false,
            created_at: now_ms,
        }
    }

    /// Convert to a core Notification.
    pub fn to_notification(&self) -> Result<Notification> {
        let kind = NotificationKind::parse(&self.kind)
            .ok_or_else(|| Error::Corrupted(format!("unknown notification kind: {}", self.kind)))?;
        Ok(Notification {
            id: NotificationId::new(self.id),
            user: UserId::new(self.user_id.clone()),
            kind,
            title: self.title.clone(),
            message: self.message.clone(),
            meta: NotificationMeta {
                link: self.meta_link.clone(),
                achievement: self.meta_achievement.clone().map(AchievementId::new),
                level: self.meta_level,
                xp_amount: self.meta_xp_amount,
            },
            is_read: self.is_read,
            created_at: self.created_at,
        })
    }
}
