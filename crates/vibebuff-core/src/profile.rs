//! User profiles and progress counters

use crate::achievement::ActionType;
use crate::identity::UserId;
use crate::ledger::title_for_level;
use serde::{Deserialize, Serialize};

/// Cumulative progress counters, one per [`ActionType`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCounters {
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

impl ActionCounters {
    /// Counter value for one action type
    pub fn get(&self, action: ActionType) -> u64 {
        match action {
            ActionType::ToolsViewed => self.tools_viewed,
            ActionType::BattlesWon => self.battles_won,
            ActionType::BattlesLost => self.battles_lost,
            ActionType::DecksCreated => self.decks_created,
            ActionType::QuestsCompleted => self.quests_completed,
            ActionType::VotesCast => self.votes_cast,
            ActionType::LegendaryToolsCollected => self.legendary_tools_collected,
            ActionType::PartiesCreated => self.parties_created,
            ActionType::PartiesJoined => self.parties_joined,
            ActionType::BudgetDeckCreated => self.budget_decks_created,
            ActionType::OssDeckCreated => self.oss_decks_created,
        }
    }

    /// Increment one counter, returning the new value
    pub fn increment(&mut self, action: ActionType) -> u64 {
        let slot = match action {
            ActionType::ToolsViewed => &mut self.tools_viewed,
            ActionType::BattlesWon => &mut self.battles_won,
            ActionType::BattlesLost => &mut self.battles_lost,
            ActionType::DecksCreated => &mut self.decks_created,
            ActionType::QuestsCompleted => &mut self.quests_completed,
            ActionType::VotesCast => &mut self.votes_cast,
            ActionType::LegendaryToolsCollected => &mut self.legendary_tools_collected,
            ActionType::PartiesCreated => &mut self.parties_created,
            ActionType::PartiesJoined => &mut self.parties_joined,
            ActionType::BudgetDeckCreated => &mut self.budget_decks_created,
            ActionType::OssDeckCreated => &mut self.oss_decks_created,
        };
        *slot += 1;
        *slot
    }
}

/// A user's progression state
///
/// `level` and `title` are stored alongside `xp` for query convenience but
/// are always recomputed from it on write (see `vibebuff-core::ledger`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    pub username: Option<String>,
    pub xp: u64,
    pub level: u32,
    pub title: String,
    pub counters: ActionCounters,
}

impl Profile {
    /// A fresh level-1 profile with an empty ledger
    pub fn new(id: UserId, username: Option<String>) -> Self {
        Self {
            id,
            username,
            xp: 0,
            level: 1,
            title: title_for_level(1).to_string(),
            counters: ActionCounters::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_cover_every_action() {
        let mut counters = ActionCounters::default();
        for action in ActionType::ALL {
            assert_eq!(counters.get(action), 0);
            assert_eq!(counters.increment(action), 1);
            assert_eq!(counters.get(action), 1);
        }
    }

    #[test]
    fn test_new_profile() {
        let profile = Profile::new(UserId::new("u1"), Some("dev".into()));
        assert_eq!(profile.level, 1);
        assert_eq!(profile.title, "Novice Developer");
        assert_eq!(profile.counters.battles_won, 0);
    }
}
