//! Lookup result types.

use crate::catalog::AchievementId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One player's completed combat achievements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCompletion {
    pub player: String,
    pub completed: Vec<AchievementId>,
    pub fetched_at: DateTime<Utc>,
}

impl PlayerCompletion {
    pub fn new(player: impl Into<String>, completed: Vec<AchievementId>) -> Self {
        Self {
            player: player.into(),
            completed,
            fetched_at: Utc::now(),
        }
    }

    pub fn completed_set(&self) -> HashSet<AchievementId> {
        self.completed.iter().copied().collect()
    }
}

/// Identifies one in-flight lookup. Only the most recently issued ticket
/// may change state when its result arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    pub seq: u64,
    pub player: String,
}

/// What happened to a finished lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Applied { player: String, completed: usize },
    Failed { message: String },
    /// A newer lookup was issued; this result was discarded.
    Stale,
}
