//! Planner data types: priority preferences, goal modes and plans.

use crate::catalog::{AchievementId, AchievementRecord, Tier};
use crate::persistence::deserialize_ids;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Optional type/tier preferences that front-load matching achievements.
///
/// A field counts as populated only when it is `Some` and non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritySpec {
    #[serde(default)]
    pub types: Option<BTreeSet<String>>,
    #[serde(default)]
    pub tiers: Option<BTreeSet<Tier>>,
}

impl PrioritySpec {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_tiers<I: IntoIterator<Item = Tier>>(mut self, tiers: I) -> Self {
        self.tiers = Some(tiers.into_iter().collect());
        self
    }

    /// Prioritized types, if any are selected.
    pub fn active_types(&self) -> Option<&BTreeSet<String>> {
        self.types.as_ref().filter(|t| !t.is_empty())
    }

    /// Prioritized tiers, if any are selected.
    pub fn active_tiers(&self) -> Option<&BTreeSet<Tier>> {
        self.tiers.as_ref().filter(|t| !t.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.active_types().is_none() && self.active_tiers().is_none()
    }

    /// Add or remove a type preference.
    pub fn toggle_type(&mut self, kind: &str) {
        let types = self.types.get_or_insert_with(BTreeSet::new);
        if !types.remove(kind) {
            types.insert(kind.to_string());
        }
    }

    /// Add or remove a tier preference.
    pub fn toggle_tier(&mut self, tier: Tier) {
        let tiers = self.tiers.get_or_insert_with(BTreeSet::new);
        if !tiers.remove(&tier) {
            tiers.insert(tier);
        }
    }
}

/// How the raw goal typed by the user is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalMode {
    /// The raw goal is the number of points still to earn.
    #[default]
    Additional,
    /// The raw goal is a point total; current points are subtracted.
    Total,
}

impl GoalMode {
    pub fn toggle(self) -> Self {
        match self {
            GoalMode::Additional => GoalMode::Total,
            GoalMode::Total => GoalMode::Additional,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GoalMode::Additional => "Additional",
            GoalMode::Total => "Total",
        }
    }
}

/// An ordered suggestion list meeting (or approaching) a point target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub suggested: Vec<AchievementRecord>,
    pub accumulated: u32,
    pub target: u32,
}

impl Plan {
    pub fn empty(target: u32) -> Self {
        Self {
            suggested: Vec::new(),
            accumulated: 0,
            target,
        }
    }

    pub fn ids(&self) -> Vec<AchievementId> {
        self.suggested.iter().map(|r| r.id).collect()
    }

    pub fn len(&self) -> usize {
        self.suggested.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggested.is_empty()
    }

    pub fn contains(&self, id: AchievementId) -> bool {
        self.suggested.iter().any(|r| r.id == id)
    }

    /// Whether the accumulated points meet the target.
    pub fn reached(&self) -> bool {
        self.accumulated >= self.target
    }

    /// Points still missing when the eligible pool ran out.
    pub fn shortfall(&self) -> u32 {
        self.target.saturating_sub(self.accumulated)
    }
}

/// Persisted planner configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Last valid raw goal, before goal-mode translation.
    #[serde(default)]
    pub goal: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_ids")]
    pub excluded: BTreeSet<AchievementId>,
    #[serde(default)]
    pub mode: GoalMode,
    #[serde(default)]
    pub priority: PrioritySpec,
}
