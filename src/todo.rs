//! Pinned to-do list views.

use crate::catalog::{AchievementId, AchievementRecord, Catalog};
use crate::planner::logic::{by_tier_then_monster, compare_names};
use crate::store::AppStore;
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TodoSort {
    #[default]
    Tier,
    Monster,
    Name,
}

impl TodoSort {
    pub fn next(self) -> Self {
        match self {
            TodoSort::Tier => TodoSort::Monster,
            TodoSort::Monster => TodoSort::Name,
            TodoSort::Name => TodoSort::Tier,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TodoSort::Tier => "Tier",
            TodoSort::Monster => "Monster",
            TodoSort::Name => "Name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoEntry<'a> {
    pub record: &'a AchievementRecord,
    pub done: bool,
}

fn entries<'a>(
    catalog: &'a Catalog,
    pinned: &[AchievementId],
    is_completed: impl Fn(AchievementId) -> bool,
) -> Vec<TodoEntry<'a>> {
    pinned
        .iter()
        .filter_map(|&id| catalog.get(id))
        .map(|record| TodoEntry {
            record,
            done: is_completed(record.id),
        })
        .collect()
}

/// Pinned achievements in the requested order. Unknown ids are skipped.
pub fn sorted_pins<'a>(
    catalog: &'a Catalog,
    pinned: &[AchievementId],
    is_completed: impl Fn(AchievementId) -> bool,
    sort: TodoSort,
) -> Vec<TodoEntry<'a>> {
    let mut list = entries(catalog, pinned, is_completed);
    match sort {
        TodoSort::Tier => list.sort_by(|a, b| by_tier_then_monster(a.record, b.record)),
        TodoSort::Monster => list.sort_by(|a, b| compare_names(&a.record.monster, &b.record.monster)),
        TodoSort::Name => list.sort_by(|a, b| compare_names(&a.record.name, &b.record.name)),
    }
    list
}

/// Pinned achievements grouped by monster, groups sorted by name and
/// entries kept in pin order.
pub fn grouped_pins<'a>(
    catalog: &'a Catalog,
    pinned: &[AchievementId],
    is_completed: impl Fn(AchievementId) -> bool,
) -> BTreeMap<&'a str, Vec<TodoEntry<'a>>> {
    let mut groups: BTreeMap<&'a str, Vec<TodoEntry<'a>>> = BTreeMap::new();
    for entry in entries(catalog, pinned, is_completed) {
        groups.entry(entry.record.monster.as_str()).or_default().push(entry);
    }
    groups
}

/// True when there is at least one pin and every pin is completed.
pub fn all_pins_completed(pinned: &[AchievementId], is_completed: impl Fn(AchievementId) -> bool) -> bool {
    !pinned.is_empty() && pinned.iter().all(|&id| is_completed(id))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneOutcome {
    /// No player is loaded, so completion is unknown.
    NoPlayer,
    NothingNew,
    Removed(usize),
}

impl PruneOutcome {
    pub fn message(&self) -> String {
        match self {
            PruneOutcome::NoPlayer => "No user loaded. Search for a player first!".to_string(),
            PruneOutcome::NothingNew => "No newly completed achievements detected!".to_string(),
            PruneOutcome::Removed(1) => "Removed 1 completed achievement!".to_string(),
            PruneOutcome::Removed(n) => format!("Removed {} completed achievements!", n),
        }
    }
}

/// Unpin every pinned achievement the loaded player has completed.
///
/// Callers refresh the player's completion first; this only compares.
pub fn prune_completed(store: &mut AppStore) -> PruneOutcome {
    if store.current_player().is_none() {
        return PruneOutcome::NoPlayer;
    }
    let done: Vec<AchievementId> = store
        .pinned()
        .iter()
        .copied()
        .filter(|&id| store.is_completed(id))
        .collect();
    if done.is_empty() {
        return PruneOutcome::NothingNew;
    }
    let removed = store.unpin_all(&done);
    info!(removed, "pruned completed pins");
    PruneOutcome::Removed(removed)
}
