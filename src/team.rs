//! Team comparison: which achievements nobody on a team has done, and which
//! only some have done.

use crate::catalog::{AchievementId, AchievementRecord, Catalog};
use crate::constants::MAX_TEAM_PLAYERS;
use crate::error::TeamError;
use crate::lookup::{CompletionSource, PlayerCompletion};
use crate::planner::logic::{by_tier_then_monster, compare_names};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use tracing::info;

/// Sort direction shared by the sortable tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// An achievement with how many team members completed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamEntry {
    pub record: AchievementRecord,
    pub completed_by: usize,
    pub total_players: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamReport {
    pub players: Vec<PlayerCompletion>,
    /// Completed by nobody on the team.
    pub none_completed: Vec<TeamEntry>,
    /// Completed by some, but not all, of the team.
    pub partial_completion: Vec<TeamEntry>,
}

/// Non-blank, trimmed names, or an error if none remain or there are too many.
pub fn active_names(names: &[String]) -> Result<Vec<String>, TeamError> {
    let active: Vec<String> = names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();

    if active.is_empty() {
        return Err(TeamError::NoPlayers);
    }
    if active.len() > MAX_TEAM_PLAYERS {
        return Err(TeamError::TooManyPlayers(MAX_TEAM_PLAYERS));
    }
    Ok(active)
}

/// Fetch every active player in order. The first failure aborts the team.
pub fn fetch_team(
    source: &dyn CompletionSource,
    names: &[String],
) -> Result<Vec<PlayerCompletion>, TeamError> {
    let active = active_names(names)?;
    let mut players = Vec::with_capacity(active.len());
    for name in active {
        let completion = source.fetch(&name).map_err(|source| TeamError::Player {
            player: name.clone(),
            source,
        })?;
        players.push(completion);
    }
    info!(players = players.len(), "team fetched");
    Ok(players)
}

/// Bucket the catalog by how many of `players` completed each achievement.
/// Both buckets are ordered tier ascending, then monster.
pub fn build_team_report(catalog: &Catalog, players: Vec<PlayerCompletion>) -> TeamReport {
    let sets: Vec<HashSet<AchievementId>> =
        players.iter().map(PlayerCompletion::completed_set).collect();
    let total_players = players.len();

    let mut none_completed = Vec::new();
    let mut partial_completion = Vec::new();

    for record in catalog.iter() {
        let completed_by = sets.iter().filter(|s| s.contains(&record.id)).count();
        let entry = TeamEntry {
            record: record.clone(),
            completed_by,
            total_players,
        };
        if completed_by == 0 {
            none_completed.push(entry);
        } else if completed_by < total_players {
            partial_completion.push(entry);
        }
    }

    none_completed.sort_by(|a, b| by_tier_then_monster(&a.record, &b.record));
    partial_completion.sort_by(|a, b| by_tier_then_monster(&a.record, &b.record));

    TeamReport {
        players,
        none_completed,
        partial_completion,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamSortColumn {
    Tier,
    Monster,
    Points,
    CompletedBy,
}

/// Which buckets are shown and how they are sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamView {
    pub show_none: bool,
    pub show_partial: bool,
    pub sort: Option<(TeamSortColumn, SortDirection)>,
}

impl Default for TeamView {
    fn default() -> Self {
        Self {
            show_none: true,
            show_partial: false,
            sort: None,
        }
    }
}

impl TeamView {
    /// Same column flips direction; a new column starts ascending.
    pub fn toggle_sort(&mut self, column: TeamSortColumn) {
        self.sort = match self.sort {
            Some((current, direction)) if current == column => Some((column, direction.flip())),
            _ => Some((column, SortDirection::Ascending)),
        };
    }

    /// The enabled buckets merged, deduplicated and sorted.
    pub fn displayed<'a>(&self, report: &'a TeamReport) -> Vec<&'a TeamEntry> {
        let mut seen = BTreeSet::new();
        let mut entries: Vec<&TeamEntry> = Vec::new();

        if self.show_none {
            entries.extend(&report.none_completed);
        }
        if self.show_partial {
            entries.extend(&report.partial_completion);
        }
        entries.retain(|e| seen.insert(e.record.id));

        match self.sort {
            Some((column, direction)) => {
                entries.sort_by(|a, b| direction.apply(compare_column(column, a, b)));
            }
            None => entries.sort_by(|a, b| by_tier_then_monster(&a.record, &b.record)),
        }
        entries
    }
}

fn compare_column(column: TeamSortColumn, a: &TeamEntry, b: &TeamEntry) -> Ordering {
    match column {
        TeamSortColumn::Tier => a.record.tier.cmp(&b.record.tier),
        TeamSortColumn::Monster => compare_names(&a.record.monster, &b.record.monster),
        TeamSortColumn::Points => a.record.points().cmp(&b.record.points()),
        TeamSortColumn::CompletedBy => a.completed_by.cmp(&b.completed_by),
    }
}

/// Total points available across `entries`.
pub fn total_points(entries: &[&TeamEntry]) -> u32 {
    entries.iter().map(|e| e.record.points()).sum()
}
