//! Catalog browser: filter by tier, status, monster and name, sort by column.

use crate::catalog::{AchievementId, AchievementRecord, Catalog, Tier};
use crate::planner::logic::compare_names;
use crate::team::SortDirection;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl StatusFilter {
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::Incomplete,
            StatusFilter::Incomplete => StatusFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All Status",
            StatusFilter::Completed => "Completed",
            StatusFilter::Incomplete => "Incomplete",
        }
    }

    fn matches(&self, completed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => completed,
            StatusFilter::Incomplete => !completed,
        }
    }
}

/// Active browser filters. `None` means "All".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserFilter {
    pub tier: Option<Tier>,
    pub status: StatusFilter,
    pub monster: Option<String>,
    /// Case-insensitive substring of the achievement name.
    pub search: String,
}

impl BrowserFilter {
    pub fn for_tier(tier: Tier) -> Self {
        Self {
            tier: Some(tier),
            ..Self::default()
        }
    }

    /// Step the tier filter: All -> Easy -> ... -> Grandmaster -> All.
    pub fn cycle_tier(&mut self) {
        self.tier = match self.tier {
            None => Some(Tier::Easy),
            Some(t) => Tier::ALL.get(t.rank() + 1).copied(),
        };
    }

    /// Step the monster filter through `monsters`, wrapping to All.
    pub fn cycle_monster(&mut self, monsters: &[String]) {
        self.monster = match &self.monster {
            None => monsters.first().cloned(),
            Some(current) => monsters
                .iter()
                .position(|m| m == current)
                .and_then(|i| monsters.get(i + 1))
                .cloned(),
        };
    }

    fn matches(&self, record: &AchievementRecord, completed: bool, needle: &str) -> bool {
        self.tier.map_or(true, |t| record.tier == t)
            && self.status.matches(completed)
            && self.monster.as_ref().map_or(true, |m| &record.monster == m)
            && record.name.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserSortKey {
    Tier,
    Monster,
    Name,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserSort {
    pub key: BrowserSortKey,
    pub direction: SortDirection,
}

impl Default for BrowserSort {
    fn default() -> Self {
        Self {
            key: BrowserSortKey::Tier,
            direction: SortDirection::Ascending,
        }
    }
}

impl BrowserSort {
    /// Same key flips direction; a new key starts ascending.
    pub fn toggle(&mut self, key: BrowserSortKey) {
        if self.key == key {
            self.direction = self.direction.flip();
        } else {
            self.key = key;
            self.direction = SortDirection::Ascending;
        }
    }
}

/// One row of the browser table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserRow<'a> {
    pub record: &'a AchievementRecord,
    pub completed: bool,
}

impl BrowserRow<'_> {
    pub fn id(&self) -> AchievementId {
        self.record.id
    }
}

/// Filter and sort the catalog. The sort is stable over id order.
pub fn browse<'a>(
    catalog: &'a Catalog,
    is_completed: impl Fn(AchievementId) -> bool,
    filter: &BrowserFilter,
    sort: BrowserSort,
) -> Vec<BrowserRow<'a>> {
    let needle = filter.search.trim().to_lowercase();
    let mut rows: Vec<BrowserRow<'a>> = catalog
        .iter()
        .map(|record| BrowserRow {
            record,
            completed: is_completed(record.id),
        })
        .filter(|row| filter.matches(row.record, row.completed, &needle))
        .collect();

    rows.sort_by(|a, b| sort.direction.apply(compare_key(sort.key, a, b)));
    rows
}

fn compare_key(key: BrowserSortKey, a: &BrowserRow<'_>, b: &BrowserRow<'_>) -> Ordering {
    match key {
        BrowserSortKey::Tier => a.record.tier.cmp(&b.record.tier),
        BrowserSortKey::Monster => compare_names(&a.record.monster, &b.record.monster),
        BrowserSortKey::Name => compare_names(&a.record.name, &b.record.name),
        BrowserSortKey::Completed => a.completed.cmp(&b.completed),
    }
}
