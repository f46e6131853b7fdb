//! Catalog types: tiers, achievement records and the id-keyed catalog.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Stable numeric key of a combat achievement.
pub type AchievementId = u32;

/// Difficulty tier. Declaration order is rank order, so `Ord` sorts
/// Easy < Medium < ... < Grandmaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Easy,
    Medium,
    Hard,
    Elite,
    Master,
    Grandmaster,
}

impl Tier {
    /// All tiers in rank order.
    pub const ALL: [Tier; 6] = [
        Tier::Easy,
        Tier::Medium,
        Tier::Hard,
        Tier::Elite,
        Tier::Master,
        Tier::Grandmaster,
    ];

    /// Display name for the tier.
    pub fn name(&self) -> &'static str {
        match self {
            Tier::Easy => "Easy",
            Tier::Medium => "Medium",
            Tier::Hard => "Hard",
            Tier::Elite => "Elite",
            Tier::Master => "Master",
            Tier::Grandmaster => "Grandmaster",
        }
    }

    /// Zero-based rank (Easy = 0).
    pub fn rank(&self) -> usize {
        *self as usize
    }

    /// Combat achievement points awarded for a task of this tier.
    pub fn points(&self) -> u32 {
        self.rank() as u32 + 1
    }

    /// Parse a tier label leniently.
    ///
    /// Case is ignored and spaces, hyphens and underscores are stripped, so
    /// "Grand Master", "grand-master" and "GRANDMASTER" all parse. The short
    /// forms `gm`, `m` and `e` are accepted as well.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "easy" | "e" => Some(Tier::Easy),
            "medium" => Some(Tier::Medium),
            "hard" => Some(Tier::Hard),
            "elite" => Some(Tier::Elite),
            "master" | "m" => Some(Tier::Master),
            "grandmaster" | "gm" => Some(Tier::Grandmaster),
            _ => None,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One combat achievement as loaded from the catalog. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRecord {
    pub id: AchievementId,
    pub name: String,
    pub description: String,
    pub monster: String,
    pub tier: Tier,
    /// Free-form category such as "Kill Count" or "Perfection".
    pub kind: String,
    pub url: String,
}

impl AchievementRecord {
    pub fn points(&self) -> u32 {
        self.tier.points()
    }
}

/// The immutable achievement catalog, keyed by id.
///
/// Backed by a `BTreeMap` so iteration is always in ascending id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: BTreeMap<AchievementId, AchievementRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any previous record with the same id.
    pub fn insert(&mut self, record: AchievementRecord) {
        self.records.insert(record.id, record);
    }

    pub fn get(&self, id: AchievementId) -> Option<&AchievementRecord> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: AchievementId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &AchievementRecord> {
        self.records.values()
    }

    /// Unique monster names, sorted.
    pub fn monsters(&self) -> Vec<String> {
        self.iter()
            .map(|r| r.monster.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Unique achievement types, sorted. Empty types are skipped.
    pub fn types(&self) -> Vec<String> {
        self.iter()
            .filter(|r| !r.kind.is_empty())
            .map(|r| r.kind.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sum of points over the whole catalog.
    pub fn total_points(&self) -> u32 {
        self.iter().map(AchievementRecord::points).sum()
    }

    /// Points earned by the ids for which `is_completed` holds.
    pub fn points_for(&self, is_completed: impl Fn(AchievementId) -> bool) -> u32 {
        self.iter()
            .filter(|r| is_completed(r.id))
            .map(AchievementRecord::points)
            .sum()
    }
}

impl FromIterator<AchievementRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = AchievementRecord>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for record in iter {
            catalog.insert(record);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: AchievementId, tier: Tier, monster: &str) -> AchievementRecord {
        AchievementRecord {
            id,
            name: format!("Task {}", id),
            description: String::new(),
            monster: monster.to_string(),
            tier,
            kind: "Kill Count".to_string(),
            url: String::new(),
        }
    }

    #[test]
    fn test_tier_points_strictly_increase() {
        let points: Vec<u32> = Tier::ALL.iter().map(Tier::points).collect();
        assert_eq!(points, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_tier_ordering_matches_rank() {
        assert!(Tier::Easy < Tier::Medium);
        assert!(Tier::Master < Tier::Grandmaster);
        let mut tiers = vec![Tier::Elite, Tier::Easy, Tier::Grandmaster, Tier::Hard];
        tiers.sort();
        assert_eq!(tiers, vec![Tier::Easy, Tier::Hard, Tier::Elite, Tier::Grandmaster]);
    }

    #[test]
    fn test_tier_parse_lenient_forms() {
        assert_eq!(Tier::parse("Grandmaster"), Some(Tier::Grandmaster));
        assert_eq!(Tier::parse("Grand Master"), Some(Tier::Grandmaster));
        assert_eq!(Tier::parse("grand-master"), Some(Tier::Grandmaster));
        assert_eq!(Tier::parse("GM"), Some(Tier::Grandmaster));
        assert_eq!(Tier::parse(" hard "), Some(Tier::Hard));
        assert_eq!(Tier::parse("e"), Some(Tier::Easy));
        assert_eq!(Tier::parse("Legendary"), None);
    }

    #[test]
    fn test_catalog_iterates_in_id_order() {
        let catalog: Catalog = vec![
            record(30, Tier::Easy, "Zulrah"),
            record(2, Tier::Hard, "Vorkath"),
            record(11, Tier::Medium, "Obor"),
        ]
        .into_iter()
        .collect();

        let ids: Vec<AchievementId> = catalog.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 11, 30]);
    }

    #[test]
    fn test_catalog_monsters_unique_sorted() {
        let catalog: Catalog = vec![
            record(1, Tier::Easy, "Zulrah"),
            record(2, Tier::Hard, "Vorkath"),
            record(3, Tier::Medium, "Zulrah"),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.monsters(), vec!["Vorkath", "Zulrah"]);
    }

    #[test]
    fn test_catalog_points_for_completed() {
        let catalog: Catalog = vec![
            record(1, Tier::Easy, "A"),
            record(2, Tier::Hard, "B"),
            record(3, Tier::Grandmaster, "C"),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.total_points(), 10);
        assert_eq!(catalog.points_for(|id| id != 2), 7);
        assert_eq!(catalog.points_for(|_| false), 0);
    }
}
