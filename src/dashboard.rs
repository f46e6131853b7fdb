//! Per-tier progress and the player profile summary.

use crate::catalog::{AchievementId, Catalog, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierStats {
    pub tier: Tier,
    pub total: usize,
    pub completed: usize,
}

impl TierStats {
    /// Completion percentage rounded half up; 0 for an empty tier.
    pub fn percent(&self) -> u32 {
        percent(self.completed, self.total)
    }

    pub fn points_earned(&self) -> u32 {
        self.completed as u32 * self.tier.points()
    }
}

/// Completed/total counts for every tier, in rank order.
pub fn tier_stats(catalog: &Catalog, is_completed: impl Fn(AchievementId) -> bool) -> Vec<TierStats> {
    let mut stats: Vec<TierStats> = Tier::ALL
        .iter()
        .map(|&tier| TierStats {
            tier,
            total: 0,
            completed: 0,
        })
        .collect();

    for record in catalog.iter() {
        let entry = &mut stats[record.tier.rank()];
        entry.total += 1;
        if is_completed(record.id) {
            entry.completed += 1;
        }
    }
    stats
}

/// Overview shown in the profile panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub player: Option<String>,
    pub current_points: u32,
    pub total_points: u32,
    pub completed: usize,
    pub total: usize,
    pub tiers: Vec<TierStats>,
}

impl ProfileSummary {
    pub fn build(
        catalog: &Catalog,
        player: Option<&str>,
        is_completed: impl Fn(AchievementId) -> bool,
    ) -> Self {
        let tiers = tier_stats(catalog, &is_completed);
        Self {
            player: player.map(str::to_string),
            current_points: catalog.points_for(&is_completed),
            total_points: catalog.total_points(),
            completed: tiers.iter().map(|t| t.completed).sum(),
            total: catalog.len(),
            tiers,
        }
    }

    pub fn completion_percent(&self) -> u32 {
        percent(self.completed, self.total)
    }
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AchievementRecord;

    fn record(id: AchievementId, tier: Tier) -> AchievementRecord {
        AchievementRecord {
            id,
            name: format!("Task {}", id),
            description: String::new(),
            monster: "Obor".to_string(),
            tier,
            kind: String::new(),
            url: String::new(),
        }
    }

    fn catalog() -> Catalog {
        vec![
            record(1, Tier::Easy),
            record(2, Tier::Easy),
            record(3, Tier::Easy),
            record(4, Tier::Hard),
            record(5, Tier::Grandmaster),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_tier_stats_cover_all_tiers() {
        let stats = tier_stats(&catalog(), |id| id == 1 || id == 4);
        assert_eq!(stats.len(), 6);
        assert_eq!(stats[0].total, 3);
        assert_eq!(stats[0].completed, 1);
        assert_eq!(stats[0].percent(), 33);
        assert_eq!(stats[2].percent(), 100);
        assert_eq!(stats[1].total, 0);
        assert_eq!(stats[1].percent(), 0);
    }

    #[test]
    fn test_percent_rounds_half_up() {
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(2, 3), 67);
    }

    #[test]
    fn test_profile_summary() {
        let profile = ProfileSummary::build(&catalog(), Some("Zezima"), |id| id == 5 || id == 2);
        assert_eq!(profile.player.as_deref(), Some("Zezima"));
        assert_eq!(profile.current_points, 7);
        assert_eq!(profile.total_points, 1 + 1 + 1 + 3 + 6);
        assert_eq!(profile.completed, 2);
        assert_eq!(profile.completion_percent(), 40);
    }
}
