//! Plan building: eligible pool, priority ordering and greedy accumulation.

use super::types::{GoalMode, Plan, PrioritySpec};
use crate::catalog::{AchievementId, AchievementRecord, Catalog, Tier};
use crate::error::GoalInputError;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::debug;

/// Build a plan reaching `target` points from the incomplete, non-excluded
/// part of the catalog.
///
/// The pool is ordered by [`order_pool`] and then walked first-fit: items are
/// appended until the accumulated points reach the target or the pool runs
/// out. No backtracking, so the result is the shortest prefix of the ordered
/// pool that meets the target, not a minimal-overshoot selection.
pub fn build_plan<C, P>(
    catalog: &Catalog,
    is_completed: C,
    points_for_tier: P,
    target: u32,
    excluded: &BTreeSet<AchievementId>,
    priority: &PrioritySpec,
) -> Plan
where
    C: Fn(AchievementId) -> bool,
    P: Fn(Tier) -> u32,
{
    if target == 0 {
        return Plan::empty(0);
    }

    let pool: Vec<&AchievementRecord> = catalog
        .iter()
        .filter(|r| !is_completed(r.id) && !excluded.contains(&r.id))
        .collect();
    let pool_size = pool.len();

    let mut suggested = Vec::new();
    let mut accumulated = 0;
    for record in order_pool(pool, priority) {
        if accumulated >= target {
            break;
        }
        accumulated += points_for_tier(record.tier);
        suggested.push(record.clone());
    }

    debug!(
        target,
        pool_size,
        suggested = suggested.len(),
        accumulated,
        "plan built"
    );

    Plan {
        suggested,
        accumulated,
        target,
    }
}

/// Order the eligible pool according to which parts of `priority` are set.
///
/// - nothing set: tier ascending, then monster
/// - types only: matching types first; each half tier ascending, then monster
/// - tiers only: matching tiers first sorted by monster; the rest tier
///   *descending*, then monster
/// - both: type+tier, type only, tier only, neither. Buckets containing a
///   tier match sort by monster, the others tier ascending then monster
///
/// Sorting is stable and the pool arrives in id order, so ties beyond the
/// monster name resolve by ascending id.
pub fn order_pool<'a>(
    mut pool: Vec<&'a AchievementRecord>,
    priority: &PrioritySpec,
) -> Vec<&'a AchievementRecord> {
    match (priority.active_types(), priority.active_tiers()) {
        (None, None) => {
            pool.sort_by(|a, b| by_tier_then_monster(a, b));
            pool
        }
        (Some(types), None) => {
            let (mut matching, mut rest): (Vec<_>, Vec<_>) =
                pool.into_iter().partition(|r| types.contains(&r.kind));
            matching.sort_by(|a, b| by_tier_then_monster(a, b));
            rest.sort_by(|a, b| by_tier_then_monster(a, b));
            matching.extend(rest);
            matching
        }
        (None, Some(tiers)) => {
            let (mut matching, mut rest): (Vec<_>, Vec<_>) =
                pool.into_iter().partition(|r| tiers.contains(&r.tier));
            matching.sort_by(|a, b| by_monster(a, b));
            rest.sort_by(|a, b| by_tier_desc_then_monster(a, b));
            matching.extend(rest);
            matching
        }
        (Some(types), Some(tiers)) => {
            let mut both = Vec::new();
            let mut type_only = Vec::new();
            let mut tier_only = Vec::new();
            let mut neither = Vec::new();

            for record in pool {
                match (types.contains(&record.kind), tiers.contains(&record.tier)) {
                    (true, true) => both.push(record),
                    (true, false) => type_only.push(record),
                    (false, true) => tier_only.push(record),
                    (false, false) => neither.push(record),
                }
            }

            both.sort_by(|a, b| by_monster(a, b));
            type_only.sort_by(|a, b| by_tier_then_monster(a, b));
            tier_only.sort_by(|a, b| by_monster(a, b));
            neither.sort_by(|a, b| by_tier_then_monster(a, b));

            both.extend(type_only);
            both.extend(tier_only);
            both.extend(neither);
            both
        }
    }
}

/// Tier ascending, then monster name. Shared with the team and to-do views.
pub fn by_tier_then_monster(a: &AchievementRecord, b: &AchievementRecord) -> Ordering {
    a.tier
        .cmp(&b.tier)
        .then_with(|| compare_names(&a.monster, &b.monster))
}

fn by_tier_desc_then_monster(a: &AchievementRecord, b: &AchievementRecord) -> Ordering {
    b.tier
        .cmp(&a.tier)
        .then_with(|| compare_names(&a.monster, &b.monster))
}

fn by_monster(a: &AchievementRecord, b: &AchievementRecord) -> Ordering {
    compare_names(&a.monster, &b.monster)
}

/// Dictionary order for display names: letters compare case-insensitively
/// and case only breaks ties, lowercase first.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| b.cmp(a))
}

/// Translate the raw goal into the number of points the plan must gain.
pub fn translate_goal(raw: u32, mode: GoalMode, current_points: u32) -> u32 {
    match mode {
        GoalMode::Additional => raw,
        GoalMode::Total => raw.saturating_sub(current_points),
    }
}

/// Parse the goal typed by the user.
///
/// Only positive integers are accepted; everything else is an
/// [`GoalInputError`] the caller is expected to ignore.
pub fn parse_goal_input(input: &str) -> Result<u32, GoalInputError> {
    let trimmed = input.trim();
    let value: i64 = trimmed.parse().map_err(|_| GoalInputError::NotNumeric)?;
    if value <= 0 {
        return Err(GoalInputError::NonPositive);
    }
    u32::try_from(value).map_err(|_| GoalInputError::NotNumeric)
}
