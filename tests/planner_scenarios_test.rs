//! Integration test: points planner
//!
//! Drives the plan builder and planner session through the public API with
//! catalogs parsed from the same JSON layout the application loads.

use ca_tracker::catalog::parse_catalog;
use ca_tracker::planner::{translate_goal, PlanInputs};
use ca_tracker::{build_plan, AchievementId, Catalog, GoalMode, PlannerSession, PrioritySpec, Tier};
use std::collections::{BTreeSet, HashSet};

/// Three-record catalog used by the worked examples.
const SMALL: &str = r#"{
    "1": {"Name": "Vorkath Novice", "Monster": "Vorkath", "Tier": "Easy", "Type": "KC"},
    "2": {"Name": "Zulrah Veteran", "Monster": "Zulrah", "Tier": "Hard", "Type": "KC"},
    "3": {"Name": "Snake Charmer", "Monster": "Zulrah", "Tier": "Medium", "Type": "Perfection"}
}"#;

/// Six records spread over types, tiers and monsters for the ordering policies.
const MIXED: &str = r#"{
    "1": {"Name": "A", "Monster": "Vorkath", "Tier": "Easy", "Type": "KC"},
    "2": {"Name": "B", "Monster": "Zulrah", "Tier": "Hard", "Type": "KC"},
    "3": {"Name": "C", "Monster": "Zulrah", "Tier": "Medium", "Type": "Perfection"},
    "4": {"Name": "D", "Monster": "Abyssal Sire", "Tier": "Hard", "Type": "Perfection"},
    "5": {"Name": "E", "Monster": "Cerberus", "Tier": "Elite", "Type": "KC"},
    "6": {"Name": "F", "Monster": "Barrows", "Tier": "Easy", "Type": "Mechanical"}
}"#;

fn catalog(json: &str) -> Catalog {
    parse_catalog(json).expect("fixture parses")
}

fn plan_ids(
    catalog: &Catalog,
    completed: &HashSet<AchievementId>,
    target: u32,
    excluded: &BTreeSet<AchievementId>,
    priority: &PrioritySpec,
) -> Vec<AchievementId> {
    build_plan(
        catalog,
        |id| completed.contains(&id),
        |tier: Tier| tier.points(),
        target,
        excluded,
        priority,
    )
    .ids()
}

/// Full ordering of the pool: a target no catalog can reach consumes it all.
fn full_order(catalog: &Catalog, priority: &PrioritySpec) -> Vec<AchievementId> {
    plan_ids(catalog, &HashSet::new(), 10_000, &BTreeSet::new(), priority)
}

// =============================================================================
// Worked examples
// =============================================================================

#[test]
fn test_default_order_stops_at_first_sufficient_prefix() {
    let catalog = catalog(SMALL);
    let plan = build_plan(
        &catalog,
        |_| false,
        |tier: Tier| tier.points(),
        3,
        &BTreeSet::new(),
        &PrioritySpec::none(),
    );
    assert_eq!(plan.ids(), vec![1, 3]);
    assert_eq!(plan.accumulated, 3);
    assert_eq!(plan.target, 3);
    assert!(plan.reached());
}

#[test]
fn test_tier_priority_front_loads_hard() {
    let catalog = catalog(SMALL);
    let priority = PrioritySpec::none().with_tiers([Tier::Hard]);
    assert_eq!(full_order(&catalog, &priority), vec![2, 3, 1]);
    assert_eq!(
        plan_ids(&catalog, &HashSet::new(), 3, &BTreeSet::new(), &priority),
        vec![2]
    );
}

#[test]
fn test_excluding_then_rebuilding_drops_the_id() {
    let catalog = catalog(SMALL);
    let completed = HashSet::new();
    let mut session = PlannerSession::default();
    session
        .generate("3", PlanInputs::new(&catalog, &completed))
        .expect("valid goal");
    assert_eq!(session.plan().unwrap().ids(), vec![1, 3]);

    assert!(session.toggle_exclusion(2, PlanInputs::new(&catalog, &completed)));
    let plan = session.plan().unwrap();
    assert_eq!(plan.ids(), vec![1, 3]);
    assert_eq!(plan.accumulated, 3);
    assert!(!plan.contains(2));
}

#[test]
fn test_goal_mode_translation() {
    assert_eq!(translate_goal(30, GoalMode::Total, 40), 0);
    assert_eq!(translate_goal(50, GoalMode::Total, 40), 10);
    assert_eq!(translate_goal(50, GoalMode::Additional, 40), 50);
}

// =============================================================================
// Ordering policies
// =============================================================================

#[test]
fn test_no_priority_orders_by_tier_then_monster() {
    assert_eq!(full_order(&catalog(MIXED), &PrioritySpec::none()), vec![6, 1, 3, 4, 2, 5]);
}

#[test]
fn test_types_only_keeps_tier_order_inside_each_half() {
    let priority = PrioritySpec::none().with_types(["KC"]);
    assert_eq!(full_order(&catalog(MIXED), &priority), vec![1, 2, 5, 6, 3, 4]);
}

#[test]
fn test_tiers_only_sorts_remainder_by_descending_tier() {
    let priority = PrioritySpec::none().with_tiers([Tier::Easy, Tier::Elite]);
    assert_eq!(full_order(&catalog(MIXED), &priority), vec![6, 5, 1, 4, 2, 3]);
}

#[test]
fn test_both_populated_uses_four_buckets() {
    let priority = PrioritySpec::none()
        .with_types(["Perfection"])
        .with_tiers([Tier::Hard]);
    assert_eq!(full_order(&catalog(MIXED), &priority), vec![4, 3, 2, 6, 1, 5]);
}

#[test]
fn test_empty_priority_sets_fall_back_to_default_order() {
    let priority = PrioritySpec::none()
        .with_types(Vec::<String>::new())
        .with_tiers([]);
    assert_eq!(
        full_order(&catalog(MIXED), &priority),
        full_order(&catalog(MIXED), &PrioritySpec::none())
    );
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_every_proper_prefix_falls_short() {
    let catalog = catalog(MIXED);
    for target in 1..=20 {
        let plan = build_plan(
            &catalog,
            |_| false,
            |tier: Tier| tier.points(),
            target,
            &BTreeSet::new(),
            &PrioritySpec::none(),
        );
        let points: Vec<u32> = plan.suggested.iter().map(|r| r.points()).collect();
        let mut running = 0;
        for (i, p) in points.iter().enumerate() {
            running += p;
            if i + 1 < points.len() {
                assert!(running < target, "target {} overshot early", target);
            }
        }
        assert_eq!(running, plan.accumulated);
        assert!(plan.reached() || plan.len() == catalog.len());
    }
}

#[test]
fn test_rebuilding_is_idempotent() {
    let catalog = catalog(MIXED);
    let priority = PrioritySpec::none().with_types(["KC"]).with_tiers([Tier::Easy]);
    let first = plan_ids(&catalog, &HashSet::new(), 7, &BTreeSet::new(), &priority);
    let second = plan_ids(&catalog, &HashSet::new(), 7, &BTreeSet::new(), &priority);
    assert_eq!(first, second);
}

#[test]
fn test_excluded_ids_never_planned() {
    let catalog = catalog(MIXED);
    for id in 1..=6 {
        let excluded = BTreeSet::from([id]);
        let ids = plan_ids(&catalog, &HashSet::new(), 10_000, &excluded, &PrioritySpec::none());
        assert!(!ids.contains(&id));
        assert_eq!(ids.len(), 5);
    }
}

#[test]
fn test_completed_ids_never_planned() {
    let catalog = catalog(MIXED);
    let completed = HashSet::from([1, 6]);
    let ids = plan_ids(&catalog, &completed, 10_000, &BTreeSet::new(), &PrioritySpec::none());
    assert_eq!(ids, vec![3, 4, 2, 5]);
}

#[test]
fn test_zero_target_and_empty_catalog_give_empty_plans() {
    let catalog = catalog(MIXED);
    assert!(plan_ids(&catalog, &HashSet::new(), 0, &BTreeSet::new(), &PrioritySpec::none()).is_empty());

    let empty = Catalog::new();
    let plan = build_plan(
        &empty,
        |_| false,
        |tier: Tier| tier.points(),
        5,
        &BTreeSet::new(),
        &PrioritySpec::none(),
    );
    assert!(plan.is_empty());
    assert_eq!(plan.accumulated, 0);
    assert_eq!(plan.shortfall(), 5);
}

// =============================================================================
// Session recompute
// =============================================================================

#[test]
fn test_total_mode_subtracts_current_points() {
    let catalog = catalog(MIXED);
    // Easy + Easy + Medium = 4 points already earned.
    let completed = HashSet::from([1, 6, 3]);
    let inputs = PlanInputs::new(&catalog, &completed);
    assert_eq!(inputs.current_points(), 4);

    let mut session = PlannerSession::default();
    session.toggle_mode(inputs);
    let plan = session.generate("7", inputs).expect("valid goal");
    assert_eq!(plan.target, 3);
    assert_eq!(plan.ids(), vec![4]);

    let plan = session.generate("4", inputs).expect("valid goal");
    assert_eq!(plan.target, 0);
    assert!(plan.is_empty());
}

#[test]
fn test_invalid_goal_keeps_previous_plan() {
    let catalog = catalog(SMALL);
    let completed = HashSet::new();
    let inputs = PlanInputs::new(&catalog, &completed);
    let mut session = PlannerSession::default();
    session.generate("3", inputs).expect("valid goal");

    assert!(session.generate("0", inputs).is_err());
    assert!(session.generate("-4", inputs).is_err());
    assert!(session.generate("lots", inputs).is_err());
    assert_eq!(session.plan().unwrap().ids(), vec![1, 3]);
    assert_eq!(session.config().goal, Some(3));
}

#[test]
fn test_priority_change_rebuilds_with_same_goal() {
    let catalog = catalog(SMALL);
    let completed = HashSet::new();
    let inputs = PlanInputs::new(&catalog, &completed);
    let mut session = PlannerSession::default();
    session.generate("3", inputs).expect("valid goal");

    session.set_priority(PrioritySpec::none().with_tiers([Tier::Hard]), inputs);
    assert_eq!(session.plan().unwrap().ids(), vec![2]);

    session.set_priority(PrioritySpec::none(), inputs);
    assert_eq!(session.plan().unwrap().ids(), vec![1, 3]);
}
