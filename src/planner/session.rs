//! Planner session: the persisted planner configuration plus the current
//! plan, recomputed synchronously whenever an input changes.

use super::logic::{build_plan, parse_goal_input, translate_goal};
use super::types::{GoalMode, Plan, PlannerConfig, PrioritySpec};
use crate::catalog::{AchievementId, Catalog};
use crate::error::GoalInputError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Read-only snapshot of what a plan is built from.
#[derive(Debug, Clone, Copy)]
pub struct PlanInputs<'a> {
    pub catalog: &'a Catalog,
    pub completed: &'a HashSet<AchievementId>,
}

impl<'a> PlanInputs<'a> {
    pub fn new(catalog: &'a Catalog, completed: &'a HashSet<AchievementId>) -> Self {
        Self { catalog, completed }
    }

    pub fn is_completed(&self, id: AchievementId) -> bool {
        self.completed.contains(&id)
    }

    pub fn current_points(&self) -> u32 {
        self.catalog.points_for(|id| self.is_completed(id))
    }
}

/// Planner configuration and the plan derived from it.
///
/// Every mutation that can change the plan rebuilds it from scratch with the
/// remembered goal, so the plan never references an excluded id. Without a
/// valid goal the configuration still changes and the plan is left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerSession {
    #[serde(flatten)]
    config: PlannerConfig,
    #[serde(default)]
    plan: Option<Plan>,
}

impl PlannerSession {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config, plan: None }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn mode(&self) -> GoalMode {
        self.config.mode
    }

    pub fn is_excluded(&self, id: AchievementId) -> bool {
        self.config.excluded.contains(&id)
    }

    /// Parse `raw`, remember it as the goal and rebuild.
    ///
    /// Invalid input leaves both goal and plan untouched.
    pub fn generate(&mut self, raw: &str, inputs: PlanInputs<'_>) -> Result<&Plan, GoalInputError> {
        let goal = parse_goal_input(raw)?;
        self.config.goal = Some(goal);
        Ok(self.rebuild_with(goal, inputs))
    }

    /// Flip exclusion of `id` and rebuild. Returns true if now excluded.
    pub fn toggle_exclusion(&mut self, id: AchievementId, inputs: PlanInputs<'_>) -> bool {
        let excluded = if self.config.excluded.remove(&id) {
            false
        } else {
            self.config.excluded.insert(id);
            true
        };
        self.refresh(inputs);
        excluded
    }

    pub fn reset_exclusions(&mut self, inputs: PlanInputs<'_>) {
        self.config.excluded.clear();
        self.refresh(inputs);
    }

    pub fn toggle_mode(&mut self, inputs: PlanInputs<'_>) -> GoalMode {
        self.config.mode = self.config.mode.toggle();
        self.refresh(inputs);
        self.config.mode
    }

    pub fn set_priority(&mut self, priority: PrioritySpec, inputs: PlanInputs<'_>) {
        self.config.priority = priority;
        self.refresh(inputs);
    }

    /// Rebuild the plan from the remembered goal, if there is one.
    pub fn refresh(&mut self, inputs: PlanInputs<'_>) {
        if let Some(goal) = self.config.goal {
            self.rebuild_with(goal, inputs);
        }
    }

    fn rebuild_with(&mut self, goal: u32, inputs: PlanInputs<'_>) -> &Plan {
        let target = translate_goal(goal, self.config.mode, inputs.current_points());
        let plan = build_plan(
            inputs.catalog,
            |id| inputs.is_completed(id),
            |tier| tier.points(),
            target,
            &self.config.excluded,
            &self.config.priority,
        );
        self.plan.insert(plan)
    }
}
