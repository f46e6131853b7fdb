//! Points planner.
//!
//! Given a point goal, the player's completion state, exclusions and optional
//! type/tier priorities, selects an ordered list of incomplete achievements
//! whose points reach the goal. [`build_plan`] is a pure function; the
//! [`PlannerSession`] keeps the persisted configuration and recomputes the
//! plan whenever one of its inputs changes.

pub mod logic;
pub mod session;
pub mod types;

pub use logic::{build_plan, compare_names, order_pool, parse_goal_input, translate_goal};
pub use session::{PlanInputs, PlannerSession};
pub use types::{GoalMode, Plan, PlannerConfig, PrioritySpec};
