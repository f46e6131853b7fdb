//! ca-tracker - Combat Achievement Tracker Library
//!
//! Catalog loading, player completion lookup, and the points planner behind
//! the terminal dashboard. Exposed for testing and for the one-shot CLI.

pub mod browser;
pub mod build_info;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod persistence;
pub mod planner;
pub mod store;
pub mod team;
pub mod todo;

pub use catalog::{AchievementId, AchievementRecord, Catalog, Tier};
pub use planner::{build_plan, GoalMode, Plan, PlannerSession, PrioritySpec};
pub use store::AppStore;
pub use team::SortDirection;
