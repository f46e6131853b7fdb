//! Combat achievement catalog.
//!
//! The catalog is loaded once at startup from `combat_achievements.json`
//! and never mutated afterwards.

pub mod loader;
pub mod types;

pub use loader::{load_catalog, parse_catalog};
pub use types::{AchievementId, AchievementRecord, Catalog, Tier};
