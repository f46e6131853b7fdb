//! Application store: the single owner of catalog, completion state, pins
//! and planner configuration.
//!
//! All state changes go through the store's own methods. Pins and planner
//! configuration are written to the data directory as soon as they change.

use crate::catalog::{AchievementId, Catalog, Tier};
use crate::constants::{PINNED_FILE, PLANNER_FILE};
use crate::error::{GoalInputError, LookupError};
use crate::lookup::{LookupOutcome, LookupTicket, PlayerCompletion};
use crate::persistence::{decode_id_list, DataDir};
use crate::planner::{GoalMode, Plan, PlanInputs, PlannerSession, PrioritySpec};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct AppStore {
    catalog: Catalog,
    catalog_error: Option<String>,
    completed: HashSet<AchievementId>,
    current_player: Option<String>,
    fetched_at: Option<DateTime<Utc>>,
    pinned: Vec<AchievementId>,
    planner: PlannerSession,
    lookup_error: Option<String>,
    lookup_seq: u64,
    pending_lookup: Option<u64>,
    data_dir: Option<DataDir>,
}

impl AppStore {
    /// Store without persistence.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Store backed by `data_dir`, restoring saved pins and planner state.
    pub fn with_data_dir(catalog: Catalog, data_dir: DataDir) -> Self {
        let pin_values: Vec<serde_json::Value> = data_dir.load_json_or_default(PINNED_FILE);
        let pinned = decode_id_list(pin_values);
        let mut planner: PlannerSession = data_dir.load_json_or_default(PLANNER_FILE);
        info!(
            pins = pinned.len(),
            excluded = planner.config().excluded.len(),
            "restored saved state"
        );
        // The saved plan was built against a completion set that is gone now.
        planner.refresh(PlanInputs::new(&catalog, &HashSet::new()));
        Self {
            catalog,
            pinned,
            planner,
            data_dir: Some(data_dir),
            ..Self::default()
        }
    }

    /// Record that the catalog failed to load. The store stays usable.
    pub fn set_catalog_error(&mut self, message: impl Into<String>) {
        self.catalog_error = Some(message.into());
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_error(&self) -> Option<&str> {
        self.catalog_error.as_deref()
    }

    // --- Completion state ---

    pub fn is_completed(&self, id: AchievementId) -> bool {
        self.completed.contains(&id)
    }

    pub fn points_for_tier(&self, tier: Tier) -> u32 {
        tier.points()
    }

    pub fn current_points(&self) -> u32 {
        self.plan_inputs().current_points()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn current_player(&self) -> Option<&str> {
        self.current_player.as_deref()
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn lookup_error(&self) -> Option<&str> {
        self.lookup_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending_lookup.is_some()
    }

    pub fn plan_inputs(&self) -> PlanInputs<'_> {
        PlanInputs::new(&self.catalog, &self.completed)
    }

    /// Start a lookup. Any earlier lookup still in flight becomes stale.
    pub fn begin_lookup(&mut self, player: &str) -> LookupTicket {
        self.lookup_seq += 1;
        self.pending_lookup = Some(self.lookup_seq);
        self.lookup_error = None;
        info!(player, seq = self.lookup_seq, "lookup started");
        LookupTicket {
            seq: self.lookup_seq,
            player: player.trim().to_string(),
        }
    }

    /// Apply a finished lookup if it is the latest one issued.
    ///
    /// A failure clears the current player and completion set; catalog,
    /// pins and planner configuration are never touched.
    pub fn finish_lookup(
        &mut self,
        ticket: &LookupTicket,
        result: Result<PlayerCompletion, LookupError>,
    ) -> LookupOutcome {
        if ticket.seq != self.lookup_seq {
            info!(player = %ticket.player, seq = ticket.seq, latest = self.lookup_seq, "discarding stale lookup");
            return LookupOutcome::Stale;
        }
        self.pending_lookup = None;

        match result {
            Ok(completion) => {
                let completed = completion.completed.len();
                let player = completion.player.clone();
                self.apply_completion(completion);
                LookupOutcome::Applied { player, completed }
            }
            Err(e) => {
                warn!(player = %ticket.player, error = %e, "lookup failed");
                let message = e.user_message();
                self.lookup_error = Some(message.clone());
                self.current_player = None;
                self.fetched_at = None;
                self.completed.clear();
                self.refresh_plan();
                LookupOutcome::Failed { message }
            }
        }
    }

    /// Replace the completion state and rebuild the plan against it.
    pub fn apply_completion(&mut self, completion: PlayerCompletion) {
        self.completed = completion.completed_set();
        self.current_player = Some(completion.player);
        self.fetched_at = Some(completion.fetched_at);
        self.lookup_error = None;
        self.refresh_plan();
    }

    /// Rebuild the plan against the current completion set and save it.
    fn refresh_plan(&mut self) {
        let inputs = PlanInputs::new(&self.catalog, &self.completed);
        self.planner.refresh(inputs);
        self.save_planner();
    }

    // --- Pins ---

    pub fn pinned(&self) -> &[AchievementId] {
        &self.pinned
    }

    pub fn is_pinned(&self, id: AchievementId) -> bool {
        self.pinned.contains(&id)
    }

    /// Pin or unpin `id`. Returns true if now pinned.
    pub fn toggle_pin(&mut self, id: AchievementId) -> bool {
        let pinned = match self.pinned.iter().position(|&p| p == id) {
            Some(index) => {
                self.pinned.remove(index);
                false
            }
            None => {
                self.pinned.push(id);
                true
            }
        };
        self.save_pins();
        pinned
    }

    /// Pin every id not already pinned. Returns how many were added.
    pub fn pin_all(&mut self, ids: &[AchievementId]) -> usize {
        let mut added = 0;
        for &id in ids {
            if !self.pinned.contains(&id) {
                self.pinned.push(id);
                added += 1;
            }
        }
        if added > 0 {
            self.save_pins();
        }
        added
    }

    /// Unpin every id in `ids`. Returns how many were removed.
    pub fn unpin_all(&mut self, ids: &[AchievementId]) -> usize {
        let before = self.pinned.len();
        self.pinned.retain(|id| !ids.contains(id));
        let removed = before - self.pinned.len();
        if removed > 0 {
            self.save_pins();
        }
        removed
    }

    pub fn clear_pins(&mut self) {
        self.pinned.clear();
        if let Some(dir) = &self.data_dir {
            if let Err(e) = dir.remove(PINNED_FILE) {
                warn!(error = %e, "failed to remove pins file");
            }
        }
    }

    // --- Planner ---

    pub fn planner(&self) -> &PlannerSession {
        &self.planner
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.planner.plan()
    }

    /// Build a plan from the raw goal text. Invalid input changes nothing.
    pub fn generate_plan(&mut self, raw_goal: &str) -> Result<(), GoalInputError> {
        let inputs = PlanInputs::new(&self.catalog, &self.completed);
        self.planner.generate(raw_goal, inputs)?;
        self.save_planner();
        Ok(())
    }

    pub fn toggle_exclusion(&mut self, id: AchievementId) -> bool {
        let inputs = PlanInputs::new(&self.catalog, &self.completed);
        let excluded = self.planner.toggle_exclusion(id, inputs);
        self.save_planner();
        excluded
    }

    pub fn reset_exclusions(&mut self) {
        let inputs = PlanInputs::new(&self.catalog, &self.completed);
        self.planner.reset_exclusions(inputs);
        self.save_planner();
    }

    pub fn toggle_goal_mode(&mut self) -> GoalMode {
        let inputs = PlanInputs::new(&self.catalog, &self.completed);
        let mode = self.planner.toggle_mode(inputs);
        self.save_planner();
        mode
    }

    pub fn set_priority(&mut self, priority: PrioritySpec) {
        let inputs = PlanInputs::new(&self.catalog, &self.completed);
        self.planner.set_priority(priority, inputs);
        self.save_planner();
    }

    /// Pin everything in the current plan. Returns how many were added.
    pub fn pin_plan(&mut self) -> usize {
        let ids = match self.planner.plan() {
            Some(plan) => plan.ids(),
            None => return 0,
        };
        self.pin_all(&ids)
    }

    // --- Persistence ---

    fn save_pins(&self) {
        if let Some(dir) = &self.data_dir {
            if let Err(e) = dir.save_json(PINNED_FILE, &self.pinned) {
                warn!(error = %e, "failed to save pins");
            }
        }
    }

    fn save_planner(&self) {
        if let Some(dir) = &self.data_dir {
            if let Err(e) = dir.save_json(PLANNER_FILE, &self.planner) {
                warn!(error = %e, "failed to save planner state");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AchievementRecord;

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

    fn catalog() -> Catalog {
        vec![
            record(1, Tier::Easy, "Vorkath"),
            record(2, Tier::Hard, "Zulrah"),
            record(3, Tier::Medium, "Zulrah"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_toggle_pin_round_trip() {
        let mut store = AppStore::new(catalog());
        assert!(store.toggle_pin(2));
        assert!(store.toggle_pin(1));
        assert_eq!(store.pinned(), &[2, 1]);
        assert!(!store.toggle_pin(2));
        assert_eq!(store.pinned(), &[1]);
    }

    #[test]
    fn test_pin_all_skips_existing() {
        let mut store = AppStore::new(catalog());
        store.toggle_pin(3);
        assert_eq!(store.pin_all(&[1, 3, 2]), 2);
        assert_eq!(store.pinned(), &[3, 1, 2]);
    }

    #[test]
    fn test_stale_lookup_is_discarded() {
        let mut store = AppStore::new(catalog());
        let first = store.begin_lookup("Slow Player");
        let second = store.begin_lookup("Fast Player");

        let outcome = store.finish_lookup(&second, Ok(PlayerCompletion::new("Fast Player", vec![1])));
        assert!(matches!(outcome, LookupOutcome::Applied { completed: 1, .. }));
        assert!(!store.is_loading());

        let outcome = store.finish_lookup(&first, Ok(PlayerCompletion::new("Slow Player", vec![1, 2, 3])));
        assert_eq!(outcome, LookupOutcome::Stale);
        assert_eq!(store.current_player(), Some("Fast Player"));
        assert_eq!(store.current_points(), 1);
    }

    #[test]
    fn test_failed_lookup_clears_player_but_keeps_pins() {
        let mut store = AppStore::new(catalog());
        store.apply_completion(PlayerCompletion::new("Zezima", vec![2]));
        store.toggle_pin(1);
        store.toggle_exclusion(3);

        let ticket = store.begin_lookup("Nobody");
        let outcome = store.finish_lookup(
            &ticket,
            Err(LookupError::NotFound {
                player: "Nobody".to_string(),
                status: 404,
            }),
        );

        assert!(matches!(outcome, LookupOutcome::Failed { .. }));
        assert_eq!(store.current_player(), None);
        assert_eq!(store.completed_count(), 0);
        assert_eq!(store.lookup_error(), Some("Player not found or API error"));
        assert_eq!(store.pinned(), &[1]);
        assert!(store.planner().is_excluded(3));
        assert_eq!(store.catalog().len(), 3);
    }

    #[test]
    fn test_completion_change_rebuilds_plan() {
        let mut store = AppStore::new(catalog());
        store.generate_plan("3").unwrap();
        assert_eq!(store.plan().unwrap().ids(), vec![1, 3]);

        store.apply_completion(PlayerCompletion::new("Zezima", vec![1]));
        assert_eq!(store.plan().unwrap().ids(), vec![3, 2]);
    }

    #[test]
    fn test_failed_lookup_rebuilds_plan_without_completion() {
        let mut store = AppStore::new(catalog());
        store.apply_completion(PlayerCompletion::new("Zezima", vec![1]));
        store.toggle_goal_mode();
        store.generate_plan("3").unwrap();
        // One point earned, two to go: Medium alone covers it.
        assert_eq!(store.plan().unwrap().ids(), vec![3]);
        assert_eq!(store.plan().unwrap().target, 2);

        let ticket = store.begin_lookup("Nobody");
        store.finish_lookup(
            &ticket,
            Err(LookupError::NotFound {
                player: "Nobody".to_string(),
                status: 404,
            }),
        );

        let plan = store.plan().unwrap();
        assert_eq!(plan.target, 3);
        assert_eq!(plan.ids(), vec![1, 3]);
    }

    #[test]
    fn test_pin_plan() {
        let mut store = AppStore::new(catalog());
        assert_eq!(store.pin_plan(), 0);
        store.generate_plan("3").unwrap();
        assert_eq!(store.pin_plan(), 2);
        assert_eq!(store.pinned(), &[1, 3]);
    }
}
