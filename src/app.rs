//! Terminal application state.
//!
//! `App` wraps the [`AppStore`] with everything that only matters on screen:
//! the active view, per-view cursors and text fields, and transient status
//! messages. Lookups run on the [`LookupWorker`]; replies are drained once
//! per frame through [`App::handle_reply`].

use crate::ui::text_input::TextInput;
use ca_tracker::browser::{browse, BrowserFilter, BrowserRow, BrowserSort};
use ca_tracker::catalog::Tier;
use ca_tracker::constants::{MAX_TEAM_PLAYERS, MIN_TEAM_SLOTS, STATUS_MESSAGE_SECONDS};
use ca_tracker::lookup::{LookupOutcome, LookupReply, LookupWorker};
use ca_tracker::team::{active_names, build_team_report, TeamReport, TeamView};
use ca_tracker::todo::{prune_completed, TodoSort};
use ca_tracker::AppStore;
use chrono::{DateTime, Utc};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Browser,
    Planner,
    Todo,
    Team,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Browser,
        View::Planner,
        View::Todo,
        View::Team,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Browser => "Browse",
            View::Planner => "Planner",
            View::Todo => "To-Do",
            View::Team => "Team",
        }
    }

    pub fn index(&self) -> usize {
        View::ALL.iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }
}

/// Which text field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    None,
    Player,
    Goal,
    Search,
    TeamSlot(usize),
}

/// One entry of the planner's priority picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriorityOption {
    Tier(Tier),
    Type(String),
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    pub shown_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct BrowserState {
    pub filter: BrowserFilter,
    pub sort: BrowserSort,
    pub search_input: TextInput,
    pub selected: usize,
}

#[derive(Debug, Default)]
pub struct PlannerState {
    pub goal_input: TextInput,
    pub goal_error: Option<String>,
    pub selected: usize,
    pub priority_cursor: usize,
}

#[derive(Debug, Default)]
pub struct TodoState {
    pub sort: TodoSort,
    pub grouped: bool,
    pub selected: usize,
    pub message: Option<String>,
    /// Lookup issued by a refresh; its reply triggers the prune.
    pub refresh_seq: Option<u64>,
}

#[derive(Debug)]
pub struct TeamState {
    pub names: Vec<TextInput>,
    pub slot: usize,
    pub report: Option<TeamReport>,
    pub view: TeamView,
    pub error: Option<String>,
    pub seq: u64,
    pub loading: bool,
    pub selected: usize,
}

impl Default for TeamState {
    fn default() -> Self {
        Self {
            names: vec![TextInput::new(); MIN_TEAM_SLOTS],
            slot: 0,
            report: None,
            view: TeamView::default(),
            error: None,
            seq: 0,
            loading: false,
            selected: 0,
        }
    }
}

impl TeamState {
    pub fn add_slot(&mut self) -> bool {
        if self.names.len() >= MAX_TEAM_PLAYERS {
            return false;
        }
        self.names.push(TextInput::new());
        self.slot = self.names.len() - 1;
        true
    }

    pub fn remove_slot(&mut self) -> bool {
        if self.names.len() <= MIN_TEAM_SLOTS {
            return false;
        }
        self.names.remove(self.slot);
        self.slot = self.slot.min(self.names.len() - 1);
        true
    }

    pub fn next_slot(&mut self) {
        self.slot = (self.slot + 1) % self.names.len();
    }

    pub fn prev_slot(&mut self) {
        self.slot = (self.slot + self.names.len() - 1) % self.names.len();
    }

    fn name_values(&self) -> Vec<String> {
        self.names.iter().map(|n| n.value().to_string()).collect()
    }
}

pub struct App {
    pub store: AppStore,
    pub worker: LookupWorker,
    pub view: View,
    pub focus: Focus,
    pub player_input: TextInput,
    pub show_profile: bool,
    pub dashboard_tier: usize,
    pub browser: BrowserState,
    pub planner: PlannerState,
    pub todo: TodoState,
    pub team: TeamState,
    pub status: Option<StatusMessage>,
    pub monsters: Vec<String>,
    pub types: Vec<String>,
}

impl App {
    pub fn new(store: AppStore, worker: LookupWorker) -> Self {
        let monsters = store.catalog().monsters();
        let types = store.catalog().types();
        let goal_input = match store.planner().config().goal {
            Some(goal) => TextInput::with_value(&goal.to_string()),
            None => TextInput::new(),
        };
        Self {
            store,
            worker,
            view: View::Dashboard,
            focus: Focus::None,
            player_input: TextInput::new(),
            show_profile: false,
            dashboard_tier: 0,
            browser: BrowserState::default(),
            planner: PlannerState {
                goal_input,
                ..PlannerState::default()
            },
            todo: TodoState::default(),
            team: TeamState::default(),
            status: None,
            monsters,
            types,
        }
    }

    /// Leaving the browser drops its tier filter.
    pub fn switch_view(&mut self, view: View) {
        if self.view == View::Browser && view != View::Browser {
            self.browser.filter.tier = None;
            self.browser.selected = 0;
        }
        self.view = view;
        self.focus = Focus::None;
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
            shown_at: Utc::now(),
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
            shown_at: Utc::now(),
        });
    }

    /// Drop the status message once it has been visible long enough.
    pub fn expire_status(&mut self, now: DateTime<Utc>) {
        if let Some(status) = &self.status {
            if (now - status.shown_at).num_seconds() >= STATUS_MESSAGE_SECONDS {
                self.status = None;
            }
        }
    }

    // --- Lookups ---

    /// Look up the name in the player field. Blank names are ignored.
    pub fn submit_lookup(&mut self) -> Option<u64> {
        let name = self.player_input.value().trim().to_string();
        if name.is_empty() {
            return None;
        }
        let ticket = self.store.begin_lookup(&name);
        let seq = ticket.seq;
        self.worker.request_player(ticket);
        Some(seq)
    }

    /// Re-fetch the loaded player, then unpin what they have completed.
    pub fn refresh_todo(&mut self) {
        let Some(player) = self.store.current_player().map(str::to_string) else {
            self.todo.message = Some(prune_completed(&mut self.store).message());
            return;
        };
        let ticket = self.store.begin_lookup(&player);
        self.todo.refresh_seq = Some(ticket.seq);
        self.todo.message = None;
        self.worker.request_player(ticket);
    }

    pub fn fetch_team(&mut self) {
        let names = self.team.name_values();
        if let Err(e) = active_names(&names) {
            self.team.error = Some(e.to_string());
            return;
        }
        self.team.seq += 1;
        self.team.loading = true;
        self.team.error = None;
        self.worker.request_team(self.team.seq, names);
    }

    pub fn handle_reply(&mut self, reply: LookupReply) {
        match reply {
            LookupReply::Player { ticket, result } => {
                let from_refresh = self.todo.refresh_seq == Some(ticket.seq);
                match self.store.finish_lookup(&ticket, result) {
                    LookupOutcome::Applied { player, completed } => {
                        self.set_status(format!("Loaded {}: {} completed", player, completed));
                        if from_refresh {
                            self.todo.message = Some(prune_completed(&mut self.store).message());
                        }
                    }
                    LookupOutcome::Failed { message } => {
                        if from_refresh {
                            self.todo.message =
                                Some("Failed to check for completed achievements.".to_string());
                        }
                        self.set_error(message);
                    }
                    LookupOutcome::Stale => {}
                }
                if from_refresh {
                    self.todo.refresh_seq = None;
                }
            }
            LookupReply::Team { seq, result } => {
                if seq != self.team.seq {
                    info!(seq, latest = self.team.seq, "discarding stale team lookup");
                    return;
                }
                self.team.loading = false;
                self.team.selected = 0;
                match result {
                    Ok(players) => {
                        self.team.report = Some(build_team_report(self.store.catalog(), players));
                        self.team.error = None;
                    }
                    Err(e) => {
                        self.team.report = None;
                        self.team.error = Some(e.to_string());
                    }
                }
            }
        }
    }

    // --- Browser ---

    pub fn browser_rows(&self) -> Vec<BrowserRow<'_>> {
        browse(
            self.store.catalog(),
            |id| self.store.is_completed(id),
            &self.browser.filter,
            self.browser.sort,
        )
    }

    /// Open the browser filtered to one tier.
    pub fn browse_tier(&mut self, tier: Tier) {
        self.browser.filter = BrowserFilter::for_tier(tier);
        self.browser.search_input.clear();
        self.browser.selected = 0;
        self.switch_view(View::Browser);
    }

    pub fn toggle_browser_pin(&mut self) {
        let Some((id, completed, name)) = self
            .browser_rows()
            .get(self.browser.selected)
            .map(|row| (row.id(), row.completed, row.record.name.clone()))
        else {
            return;
        };
        if completed && !self.store.is_pinned(id) {
            return;
        }
        if self.store.toggle_pin(id) {
            self.set_status(format!("Pinned {}", name));
        } else {
            self.set_status(format!("Unpinned {}", name));
        }
    }

    // --- Planner ---

    pub fn submit_goal(&mut self) {
        match self.store.generate_plan(self.planner.goal_input.value()) {
            Ok(()) => {
                self.planner.goal_error = None;
                self.planner.selected = 0;
            }
            Err(e) => self.planner.goal_error = Some(e.to_string()),
        }
    }

    /// Tiers first, then every achievement type in the catalog.
    pub fn priority_options(&self) -> Vec<PriorityOption> {
        Tier::ALL
            .iter()
            .map(|&t| PriorityOption::Tier(t))
            .chain(self.types.iter().cloned().map(PriorityOption::Type))
            .collect()
    }

    pub fn is_priority_active(&self, option: &PriorityOption) -> bool {
        let priority = &self.store.planner().config().priority;
        match option {
            PriorityOption::Tier(tier) => priority.active_tiers().is_some_and(|t| t.contains(tier)),
            PriorityOption::Type(kind) => priority.active_types().is_some_and(|t| t.contains(kind)),
        }
    }

    pub fn toggle_priority_at_cursor(&mut self) {
        let Some(option) = self.priority_options().get(self.planner.priority_cursor).cloned() else {
            return;
        };
        let mut priority = self.store.planner().config().priority.clone();
        match option {
            PriorityOption::Tier(tier) => priority.toggle_tier(tier),
            PriorityOption::Type(kind) => priority.toggle_type(&kind),
        }
        self.store.set_priority(priority);
    }

    pub fn selected_plan_id(&self) -> Option<u32> {
        self.store
            .plan()
            .and_then(|plan| plan.suggested.get(self.planner.selected))
            .map(|r| r.id)
    }

    pub fn exclude_selected(&mut self) {
        if let Some(id) = self.selected_plan_id() {
            self.store.toggle_exclusion(id);
            let len = self.store.plan().map_or(0, |p| p.len());
            self.planner.selected = self.planner.selected.min(len.saturating_sub(1));
        }
    }

    pub fn pin_whole_plan(&mut self) {
        let added = self.store.pin_plan();
        self.set_status(format!("Pinned {} achievements", added));
    }

    // --- To-do ---

    pub fn todo_ids(&self) -> Vec<u32> {
        let catalog = self.store.catalog();
        let is_completed = |id| self.store.is_completed(id);
        if self.todo.grouped {
            ca_tracker::todo::grouped_pins(catalog, self.store.pinned(), is_completed)
                .into_values()
                .flatten()
                .map(|e| e.record.id)
                .collect()
        } else {
            ca_tracker::todo::sorted_pins(catalog, self.store.pinned(), is_completed, self.todo.sort)
                .iter()
                .map(|e| e.record.id)
                .collect()
        }
    }

    pub fn unpin_selected_todo(&mut self) {
        if let Some(&id) = self.todo_ids().get(self.todo.selected) {
            self.store.toggle_pin(id);
            let len = self.todo_ids().len();
            self.todo.selected = self.todo.selected.min(len.saturating_sub(1));
        }
    }
}

/// Move a list cursor down without running past `len`.
pub fn move_down(selected: &mut usize, len: usize) {
    if *selected + 1 < len {
        *selected += 1;
    }
}

pub fn move_up(selected: &mut usize) {
    *selected = selected.saturating_sub(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ca_tracker::catalog::{AchievementRecord, Catalog};
    use ca_tracker::error::LookupError;
    use ca_tracker::lookup::{CompletionSource, PlayerCompletion};
    use std::sync::Arc;

    struct FakeSource;

    impl CompletionSource for FakeSource {
        fn fetch(&self, player: &str) -> Result<PlayerCompletion, LookupError> {
            match player {
                "Zezima" => Ok(PlayerCompletion::new(player, vec![1])),
                "Woox" => Ok(PlayerCompletion::new(player, vec![1, 2])),
                _ => Err(LookupError::NotFound {
                    player: player.to_string(),
                    status: 404,
                }),
            }
        }
    }

    fn record(id: u32, tier: Tier, monster: &str) -> AchievementRecord {
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

    fn app() -> App {
        let catalog: Catalog = vec![
            record(1, Tier::Easy, "Giant Mole"),
            record(2, Tier::Hard, "Vorkath"),
            record(3, Tier::Medium, "Zulrah"),
        ]
        .into_iter()
        .collect();
        App::new(AppStore::new(catalog), LookupWorker::new(Arc::new(FakeSource)))
    }

    fn drain_one(app: &mut App) {
        let reply = app.worker.wait().expect("reply");
        app.handle_reply(reply);
    }

    #[test]
    fn test_blank_player_name_is_ignored() {
        let mut app = app();
        assert_eq!(app.submit_lookup(), None);
        assert!(!app.store.is_loading());
    }

    #[test]
    fn test_lookup_applies_completion() {
        let mut app = app();
        app.player_input = TextInput::with_value(" Zezima ");
        app.submit_lookup();
        assert!(app.store.is_loading());

        drain_one(&mut app);
        assert_eq!(app.store.current_player(), Some("Zezima"));
        assert!(app.store.is_completed(1));
        assert!(!app.status.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_failed_lookup_shows_error() {
        let mut app = app();
        app.player_input = TextInput::with_value("nobody");
        app.submit_lookup();
        drain_one(&mut app);

        assert_eq!(app.store.lookup_error(), Some("Player not found or API error"));
        assert!(app.status.as_ref().unwrap().is_error);
    }

    #[test]
    fn test_todo_refresh_without_player() {
        let mut app = app();
        app.store.toggle_pin(1);
        app.refresh_todo();
        assert_eq!(
            app.todo.message.as_deref(),
            Some("No user loaded. Search for a player first!")
        );
        assert_eq!(app.store.pinned(), &[1]);
    }

    #[test]
    fn test_todo_refresh_prunes_completed_pins() {
        let mut app = app();
        app.player_input = TextInput::with_value("Zezima");
        app.submit_lookup();
        drain_one(&mut app);

        app.store.toggle_pin(1);
        app.store.toggle_pin(3);
        app.refresh_todo();
        assert!(app.todo.refresh_seq.is_some());
        drain_one(&mut app);

        assert_eq!(app.store.pinned(), &[3]);
        assert_eq!(
            app.todo.message.as_deref(),
            Some("Removed 1 completed achievement!")
        );
        assert!(app.todo.refresh_seq.is_none());
    }

    #[test]
    fn test_team_requires_a_name() {
        let mut app = app();
        app.fetch_team();
        assert_eq!(
            app.team.error.as_deref(),
            Some("Please enter at least one username")
        );
        assert!(!app.team.loading);
    }

    #[test]
    fn test_team_report_built_from_reply() {
        let mut app = app();
        app.team.names[0] = TextInput::with_value("Zezima");
        app.team.names[1] = TextInput::with_value("Woox");
        app.fetch_team();
        drain_one(&mut app);

        let report = app.team.report.as_ref().expect("report");
        let none: Vec<u32> = report.none_completed.iter().map(|e| e.record.id).collect();
        let partial: Vec<u32> = report.partial_completion.iter().map(|e| e.record.id).collect();
        assert_eq!(none, vec![3]);
        assert_eq!(partial, vec![2]);
        assert!(!app.team.loading);
    }

    #[test]
    fn test_team_failure_clears_report() {
        let mut app = app();
        app.team.names[0] = TextInput::with_value("Zezima");
        app.team.names[1] = TextInput::with_value("ghost");
        app.fetch_team();
        drain_one(&mut app);

        assert!(app.team.report.is_none());
        assert_eq!(app.team.error.as_deref(), Some("Player \"ghost\" not found"));
    }

    #[test]
    fn test_team_slots_bounded() {
        let mut team = TeamState::default();
        assert!(!team.remove_slot());
        assert!(team.add_slot());
        assert!(team.add_slot());
        assert!(!team.add_slot());
        assert_eq!(team.names.len(), MAX_TEAM_PLAYERS);
        assert!(team.remove_slot());
        assert_eq!(team.names.len(), 3);
    }

    #[test]
    fn test_priority_toggle_rebuilds_plan() {
        let mut app = app();
        app.planner.goal_input = TextInput::with_value("3");
        app.submit_goal();
        assert_eq!(app.store.plan().unwrap().ids(), vec![1, 3]);

        // Cursor 2 is Hard.
        app.planner.priority_cursor = 2;
        app.toggle_priority_at_cursor();
        assert!(app.is_priority_active(&PriorityOption::Tier(Tier::Hard)));
        assert_eq!(app.store.plan().unwrap().ids(), vec![2]);
    }

    #[test]
    fn test_invalid_goal_sets_error() {
        let mut app = app();
        app.planner.goal_input = TextInput::with_value("abc");
        app.submit_goal();
        assert!(app.planner.goal_error.is_some());
        assert!(app.store.plan().is_none());
    }

    #[test]
    fn test_browse_tier_switches_view() {
        let mut app = app();
        app.browse_tier(Tier::Hard);
        assert_eq!(app.view, View::Browser);
        let ids: Vec<u32> = app.browser_rows().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![2]);

        app.switch_view(View::Planner);
        assert_eq!(app.browser.filter.tier, None);
    }

    #[test]
    fn test_status_expires() {
        let mut app = app();
        app.set_status("hello");
        let shown = app.status.as_ref().unwrap().shown_at;
        app.expire_status(shown);
        assert!(app.status.is_some());
        app.expire_status(shown + chrono::Duration::seconds(STATUS_MESSAGE_SECONDS));
        assert!(app.status.is_none());
    }
}
