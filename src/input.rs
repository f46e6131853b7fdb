//! Key handling for the terminal UI.
//!
//! Priority chain: focused text field, profile overlay, global keys, then
//! the active view.

use crate::app::{move_down, move_up, App, Focus, View};
use ca_tracker::browser::BrowserSortKey;
use ca_tracker::catalog::Tier;
use ca_tracker::planner::PrioritySpec;
use ca_tracker::team::TeamSortColumn;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const PAGE: usize = 10;

pub enum InputResult {
    Continue,
    Quit,
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> InputResult {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputResult::Quit;
    }

    // 1. Text entry swallows everything
    if app.focus != Focus::None {
        handle_text(app, key);
        return InputResult::Continue;
    }

    // 2. Profile overlay
    if app.show_profile {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('i') | KeyCode::Enter) {
            app.show_profile = false;
        }
        return InputResult::Continue;
    }

    // 3. Global keys
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return InputResult::Quit,
        KeyCode::Tab => {
            app.switch_view(app.view.next());
            return InputResult::Continue;
        }
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            app.switch_view(View::ALL[index]);
            return InputResult::Continue;
        }
        KeyCode::Char('u') => {
            app.focus = Focus::Player;
            return InputResult::Continue;
        }
        KeyCode::Char('i') => {
            app.show_profile = true;
            return InputResult::Continue;
        }
        _ => {}
    }

    // 4. Active view
    match app.view {
        View::Dashboard => handle_dashboard(app, key),
        View::Browser => handle_browser(app, key),
        View::Planner => handle_planner(app, key),
        View::Todo => handle_todo(app, key),
        View::Team => handle_team(app, key),
    }
    InputResult::Continue
}

fn handle_text(app: &mut App, key: KeyEvent) {
    let focus = app.focus;
    match key.code {
        KeyCode::Esc => app.focus = Focus::None,
        KeyCode::Enter => {
            app.focus = Focus::None;
            match focus {
                Focus::Player => {
                    app.submit_lookup();
                }
                Focus::Goal => app.submit_goal(),
                Focus::TeamSlot(_) => app.fetch_team(),
                Focus::Search | Focus::None => {}
            }
        }
        KeyCode::Tab => {
            if let Focus::TeamSlot(_) = focus {
                app.team.next_slot();
                app.focus = Focus::TeamSlot(app.team.slot);
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = focused_input(app, focus) {
                input.insert(c);
            }
            sync_search(app, focus);
        }
        KeyCode::Backspace => {
            if let Some(input) = focused_input(app, focus) {
                input.backspace();
            }
            sync_search(app, focus);
        }
        KeyCode::Left => {
            if let Some(input) = focused_input(app, focus) {
                input.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(input) = focused_input(app, focus) {
                input.move_right();
            }
        }
        _ => {}
    }
}

fn focused_input(app: &mut App, focus: Focus) -> Option<&mut crate::ui::text_input::TextInput> {
    match focus {
        Focus::Player => Some(&mut app.player_input),
        Focus::Goal => Some(&mut app.planner.goal_input),
        Focus::Search => Some(&mut app.browser.search_input),
        Focus::TeamSlot(i) => app.team.names.get_mut(i),
        Focus::None => None,
    }
}

fn sync_search(app: &mut App, focus: Focus) {
    if focus == Focus::Search {
        app.browser.filter.search = app.browser.search_input.value().to_string();
        app.browser.selected = 0;
    }
}

fn handle_dashboard(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left => move_up(&mut app.dashboard_tier),
        KeyCode::Right => move_down(&mut app.dashboard_tier, Tier::ALL.len()),
        KeyCode::Enter => app.browse_tier(Tier::ALL[app.dashboard_tier]),
        _ => {}
    }
}

fn handle_browser(app: &mut App, key: KeyEvent) {
    let len = app.browser_rows().len();
    let state = &mut app.browser;
    match key.code {
        KeyCode::Up => move_up(&mut state.selected),
        KeyCode::Down => move_down(&mut state.selected, len),
        KeyCode::PageUp => state.selected = state.selected.saturating_sub(PAGE),
        KeyCode::PageDown => state.selected = (state.selected + PAGE).min(len.saturating_sub(1)),
        KeyCode::Char('/') => app.focus = Focus::Search,
        KeyCode::Char('t') => {
            state.filter.cycle_tier();
            state.selected = 0;
        }
        KeyCode::Char('s') => {
            state.filter.status = state.filter.status.next();
            state.selected = 0;
        }
        KeyCode::Char('m') => {
            state.filter.cycle_monster(&app.monsters);
            state.selected = 0;
        }
        KeyCode::Char('c') => {
            state.filter = Default::default();
            state.search_input.clear();
            state.selected = 0;
        }
        KeyCode::Char('T') => state.sort.toggle(BrowserSortKey::Tier),
        KeyCode::Char('M') => state.sort.toggle(BrowserSortKey::Monster),
        KeyCode::Char('N') => state.sort.toggle(BrowserSortKey::Name),
        KeyCode::Char('C') => state.sort.toggle(BrowserSortKey::Completed),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_browser_pin(),
        _ => {}
    }
}

fn handle_planner(app: &mut App, key: KeyEvent) {
    let plan_len = app.store.plan().map_or(0, |p| p.len());
    let options = app.priority_options().len();
    match key.code {
        KeyCode::Char('g') => app.focus = Focus::Goal,
        KeyCode::Char('a') => {
            let mode = app.store.toggle_goal_mode();
            app.set_status(format!("Goal mode: {}", mode.label()));
        }
        KeyCode::Up => move_up(&mut app.planner.selected),
        KeyCode::Down => move_down(&mut app.planner.selected, plan_len),
        KeyCode::Char('x') => app.exclude_selected(),
        KeyCode::Char('r') => {
            app.store.reset_exclusions();
            app.set_status("Exclusions reset");
        }
        KeyCode::Char(' ') => {
            if let Some(id) = app.selected_plan_id() {
                app.store.toggle_pin(id);
            }
        }
        KeyCode::Char('A') => app.pin_whole_plan(),
        KeyCode::Char('[') => move_up(&mut app.planner.priority_cursor),
        KeyCode::Char(']') => move_down(&mut app.planner.priority_cursor, options),
        KeyCode::Enter => app.toggle_priority_at_cursor(),
        KeyCode::Char('c') => app.store.set_priority(PrioritySpec::none()),
        _ => {}
    }
}

fn handle_todo(app: &mut App, key: KeyEvent) {
    let len = app.todo_ids().len();
    match key.code {
        KeyCode::Up => move_up(&mut app.todo.selected),
        KeyCode::Down => move_down(&mut app.todo.selected, len),
        KeyCode::Char('s') => {
            app.todo.sort = app.todo.sort.next();
            app.todo.selected = 0;
        }
        KeyCode::Char('o') => {
            app.todo.grouped = !app.todo.grouped;
            app.todo.selected = 0;
        }
        KeyCode::Char('d') | KeyCode::Delete => app.unpin_selected_todo(),
        KeyCode::Char('X') => {
            app.store.clear_pins();
            app.todo.selected = 0;
            app.set_status("Cleared all pins");
        }
        KeyCode::Char('r') => app.refresh_todo(),
        _ => {}
    }
}

fn handle_team(app: &mut App, key: KeyEvent) {
    let rows = app
        .team
        .report
        .as_ref()
        .map_or(0, |r| app.team.view.displayed(r).len());
    let team = &mut app.team;
    match key.code {
        KeyCode::Char('[') => team.prev_slot(),
        KeyCode::Char(']') => team.next_slot(),
        KeyCode::Char('e') | KeyCode::Enter => app.focus = Focus::TeamSlot(team.slot),
        KeyCode::Char('+') => {
            team.add_slot();
        }
        KeyCode::Char('-') => {
            team.remove_slot();
        }
        KeyCode::Char('f') => app.fetch_team(),
        KeyCode::Char('n') => {
            team.view.show_none = !team.view.show_none;
            team.selected = 0;
        }
        KeyCode::Char('p') => {
            team.view.show_partial = !team.view.show_partial;
            team.selected = 0;
        }
        KeyCode::Char('T') => team.view.toggle_sort(TeamSortColumn::Tier),
        KeyCode::Char('M') => team.view.toggle_sort(TeamSortColumn::Monster),
        KeyCode::Char('P') => team.view.toggle_sort(TeamSortColumn::Points),
        KeyCode::Char('C') => team.view.toggle_sort(TeamSortColumn::CompletedBy),
        KeyCode::Up => move_up(&mut team.selected),
        KeyCode::Down => move_down(&mut team.selected, rows),
        _ => {}
    }
}
