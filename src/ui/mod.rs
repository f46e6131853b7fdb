pub mod browser_scene;
pub mod dashboard_scene;
pub mod planner_scene;
pub mod profile_overlay;
pub mod team_scene;
pub mod text_input;
pub mod tier_badge;
pub mod todo_scene;

use crate::app::{App, Focus, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use tier_badge::GOLD;

/// Main UI drawing function.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    let size = frame.size();

    let banner_height = if app.store.catalog_error().is_some() { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Top bar
            Constraint::Length(banner_height), // Catalog error
            Constraint::Length(1),             // Tabs
            Constraint::Min(0),                // Active view
            Constraint::Length(1),             // Help
        ])
        .split(size);

    draw_top_bar(frame, chunks[0], app);
    if let Some(error) = app.store.catalog_error() {
        let banner = Paragraph::new(format!(" Failed to load combat achievements: {} ", error))
            .style(Style::default().fg(Color::White).bg(Color::Red));
        frame.render_widget(banner, chunks[1]);
    }
    draw_tabs(frame, chunks[2], app);

    match app.view {
        View::Dashboard => dashboard_scene::render_dashboard(frame, chunks[3], app),
        View::Browser => browser_scene::render_browser(frame, chunks[3], app),
        View::Planner => planner_scene::render_planner(frame, chunks[3], app),
        View::Todo => todo_scene::render_todo(frame, chunks[3], app),
        View::Team => team_scene::render_team(frame, chunks[3], app),
    }

    draw_footer(frame, chunks[4], app);

    if app.show_profile {
        profile_overlay::render_profile(frame, size, app);
    }
}

fn draw_top_bar(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(26), // Title
            Constraint::Length(30), // Player lookup
            Constraint::Min(0),     // Player status
        ])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        "Combat Achievements",
        Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(title, chunks[0]);

    app.player_input.render(
        frame,
        chunks[1],
        "Player",
        app.focus == Focus::Player,
        "[u] Look up player",
    );

    let store = &app.store;
    let mut spans = Vec::new();
    if store.is_loading() {
        spans.push(Span::styled("Loading... ", Style::default().fg(Color::Yellow)));
    }
    match store.current_player() {
        Some(player) => {
            spans.push(Span::styled(
                format!("{} ", player),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!("{} pts", store.current_points()),
                Style::default().fg(GOLD),
            ));
            spans.push(Span::styled(
                format!("  {}/{} done", store.completed_count(), store.catalog().len()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        None if !store.is_loading() => {
            spans.push(Span::styled("No player loaded", Style::default().fg(Color::DarkGray)));
        }
        None => {}
    }
    if let Some(error) = store.lookup_error() {
        spans.push(Span::styled(format!("  {}", error), Style::default().fg(Color::Red)));
    }

    let status = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(status, chunks[2]);
}

fn draw_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let label = if *view == View::Todo && !app.store.pinned().is_empty() {
                format!("{} {} ({})", i + 1, view.title(), app.store.pinned().len())
            } else {
                format!("{} {}", i + 1, view.title())
            };
            Line::from(label)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.view.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .divider("|");
    frame.render_widget(tabs, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App) {
    if let Some(status) = &app.status {
        let color = if status.is_error { Color::Red } else { Color::Green };
        let message = Paragraph::new(status.text.as_str())
            .style(Style::default().fg(color))
            .alignment(Alignment::Center);
        frame.render_widget(message, area);
        return;
    }

    let help = match (app.focus, app.view) {
        (Focus::TeamSlot(_), _) => "[Enter] Compare  [Tab] Next name  [Esc] Done",
        (Focus::Search, _) => "Type to filter by name  [Enter/Esc] Done",
        (Focus::Player, _) | (Focus::Goal, _) => "[Enter] Submit  [Esc] Cancel",
        (Focus::None, View::Dashboard) => {
            "[</>] Tier  [Enter] Browse tier  [u] Player  [i] Profile  [Tab] View  [q] Quit"
        }
        (Focus::None, View::Browser) => {
            "[t]ier [s]tatus [m]onster [/] Search [c]lear  [T/M/N/C] Sort  [Space] Pin  [q] Quit"
        }
        (Focus::None, View::Planner) => {
            "[g]oal [a] Mode  [x] Exclude [r] Reset  [Space] Pin [A] Pin all  [[/]] [Enter] Priority [c]lear"
        }
        (Focus::None, View::Todo) => "[s]ort [o] Group  [d] Unpin [X] Clear  [r] Remove completed  [q] Quit",
        (Focus::None, View::Team) => {
            "[[/]] Slot [e]dit [+/-] Slots [f]etch  [n]one [p]artial  [T/M/P/C] Sort  [q] Quit"
        }
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// Rect of `percent_x` by `percent_y` centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
