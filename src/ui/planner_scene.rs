//! Points planner: goal entry, priority picker and the suggested plan.

use super::tier_badge::{tier_color, tier_span, GOLD};
use crate::app::{App, Focus, PriorityOption};
use ca_tracker::planner::{GoalMode, Plan};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

pub fn render_planner(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Goal + summary
            Constraint::Length(4), // Priorities
            Constraint::Min(0),    // Plan
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(chunks[0]);

    let goal_title = match app.store.planner().mode() {
        GoalMode::Additional => "Points to earn",
        GoalMode::Total => "Target total",
    };
    app.planner
        .goal_input
        .render(frame, top[0], goal_title, app.focus == Focus::Goal, "[g] Set goal");
    render_summary(frame, top[1], app);
    render_priorities(frame, chunks[1], app);
    render_plan(frame, chunks[2], app);
}

fn render_summary(frame: &mut Frame, area: Rect, app: &App) {
    let store = &app.store;
    let config = store.planner().config();
    let label = Style::default().fg(Color::DarkGray);

    let mut spans = vec![
        Span::styled("Mode: ", label),
        Span::styled(config.mode.label(), Style::default().fg(Color::White)),
        Span::styled("  Current: ", label),
        Span::styled(format!("{} pts", store.current_points()), Style::default().fg(GOLD)),
    ];
    if !config.excluded.is_empty() {
        spans.push(Span::styled(
            format!("  Excluded: {}", config.excluded.len()),
            Style::default().fg(Color::Red),
        ));
    }
    if let Some(error) = &app.planner.goal_error {
        spans.push(Span::styled(format!("  {}", error), Style::default().fg(Color::Red)));
    } else if let Some(plan) = store.plan() {
        spans.push(plan_status(plan));
    }

    let summary = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(summary, area);
}

fn plan_status(plan: &Plan) -> Span<'static> {
    if plan.target == 0 {
        Span::styled("  Goal already reached", Style::default().fg(Color::Green))
    } else if plan.reached() {
        Span::styled(
            format!(
                "  {} achievements for {} / {} pts",
                plan.len(),
                plan.accumulated,
                plan.target
            ),
            Style::default().fg(Color::Green),
        )
    } else {
        Span::styled(
            format!(
                "  Only {} / {} pts available ({} short)",
                plan.accumulated,
                plan.target,
                plan.shortfall()
            ),
            Style::default().fg(Color::Yellow),
        )
    }
}

fn render_priorities(frame: &mut Frame, area: Rect, app: &App) {
    let options = app.priority_options();
    let spans: Vec<Span> = options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let active = app.is_priority_active(option);
            let (label, color) = match option {
                PriorityOption::Tier(tier) => (tier.name().to_string(), tier_color(*tier)),
                PriorityOption::Type(kind) => (kind.clone(), Color::Cyan),
            };
            let mut style = if active {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            if i == app.planner.priority_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let mark = if active { "[x]" } else { "[ ]" };
            Span::styled(format!(" {} {} ", mark, label), style)
        })
        .collect();

    let priorities = Paragraph::new(Line::from(spans))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Prioritize ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(priorities, area);
}

fn render_plan(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Suggested Achievements ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(plan) = app.store.plan() else {
        let hint = Paragraph::new("Enter a points goal to generate a plan.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let header = Row::new(vec!["", "Tier", "Monster", "Name", "Type", "Pts", "Running"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let mut running = 0;
    let rows: Vec<Row> = plan
        .suggested
        .iter()
        .map(|record| {
            running += record.points();
            let pin = if app.store.is_pinned(record.id) { "*" } else { " " };
            Row::new(vec![
                Cell::from(Span::styled(pin, Style::default().fg(GOLD))),
                Cell::from(tier_span(record.tier)),
                Cell::from(record.monster.clone()),
                Cell::from(record.name.clone()),
                Cell::from(Span::styled(record.kind.clone(), Style::default().fg(Color::Gray))),
                Cell::from(record.points().to_string()),
                Cell::from(running.to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(1),
        Constraint::Length(12),
        Constraint::Length(24),
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(4),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)))
        .highlight_symbol("> ");

    let mut state = TableState::default();
    if !plan.is_empty() {
        state.select(Some(app.planner.selected.min(plan.len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut state);
}
