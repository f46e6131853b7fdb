//! Team comparison: up to four names and what the team still has to do.

use super::tier_badge::{tier_span, GOLD};
use crate::app::{App, Focus};
use ca_tracker::team::{total_points, TeamEntry, TeamSortColumn, TeamView};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

pub fn render_team(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(0)])
        .split(area);

    render_names(frame, chunks[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(chunks[1]);

    let team = &app.team;
    match &team.report {
        Some(report) => {
            let entries = team.view.displayed(report);
            render_summary(frame, right[0], app, &entries);
            render_table(frame, right[1], &team.view, &entries, team.selected);
        }
        None => {
            let (text, color) = if team.loading {
                ("Comparing...".to_string(), Color::Yellow)
            } else if let Some(error) = &team.error {
                (error.clone(), Color::Red)
            } else {
                (
                    "Enter two to four names and press [f] to compare.".to_string(),
                    Color::DarkGray,
                )
            };
            let hint = Paragraph::new(text).style(Style::default().fg(color)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(hint, chunks[1]);
        }
    }
}

fn render_names(frame: &mut Frame, area: Rect, app: &App) {
    let team = &app.team;
    let mut constraints: Vec<Constraint> = team.names.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(0));
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (i, input) in team.names.iter().enumerate() {
        let focused = app.focus == Focus::TeamSlot(i);
        let marker = if i == team.slot { ">" } else { " " };
        input.render(
            frame,
            slots[i],
            &format!("{} Player {}", marker, i + 1),
            focused,
            "",
        );
    }
}

fn render_summary(frame: &mut Frame, area: Rect, app: &App, entries: &[&TeamEntry]) {
    let team = &app.team;
    let players: Vec<&str> = team
        .report
        .iter()
        .flat_map(|r| r.players.iter().map(|p| p.player.as_str()))
        .collect();
    let buckets = match (team.view.show_none, team.view.show_partial) {
        (true, true) => "None + Partial",
        (true, false) => "None completed",
        (false, true) => "Partial",
        (false, false) => "Nothing selected",
    };

    let mut spans = vec![
        Span::styled(players.join(", "), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}: ", buckets), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("{} achievements", entries.len()), Style::default().fg(Color::White)),
        Span::styled(format!("  {} pts", total_points(entries)), Style::default().fg(GOLD)),
    ];
    if team.loading {
        spans.push(Span::styled("  Refreshing...", Style::default().fg(Color::Yellow)));
    } else if let Some(error) = &team.error {
        spans.push(Span::styled(format!("  {}", error), Style::default().fg(Color::Red)));
    }

    let summary = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(summary, area);
}

fn column_label(title: &str, column: TeamSortColumn, view: &TeamView) -> String {
    match view.sort {
        Some((current, direction)) if current == column => format!("{} {}", title, direction.arrow()),
        _ => title.to_string(),
    }
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    view: &TeamView,
    entries: &[&TeamEntry],
    selected: usize,
) {
    let header = Row::new(vec![
        Cell::from(column_label("Tier", TeamSortColumn::Tier, view)),
        Cell::from(column_label("Monster", TeamSortColumn::Monster, view)),
        Cell::from("Name"),
        Cell::from(column_label("Pts", TeamSortColumn::Points, view)),
        Cell::from(column_label("Done by", TeamSortColumn::CompletedBy, view)),
    ])
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = entries
        .iter()
        .map(|entry| {
            let record = &entry.record;
            let done_color = if entry.completed_by == 0 {
                Color::Red
            } else {
                Color::Yellow
            };
            Row::new(vec![
                Cell::from(tier_span(record.tier)),
                Cell::from(record.monster.clone()),
                Cell::from(record.name.clone()),
                Cell::from(record.points().to_string()),
                Cell::from(Span::styled(
                    format!("{}/{}", entry.completed_by, entry.total_players),
                    Style::default().fg(done_color),
                )),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(24),
        Constraint::Min(20),
        Constraint::Length(5),
        Constraint::Length(9),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)))
        .highlight_symbol("> ");

    let mut state = TableState::default();
    if !entries.is_empty() {
        state.select(Some(selected.min(entries.len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut state);
}
