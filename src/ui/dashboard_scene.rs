//! Dashboard: overall progress and one card per tier.

use super::tier_badge::{tier_color, GOLD};
use crate::app::App;
use ca_tracker::dashboard::{ProfileSummary, TierStats};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

pub fn render_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let store = &app.store;
    let summary = ProfileSummary::build(store.catalog(), store.current_player(), |id| {
        store.is_completed(id)
    });

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Overview
            Constraint::Min(0),    // Tier cards
        ])
        .split(area);

    render_overview(frame, chunks[0], &summary);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(chunks[1]);

    for (row_index, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(*row_area);
        for (col_index, card_area) in cols.iter().enumerate() {
            let index = row_index * 3 + col_index;
            if let Some(stats) = summary.tiers.get(index) {
                render_tier_card(frame, *card_area, stats, index == app.dashboard_tier);
            }
        }
    }
}

fn render_overview(frame: &mut Frame, area: Rect, summary: &ProfileSummary) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let title = match &summary.player {
        Some(player) => format!("{}'s progress", player),
        None => "Look up a player to see progress".to_string(),
    };
    let lines = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(
                format!("{} / {} points", summary.current_points, summary.total_points),
                Style::default().fg(GOLD),
            ),
            Span::styled(
                format!(
                    "   {} / {} achievements ({}%)",
                    summary.completed,
                    summary.total,
                    summary.completion_percent()
                ),
                Style::default().fg(Color::Gray),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn render_tier_card(frame: &mut Frame, area: Rect, stats: &TierStats, selected: bool) {
    let color = tier_color(stats.tier);
    let border = if selected {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", stats.tier.name()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Counts
            Constraint::Length(1), // Points
            Constraint::Length(1), // Gauge
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(format!("{} / {} completed", stats.completed, stats.total))
            .style(Style::default().fg(Color::White)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(format!(
            "{} pts earned ({} each)",
            stats.points_earned(),
            stats.tier.points()
        ))
        .style(Style::default().fg(Color::Gray)),
        chunks[1],
    );

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .percent(stats.percent().min(100) as u16)
        .label(format!("{}%", stats.percent()));
    frame.render_widget(gauge, chunks[2]);
}
