//! Profile overlay for the loaded player.

use super::centered_rect;
use super::tier_badge::{tier_span, GOLD};
use crate::app::App;
use ca_tracker::dashboard::ProfileSummary;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn render_profile(frame: &mut Frame, area: Rect, app: &App) {
    let store = &app.store;
    let summary = ProfileSummary::build(store.catalog(), store.current_player(), |id| {
        store.is_completed(id)
    });

    let popup = centered_rect(50, 60, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Profile ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GOLD));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let mut lines = Vec::new();
    match &summary.player {
        Some(player) => {
            lines.push(Line::from(Span::styled(
                player.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )));
            if let Some(fetched_at) = store.fetched_at() {
                lines.push(Line::from(Span::styled(
                    format!("Synced {}", fetched_at.format("%Y-%m-%d %H:%M UTC")),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        None => lines.push(Line::from(Span::styled(
            "No player loaded",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Points: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{} / {}", summary.current_points, summary.total_points),
            Style::default().fg(GOLD),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Completed: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!(
                "{} / {} ({}%)",
                summary.completed,
                summary.total,
                summary.completion_percent()
            ),
            Style::default().fg(Color::White),
        ),
    ]));
    lines.push(Line::from(""));
    for stats in &summary.tiers {
        lines.push(Line::from(vec![
            tier_span(stats.tier),
            Span::styled(
                format!("  {}/{}  {}%", stats.completed, stats.total, stats.percent()),
                Style::default().fg(Color::Gray),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), chunks[0]);
    frame.render_widget(
        Paragraph::new("[Esc] Close")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        chunks[1],
    );
}
