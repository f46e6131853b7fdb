//! Catalog browser: filter bar, sortable table and a detail panel.

use super::tier_badge::{tier_span, GOLD};
use crate::app::{App, Focus};
use ca_tracker::browser::{BrowserRow, BrowserSort, BrowserSortKey};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

pub fn render_browser(frame: &mut Frame, area: Rect, app: &App) {
    let rows = app.browser_rows();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filters + search
            Constraint::Min(0),    // Table
            Constraint::Length(5), // Detail
        ])
        .split(area);

    render_filters(frame, chunks[0], app, rows.len());
    render_table(frame, chunks[1], app, &rows);
    render_detail(frame, chunks[2], rows.get(app.browser.selected));
}

fn render_filters(frame: &mut Frame, area: Rect, app: &App, shown: usize) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(area);

    let filter = &app.browser.filter;
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);
    let line = Line::from(vec![
        Span::styled("Tier: ", label),
        Span::styled(filter.tier.map_or("All Tiers", |t| t.name()), value),
        Span::styled("  Status: ", label),
        Span::styled(filter.status.label(), value),
        Span::styled("  Monster: ", label),
        Span::styled(filter.monster.as_deref().unwrap_or("All Monsters"), value),
        Span::styled(
            format!("  {} of {}", shown, app.store.catalog().len()),
            label,
        ),
    ]);
    let filters = Paragraph::new(line).block(
        Block::default()
            .title(" Filters ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(filters, chunks[0]);

    app.browser.search_input.render(
        frame,
        chunks[1],
        "Search",
        app.focus == Focus::Search,
        "[/] Search by name",
    );
}

fn header_label(title: &str, key: BrowserSortKey, sort: BrowserSort) -> String {
    if sort.key == key {
        format!("{} {}", title, sort.direction.arrow())
    } else {
        title.to_string()
    }
}

fn render_table(frame: &mut Frame, area: Rect, app: &App, rows: &[BrowserRow<'_>]) {
    let sort = app.browser.sort;
    let header = Row::new(vec![
        Cell::from(""),
        Cell::from(header_label("Tier", BrowserSortKey::Tier, sort)),
        Cell::from(header_label("Monster", BrowserSortKey::Monster, sort)),
        Cell::from(header_label("Name", BrowserSortKey::Name, sort)),
        Cell::from("Type"),
        Cell::from("Pts"),
        Cell::from(header_label("Done", BrowserSortKey::Completed, sort)),
    ])
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let table_rows: Vec<Row> = rows
        .iter()
        .map(|row| {
            let record = row.record;
            let pin = if app.store.is_pinned(record.id) { "*" } else { " " };
            let name_style = if row.completed {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(vec![
                Cell::from(Span::styled(pin, Style::default().fg(GOLD))),
                Cell::from(tier_span(record.tier)),
                Cell::from(record.monster.clone()),
                Cell::from(Span::styled(record.name.clone(), name_style)),
                Cell::from(Span::styled(record.kind.clone(), Style::default().fg(Color::Gray))),
                Cell::from(record.points().to_string()),
                Cell::from(if row.completed { "[X]" } else { "[ ]" }),
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
        Constraint::Length(6),
    ];
    let table = Table::new(table_rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)))
        .highlight_symbol("> ");

    let mut state = TableState::default();
    if !rows.is_empty() {
        state.select(Some(app.browser.selected.min(rows.len() - 1)));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_detail(frame: &mut Frame, area: Rect, row: Option<&BrowserRow<'_>>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let Some(row) = row else {
        let empty = Paragraph::new("No achievements match the filters.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let record = row.record;
    let lines = vec![
        Line::from(vec![
            tier_span(record.tier),
            Span::raw("  "),
            Span::styled(
                record.name.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            record.description.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            record.url.clone(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        area,
    );
}
