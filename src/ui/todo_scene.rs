//! Pinned to-do list, flat or grouped by monster.

use super::tier_badge::tier_span;
use crate::app::App;
use ca_tracker::todo::{all_pins_completed, grouped_pins, sorted_pins, TodoEntry};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render_todo(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(0),    // List
        ])
        .split(area);

    render_header(frame, chunks[0], app);

    let block = Block::default()
        .title(format!(" Pinned ({}) ", app.store.pinned().len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if app.store.pinned().is_empty() {
        let empty = Paragraph::new("Nothing pinned yet. Pin achievements from Browse or Planner.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let store = &app.store;
    let is_completed = |id| store.is_completed(id);
    let (items, selected_item) = if app.todo.grouped {
        grouped_items(grouped_pins(store.catalog(), store.pinned(), is_completed), app.todo.selected)
    } else {
        let entries = sorted_pins(store.catalog(), store.pinned(), is_completed, app.todo.sort);
        let items = entries.iter().map(|e| entry_item(e, "")).collect();
        (items, Some(app.todo.selected))
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(40, 40, 60)))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(selected_item);
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let store = &app.store;
    let label = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::styled("Sort: ", label),
        Span::styled(
            if app.todo.grouped { "Grouped by monster" } else { app.todo.sort.label() },
            Style::default().fg(Color::White),
        ),
    ];
    if store.is_loading() && app.todo.refresh_seq.is_some() {
        spans.push(Span::styled("  Checking...", Style::default().fg(Color::Yellow)));
    } else if let Some(message) = &app.todo.message {
        spans.push(Span::styled(format!("  {}", message), Style::default().fg(Color::Cyan)));
    }

    let mut lines = vec![Line::from(spans)];
    if all_pins_completed(store.pinned(), |id| store.is_completed(id)) {
        lines.push(Line::from(Span::styled(
            "Every pinned achievement is complete!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn entry_item<'a>(entry: &TodoEntry<'a>, indent: &'a str) -> ListItem<'a> {
    let record = entry.record;
    let (check, style) = if entry.done {
        ("[X] ", Style::default().fg(Color::Green))
    } else {
        ("[ ] ", Style::default().fg(Color::White))
    };
    ListItem::new(Line::from(vec![
        Span::raw(indent),
        Span::styled(check, style),
        tier_span(record.tier),
        Span::raw("  "),
        Span::styled(record.name.as_str(), style),
        Span::styled(format!("  {}", record.monster), Style::default().fg(Color::DarkGray)),
    ]))
}

/// List items with a header per monster, plus the item index of the
/// `selected`-th entry.
fn grouped_items<'a>(
    groups: std::collections::BTreeMap<&'a str, Vec<TodoEntry<'a>>>,
    selected: usize,
) -> (Vec<ListItem<'a>>, Option<usize>) {
    let mut items = Vec::new();
    let mut selected_item = None;
    let mut entry_index = 0;

    for (monster, entries) in groups {
        let done = entries.iter().filter(|e| e.done).count();
        items.push(ListItem::new(Line::from(Span::styled(
            format!("{} ({}/{})", monster, done, entries.len()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))));
        for entry in &entries {
            if entry_index == selected {
                selected_item = Some(items.len());
            }
            items.push(entry_item(entry, "  "));
            entry_index += 1;
        }
    }
    (items, selected_item)
}
