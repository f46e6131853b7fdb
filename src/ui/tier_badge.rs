//! Tier colors shared by every view.

use ca_tracker::catalog::Tier;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

pub fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Easy => Color::Rgb(0x9c, 0xa3, 0xaf),
        Tier::Medium => Color::Rgb(0x4a, 0xde, 0x80),
        Tier::Hard => Color::Rgb(0x60, 0xa5, 0xfa),
        Tier::Elite => Color::Rgb(0xc0, 0x84, 0xfc),
        Tier::Master => Color::Rgb(0xf8, 0x71, 0x71),
        Tier::Grandmaster => Color::Rgb(0xfa, 0xcc, 0x15),
    }
}

/// Colored, bold tier label.
pub fn tier_span(tier: Tier) -> Span<'static> {
    Span::styled(
        tier.name(),
        Style::default()
            .fg(tier_color(tier))
            .add_modifier(Modifier::BOLD),
    )
}

/// Gold accent used for points and titles.
pub const GOLD: Color = Color::Rgb(0xdc, 0xa3, 0x50);
