//! Rendering of the section registry to the terminal.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::entry::{Entry, IconRef};
use crate::screen::ScreenKind;
use crate::section::SectionSet;

use super::TuiState;

/// Number of visible entries across all sections (selection space).
pub fn visible_len(sections: &SectionSet) -> usize {
    sections
        .iter()
        .flat_map(|s| s.entries())
        .filter(|e| e.visible)
        .count()
}

/// The n-th visible entry in display order.
pub fn nth_visible<'a>(sections: &'a SectionSet, n: usize) -> Option<&'a Entry> {
    sections
        .iter()
        .flat_map(|s| s.entries())
        .filter(|e| e.visible)
        .nth(n)
}

/// Compact marker shown in place of the icon resource.
fn icon_glyph(icon: &IconRef) -> &'static str {
    match icon.name() {
        "ic_home" => "⌂",
        "ic_cast" => "⇉",
        "ic_search" => "?",
        "ic_speech" => "»",
        "ic_usage" => "%",
        "ic_vendor" | "ic_acme" => "v",
        "ic_network" => "≋",
        "ic_volume_up" => "♪",
        "ic_volume_off" => "·",
        "ic_developer" => "&",
        "ic_location" => "@",
        "ic_security" => "#",
        "ic_settings_add" => "+",
        "ic_settings_bluetooth" | "ic_accessory_remote" | "ic_accessory_gamepad"
        | "ic_accessory_headset" => "ᛒ",
        "ic_google" => "G",
        _ => "•",
    }
}

pub fn render(f: &mut Frame, sections: &SectionSet, kind: ScreenKind, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(f.area());

    let header = Paragraph::new(Line::from(vec![
        Span::styled("TV settings home — ", Style::default().fg(Color::Gray)),
        Span::styled(
            kind.label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]));
    f.render_widget(header, chunks[0]);

    let mut items: Vec<ListItem> = Vec::new();
    let mut row = 0usize;
    for section in sections.iter() {
        items.push(ListItem::new(Line::from(Span::styled(
            section.title().to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))));
        for entry in section.entries().filter(|e| e.visible) {
            let selected = row == state.selected;
            let mut spans = vec![
                Span::raw(format!("  {} ", icon_glyph(&entry.icon))),
                Span::styled(
                    entry.title.clone(),
                    if selected {
                        Style::default()
                            .fg(Color::Rgb(255, 165, 0))
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    },
                ),
            ];
            if let Some(desc) = &entry.description {
                spans.push(Span::styled(
                    format!("  {}", desc),
                    Style::default().fg(Color::Green),
                ));
            }
            items.push(ListItem::new(Line::from(spans)));
            row += 1;
        }
    }

    let list = List::new(items).block(Block::default().borders(Borders::NONE));
    f.render_widget(list, chunks[1]);

    let status = Paragraph::new(state.status.clone())
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(status, chunks[2]);
}
