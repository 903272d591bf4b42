//! Navigation tray: the three top-level sections, active one highlighted.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::layout::TrayVisibility;
use super::theme;
use crate::core::routes::Section;

/// Tray state. The active section is derived from the route, not stored.
#[derive(Debug, Default)]
pub struct TrayState {
    /// Whether the user has toggled collapse (Ctrl+B).
    pub user_collapsed: bool,
}

impl TrayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_collapse(&mut self) {
        self.user_collapsed = !self.user_collapsed;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, visibility: TrayVisibility, active: Section) {
        if visibility == TrayVisibility::Hidden {
            return;
        }
        let lines = build_tray_lines(active, visibility == TrayVisibility::Collapsed, area.width);
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme::BG_SURFACE)),
            area,
        );
    }
}

/// Key that jumps to a section.
pub fn section_key(section: Section) -> char {
    match section {
        Section::Home => '1',
        Section::Campaigns => '2',
        Section::Products => '3',
    }
}

fn build_tray_lines(active: Section, collapsed: bool, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![Line::raw("")];
    for section in Section::ALL {
        let is_active = section == active;
        let style = if is_active {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::TEXT_MUTED)
        };
        let key = section_key(section);
        let label = if collapsed {
            format!(" {key}")
        } else {
            let marker = if is_active { "▸" } else { " " };
            format!("{marker}{key} {}", section.label())
        };
        let padded = format!("{:<width$}", label, width = width as usize);
        lines.push(Line::from(Span::styled(padded, style)));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[Line]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_active_section_marked() {
        let lines = text(&build_tray_lines(Section::Campaigns, false, 16));
        let marked: Vec<&String> = lines.iter().filter(|l| l.contains('▸')).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("Campaigns"));
    }

    #[test]
    fn test_collapsed_shows_keys_only() {
        let lines = text(&build_tray_lines(Section::Home, true, 4));
        assert!(lines.iter().any(|l| l.trim() == "1"));
        assert!(!lines.iter().any(|l| l.contains("Home")));
    }

    #[test]
    fn test_toggle_collapse() {
        let mut state = TrayState::new();
        state.toggle_collapse();
        assert!(state.user_collapsed);
        state.toggle_collapse();
        assert!(!state.user_collapsed);
    }
}
