//! Screen views. Each follows the same shape: `load` spawns backend work,
//! `poll` drains its results on tick, `handle_input` maps keys, and pure
//! `build_*` functions produce the lines `render` draws.

pub mod campaign_detail;
pub mod campaign_form;
pub mod campaigns;
pub mod chat;
pub mod home;
pub mod post;
pub mod product_form;
pub mod products;

use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use super::events::Action;
use super::theme;

/// Outcome of a view handling input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewResult {
    /// Input consumed, view stays as-is.
    Consumed,
    /// Input produced an app-level action.
    Action(Action),
}

/// The key of a press event, if `event` is one.
pub(crate) fn key_press(event: &Event) -> Option<&KeyEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(key),
        _ => None,
    }
}

pub(crate) fn blank() -> Line<'static> {
    Line::raw("")
}

/// An indented single-span line.
pub(crate) fn text_line(text: impl Into<String>, style: Style) -> Line<'static> {
    Line::from(vec![Span::raw("  "), Span::styled(text.into(), style)])
}

pub(crate) fn rule(width: usize) -> Line<'static> {
    text_line("─".repeat(width), theme::dim())
}

/// Key hints like `j/k:select  Enter:open`.
pub(crate) fn hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (key, label) in hints {
        spans.push(Span::styled(key.to_string(), theme::key_hint()));
        spans.push(Span::raw(format!(":{label}  ")));
    }
    Line::from(spans)
}

/// Stepped progress bar: `filled` of `total` segments lit.
pub(crate) fn progress_line(filled: usize, total: usize, segment_width: usize) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for i in 0..total {
        let style = if i < filled {
            theme::progress_filled()
        } else {
            theme::progress_empty()
        };
        spans.push(Span::styled("━".repeat(segment_width), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Move a selection index within `0..len`.
pub(crate) fn step_selection(selected: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        0
    } else if down {
        (selected + 1).min(len - 1)
    } else {
        selected.saturating_sub(1)
    }
}

#[cfg(test)]
pub(crate) fn lines_text(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|l| {
            l.spans
                .iter()
                .map(|s| s.content.to_string())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
pub(crate) fn press(code: crossterm::event::KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, crossterm::event::KeyModifiers::NONE))
}

#[cfg(test)]
pub(crate) fn press_with(
    code: crossterm::event::KeyCode,
    modifiers: crossterm::event::KeyModifiers,
) -> Event {
    Event::Key(KeyEvent::new(code, modifiers))
}

#[cfg(test)]
pub(crate) fn test_services() -> (
    super::services::Services,
    tokio::sync::mpsc::UnboundedReceiver<super::events::AppEvent>,
) {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let api = std::sync::Arc::new(crate::core::api::MockLaunchApi::new());
    (
        super::services::Services::with_api(api, crate::config::DisplayConfig::default(), tx),
        rx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_line_segments() {
        let line = progress_line(2, 4, 3);
        let filled = line
            .spans
            .iter()
            .filter(|s| s.style == theme::progress_filled())
            .count();
        assert_eq!(filled, 2);
    }

    #[test]
    fn test_step_selection_bounds() {
        assert_eq!(step_selection(0, 0, true), 0);
        assert_eq!(step_selection(2, 3, true), 2);
        assert_eq!(step_selection(0, 3, false), 0);
        assert_eq!(step_selection(1, 3, true), 2);
    }

    #[test]
    fn test_hint_line_text() {
        let text = lines_text(&[hint_line(&[("r", "refresh"), ("q", "quit")])]);
        assert!(text.contains("r:refresh"));
        assert!(text.contains("q:quit"));
    }
}
