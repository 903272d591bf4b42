//! Root layout: header row, navigation tray + main content, status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the expanded tray (section labels).
pub const TRAY_EXPANDED_WIDTH: u16 = 16;
/// Width of the collapsed tray (section numbers only).
pub const TRAY_COLLAPSED_WIDTH: u16 = 4;
/// Auto-collapse the tray below this terminal width.
pub const AUTO_COLLAPSE_THRESHOLD: u16 = 60;
/// Hide the tray entirely below this terminal width.
pub const HIDE_TRAY_THRESHOLD: u16 = 24;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Route title row.
    pub header: Rect,
    /// Tray area (None if hidden).
    pub tray: Option<Rect>,
    /// Main content area.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayVisibility {
    Expanded,
    Collapsed,
    Hidden,
}

impl AppLayout {
    /// `user_collapsed`: user has toggled collapse with Ctrl+B.
    pub fn compute(area: Rect, user_collapsed: bool) -> (Self, TrayVisibility) {
        let visibility = if area.width < HIDE_TRAY_THRESHOLD {
            TrayVisibility::Hidden
        } else if user_collapsed || area.width < AUTO_COLLAPSE_THRESHOLD {
            TrayVisibility::Collapsed
        } else {
            TrayVisibility::Expanded
        };

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

        let (header, content_area, status) = (rows[0], rows[1], rows[2]);

        let width = match visibility {
            TrayVisibility::Hidden => None,
            TrayVisibility::Collapsed => Some(TRAY_COLLAPSED_WIDTH),
            TrayVisibility::Expanded => Some(TRAY_EXPANDED_WIDTH),
        };
        let (tray, main) = match width {
            None => (None, content_area),
            Some(w) => {
                let cols =
                    Layout::horizontal([Constraint::Length(w), Constraint::Min(1)]).split(content_area);
                (Some(cols[0]), cols[1])
            }
        };

        (
            AppLayout {
                header,
                tray,
                main,
                status,
            },
            visibility,
        )
    }
}

/// A rectangle of `percent_x` by `percent_y` centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);
    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expanded_layout() {
        let area = Rect::new(0, 0, 120, 40);
        let (layout, vis) = AppLayout::compute(area, false);
        assert_eq!(vis, TrayVisibility::Expanded);
        assert_eq!(layout.tray.unwrap().width, TRAY_EXPANDED_WIDTH);
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.main.height, 38);
    }

    #[test]
    fn test_collapsed_by_user() {
        let area = Rect::new(0, 0, 120, 40);
        let (layout, vis) = AppLayout::compute(area, true);
        assert_eq!(vis, TrayVisibility::Collapsed);
        assert_eq!(layout.tray.unwrap().width, TRAY_COLLAPSED_WIDTH);
    }

    #[test]
    fn test_auto_collapse_narrow() {
        let (_, vis) = AppLayout::compute(Rect::new(0, 0, 55, 40), false);
        assert_eq!(vis, TrayVisibility::Collapsed);
    }

    #[test]
    fn test_hidden_very_narrow() {
        let area = Rect::new(0, 0, 20, 40);
        let (layout, vis) = AppLayout::compute(area, false);
        assert_eq!(vis, TrayVisibility::Hidden);
        assert!(layout.tray.is_none());
        assert_eq!(layout.main.width, 20);
    }

    #[test]
    fn test_centered_rect_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 40, area);
        assert!(inner.x > 0 && inner.y > 0);
        assert!(inner.right() <= area.right());
        assert!(inner.bottom() <= area.bottom());
    }
}
