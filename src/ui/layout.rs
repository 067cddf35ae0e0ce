//! Layout management for the TUI.

use ratatui::layout::{Constraint, Direction, Layout as RatatuiLayout, Rect};

/// UI layout areas.
pub struct Layout {
    /// Status bar area (top).
    pub status_area: Rect,
    /// Tab bar area.
    pub tab_area: Rect,
    /// Main content area.
    pub main_area: Rect,
    /// Notification area (bottom of the main area).
    pub notification_area: Rect,
}

impl Layout {
    /// Split the terminal area into bars and content.
    pub fn new(area: Rect) -> Self {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Tab bar
                Constraint::Min(0),    // Main content
            ])
            .split(area);

        let main_area = chunks[2];
        let height = 3.min(main_area.height);
        let width = (main_area.width / 2).max(30).min(main_area.width);
        let notification_area = Rect {
            x: main_area.x + main_area.width.saturating_sub(width) / 2,
            y: main_area.y + main_area.height.saturating_sub(height + 1),
            width,
            height,
        };

        Self {
            status_area: chunks[0],
            tab_area: chunks[1],
            main_area,
            notification_area,
        }
    }
}

/// Create a centered popup area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = RatatuiLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    RatatuiLayout::default()
        .direction(Direction::Horizontal)
        .constraints([
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
    fn test_notification_fits_inside_main_area() {
        let layout = Layout::new(Rect::new(0, 0, 80, 24));
        let main = layout.main_area;
        let note = layout.notification_area;
        assert_eq!(main.y, 2);
        assert!(note.x >= main.x && note.right() <= main.right());
        assert!(note.y >= main.y && note.bottom() <= main.bottom());
    }

    #[test]
    fn test_tiny_terminal_does_not_underflow() {
        let layout = Layout::new(Rect::new(0, 0, 10, 3));
        assert!(layout.notification_area.height <= layout.main_area.height);
    }
}
