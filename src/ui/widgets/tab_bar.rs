//! Tab bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::config::KeyBindings;
use crate::state::{Store, View};

/// Tab bar widget.
pub struct TabBar;

impl TabBar {
    /// Render the tab bar. Hidden until the user has signed in.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store, keys: &KeyBindings) {
        if !store.app.authenticated {
            return;
        }

        let tabs = [
            (&keys.home, View::Home),
            (&keys.inplay, View::InPlay),
            (&keys.profile, View::Profile),
            (&keys.deposit, View::Deposit),
        ];

        // The bet slip is opened from a list; keep that list's tab lit.
        let active = match store.app.current_view {
            View::BetSlip => store.app.previous_view,
            view => view,
        };

        let mut spans = vec![Span::raw(" ")];
        for (key, view) in tabs {
            let name_style = if active == view {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::White)
            };

            spans.push(Span::styled(
                format!("[{}] ", key),
                Style::default().fg(Color::DarkGray),
            ));
            spans.push(Span::styled(view.title(), name_style));
            spans.push(Span::raw("  "));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
