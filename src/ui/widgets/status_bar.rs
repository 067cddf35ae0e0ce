//! Status bar widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::state::{InputMode, Store};

/// Status bar widget.
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar.
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let session = if store.app.authenticated {
            Span::styled("● Signed in", Style::default().fg(Color::Green))
        } else {
            Span::styled("○ Signed out", Style::default().fg(Color::Red))
        };

        let mode = match store.app.input_mode {
            InputMode::Normal => Span::styled(" NORMAL ", Style::default().fg(Color::Yellow)),
            InputMode::Insert => Span::styled(" INSERT ", Style::default().fg(Color::Magenta)),
        };

        let loading = if store.app.loading {
            Span::styled(
                " Working... ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::raw("")
        };

        let help_hint = Span::styled(" Press ? for help ", Style::default().fg(Color::Gray));

        let left = vec![
            Span::styled(
                " Sportsbook ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("| "),
            Span::raw(store.app.current_view.title()),
            Span::raw(" | "),
            session,
            Span::raw(" |"),
            mode,
            loading,
        ];

        // Right-align the help hint
        let left_len: usize = left.iter().map(|s| s.content.chars().count()).sum();
        let right_len = help_hint.content.chars().count();
        let padding = (area.width as usize).saturating_sub(left_len + right_len);

        let mut spans = left;
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(help_hint);

        let paragraph =
            Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
        frame.render_widget(paragraph, area);
    }
}
