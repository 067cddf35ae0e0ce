//! Help panel widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::super::layout::centered_rect;
use crate::config::KeyBindings;

/// Help panel showing the configured key bindings.
pub struct HelpPanel;

impl HelpPanel {
    /// Render the help panel.
    pub fn render(frame: &mut Frame, area: Rect, keys: &KeyBindings) {
        let popup_area = centered_rect(60, 80, area);
        frame.render_widget(Clear, popup_area);

        let navigation = [
            (format!("{}/↓", keys.down), "Move down"),
            (format!("{}/↑", keys.up), "Move up"),
            ("Home/End".to_string(), "Go to top / bottom"),
            (keys.home.clone(), "Sports events"),
            (keys.inplay.clone(), "In-play events"),
            (keys.profile.clone(), "Profile"),
            (keys.deposit.clone(), "Deposit funds"),
        ];
        let actions = [
            (keys.place_bet.clone(), "Bet on selected event"),
            (keys.select.clone(), "Edit form / submit"),
            (keys.next_field.clone(), "Next field / switch team"),
            (keys.back.clone(), "Stop editing / go back"),
            (keys.auth_mode.clone(), "Toggle login / register"),
            (keys.refresh.clone(), "Refresh"),
            (keys.logout.clone(), "Log out"),
            (keys.help.clone(), "Toggle help"),
            (keys.quit.clone(), "Quit"),
        ];

        let mut lines = Vec::new();
        section(&mut lines, "Navigation", &navigation);
        lines.push(Line::from(""));
        section(&mut lines, "Actions", &actions);

        let help = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .style(Style::default().fg(Color::White));

        frame.render_widget(help, popup_area);
    }
}

fn section(lines: &mut Vec<Line<'static>>, title: &'static str, entries: &[(String, &'static str)]) {
    lines.push(Line::from(Span::styled(
        title,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    for (key, description) in entries {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<8}", key), Style::default().fg(Color::Cyan)),
            Span::raw(*description),
        ]));
    }
}
