//! Profile widget: balance and bet history.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::event_list::render_loading;
use crate::state::Store;
use crate::views::BetLines;

/// Profile screen.
pub struct ProfilePanel;

impl ProfilePanel {
    pub fn render(frame: &mut Frame, area: Rect, store: &Store) {
        let profile = &store.profile;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let balance = Paragraph::new(Line::from(Span::styled(
            profile.balance_text(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )))
        .block(
            Block::default()
                .title(" Account ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(balance, chunks[0]);

        let items: Vec<ListItem> = profile
            .bets
            .render_with(BetLines::new)
            .into_iter()
            .map(|lines| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        lines.matchup,
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(lines.stake),
                    Line::from(Span::styled(
                        lines.status,
                        Style::default().fg(Color::DarkGray),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!(" Your Bets ({}) ", profile.bets.len()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        state.select(profile.bets.selected_index);
        frame.render_stateful_widget(list, chunks[1], &mut state);

        if profile.bets.loading {
            render_loading(frame, chunks[1]);
        }
    }
}
