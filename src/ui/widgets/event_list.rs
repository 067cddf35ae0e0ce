//! Event list widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::state::Event;
use crate::views::{EventCard, RemoteList};

/// List of event cards for the pre-match and in-play screens.
pub struct EventList;

impl EventList {
    /// Render `events` under `title`.
    pub fn render(frame: &mut Frame, area: Rect, title: &str, events: &RemoteList<Event>) {
        let block = Block::default()
            .title(format!(" {} ({}) ", title, events.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));

        if events.is_empty() {
            let text = if events.loading {
                "Loading..."
            } else {
                "No events"
            };
            let placeholder = Paragraph::new(Line::from(Span::styled(
                text,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )))
            .block(block);
            frame.render_widget(placeholder, area);
            return;
        }

        let items: Vec<ListItem> = events
            .render_with(EventCard::new)
            .into_iter()
            .map(card_item)
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        let mut state = ListState::default();
        state.select(events.selected_index);
        frame.render_stateful_widget(list, area, &mut state);

        if events.loading {
            render_loading(frame, area);
        }
    }
}

fn card_item(card: EventCard) -> ListItem<'static> {
    ListItem::new(vec![
        Line::from(Span::styled(
            card.title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(card.sport, Style::default().fg(Color::DarkGray))),
        Line::from(vec![
            Span::styled(card.team1_odds, Style::default().fg(Color::Green)),
            Span::raw("   "),
            Span::styled(card.team2_odds, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
    ])
}

/// Small "Loading..." marker in the bottom-right corner of `area`.
pub(crate) fn render_loading(frame: &mut Frame, area: Rect) {
    if area.width < 14 || area.height < 3 {
        return;
    }
    let loading = Line::from(Span::styled(
        "Loading...",
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::ITALIC),
    ));
    let loading_area = Rect {
        x: area.x + area.width - 12,
        y: area.y + area.height - 2,
        width: 10,
        height: 1,
    };
    frame.render_widget(Paragraph::new(loading), loading_area);
}
