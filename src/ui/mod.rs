//! UI rendering using ratatui.
//!
//! Rendering is a pure function of the [`Store`]; nothing here mutates state.

mod layout;
mod widgets;

pub use layout::Layout;
pub use widgets::{
    BetSlipForm, DepositPanel, EventList, HelpPanel, LoginPanel, ProfilePanel, StatusBar, TabBar,
};

use crate::config::KeyBindings;
use crate::state::{Store, View};
use ratatui::Frame;
use ratatui::layout::Rect;

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI.
    pub fn render(frame: &mut Frame, store: &Store, keys: &KeyBindings) {
        let layout = Layout::new(frame.area());

        StatusBar::render(frame, layout.status_area, store);
        TabBar::render(frame, layout.tab_area, store, keys);

        match store.app.current_view {
            View::Login => LoginPanel::render(frame, layout.main_area, store),
            View::Home | View::InPlay | View::Profile => {
                Self::render_page(frame, layout.main_area, store, store.app.current_view)
            }
            View::BetSlip => {
                // Keep the list the slip was opened from visible underneath.
                Self::render_page(frame, layout.main_area, store, store.app.previous_view);
                BetSlipForm::render(frame, layout.main_area, store);
            }
            View::Deposit => DepositPanel::render(frame, layout.main_area, store),
        }

        if store.app.show_help {
            HelpPanel::render(frame, frame.area(), keys);
        }

        if let Some(notification) = &store.app.notification {
            widgets::render_notification(frame, layout.notification_area, notification);
        }
    }

    fn render_page(frame: &mut Frame, area: Rect, store: &Store, view: View) {
        match view {
            View::Home => EventList::render(frame, area, "Sports Events", &store.events),
            View::InPlay => EventList::render(frame, area, "In-Play Events", &store.inplay),
            View::Profile => ProfilePanel::render(frame, area, store),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Action, Bet, BetType, Event, EventRef};
    use crate::views::ProfileSnapshot;
    use ratatui::{Terminal, backend::TestBackend};
    use rust_decimal_macros::dec;
    use tokio::sync::mpsc;

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut store = Store::new(tx);
        store.reduce(Action::Authenticated);
        store
    }

    fn event() -> Event {
        Event {
            id: "e1".to_string(),
            team1: "Lions".to_string(),
            team2: "Tigers".to_string(),
            sport: "Football".to_string(),
            odds1: dec!(150),
            odds2: dec!(-120),
        }
    }

    fn draw(store: &Store) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal
            .draw(|frame| Ui::render(frame, store, &KeyBindings::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_home_renders_event_cards() {
        let mut store = store();
        store.reduce(Action::EventsLoaded(vec![event()]));
        let screen = draw(&store);
        assert!(screen.contains("Sports Events (1)"));
        assert!(screen.contains("Lions vs Tigers"));
        assert!(screen.contains("Sport: Football"));
        assert!(screen.contains("Lions Odds: +150"));
        assert!(screen.contains("Tigers Odds: -120"));
    }

    #[test]
    fn test_profile_renders_balance_and_bets() {
        let mut store = store();
        store.reduce(Action::SetView(View::Profile));
        let before = draw(&store);
        assert!(before.contains("Balance: —"));

        store.reduce(Action::ProfileLoaded(ProfileSnapshot {
            bets: vec![Bet {
                id: "b1".to_string(),
                event: EventRef::Populated(event()),
                amount: dec!(25),
                selection: "Lions".to_string(),
                bet_type: BetType::PreMatch,
                status: "pending".to_string(),
            }],
            balance: dec!(500),
        }));
        let screen = draw(&store);
        assert!(screen.contains("Balance: $500"));
        assert!(screen.contains("Bet: $25 on Lions"));
        assert!(screen.contains("Status: pending"));
    }

    #[test]
    fn test_login_screen_hides_tabs() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let store = Store::new(tx);
        let screen = draw(&store);
        assert!(screen.contains("Login"));
        assert!(!screen.contains("In-Play"));
    }

    #[test]
    fn test_error_notification_is_shown() {
        let mut store = store();
        store.reduce(Action::EventsFailed);
        assert!(draw(&store).contains("Error fetching events"));
    }
}
