//! State management for the sportsbook client.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture.

mod app_state;
mod bet_state;
mod event_state;

pub use app_state::{AppState, InputMode, View};
pub use bet_state::{Account, Bet, BetType, EventRef};
pub use event_state::Event;

use crate::error::Result;
use crate::session::Session;
use crate::views::{
    BetSlip, DepositForm, DepositReceipt, EVENTS_FAILED, INPLAY_FAILED, LoginForm,
    PROFILE_FAILED, ProfileSnapshot, ProfileView, RemoteList,
};
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    SetView(View),
    Back,
    SetInputMode(InputMode),

    // Event lists
    LoadEvents,
    EventsLoaded(Vec<Event>),
    EventsFailed,
    LoadInPlay,
    InPlayLoaded(Vec<Event>),
    InPlayFailed,

    // Profile
    LoadProfile,
    ProfileLoaded(ProfileSnapshot),
    ProfileFailed,

    // Bet slip
    OpenBetSlip,
    ToggleSelection,
    SubmitBet,
    BetPlaced(Bet),

    // Deposit
    SubmitDeposit,
    DepositCompleted(DepositReceipt),

    // Auth
    ToggleAuthMode,
    SubmitAuth,
    SessionOpened(Session),
    Authenticated,
    Logout,
    LoggedOut,

    // Form input
    InputChar(char),
    InputBackspace,
    NextField,

    // UI actions
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    ToggleHelp,
    ShowNotification(Notification),
    DismissNotification,
    Tick,

    // Data refresh
    Refresh,
    SetLoading(bool),

    // Result of background work, tagged with the session epoch it ran in
    Background { epoch: u64, action: Box<Action> },

    // Quit
    Quit,
}

impl Action {
    /// Wrap `action` as the result of work started in `epoch`.
    pub fn background(epoch: u64, action: Action) -> Self {
        Self::Background {
            epoch,
            action: Box::new(action),
        }
    }
}

/// A notification to display to the user.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub duration_secs: u64,
    pub created_at: DateTime<Utc>,
}

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl Notification {
    fn new(message: impl Into<String>, level: NotificationLevel, duration_secs: u64) -> Self {
        Self {
            message: message.into(),
            level,
            duration_secs,
            created_at: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Info, 3)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Success, 3)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Warning, 5)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationLevel::Error, 6)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= chrono::Duration::seconds(self.duration_secs as i64)
    }
}

/// The global state store.
#[derive(Debug)]
pub struct Store {
    /// Application state.
    pub app: AppState,
    /// Pre-match events.
    pub events: RemoteList<Event>,
    /// In-play events.
    pub inplay: RemoteList<Event>,
    /// Profile screen.
    pub profile: ProfileView,
    /// Open bet slip, if any.
    pub bet_slip: Option<BetSlip>,
    /// Deposit form.
    pub deposit: DepositForm,
    /// Login/registration form.
    pub login: LoginForm,
    /// Action sender for dispatching actions.
    action_tx: mpsc::UnboundedSender<Action>,
}

impl Store {
    /// Create a new store with the given action sender.
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            app: AppState::default(),
            events: RemoteList::default(),
            inplay: RemoteList::default(),
            profile: ProfileView::default(),
            bet_slip: None,
            deposit: DepositForm::default(),
            login: LoginForm::default(),
            action_tx,
        }
    }

    /// Dispatch an action to the store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.action_tx
            .send(action)
            .map_err(|e| crate::Error::channel(e.to_string()))
    }

    /// A sender background tasks can feed actions into.
    pub fn sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    /// Apply an action to update state.
    pub fn reduce(&mut self, action: Action) {
        match action {
            // Navigation
            Action::SetView(view) => self.set_view(view),
            Action::Back => self.back(),
            Action::SetInputMode(mode) => self.app.input_mode = mode,

            // Event lists
            Action::LoadEvents => self.events.begin_load(),
            Action::EventsLoaded(events) => self.events.loaded(events),
            Action::EventsFailed => {
                self.events.failed();
                self.notify(Notification::error(EVENTS_FAILED));
            }
            Action::LoadInPlay => self.inplay.begin_load(),
            Action::InPlayLoaded(events) => self.inplay.loaded(events),
            Action::InPlayFailed => {
                self.inplay.failed();
                self.notify(Notification::error(INPLAY_FAILED));
            }

            // Profile
            Action::LoadProfile => self.profile.begin_load(),
            Action::ProfileLoaded(snapshot) => {
                // Account data never outlives the session it was fetched for.
                if self.app.authenticated {
                    self.profile.loaded(snapshot);
                }
            }
            Action::ProfileFailed => {
                self.profile.failed();
                self.notify(Notification::error(PROFILE_FAILED));
            }

            // Bet slip
            Action::OpenBetSlip => self.open_bet_slip(),
            Action::ToggleSelection => {
                if let Some(slip) = self.bet_slip.as_mut() {
                    slip.toggle_selection();
                }
            }
            Action::BetPlaced(_) => {
                self.bet_slip = None;
                self.set_view(View::Profile);
            }

            // Deposit
            Action::DepositCompleted(_) => {
                self.deposit.clear();
                self.set_view(View::Profile);
            }

            // Auth
            Action::ToggleAuthMode => self.login.toggle_mode(),
            Action::Authenticated => {
                self.app.authenticated = true;
                self.login.clear();
                self.set_view(View::Home);
            }
            Action::LoggedOut => {
                self.app.authenticated = false;
                self.profile.reset();
                self.bet_slip = None;
                self.deposit.clear();
                self.set_view(View::Login);
            }

            // Form input
            Action::InputChar(c) => self.input_char(c),
            Action::InputBackspace => self.input_backspace(),
            Action::NextField => {
                if self.app.current_view == View::Login {
                    self.login.next_field();
                }
            }

            // UI actions
            Action::ScrollUp => self.scroll(-1),
            Action::ScrollDown => self.scroll(1),
            Action::PageUp => self.scroll(-10),
            Action::PageDown => self.scroll(10),
            Action::GoToTop => {
                if let Some(list) = self.current_event_list() {
                    list.go_to_top();
                } else if self.app.current_view == View::Profile {
                    self.profile.bets.go_to_top();
                }
            }
            Action::GoToBottom => {
                if let Some(list) = self.current_event_list() {
                    list.go_to_bottom();
                } else if self.app.current_view == View::Profile {
                    self.profile.bets.go_to_bottom();
                }
            }
            Action::ToggleHelp => self.app.show_help = !self.app.show_help,
            Action::ShowNotification(notification) => self.notify(notification),
            Action::DismissNotification => self.app.notification = None,
            Action::Tick => {
                if self
                    .app
                    .notification
                    .as_ref()
                    .is_some_and(|n| n.is_expired(Utc::now()))
                {
                    self.app.notification = None;
                }
            }

            Action::SetLoading(loading) => self.app.loading = loading,

            // Quit
            Action::Quit => self.app.should_quit = true,

            // Side-effecting actions are run by the app; the store only
            // marks them as in progress.
            Action::SubmitBet | Action::SubmitDeposit | Action::SubmitAuth | Action::Logout => {
                self.app.loading = true
            }
            // Lists track their own loading state once the app refetches.
            Action::Refresh => {}
            // The app adopts the session, then dispatches `Authenticated`.
            Action::SessionOpened(_) => {}
            // The app drops results from stale epochs before they get here.
            Action::Background { action, .. } => self.reduce(*action),
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.app.notification = Some(notification);
        self.app.loading = false;
    }

    fn set_view(&mut self, view: View) {
        if view.requires_auth() && !self.app.authenticated {
            self.app.current_view = View::Login;
        } else if view == View::BetSlip && self.bet_slip.is_none() {
            return;
        } else if view != self.app.current_view {
            self.app.previous_view = self.app.current_view;
            self.app.current_view = view;
        }
        self.app.input_mode = if self.app.current_view.is_form() {
            InputMode::Insert
        } else {
            InputMode::Normal
        };
    }

    fn back(&mut self) {
        match self.app.current_view {
            View::BetSlip => {
                self.bet_slip = None;
                let previous = match self.app.previous_view {
                    View::InPlay => View::InPlay,
                    _ => View::Home,
                };
                self.set_view(previous);
            }
            View::Deposit => self.set_view(View::Home),
            _ => {}
        }
    }

    fn open_bet_slip(&mut self) {
        let (event, bet_type) = match self.app.current_view {
            View::Home => (self.events.selected(), BetType::PreMatch),
            View::InPlay => (self.inplay.selected(), BetType::InPlay),
            _ => return,
        };
        if let Some(event) = event.cloned() {
            self.bet_slip = Some(BetSlip::new(event, bet_type));
            self.set_view(View::BetSlip);
        }
    }

    fn input_char(&mut self, c: char) {
        match self.app.current_view {
            View::Login => self.login.push_char(c),
            View::BetSlip => {
                if let Some(slip) = self.bet_slip.as_mut() {
                    slip.push_amount_char(c);
                }
            }
            View::Deposit => self.deposit.push_amount_char(c),
            _ => {}
        }
    }

    fn input_backspace(&mut self) {
        match self.app.current_view {
            View::Login => self.login.pop_char(),
            View::BetSlip => {
                if let Some(slip) = self.bet_slip.as_mut() {
                    slip.pop_amount_char();
                }
            }
            View::Deposit => self.deposit.pop_amount_char(),
            _ => {}
        }
    }

    fn current_event_list(&mut self) -> Option<&mut RemoteList<Event>> {
        match self.app.current_view {
            View::Home => Some(&mut self.events),
            View::InPlay => Some(&mut self.inplay),
            _ => None,
        }
    }

    fn scroll(&mut self, delta: i32) {
        if let Some(list) = self.current_event_list() {
            list.scroll(delta);
        } else if self.app.current_view == View::Profile {
            self.profile.bets.scroll(delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::ProfileSnapshot;
    use rust_decimal_macros::dec;

    fn store() -> Store {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut store = Store::new(tx);
        store.reduce(Action::Authenticated);
        store
    }

    fn event(id: &str) -> Event {
        Event {
            id: id.to_string(),
            team1: format!("{}-home", id),
            team2: format!("{}-away", id),
            sport: "Soccer".to_string(),
            odds1: dec!(110),
            odds2: dec!(-130),
        }
    }

    #[test]
    fn test_protected_views_redirect_to_login() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut store = Store::new(tx);
        store.reduce(Action::SetView(View::Profile));
        assert_eq!(store.app.current_view, View::Login);
        assert_eq!(store.app.input_mode, InputMode::Insert);

        store.reduce(Action::SetView(View::Home));
        assert_eq!(store.app.current_view, View::Login);

        store.reduce(Action::Authenticated);
        assert_eq!(store.app.current_view, View::Home);
        assert_eq!(store.app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_open_bet_slip_from_inplay() {
        let mut store = store();
        store.reduce(Action::SetView(View::InPlay));
        store.reduce(Action::InPlayLoaded(vec![event("e1"), event("e2")]));
        store.reduce(Action::ScrollDown);
        store.reduce(Action::OpenBetSlip);

        assert_eq!(store.app.current_view, View::BetSlip);
        let slip = store.bet_slip.as_ref().unwrap();
        assert_eq!(slip.event.id, "e2");
        assert_eq!(slip.bet_type, BetType::InPlay);

        store.reduce(Action::InputChar('4'));
        store.reduce(Action::InputChar('x'));
        store.reduce(Action::InputChar('2'));
        assert_eq!(store.bet_slip.as_ref().unwrap().amount, "42");

        store.reduce(Action::Back);
        assert_eq!(store.app.current_view, View::InPlay);
        assert!(store.bet_slip.is_none());
    }

    #[test]
    fn test_bet_slip_needs_selection() {
        let mut store = store();
        store.reduce(Action::OpenBetSlip);
        assert_eq!(store.app.current_view, View::Home);
        store.reduce(Action::SetView(View::BetSlip));
        assert_eq!(store.app.current_view, View::Home);
    }

    #[test]
    fn test_failed_fetch_keeps_list_and_notifies() {
        let mut store = store();
        store.reduce(Action::EventsLoaded(vec![event("e1")]));
        store.reduce(Action::LoadEvents);
        store.reduce(Action::EventsFailed);

        assert_eq!(store.events.len(), 1);
        assert!(!store.events.loading);
        let notification = store.app.notification.as_ref().unwrap();
        assert_eq!(notification.message, "Error fetching events");
        assert_eq!(notification.level, NotificationLevel::Error);
    }

    #[test]
    fn test_logout_clears_account_state() {
        let mut store = store();
        store.reduce(Action::ProfileLoaded(ProfileSnapshot {
            bets: Vec::new(),
            balance: dec!(500),
        }));
        store.reduce(Action::LoggedOut);

        assert!(!store.app.authenticated);
        assert_eq!(store.app.current_view, View::Login);
        assert_eq!(store.profile.balance, None);
    }

    #[test]
    fn test_profile_result_after_logout_is_ignored() {
        let mut store = store();
        store.reduce(Action::LoggedOut);
        store.reduce(Action::ProfileLoaded(ProfileSnapshot {
            bets: Vec::new(),
            balance: dec!(100),
        }));
        assert_eq!(store.profile.balance, None);
        assert!(store.profile.bets.is_empty());
    }

    #[test]
    fn test_notification_expiry_on_tick() {
        let mut store = store();
        let mut stale = Notification::info("old news");
        stale.created_at = Utc::now() - chrono::Duration::seconds(30);
        store.reduce(Action::ShowNotification(stale));
        store.reduce(Action::Tick);
        assert!(store.app.notification.is_none());

        store.reduce(Action::ShowNotification(Notification::success("fresh")));
        store.reduce(Action::Tick);
        assert!(store.app.notification.is_some());
    }
}
