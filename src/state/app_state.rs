//! Application-level state.

use super::Notification;

/// The current view/screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Login or registration, depending on the form mode.
    #[default]
    Login,
    /// Pre-match events.
    Home,
    /// In-play events, refreshed on an interval.
    InPlay,
    BetSlip,
    Profile,
    Deposit,
}

impl View {
    /// Views that take typed input when entered.
    pub fn is_form(self) -> bool {
        matches!(self, Self::Login | Self::BetSlip | Self::Deposit)
    }

    /// Everything past the login screen needs a session.
    pub fn requires_auth(self) -> bool {
        self != Self::Login
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Home => "Sports Events",
            Self::InPlay => "In-Play Events",
            Self::BetSlip => "Bet Slip",
            Self::Profile => "Profile",
            Self::Deposit => "Deposit Funds",
        }
    }
}

/// Input mode for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Keys go to the focused form field.
    Insert,
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current view.
    pub current_view: View,
    /// View shown before the current one.
    pub previous_view: View,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Whether to show help overlay.
    pub show_help: bool,
    /// Current notification.
    pub notification: Option<Notification>,
    /// Whether an action is in flight.
    pub loading: bool,
    /// Whether a session is held.
    pub authenticated: bool,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl AppState {
    /// Check if in an input mode.
    pub fn is_editing(&self) -> bool {
        self.input_mode == InputMode::Insert
    }
}
