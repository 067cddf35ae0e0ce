//! Event handler for processing input events.

use super::input::Bindings;
use crate::error::Result;
use crate::state::{Action, InputMode, Store, View};
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseEvent, MouseEventKind,
};
use futures::StreamExt;

/// Snapshot of relevant store state for event handling.
#[derive(Debug, Clone, Copy)]
pub struct StoreSnapshot {
    pub input_mode: InputMode,
    pub current_view: View,
}

impl From<&Store> for StoreSnapshot {
    fn from(store: &Store) -> Self {
        Self {
            input_mode: store.app.input_mode,
            current_view: store.app.current_view,
        }
    }
}

/// Maps key presses to actions for a given state snapshot.
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: Bindings,
}

impl KeyMap {
    pub fn new(bindings: Bindings) -> Self {
        Self { bindings }
    }

    /// Translate a key event into an action, if it means anything here.
    pub fn map_key(&self, key: KeyEvent, snapshot: StoreSnapshot) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Action::Quit);
        }

        match snapshot.input_mode {
            InputMode::Insert => self.map_insert(key, snapshot.current_view),
            InputMode::Normal => self.map_normal(key, snapshot.current_view),
        }
    }

    /// Translate a mouse event into an action.
    pub fn map_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Action::ScrollUp),
            MouseEventKind::ScrollDown => Some(Action::ScrollDown),
            _ => None,
        }
    }

    fn map_insert(&self, key: KeyEvent, view: View) -> Option<Action> {
        let b = &self.bindings;

        if b.back.matches(&key) {
            return Some(Action::SetInputMode(InputMode::Normal));
        }
        if b.select.matches(&key) {
            return match view {
                View::Login => Some(Action::SubmitAuth),
                View::BetSlip => Some(Action::SubmitBet),
                View::Deposit => Some(Action::SubmitDeposit),
                _ => None,
            };
        }
        if view == View::Login && b.auth_mode.matches(&key) {
            return Some(Action::ToggleAuthMode);
        }
        if b.next_field.matches(&key) {
            return match view {
                View::BetSlip => Some(Action::ToggleSelection),
                _ => Some(Action::NextField),
            };
        }

        match key.code {
            KeyCode::Left | KeyCode::Right if view == View::BetSlip => {
                Some(Action::ToggleSelection)
            }
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                Some(Action::InputChar(c))
            }
            _ => None,
        }
    }

    fn map_normal(&self, key: KeyEvent, view: View) -> Option<Action> {
        let b = &self.bindings;

        // Global shortcuts
        if b.quit.matches(&key) {
            return Some(Action::Quit);
        }
        if b.help.matches(&key) {
            return Some(Action::ToggleHelp);
        }

        if view == View::Login {
            if b.select.matches(&key) || key.code == KeyCode::Char('i') {
                return Some(Action::SetInputMode(InputMode::Insert));
            }
            return None;
        }

        if b.logout.matches(&key) {
            return Some(Action::Logout);
        }
        if b.refresh.matches(&key) {
            return Some(Action::Refresh);
        }

        // View switching
        let tabs = [
            (&b.home, View::Home),
            (&b.inplay, View::InPlay),
            (&b.profile, View::Profile),
            (&b.deposit, View::Deposit),
        ];
        if let Some((_, target)) = tabs.iter().find(|(binding, _)| binding.matches(&key)) {
            return Some(Action::SetView(*target));
        }

        // Navigation
        if b.up.matches(&key) || key.code == KeyCode::Up {
            return Some(Action::ScrollUp);
        }
        if b.down.matches(&key) || key.code == KeyCode::Down {
            return Some(Action::ScrollDown);
        }
        match key.code {
            KeyCode::PageUp => return Some(Action::PageUp),
            KeyCode::PageDown => return Some(Action::PageDown),
            KeyCode::Home => return Some(Action::GoToTop),
            KeyCode::End => return Some(Action::GoToBottom),
            _ => {}
        }

        // View-specific actions
        match view {
            View::Home | View::InPlay
                if b.place_bet.matches(&key) || b.select.matches(&key) =>
            {
                Some(Action::OpenBetSlip)
            }
            View::BetSlip | View::Deposit if b.back.matches(&key) => Some(Action::Back),
            View::Home | View::InPlay | View::Profile if b.back.matches(&key) => {
                Some(Action::DismissNotification)
            }
            View::BetSlip | View::Deposit
                if b.select.matches(&key) || key.code == KeyCode::Char('i') =>
            {
                Some(Action::SetInputMode(InputMode::Insert))
            }
            _ => None,
        }
    }
}

/// Reads terminal events and produces actions.
pub struct EventHandler {
    events: EventStream,
    keymap: KeyMap,
    store_snapshot: Option<StoreSnapshot>,
}

impl EventHandler {
    pub fn new(bindings: Bindings) -> Self {
        Self {
            events: EventStream::new(),
            keymap: KeyMap::new(bindings),
            store_snapshot: None,
        }
    }

    /// Update the store snapshot for state-aware event handling.
    pub fn update_store_snapshot(&mut self, store: &Store) {
        self.store_snapshot = Some(StoreSnapshot::from(store));
    }

    /// Wait for the next terminal event and map it to an action.
    ///
    /// A closed input stream is treated as a request to quit.
    pub async fn next(&mut self) -> Result<Option<Action>> {
        let Some(event) = self.events.next().await else {
            return Ok(Some(Action::Quit));
        };

        match event? {
            CrosstermEvent::Key(key) => Ok(self
                .store_snapshot
                .and_then(|snapshot| self.keymap.map_key(key, snapshot))),
            CrosstermEvent::Mouse(mouse) => Ok(self.keymap.map_mouse(mouse)),
            // Resize and focus changes just trigger a redraw.
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeyBindings;

    fn keymap() -> KeyMap {
        KeyMap::new(Bindings::try_from(&KeyBindings::default()).unwrap())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn snapshot(input_mode: InputMode, current_view: View) -> StoreSnapshot {
        StoreSnapshot {
            input_mode,
            current_view,
        }
    }

    #[test]
    fn test_insert_mode_types_into_form() {
        let km = keymap();
        let s = snapshot(InputMode::Insert, View::Deposit);
        assert!(matches!(
            km.map_key(press(KeyCode::Char('4')), s),
            Some(Action::InputChar('4'))
        ));
        // The quit key is plain text while typing.
        assert!(matches!(
            km.map_key(press(KeyCode::Char('q')), s),
            Some(Action::InputChar('q'))
        ));
        assert!(matches!(
            km.map_key(press(KeyCode::Enter), s),
            Some(Action::SubmitDeposit)
        ));
        assert!(matches!(
            km.map_key(press(KeyCode::Esc), s),
            Some(Action::SetInputMode(InputMode::Normal))
        ));
    }

    #[test]
    fn test_bet_slip_selection_keys() {
        let km = keymap();
        let s = snapshot(InputMode::Insert, View::BetSlip);
        assert!(matches!(
            km.map_key(press(KeyCode::Right), s),
            Some(Action::ToggleSelection)
        ));
        assert!(matches!(
            km.map_key(press(KeyCode::Tab), s),
            Some(Action::ToggleSelection)
        ));
        assert!(matches!(
            km.map_key(press(KeyCode::Enter), s),
            Some(Action::SubmitBet)
        ));
    }

    #[test]
    fn test_normal_mode_navigation() {
        let km = keymap();
        let s = snapshot(InputMode::Normal, View::InPlay);
        assert!(matches!(
            km.map_key(press(KeyCode::Char('1')), s),
            Some(Action::SetView(View::Home))
        ));
        assert!(matches!(
            km.map_key(press(KeyCode::Char('b')), s),
            Some(Action::OpenBetSlip)
        ));
        assert!(matches!(
            km.map_key(press(KeyCode::Char('j')), s),
            Some(Action::ScrollDown)
        ));
        assert!(matches!(
            km.map_key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL), s),
            Some(Action::Logout)
        ));
    }

    #[test]
    fn test_login_screen_cannot_switch_tabs() {
        let km = keymap();
        let s = snapshot(InputMode::Normal, View::Login);
        assert!(km.map_key(press(KeyCode::Char('2')), s).is_none());
        assert!(matches!(
            km.map_key(press(KeyCode::Char('q')), s),
            Some(Action::Quit)
        ));
        assert!(matches!(
            km.map_key(
                KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
                snapshot(InputMode::Insert, View::Login)
            ),
            Some(Action::ToggleAuthMode)
        ));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let km = keymap();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(
            km.map_key(ctrl_c, snapshot(InputMode::Insert, View::BetSlip)),
            Some(Action::Quit)
        ));
    }
}
