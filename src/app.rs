//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, state management, and rendering. Network side effects
//! live in [`Effects`] so they can be driven without a terminal.

use crate::api::SportsbookApi;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::events::{Bindings, EventHandler};
use crate::payments::PaymentProcessor;
use crate::session::AuthGate;
use crate::state::{Action, Notification, Store, View};
use crate::ui::Ui;
use crate::views::{
    BET_FAILED, BET_PLACED, DEPOSIT_FAILED, DEPOSIT_SUCCESSFUL, PollHandle, RefreshPolicy,
    fetch_profile, spawn_refresh,
};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Runs the side effects behind actions: fetching lists for the mounted
/// view and submitting forms.
///
/// Network work runs in spawned tasks and reports back over the store's
/// action channel, so handling an action never waits on the network.
pub struct Effects {
    api: Arc<dyn SportsbookApi>,
    payments: Arc<dyn PaymentProcessor>,
    gate: AuthGate,
    /// Refresh task of the mounted view. Replacing it tears the old one down.
    refresh: Option<PollHandle>,
    inplay_interval: Duration,
    /// Bumped whenever the session changes; results from older epochs are dropped.
    epoch: u64,
}

impl Effects {
    pub fn new(
        api: Arc<dyn SportsbookApi>,
        payments: Arc<dyn PaymentProcessor>,
        gate: AuthGate,
        inplay_interval: Duration,
    ) -> Self {
        Self {
            api,
            payments,
            gate,
            refresh: None,
            inplay_interval,
            epoch: 0,
        }
    }

    /// Enter the first screen: events for a restored session, login otherwise.
    pub fn start(&mut self, store: &mut Store) {
        if self.gate.is_authenticated() {
            store.reduce(Action::Authenticated);
        } else {
            store.reduce(Action::SetView(View::Login));
        }
        self.mount(store);
    }

    /// Apply `action` to the store and start whatever work it implies.
    pub fn handle(&mut self, store: &mut Store, action: Action) {
        let action = match action {
            Action::Background { epoch, action } if epoch != self.epoch => {
                tracing::debug!("Dropping result from session epoch {}: {:?}", epoch, action);
                return;
            }
            Action::Background { action, .. } => *action,
            action => action,
        };

        let before = store.app.current_view;
        let remount = matches!(action, Action::Refresh);

        match action {
            Action::SubmitBet | Action::SubmitDeposit | Action::SubmitAuth
                if store.app.loading =>
            {
                tracing::debug!("Ignoring {:?} while a submit is pending", action);
                return;
            }
            Action::SubmitBet => {
                store.reduce(action);
                self.submit_bet(store);
            }
            Action::SubmitDeposit => {
                store.reduce(action);
                self.submit_deposit(store);
            }
            Action::SubmitAuth => {
                store.reduce(action);
                self.submit_auth(store);
            }
            Action::SessionOpened(session) => match self.gate.establish(session) {
                Ok(()) => {
                    self.epoch += 1;
                    store.reduce(Action::Authenticated);
                    store.reduce(Action::SetLoading(false));
                }
                Err(e) => {
                    tracing::warn!("Failed to store session: {}", e);
                    store.reduce(Action::ShowNotification(Notification::error(
                        e.user_message(store.login.mode.failure_message()),
                    )));
                }
            },
            Action::Logout => {
                store.reduce(action);
                if let Err(e) = self.gate.logout() {
                    tracing::warn!("Failed to clear stored session: {}", e);
                }
                self.epoch += 1;
                tracing::info!("Logged out");
                store.reduce(Action::LoggedOut);
                store.reduce(Action::SetLoading(false));
            }
            other => store.reduce(other),
        }

        if remount || store.app.current_view != before {
            self.mount(store);
        }
    }

    /// Whether a refresh task is attached to the current view.
    pub fn is_polling(&self) -> bool {
        self.refresh.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Start the fetch for the current view, tearing down the previous one.
    fn mount(&mut self, store: &mut Store) {
        self.refresh = None;
        let tx = store.sender();
        let epoch = self.epoch;

        match store.app.current_view {
            View::Home => {
                store.reduce(Action::LoadEvents);
                let api = Arc::clone(&self.api);
                self.refresh = Some(spawn_refresh(
                    RefreshPolicy::Once,
                    move || {
                        let api = Arc::clone(&api);
                        async move { api.fetch_events().await }
                    },
                    move |result| {
                        let action = match result {
                            Ok(events) => Action::EventsLoaded(events),
                            Err(_) => Action::EventsFailed,
                        };
                        let _ = tx.send(Action::background(epoch, action));
                    },
                ));
            }
            View::InPlay => {
                store.reduce(Action::LoadInPlay);
                let api = Arc::clone(&self.api);
                self.refresh = Some(spawn_refresh(
                    RefreshPolicy::Every(self.inplay_interval),
                    move || {
                        let api = Arc::clone(&api);
                        async move { api.fetch_inplay_events().await }
                    },
                    move |result| {
                        let action = match result {
                            Ok(events) => Action::InPlayLoaded(events),
                            Err(_) => Action::InPlayFailed,
                        };
                        let _ = tx.send(Action::background(epoch, action));
                    },
                ));
            }
            View::Profile => {
                let Ok(session) = self.gate.session().cloned() else {
                    return;
                };
                store.reduce(Action::LoadProfile);
                let api = Arc::clone(&self.api);
                self.refresh = Some(spawn_refresh(
                    RefreshPolicy::Once,
                    move || {
                        let api = Arc::clone(&api);
                        let session = session.clone();
                        async move { fetch_profile(api.as_ref(), &session).await }
                    },
                    move |result| {
                        let action = match result {
                            Ok(snapshot) => Action::ProfileLoaded(snapshot),
                            Err(_) => Action::ProfileFailed,
                        };
                        let _ = tx.send(Action::background(epoch, action));
                    },
                ));
            }
            View::Login | View::BetSlip | View::Deposit => {}
        }
    }

    /// Run `work` in the background and send the actions it yields.
    fn spawn_submit<F>(&self, store: &Store, work: F)
    where
        F: Future<Output = Vec<Action>> + Send + 'static,
    {
        let tx = store.sender();
        let epoch = self.epoch;
        tokio::spawn(async move {
            for action in work.await {
                let _ = tx.send(Action::background(epoch, action));
            }
        });
    }

    /// Report a failure that happened before any work was started.
    fn fail_now(store: &mut Store, error: Error, fallback: &str) {
        tracing::warn!("{}: {}", fallback, error);
        store.reduce(Action::ShowNotification(Notification::error(
            error.user_message(fallback),
        )));
    }

    fn submit_bet(&self, store: &mut Store) {
        let Some(slip) = store.bet_slip.clone() else {
            store.reduce(Action::SetLoading(false));
            return;
        };
        let session = match self.gate.session() {
            Ok(session) => session.clone(),
            Err(e) => return Self::fail_now(store, e, BET_FAILED),
        };
        let balance = store.profile.balance;
        let api = Arc::clone(&self.api);

        self.spawn_submit(store, async move {
            match slip.submit(api.as_ref(), &session, balance).await {
                Ok(bet) => vec![
                    Action::BetPlaced(bet),
                    Action::ShowNotification(Notification::success(BET_PLACED)),
                ],
                Err(e) => {
                    tracing::warn!("Bet failed: {}", e);
                    vec![Action::ShowNotification(Notification::error(
                        e.user_message(BET_FAILED),
                    ))]
                }
            }
        });
    }

    fn submit_deposit(&self, store: &mut Store) {
        let session = match self.gate.session() {
            Ok(session) => session.clone(),
            Err(e) => return Self::fail_now(store, e, DEPOSIT_FAILED),
        };
        let form = store.deposit.clone();
        let api = Arc::clone(&self.api);
        let payments = Arc::clone(&self.payments);

        self.spawn_submit(store, async move {
            match form.submit(api.as_ref(), payments.as_ref(), &session).await {
                Ok(receipt) => vec![
                    Action::DepositCompleted(receipt),
                    Action::ShowNotification(Notification::success(DEPOSIT_SUCCESSFUL)),
                ],
                Err(e) => {
                    tracing::warn!("Deposit failed: {}", e);
                    vec![Action::ShowNotification(Notification::error(
                        e.user_message(DEPOSIT_FAILED),
                    ))]
                }
            }
        });
    }

    fn submit_auth(&self, store: &mut Store) {
        let form = store.login.clone();
        let api = Arc::clone(&self.api);

        self.spawn_submit(store, async move {
            match form.submit(api.as_ref()).await {
                Ok(session) => vec![Action::SessionOpened(session)],
                Err(e) => {
                    tracing::warn!("{}: {}", form.mode.failure_message(), e);
                    vec![Action::ShowNotification(Notification::error(
                        e.user_message(form.mode.failure_message()),
                    ))]
                }
            }
        });
    }
}

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Side effects.
    effects: Effects,
    /// Configuration.
    config: Config,
}

impl App {
    /// Create a new application and take over the terminal.
    pub fn new(
        config: Config,
        api: Arc<dyn SportsbookApi>,
        payments: Arc<dyn PaymentProcessor>,
        gate: AuthGate,
    ) -> Result<Self> {
        // Parse bindings before touching the terminal so errors print cleanly
        let bindings = Bindings::try_from(&config.keybindings)?;

        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        if config.ui.mouse_support {
            execute!(stdout, EnableMouseCapture)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let effects = Effects::new(api, payments, gate, config.api.inplay_poll_interval());

        Ok(Self {
            terminal,
            store: Store::new(action_tx),
            event_handler: EventHandler::new(bindings),
            action_rx,
            effects,
            config,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        self.effects.start(&mut self.store);

        let mut ticker =
            tokio::time::interval(Duration::from_millis(self.config.ui.tick_rate_ms.max(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Main event loop
        loop {
            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.store);

            // Render UI
            let keys = &self.config.keybindings;
            let store = &self.store;
            self.terminal.draw(|frame| {
                Ui::render(frame, store, keys);
            })?;

            let action = tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => result?,

                // Handle actions from background tasks
                Some(action) = self.action_rx.recv() => Some(action),

                _ = ticker.tick() => Some(Action::Tick),
            };

            if let Some(action) = action {
                self.effects.handle(&mut self.store, action);
            }

            if self.store.app.should_quit {
                break;
            }
        }

        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}
