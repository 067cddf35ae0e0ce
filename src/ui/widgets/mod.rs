//! TUI widgets.

mod event_list;
mod forms;
mod help;
mod notifications;
mod profile;
mod status_bar;
mod tab_bar;

pub use event_list::EventList;
pub use forms::{BetSlipForm, DepositPanel, LoginPanel};
pub use help::HelpPanel;
pub use notifications::render_notification;
pub use profile::ProfilePanel;
pub use status_bar::StatusBar;
pub use tab_bar::TabBar;
