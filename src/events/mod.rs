//! Event handling for the sportsbook client.
//!
//! Terminal input is read as an async stream and mapped to store actions
//! according to the configured key bindings and the current view.

mod handler;
mod input;

pub use handler::{EventHandler, KeyMap, StoreSnapshot};
pub use input::{Bindings, KeyBinding};
