//! # Sportsbook - a terminal client for a sports-betting backend
//!
//! Browse pre-match and in-play events, place bets, deposit funds through a
//! card processor and review your bet history, all from the terminal.
//!
//! ## Architecture
//!
//! - **App**: Event loop and side effects (fetches, form submissions)
//! - **UI**: Layout and rendering logic
//! - **Views**: Screen models: remote lists, bet slip, deposit, profile, login
//! - **API**: Backend client behind the [`api::SportsbookApi`] trait
//! - **Payments**: Card confirmation behind [`payments::PaymentProcessor`]
//! - **Session**: Token storage and the auth gate
//! - **State**: Centralized state management
//! - **Events**: Input handling and key bindings
//! - **Config**: Layered configuration

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod payments;
pub mod session;
pub mod state;
pub mod ui;
pub mod views;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
