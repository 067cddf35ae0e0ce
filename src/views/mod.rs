//! Screen view-models.
//!
//! Each module holds the state and remote sequence behind one screen,
//! independent of the terminal so it can be driven from tests.

mod bet_slip;
mod deposit;
mod event_card;
mod login;
mod profile;
mod remote_list;

pub use bet_slip::{BET_FAILED, BET_PLACED, BetSlip};
pub use deposit::{DEPOSIT_FAILED, DEPOSIT_SUCCESSFUL, DepositForm, DepositReceipt};
pub use event_card::{EventCard, format_odds};
pub use login::{AuthMode, LoginField, LoginForm};
pub use profile::{BetLines, PROFILE_FAILED, ProfileSnapshot, ProfileView, fetch_profile};
pub use remote_list::{PollHandle, RefreshPolicy, RemoteList, spawn_refresh};

use crate::error::{Error, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Shown when the events list cannot be loaded.
pub const EVENTS_FAILED: &str = "Error fetching events";
/// Shown when the in-play list cannot be loaded.
pub const INPLAY_FAILED: &str = "Error fetching in-play events";

/// Parse a user-typed money amount; it must be a positive number.
pub fn parse_amount(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    if !trimmed.chars().any(|c| c.is_ascii_digit()) {
        return Err(Error::invalid_input("Enter an amount"));
    }
    let amount =
        Decimal::from_str(trimmed).map_err(|_| Error::invalid_input("Amount must be a number"))?;
    if amount <= Decimal::ZERO {
        return Err(Error::invalid_input("Amount must be greater than zero"));
    }
    Ok(amount)
}
