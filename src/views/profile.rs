//! Profile: placed bets and the balance snapshot.

use super::RemoteList;
use crate::api::SportsbookApi;
use crate::error::Result;
use crate::session::Session;
use crate::state::Bet;
use rust_decimal::Decimal;

/// Shown when the profile cannot be loaded.
pub const PROFILE_FAILED: &str = "Error fetching data";

/// Everything the profile screen fetches in one go.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSnapshot {
    pub bets: Vec<Bet>,
    pub balance: Decimal,
}

/// Fetch bets, then the account balance.
pub async fn fetch_profile(api: &dyn SportsbookApi, session: &Session) -> Result<ProfileSnapshot> {
    let bets = api.fetch_bets(session).await?;
    let account = api.fetch_account(session).await?;
    Ok(ProfileSnapshot {
        bets,
        balance: account.balance,
    })
}

/// Profile screen state.
#[derive(Debug, Clone, Default)]
pub struct ProfileView {
    pub bets: RemoteList<Bet>,
    /// Unknown until the first successful fetch.
    pub balance: Option<Decimal>,
}

impl ProfileView {
    pub fn begin_load(&mut self) {
        self.bets.begin_load();
    }

    pub fn loaded(&mut self, snapshot: ProfileSnapshot) {
        self.bets.loaded(snapshot.bets);
        self.balance = Some(snapshot.balance);
    }

    pub fn failed(&mut self) {
        self.bets.failed();
    }

    /// Drop everything tied to the previous session.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn balance_text(&self) -> String {
        match self.balance {
            Some(balance) => format!("Balance: ${}", balance),
            None => "Balance: —".to_string(),
        }
    }
}

/// Display strings for one bet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetLines {
    pub matchup: String,
    pub stake: String,
    pub status: String,
}

impl BetLines {
    pub fn new(bet: &Bet) -> Self {
        let matchup = match bet.event.event() {
            Some(event) => event.matchup(),
            None => format!("Event {}", bet.event.id()),
        };
        Self {
            matchup,
            stake: format!("Bet: ${} on {}", bet.amount, bet.selection),
            status: format!("Status: {}", bet.status),
        }
    }
}
