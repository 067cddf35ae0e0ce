//! Sporting events as served by the backend.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fixture with moneyline odds for both sides.
///
/// Odds are whatever number the backend sends: American lines such as
/// `150`/`-120` or decimal prices such as `1.85`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// First (home) team.
    pub team1: String,
    /// Second (away) team.
    pub team2: String,
    /// Sport name.
    #[serde(default)]
    pub sport: String,
    /// Odds for `team1`.
    pub odds1: Decimal,
    /// Odds for `team2`.
    pub odds2: Decimal,
}

impl Event {
    /// "Team A vs Team B".
    pub fn matchup(&self) -> String {
        format!("{} vs {}", self.team1, self.team2)
    }

    /// Check whether `team` is one of the two sides.
    pub fn has_team(&self, team: &str) -> bool {
        self.team1 == team || self.team2 == team
    }
}
