//! Bets and account snapshots.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Event;

/// When the bet was taken relative to kick-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BetType {
    #[default]
    PreMatch,
    InPlay,
}

impl std::fmt::Display for BetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PreMatch => write!(f, "pre-match"),
            Self::InPlay => write!(f, "in-play"),
        }
    }
}

/// The event a bet refers to.
///
/// Listing bets returns the populated event; creating one may only echo
/// the id back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventRef {
    Populated(Event),
    Id(String),
}

impl EventRef {
    pub fn id(&self) -> &str {
        match self {
            Self::Populated(event) => &event.id,
            Self::Id(id) => id,
        }
    }

    pub fn event(&self) -> Option<&Event> {
        match self {
            Self::Populated(event) => Some(event),
            Self::Id(_) => None,
        }
    }
}

/// A placed bet. Never mutated client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bet {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "eventId")]
    pub event: EventRef,
    pub amount: Decimal,
    /// Team the stake is on.
    pub selection: String,
    #[serde(rename = "type", default)]
    pub bet_type: BetType,
    #[serde(default)]
    pub status: String,
}

/// The authenticated user's account, as far as the client cares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub balance: Decimal,
}
