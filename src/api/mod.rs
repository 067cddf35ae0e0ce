//! Sportsbook backend API.
//!
//! [`SportsbookApi`] is the seam every view talks through; [`ApiClient`] is
//! the HTTP implementation. Authenticated calls take the [`Session`]
//! explicitly instead of looking the token up themselves.

mod client;
mod wire;

pub use client::{ApiClient, ApiClientBuilder};

use crate::error::Result;
use crate::session::Session;
use crate::state::{Account, Bet, BetType, Event};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Remote operations used by the client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SportsbookApi: Send + Sync {
    /// `GET /api/events`
    async fn fetch_events(&self) -> Result<Vec<Event>>;

    /// `GET /api/events/inplay`
    async fn fetch_inplay_events(&self) -> Result<Vec<Event>>;

    /// `GET /api/geolocation`, true when betting is allowed here.
    async fn check_geolocation(&self) -> Result<bool>;

    /// `POST /api/bets`
    async fn place_bet(&self, session: &Session, request: &BetRequest) -> Result<Bet>;

    /// `GET /api/bets`
    async fn fetch_bets(&self, session: &Session) -> Result<Vec<Bet>>;

    /// `GET /api/auth/me`
    async fn fetch_account(&self, session: &Session) -> Result<Account>;

    /// `POST /api/payments/deposit`
    async fn create_deposit(
        &self,
        session: &Session,
        request: &DepositRequest,
    ) -> Result<DepositIntent>;

    /// `POST /api/payments/deposit/confirm`
    async fn confirm_deposit(
        &self,
        session: &Session,
        confirmation: &DepositConfirmation,
    ) -> Result<()>;

    /// `POST /api/auth/login`
    async fn login(&self, credentials: &Credentials) -> Result<Session>;

    /// `POST /api/auth/register`
    async fn register(&self, credentials: &Credentials) -> Result<Session>;
}

/// Login or registration credentials.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /api/bets`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BetRequest {
    pub event_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub selection: String,
    #[serde(rename = "type")]
    pub bet_type: BetType,
}

/// Body of `POST /api/payments/deposit`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepositRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Sent as the `Idempotency-Key` header.
    #[serde(skip)]
    pub idempotency_key: Uuid,
}

/// Payment intent returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositIntent {
    pub client_secret: String,
}

/// Body of `POST /api/payments/deposit/confirm`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositConfirmation {
    pub payment_intent_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Sent as the `Idempotency-Key` header.
    #[serde(skip)]
    pub idempotency_key: Uuid,
}
