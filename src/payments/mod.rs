//! External payment processor.
//!
//! Card details never pass through this client: the backend creates a
//! payment intent and the processor confirms it against a tokenized payment
//! method using the intent's client secret.

mod stripe;

pub use stripe::StripeProcessor;

use crate::error::Result;
use async_trait::async_trait;

/// A payment the processor reports as confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub payment_intent_id: String,
}

/// Capture-and-confirm step of a deposit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Confirm the intent behind `client_secret`.
    ///
    /// Declines and processor failures are reported as
    /// [`Error::Payment`](crate::Error::Payment).
    async fn confirm_payment(&self, client_secret: &str) -> Result<PaymentConfirmation>;
}
