//! Deposit form and the three-step payment sequence.

use super::parse_amount;
use crate::api::{DepositConfirmation, DepositRequest, SportsbookApi};
use crate::error::Result;
use crate::payments::PaymentProcessor;
use crate::session::Session;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Shown when a failure carries no server message.
pub const DEPOSIT_FAILED: &str = "Deposit failed";
/// Shown after the backend has confirmed the deposit.
pub const DEPOSIT_SUCCESSFUL: &str = "Deposit successful";

/// A completed deposit.
#[derive(Debug, Clone, PartialEq)]
pub struct DepositReceipt {
    pub payment_intent_id: String,
    pub amount: Decimal,
}

/// Form state for a deposit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DepositForm {
    /// Raw amount in USD as typed.
    pub amount: String,
}

impl DepositForm {
    /// Accept digits and a single decimal point.
    pub fn push_amount_char(&mut self, c: char) {
        if c.is_ascii_digit() || (c == '.' && !self.amount.contains('.')) {
            self.amount.push(c);
        }
    }

    pub fn pop_amount_char(&mut self) {
        self.amount.pop();
    }

    pub fn clear(&mut self) {
        self.amount.clear();
    }

    /// Run the deposit: create the intent, confirm it with the processor,
    /// then confirm it with the backend.
    ///
    /// Each step waits for the previous one. If the processor reports an
    /// error the backend confirmation is never sent.
    pub async fn submit(
        &self,
        api: &dyn SportsbookApi,
        processor: &dyn PaymentProcessor,
        session: &Session,
    ) -> Result<DepositReceipt> {
        let amount = parse_amount(&self.amount)?;
        let idempotency_key = Uuid::new_v4();

        let intent = api
            .create_deposit(
                session,
                &DepositRequest {
                    amount,
                    idempotency_key,
                },
            )
            .await?;

        let payment = processor.confirm_payment(&intent.client_secret).await?;
        tracing::info!(
            "Processor confirmed {} (attempt {})",
            payment.payment_intent_id,
            idempotency_key
        );

        api.confirm_deposit(
            session,
            &DepositConfirmation {
                payment_intent_id: payment.payment_intent_id.clone(),
                amount,
                idempotency_key,
            },
        )
        .await?;

        Ok(DepositReceipt {
            payment_intent_id: payment.payment_intent_id,
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DepositIntent, MockSportsbookApi};
    use crate::error::Error;
    use crate::payments::{MockPaymentProcessor, PaymentConfirmation};
    use mockall::Sequence;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    fn form(amount: &str) -> DepositForm {
        DepositForm {
            amount: amount.to_string(),
        }
    }

    fn intent() -> DepositIntent {
        DepositIntent {
            client_secret: "pi_1_secret_abc".to_string(),
        }
    }

    #[tokio::test]
    async fn test_steps_run_in_order_with_one_key() {
        let mut seq = Sequence::new();
        let keys = Arc::new(Mutex::new(Vec::new()));
        let mut api = MockSportsbookApi::new();
        let mut processor = MockPaymentProcessor::new();

        let seen = keys.clone();
        api.expect_create_deposit()
            .withf(|_, request| request.amount == dec!(50))
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, request| {
                seen.lock().unwrap().push(request.idempotency_key);
                Ok(intent())
            });
        processor
            .expect_confirm_payment()
            .withf(|secret| secret == "pi_1_secret_abc")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Ok(PaymentConfirmation {
                    payment_intent_id: "pi_1".to_string(),
                })
            });
        let seen = keys.clone();
        api.expect_confirm_deposit()
            .withf(|_, confirmation| {
                confirmation.payment_intent_id == "pi_1" && confirmation.amount == dec!(50)
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, confirmation| {
                seen.lock().unwrap().push(confirmation.idempotency_key);
                Ok(())
            });

        let receipt = form("50")
            .submit(&api, &processor, &Session::new("tok"))
            .await
            .unwrap();
        assert_eq!(
            receipt,
            DepositReceipt {
                payment_intent_id: "pi_1".to_string(),
                amount: dec!(50),
            }
        );

        let keys = keys.lock().unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0], keys[1]);
    }

    #[tokio::test]
    async fn test_processor_error_skips_backend_confirm() {
        let mut api = MockSportsbookApi::new();
        let mut processor = MockPaymentProcessor::new();
        api.expect_create_deposit().returning(|_, _| Ok(intent()));
        processor
            .expect_confirm_payment()
            .returning(|_| Err(Error::payment("Your card was declined.")));
        api.expect_confirm_deposit().never();

        let err = form("50")
            .submit(&api, &processor, &Session::new("tok"))
            .await
            .unwrap_err();
        assert_eq!(
            err.user_message(DEPOSIT_FAILED),
            "Payment failed: Your card was declined."
        );
    }

    #[tokio::test]
    async fn test_intent_failure_stops_sequence() {
        let mut api = MockSportsbookApi::new();
        let mut processor = MockPaymentProcessor::new();
        api.expect_create_deposit().returning(|_, _| {
            Err(Error::Api {
                status: 500,
                message: None,
            })
        });
        processor.expect_confirm_payment().never();
        api.expect_confirm_deposit().never();

        let err = form("50")
            .submit(&api, &processor, &Session::new("tok"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(DEPOSIT_FAILED), DEPOSIT_FAILED);
    }

    #[tokio::test]
    async fn test_invalid_amount_sends_nothing() {
        let mut api = MockSportsbookApi::new();
        let processor = MockPaymentProcessor::new();
        api.expect_create_deposit().never();

        let err = form("-5")
            .submit(&api, &processor, &Session::new("tok"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
