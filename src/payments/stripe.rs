//! Stripe-compatible client-side confirmation.

use super::{PaymentConfirmation, PaymentProcessor};
use crate::config::PaymentConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;

const SECRET_MARKER: &str = "_secret_";

/// Confirms payment intents with a publishable key.
#[derive(Debug, Clone)]
pub struct StripeProcessor {
    config: PaymentConfig,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    id: Option<String>,
    status: Option<String>,
    error: Option<ProcessorError>,
    last_payment_error: Option<ProcessorError>,
}

#[derive(Debug, Deserialize)]
struct ProcessorError {
    message: Option<String>,
}

impl StripeProcessor {
    pub fn new(config: PaymentConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// Client secrets look like `pi_123_secret_abc`; the intent id is the
    /// part before the marker.
    fn intent_id(client_secret: &str) -> Result<&str> {
        client_secret
            .split_once(SECRET_MARKER)
            .map(|(id, _)| id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| Error::payment("malformed client secret"))
    }

    fn interpret(response: IntentResponse) -> Result<PaymentConfirmation> {
        if let Some(err) = response.error.or(response.last_payment_error) {
            return Err(Error::payment(
                err.message.unwrap_or_else(|| "declined".to_string()),
            ));
        }

        match (response.id, response.status.as_deref()) {
            (Some(id), Some("succeeded" | "processing")) => Ok(PaymentConfirmation {
                payment_intent_id: id,
            }),
            (_, Some(status)) => Err(Error::payment(format!("payment is {}", status))),
            _ => Err(Error::payment("unexpected processor response")),
        }
    }
}

#[async_trait]
impl PaymentProcessor for StripeProcessor {
    async fn confirm_payment(&self, client_secret: &str) -> Result<PaymentConfirmation> {
        if self.config.publishable_key.is_empty() {
            return Err(Error::payment("no publishable key configured"));
        }
        let intent_id = Self::intent_id(client_secret)?;
        let url = format!(
            "{}/v1/payment_intents/{}/confirm",
            self.config.api_base.trim_end_matches('/'),
            intent_id
        );

        tracing::debug!("Confirming payment intent {}", intent_id);
        let response = self
            .http
            .post(url)
            .basic_auth(&self.config.publishable_key, None::<&str>)
            .form(&[
                ("client_secret", client_secret),
                ("payment_method", self.config.payment_method.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::payment(e.to_string()))?;

        let body: IntentResponse = response
            .json()
            .await
            .map_err(|e| Error::payment(e.to_string()))?;
        Self::interpret(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> IntentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_intent_id_from_secret() {
        assert_eq!(
            StripeProcessor::intent_id("pi_3Mtw_secret_YrKJUK").unwrap(),
            "pi_3Mtw"
        );
        assert!(StripeProcessor::intent_id("garbage").is_err());
        assert!(StripeProcessor::intent_id("_secret_abc").is_err());
    }

    #[test]
    fn test_succeeded_intent_confirms() {
        let confirmation =
            StripeProcessor::interpret(parse(r#"{"id":"pi_1","status":"succeeded"}"#)).unwrap();
        assert_eq!(confirmation.payment_intent_id, "pi_1");
    }

    #[test]
    fn test_decline_surfaces_message() {
        let err = StripeProcessor::interpret(parse(
            r#"{"error":{"message":"Your card was declined.","type":"card_error"}}"#,
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), "Payment failed: Your card was declined.");
    }

    #[test]
    fn test_unfinished_intent_is_error() {
        let err = StripeProcessor::interpret(parse(
            r#"{"id":"pi_1","status":"requires_action"}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, Error::Payment(_)));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_network() {
        let processor = StripeProcessor::new(PaymentConfig::default(), reqwest::Client::new());
        let err = processor.confirm_payment("pi_1_secret_x").await.unwrap_err();
        assert_eq!(err.to_string(), "Payment failed: no publishable key configured");
    }
}
