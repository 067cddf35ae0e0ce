//! Error types for the sportsbook client.

use thiserror::Error;

/// The main error type for the sportsbook client.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal/TUI related errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Transport-level HTTP errors (connect, timeout, body decode)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        /// The `msg` field of the error body, when the backend sent one.
        message: Option<String>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The geolocation gate refused the request.
    #[error("Betting not allowed in your state")]
    GeoBlocked,

    /// The payment processor declined or failed to confirm.
    #[error("Payment failed: {0}")]
    Payment(String),

    /// Invalid input or state
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic application error
    #[error("{0}")]
    Application(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a new auth error.
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a new payment error.
    pub fn payment(msg: impl Into<String>) -> Self {
        Self::Payment(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new application error.
    pub fn application(msg: impl Into<String>) -> Self {
        Self::Application(msg.into())
    }

    /// The text shown to the user when an action fails.
    ///
    /// Backend errors surface their `msg` field; errors raised by the client
    /// itself carry their own wording. Everything else collapses to
    /// `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api {
                message: Some(msg), ..
            } => msg.clone(),
            Self::GeoBlocked | Self::Payment(_) => self.to_string(),
            Self::InvalidInput(msg) | Self::Auth(msg) => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_msg() {
        let err = Error::Api {
            status: 400,
            message: Some("Insufficient balance".to_string()),
        };
        assert_eq!(err.user_message("Bet failed"), "Insufficient balance");
    }

    #[test]
    fn test_user_message_falls_back_without_msg() {
        let err = Error::Api {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("Bet failed"), "Bet failed");
        assert_eq!(
            Error::channel("closed").user_message("Deposit failed"),
            "Deposit failed"
        );
    }

    #[test]
    fn test_user_message_client_errors() {
        assert_eq!(
            Error::GeoBlocked.user_message("x"),
            "Betting not allowed in your state"
        );
        assert_eq!(
            Error::payment("card declined").user_message("x"),
            "Payment failed: card declined"
        );
        assert_eq!(
            Error::invalid_input("Enter an amount").user_message("x"),
            "Enter an amount"
        );
    }
}
