//! Configuration settings for the sportsbook client.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix for environment overrides, e.g. `SPORTSBOOK__API__BASE_URL`.
const ENV_PREFIX: &str = "SPORTSBOOK";

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend API configuration.
    pub api: ApiConfig,
    /// Payment processor configuration.
    pub payments: PaymentConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
}

impl Config {
    /// Load configuration from file, returning default if file doesn't exist.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file, then apply environment overrides.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(default_path);
        Self::load_layered(&config_path, environment())
    }

    fn load_layered(config_path: &Path, env: config::Environment) -> crate::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .add_source(env)
            .build()
            .map_err(|e| crate::Error::config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| crate::Error::config(e.to_string()))
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(default_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}

fn default_path() -> PathBuf {
    super::config_dir()
        .map(|p| p.join("config.toml"))
        .unwrap_or_else(|_| PathBuf::from("config.toml"))
}

/// Backend API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend base URL (no trailing slash).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// In-play list refresh interval in seconds.
    pub inplay_poll_secs: u64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Poll interval for in-play events, never shorter than one second.
    pub fn inplay_poll_interval(&self) -> Duration {
        Duration::from_secs(self.inplay_poll_secs.max(1))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 30,
            inplay_poll_secs: 10,
        }
    }
}

/// Payment processor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// Processor API base URL.
    pub api_base: String,
    /// Publishable key used for client-side confirmation.
    pub publishable_key: String,
    /// Tokenized payment method attached on confirmation.
    pub payment_method: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.stripe.com".to_string(),
            publishable_key: String::new(),
            payment_method: "pm_card_visa".to_string(),
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates.
    pub tick_rate_ms: u64,
    /// Enable mouse support.
    pub mouse_support: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            mouse_support: true,
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Select/confirm.
    pub select: String,
    /// Cancel/back.
    pub back: String,
    /// Refresh the current view.
    pub refresh: String,
    /// Switch to events view.
    pub home: String,
    /// Switch to in-play view.
    pub inplay: String,
    /// Switch to profile view.
    pub profile: String,
    /// Switch to deposit view.
    pub deposit: String,
    /// Open the bet slip for the selected event.
    pub place_bet: String,
    /// Cycle the focused form field.
    pub next_field: String,
    /// Switch the auth form between login and registration.
    pub auth_mode: String,
    /// Log out and forget the session.
    pub logout: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
            refresh: "r".to_string(),
            home: "1".to_string(),
            inplay: "2".to_string(),
            profile: "3".to_string(),
            deposit: "4".to_string(),
            place_bet: "b".to_string(),
            next_field: "Tab".to_string(),
            auth_mode: "Ctrl+r".to_string(),
            logout: "Ctrl+l".to_string(),
        }
    }
}
