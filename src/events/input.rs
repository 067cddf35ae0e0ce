//! Key binding parsing and matching.

use crate::config::KeyBindings;
use crate::error::{Error, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::str::FromStr;

/// A single key chord such as `q`, `Enter` or `Ctrl+l`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Check whether `key` triggers this binding.
    ///
    /// Shift is ignored for character keys since it is already reflected
    /// in the character itself (`?` arrives as Shift+`?`).
    pub fn matches(&self, key: &KeyEvent) -> bool {
        let relevant = KeyModifiers::CONTROL | KeyModifiers::ALT;
        match (self.code, key.code) {
            (KeyCode::Char(expected), KeyCode::Char(actual)) => {
                expected == actual && (key.modifiers & relevant) == (self.modifiers & relevant)
            }
            (expected, actual) => expected == actual && key.modifiers == self.modifiers,
        }
    }
}

impl FromStr for KeyBinding {
    type Err = Error;

    fn from_str(binding: &str) -> Result<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let mut key = None;

        for part in binding.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => key = Some(part),
            }
        }

        let key = key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::config(format!("Key binding '{}' has no key", binding)))?;

        let code = match key.to_lowercase().as_str() {
            "enter" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "tab" => KeyCode::Tab,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            lower => match lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                Some(n) => KeyCode::F(n),
                None => Self::single_char(key, binding)?,
            },
        };

        Ok(Self::new(code, modifiers))
    }
}

impl KeyBinding {
    fn single_char(key: &str, binding: &str) -> Result<KeyCode> {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(KeyCode::Char(c)),
            _ => Err(Error::config(format!(
                "Unknown key '{}' in binding '{}'",
                key, binding
            ))),
        }
    }
}

/// Parsed form of [`KeyBindings`].
#[derive(Debug, Clone)]
pub struct Bindings {
    pub quit: KeyBinding,
    pub help: KeyBinding,
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub select: KeyBinding,
    pub back: KeyBinding,
    pub refresh: KeyBinding,
    pub home: KeyBinding,
    pub inplay: KeyBinding,
    pub profile: KeyBinding,
    pub deposit: KeyBinding,
    pub place_bet: KeyBinding,
    pub next_field: KeyBinding,
    pub auth_mode: KeyBinding,
    pub logout: KeyBinding,
}

impl TryFrom<&KeyBindings> for Bindings {
    type Error = Error;

    fn try_from(config: &KeyBindings) -> Result<Self> {
        Ok(Self {
            quit: config.quit.parse()?,
            help: config.help.parse()?,
            up: config.up.parse()?,
            down: config.down.parse()?,
            select: config.select.parse()?,
            back: config.back.parse()?,
            refresh: config.refresh.parse()?,
            home: config.home.parse()?,
            inplay: config.inplay.parse()?,
            profile: config.profile.parse()?,
            deposit: config.deposit.parse()?,
            place_bet: config.place_bet.parse()?,
            next_field: config.next_field.parse()?,
            auth_mode: config.auth_mode.parse()?,
            logout: config.logout.parse()?,
        })
    }
}
