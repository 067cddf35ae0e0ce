//! Login and registration form.

use crate::api::{Credentials, SportsbookApi};
use crate::error::{Error, Result};
use crate::session::Session;

/// Which auth endpoint the form submits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Login => "Login failed",
            Self::Register => "Registration failed",
        }
    }
}

/// Field that receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Email,
    Password,
}

/// Form state for the auth screens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub focus: LoginField,
}

impl LoginForm {
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }

    pub fn push_char(&mut self, c: char) {
        match self.focus {
            LoginField::Email => self.email.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            LoginField::Email => self.email.pop(),
            LoginField::Password => self.password.pop(),
        };
    }

    /// Password rendered as bullets.
    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }

    pub fn credentials(&self) -> Result<Credentials> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(Error::invalid_input("Enter a valid email"));
        }
        if self.password.is_empty() {
            return Err(Error::invalid_input("Enter your password"));
        }
        Ok(Credentials::new(email, self.password.clone()))
    }

    /// Submit to the endpoint matching the current mode.
    ///
    /// Invalid input fails before any request is made. The returned session
    /// still has to be handed to the [`AuthGate`](crate::session::AuthGate).
    pub async fn submit(&self, api: &dyn SportsbookApi) -> Result<Session> {
        let credentials = self.credentials()?;
        match self.mode {
            AuthMode::Login => api.login(&credentials).await,
            AuthMode::Register => api.register(&credentials).await,
        }
    }

    /// Forget what was typed, keeping the mode.
    pub fn clear(&mut self) {
        *self = Self {
            mode: self.mode,
            ..Self::default()
        };
    }
}
