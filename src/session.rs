//! Operator session: the token obtained at login.
//!
//! The session is an explicit value owned by the console and passed to
//! whatever needs it; it is set by [`Session::login`] and cleared by
//! [`Session::logout`].

use crate::{
    api::LibraryBackend,
    error::{AppError, AppResult},
    models::Credentials,
};

#[derive(Default, Clone)]
pub struct Session {
    token: Option<String>,
    username: Option<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Session {
    /// Exchange credentials for a token.
    ///
    /// Both fields are required locally; any backend rejection is reported
    /// with the same generic message. A previous session ends with the attempt.
    pub async fn login(&mut self, backend: &dyn LibraryBackend, username: &str, password: &str) -> AppResult<()> {
        self.logout();

        if username.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "Please enter both username and password".to_string(),
            ));
        }

        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };

        match backend.login(&credentials).await {
            Ok(response) => {
                tracing::info!("User {} logged in", username);
                self.token = Some(response.token);
                self.username = Some(username.to_string());
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Login failed for {}: {}", username, err);
                Err(AppError::Unauthorized("Invalid username or password".to_string()))
            }
        }
    }

    pub fn logout(&mut self) {
        if let Some(username) = self.username.take() {
            tracing::info!("User {} logged out", username);
        }
        self.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Guard for screens that need a logged-in operator
    pub fn require(&self) -> AppResult<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| AppError::Unauthorized("Please log in first".to_string()))
    }
}
