//! Authentication session
//!
//! The session is an explicit value handed to whatever needs identity, with
//! the lifecycle `Unauthenticated -> Authenticating -> Authenticated | Failed`.
//! The server-issued token is kept on disk between CLI invocations.

use eyre::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::api::{self, ApiError, DirectoryApi, User};
use crate::notify::Notifier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticating,
    Authenticated(User),
    Failed(String),
}

#[derive(Debug)]
pub struct Session {
    state: SessionState,
    token: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Unauthenticated,
            token: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// Credential for authenticated calls, only while authenticated
    pub fn token(&self) -> Option<&str> {
        if self.is_authenticated() {
            self.token.as_deref()
        } else {
            None
        }
    }

    /// Log in with email and password
    pub fn login(
        &mut self,
        api: &dyn DirectoryApi,
        email: &str,
        password: &str,
        notifier: &dyn Notifier,
    ) -> api::Result<User> {
        self.state = SessionState::Authenticating;
        self.token = None;

        let reply = match api.login(email, password) {
            Ok(reply) => reply,
            Err(e) => {
                log::warn!("Login failed for {}: {}", email, e);
                self.state = SessionState::Failed(e.to_string());
                notifier.error("Login failed. Please check your credentials.");
                return Err(e);
            }
        };

        let Some(token) = reply.token else {
            log::warn!("Login for {} succeeded but no session token was issued", email);
            self.state = SessionState::Failed("no session token in login response".to_string());
            notifier.error("Login failed. Please check your credentials.");
            return Err(ApiError::Unauthenticated);
        };

        log::info!("Logged in as {}", email);
        self.token = Some(token);
        self.state = SessionState::Authenticated(reply.user.clone());
        notifier.success("Login successful");
        Ok(reply.user)
    }

    /// Resume a session from a stored token by asking who it belongs to.
    ///
    /// Any failure leaves the session unauthenticated.
    pub fn restore(&mut self, api: &dyn DirectoryApi, token: String) -> bool {
        self.state = SessionState::Authenticating;

        match api.current_user(&token) {
            Ok(user) => {
                log::debug!("Restored session for {:?}", user.email);
                self.token = Some(token);
                self.state = SessionState::Authenticated(user);
                true
            }
            Err(e) => {
                log::info!("Stored session is no longer valid: {}", e);
                self.token = None;
                self.state = SessionState::Unauthenticated;
                false
            }
        }
    }

    /// Log out; on failure the session is left as it was
    pub fn logout(&mut self, api: &dyn DirectoryApi, notifier: &dyn Notifier) -> api::Result<()> {
        let Some(token) = self.token() else {
            return Ok(());
        };

        match api.logout(token) {
            Ok(()) => {
                self.token = None;
                self.state = SessionState::Unauthenticated;
                notifier.success("Logged out successfully!");
                Ok(())
            }
            Err(e) => {
                log::warn!("Logout failed: {}", e);
                notifier.error("Failed to logout. Please try again.");
                Err(e)
            }
        }
    }
}

/// On-disk home of the session token
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Option<String> {
        let token = fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        if token.is_empty() { None } else { Some(token.to_string()) }
    }

    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create session directory")?;
        }
        fs::write(&self.path, token).context("Failed to write session token")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .context("Failed to restrict session token permissions")?;
        }

        log::debug!("Saved session token to {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).context("Failed to remove session token")?;
        }
        Ok(())
    }
}
