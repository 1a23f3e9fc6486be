//! Driving port for account creation and login.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, SignupDetails, User};

/// Domain use-case port for account lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsCommand: Send + Sync {
    /// Create an account and return its public profile.
    async fn signup(&self, details: &SignupDetails) -> Result<User, Error>;

    /// Validate credentials and return the authenticated user.
    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
