//! Account service: signup, login, and profile lookup.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{AccountsCommand, PasswordHasher, UserRepository, UsersQuery};
use crate::domain::{Error, LoginCredentials, SignupDetails, User, UserCredentials, UserId};

use super::service_errors::{map_password_hash_error, map_user_persistence_error};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Implements the account driving ports over a user store and a password
/// hasher.
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> AccountService<U, H> {
    /// Create the service.
    #[must_use]
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

#[async_trait]
impl<U, H> AccountsCommand for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn signup(&self, details: &SignupDetails) -> Result<User, Error> {
        let password_hash = self
            .hasher
            .hash(details.password())
            .await
            .map_err(map_password_hash_error)?;
        let user = User::new(UserId::random(), details.profile().clone());
        let account = UserCredentials {
            user,
            password_hash,
        };
        self.users
            .create(&account)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %account.user.id(), username = %account.user.username(), "account created");
        Ok(account.user)
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(account) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_persistence_error)?
        else {
            info!("login rejected: unknown username");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .await
            .map_err(map_password_hash_error)?;
        if !matches {
            warn!(user_id = %account.user.id(), "login rejected: wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(account.user)
    }
}

#[async_trait]
impl<U, H> UsersQuery for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn current_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| Error::unauthorized("login required"))
    }
}
