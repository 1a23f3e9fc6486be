//! Driving port for user-facing profile queries.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Profile of the authenticated user. A session pointing at a deleted
    /// account yields `unauthorized`.
    async fn current_user(&self, user_id: &UserId) -> Result<User, Error>;
}
