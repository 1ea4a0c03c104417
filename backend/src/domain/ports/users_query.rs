//! Driving port for user-facing directory queries.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// All users ordered by username.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// The user behind an authenticated session.
    ///
    /// A session pointing at a user that no longer exists is
    /// [`crate::domain::ErrorCode::Unauthorized`].
    async fn current_user(&self, id: &UserId) -> Result<User, Error>;
}
