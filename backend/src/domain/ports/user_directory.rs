//! Port for the user directory: identity lookups, display-name resolution
//! and account storage.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{Role, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// Directory backend could not be reached.
        Connection { message: String } => "user directory connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user directory query failed: {message}",
        /// A unique constraint (the username) was violated.
        Conflict { message: String } => "user directory conflict: {message}",
    }
}

/// A user together with the stored password digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAccount {
    pub user: User,
    pub password_digest: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve display names for `ids` in one round trip.
    ///
    /// Ids without a directory entry are absent from the returned map; an
    /// unknown id is never an error.
    async fn resolve_display_names(
        &self,
        ids: &[UserId],
    ) -> Result<HashMap<UserId, String>, UserDirectoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserDirectoryError>;

    /// Fetch an account, including its digest, by username.
    async fn find_account(&self, username: &str)
    -> Result<Option<StoredAccount>, UserDirectoryError>;

    /// All users ordered by username.
    async fn list(&self) -> Result<Vec<User>, UserDirectoryError>;

    /// Insert a new account; a taken username yields
    /// [`UserDirectoryError::Conflict`].
    async fn create(&self, account: &StoredAccount) -> Result<(), UserDirectoryError>;

    /// Overwrite the role and password digest of an existing account.
    async fn update_credentials(
        &self,
        id: &UserId,
        role: Role,
        password_digest: &str,
    ) -> Result<(), UserDirectoryError>;
}
