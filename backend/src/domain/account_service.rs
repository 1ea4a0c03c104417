//! Account services: signup, login, user listing and the administrator
//! bootstrap.
//!
//! Authentication is a pass-through: this service only checks credentials
//! against stored digests. Session issuance belongs to the inbound adapter.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    ADMIN_SIGNUP_FORBIDDEN, AccountCommand, LoginService, StoredAccount, UserDirectory,
    UserDirectoryError, UsersQuery,
};
use crate::domain::{
    Error, LoginCredentials, PasswordDigest, Role, SignupCredentials, User, UserId, Username,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

fn map_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Query { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
        UserDirectoryError::Conflict { .. } => Error::conflict("username exists"),
    }
}

fn hash_password(password: &str) -> Result<String, Error> {
    PasswordDigest::generate(password)
        .map(|digest| digest.to_stored())
        .map_err(|err| Error::internal(err.to_string()))
}

/// Account service implementing the login, users and account ports.
#[derive(Clone)]
pub struct AccountService<D> {
    directory: Arc<D>,
    clock: Arc<dyn Clock>,
}

impl<D> AccountService<D> {
    /// Create an account service over a user directory.
    pub fn new(directory: Arc<D>, clock: Arc<dyn Clock>) -> Self {
        Self { directory, clock }
    }
}

#[async_trait]
impl<D> LoginService for AccountService<D>
where
    D: UserDirectory,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let account = self
            .directory
            .find_account(credentials.username())
            .await
            .map_err(map_directory_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let Some(digest) = PasswordDigest::parse(&account.password_digest) else {
            warn!(user_id = %account.user.id(), "stored password digest is malformed");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        if !digest.verify(credentials.password()) {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(account.user)
    }
}

#[async_trait]
impl<D> UsersQuery for AccountService<D>
where
    D: UserDirectory,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.directory.list().await.map_err(map_directory_error)
    }

    async fn current_user(&self, id: &UserId) -> Result<User, Error> {
        self.directory
            .find_by_id(id)
            .await
            .map_err(map_directory_error)?
            .ok_or_else(|| Error::unauthorized("session user no longer exists"))
    }
}

#[async_trait]
impl<D> AccountCommand for AccountService<D>
where
    D: UserDirectory,
{
    async fn signup(&self, credentials: &SignupCredentials) -> Result<User, Error> {
        if credentials.requested_role().is_admin() {
            return Err(Error::forbidden(ADMIN_SIGNUP_FORBIDDEN));
        }

        let user = User::new(
            UserId::random(),
            credentials.username().clone(),
            Role::Member,
            self.clock.utc(),
        );
        let account = StoredAccount {
            user: user.clone(),
            password_digest: hash_password(credentials.password())?,
        };
        self.directory
            .create(&account)
            .await
            .map_err(map_directory_error)?;

        info!(user_id = %user.id(), username = %user.username(), "member signed up");
        Ok(user)
    }

    async fn ensure_admin(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let username = Username::new(credentials.username())
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let digest = hash_password(credentials.password())?;

        let existing = self
            .directory
            .find_account(username.as_ref())
            .await
            .map_err(map_directory_error)?;

        if let Some(account) = existing {
            self.directory
                .update_credentials(account.user.id(), Role::Admin, &digest)
                .await
                .map_err(map_directory_error)?;
            info!(user_id = %account.user.id(), "promoted existing user to admin");
            return Ok(account.user.with_role(Role::Admin));
        }

        let user = User::new(UserId::random(), username, Role::Admin, self.clock.utc());
        self.directory
            .create(&StoredAccount {
                user: user.clone(),
                password_digest: digest,
            })
            .await
            .map_err(map_directory_error)?;
        info!(user_id = %user.id(), "created admin user");
        Ok(user)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
