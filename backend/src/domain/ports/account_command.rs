//! Driving port for account mutations: self-service signup and the
//! administrator bootstrap.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, SignupCredentials, User};

/// Message returned when signup asks for the admin role.
pub const ADMIN_SIGNUP_FORBIDDEN: &str =
    "Admin accounts cannot be created via signup. Contact system administrator.";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register a member account.
    async fn signup(&self, credentials: &SignupCredentials) -> Result<User, Error>;

    /// Create an administrator, or promote an existing account and reset
    /// its password.
    async fn ensure_admin(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
