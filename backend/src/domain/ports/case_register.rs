//! Port for the append-only case register.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Case, NewCase};

use super::define_port_error;

define_port_error! {
    /// Errors raised by case register adapters.
    pub enum CaseRegisterError {
        /// Register backend could not be reached.
        Connection { message: String } => "case register connection failed: {message}",
        /// Query or insert failed during execution.
        Query { message: String } => "case register query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaseRegister: Send + Sync {
    /// Append a case report.
    async fn append(&self, case: &NewCase, created_at: DateTime<Utc>)
    -> Result<Case, CaseRegisterError>;

    /// All cases, most recently reported first (ties by id descending).
    async fn list(&self) -> Result<Vec<Case>, CaseRegisterError>;
}
