//! Port for the append-only interaction log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Interaction, NewInteraction, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by interaction log adapters.
    pub enum InteractionLogError {
        /// Log backend could not be reached.
        Connection { message: String } => "interaction log connection failed: {message}",
        /// Query or insert failed during execution.
        Query { message: String } => "interaction log query failed: {message}",
    }
}

/// Append and read interaction records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionLog: Send + Sync {
    /// Append a record, assigning the next identifier.
    async fn append(
        &self,
        interaction: &NewInteraction,
        recorded_at: DateTime<Utc>,
    ) -> Result<Interaction, InteractionLogError>;

    /// Every record where `user` is either party, most recent first.
    async fn touching(&self, user: &UserId) -> Result<Vec<Interaction>, InteractionLogError>;

    /// Every record in the log, most recent first.
    async fn list_all(&self) -> Result<Vec<Interaction>, InteractionLogError>;
}
