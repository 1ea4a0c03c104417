//! Driving ports for logging and listing interactions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, Interaction, UserId};

/// Interaction as submitted by its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogInteractionRequest {
    pub author: UserId,
    pub counterpart_id: UserId,
    pub occurred_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionCommand: Send + Sync {
    /// Append an interaction; `occurred_at` defaults to now.
    async fn log_interaction(&self, request: LogInteractionRequest) -> Result<Interaction, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionQuery: Send + Sync {
    /// Records where `user` is either party, most recent first.
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Interaction>, Error>;

    /// The whole log, most recent first.
    async fn list_all(&self) -> Result<Vec<Interaction>, Error>;
}
