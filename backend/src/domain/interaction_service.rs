//! Interaction logging services.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    InteractionCommand, InteractionLog, InteractionLogError, InteractionQuery,
    LogInteractionRequest,
};
use crate::domain::{Error, Interaction, NewInteraction, UserId};

fn map_log_error(error: InteractionLogError) -> Error {
    match error {
        InteractionLogError::Connection { message } => {
            Error::service_unavailable(format!("interaction log unavailable: {message}"))
        }
        InteractionLogError::Query { message } => {
            Error::internal(format!("interaction log error: {message}"))
        }
    }
}

/// Interaction service implementing the command and query ports.
#[derive(Clone)]
pub struct InteractionService<L> {
    log: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<L> InteractionService<L> {
    /// Create an interaction service over the log.
    pub fn new(log: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self { log, clock }
    }
}

#[async_trait]
impl<L> InteractionCommand for InteractionService<L>
where
    L: InteractionLog,
{
    async fn log_interaction(&self, request: LogInteractionRequest) -> Result<Interaction, Error> {
        let now = self.clock.utc();
        let draft = NewInteraction::try_new(
            request.author,
            request.counterpart_id,
            request.occurred_at.unwrap_or(now),
            request.duration_minutes,
            request.notes,
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        let stored = self
            .log
            .append(&draft, now)
            .await
            .map_err(map_log_error)?;
        debug!(interaction_id = %stored.id, author = %stored.subject_id, "interaction logged");
        Ok(stored)
    }
}

#[async_trait]
impl<L> InteractionQuery for InteractionService<L>
where
    L: InteractionLog,
{
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Interaction>, Error> {
        self.log.touching(user).await.map_err(map_log_error)
    }

    async fn list_all(&self) -> Result<Vec<Interaction>, Error> {
        self.log.list_all().await.map_err(map_log_error)
    }
}
