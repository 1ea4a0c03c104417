//! Contact trace engine.
//!
//! Implements the [`ContactTrace`] driving port against the interaction log
//! and user directory ports only, so every storage backend yields the same
//! results. The engine is stateless and never retries collaborator failures.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{
    ContactTrace, InteractionLog, InteractionLogError, UserDirectory, UserDirectoryError,
};
use crate::domain::{Error, TraceRequest, TraceResult, UserId, select_primary_contacts};

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

fn map_directory_error(error: UserDirectoryError) -> Error {
    match error {
        UserDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("user directory unavailable: {message}"))
        }
        UserDirectoryError::Query { message } | UserDirectoryError::Conflict { message } => {
            Error::internal(format!("user directory error: {message}"))
        }
    }
}

/// Contact trace service backed by an interaction log and user directory.
#[derive(Clone)]
pub struct ContactTraceService<L, D> {
    interactions: Arc<L>,
    directory: Arc<D>,
    clock: Arc<dyn Clock>,
}

impl<L, D> ContactTraceService<L, D> {
    /// Create a trace service; `clock` supplies the evaluation instant.
    pub fn new(interactions: Arc<L>, directory: Arc<D>, clock: Arc<dyn Clock>) -> Self {
        Self {
            interactions,
            directory,
            clock,
        }
    }
}

#[async_trait]
impl<L, D> ContactTrace for ContactTraceService<L, D>
where
    L: InteractionLog,
    D: UserDirectory,
{
    async fn trace(&self, request: &TraceRequest) -> Result<Vec<TraceResult>, Error> {
        let cutoff = request.window.cutoff(self.clock.utc());
        let records = self
            .interactions
            .touching(&request.subject_id)
            .await
            .map_err(map_log_error)?;

        let contacts = select_primary_contacts(&request.subject_id, &records, cutoff);
        debug!(
            subject = %request.subject_id,
            window_days = request.window.days(),
            scanned = records.len(),
            contacts = contacts.len(),
            "selected primary contacts"
        );
        if contacts.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<UserId> = contacts.iter().map(|c| c.contact_id.clone()).collect();
        let names = self
            .directory
            .resolve_display_names(&ids)
            .await
            .map_err(map_directory_error)?;

        Ok(contacts
            .into_iter()
            .map(|contact| {
                let display_name = names
                    .get(&contact.contact_id)
                    .cloned()
                    .unwrap_or_else(|| contact.contact_id.to_string());
                TraceResult {
                    contact_id: contact.contact_id,
                    display_name,
                    last_contact_at: contact.last_contact_at,
                    duration_minutes: contact.duration_minutes,
                }
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "contact_trace_service_tests.rs"]
mod tests;
