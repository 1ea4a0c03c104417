//! PostgreSQL-backed `InteractionLog`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{InteractionLog, InteractionLogError};
use crate::domain::{Interaction, InteractionId, NewInteraction, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{InteractionRow, NewInteractionRow};
use super::pool::{DbPool, PoolError};
use super::schema::interactions;

/// Diesel-backed interaction log.
#[derive(Clone)]
pub struct DieselInteractionLog {
    pool: DbPool,
}

impl DieselInteractionLog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> InteractionLogError {
    map_pool_error(error, InteractionLogError::connection)
}

fn diesel_error(error: diesel::result::Error) -> InteractionLogError {
    map_diesel_error(
        error,
        InteractionLogError::query,
        InteractionLogError::connection,
    )
}

fn row_to_interaction(row: InteractionRow) -> Result<Interaction, InteractionLogError> {
    let duration_minutes = u32::try_from(row.duration_minutes).map_err(|_| {
        InteractionLogError::query(format!(
            "interaction {} has negative duration {}",
            row.id, row.duration_minutes
        ))
    })?;
    Ok(Interaction {
        id: InteractionId::new(row.id),
        subject_id: UserId::from_uuid(row.subject_id),
        counterpart_id: UserId::from_uuid(row.counterpart_id),
        occurred_at: row.occurred_at,
        duration_minutes,
        notes: row.notes,
        recorded_at: row.recorded_at,
    })
}

fn rows_to_interactions(rows: Vec<InteractionRow>) -> Result<Vec<Interaction>, InteractionLogError> {
    rows.into_iter().map(row_to_interaction).collect()
}

#[async_trait]
impl InteractionLog for DieselInteractionLog {
    async fn append(
        &self,
        interaction: &NewInteraction,
        recorded_at: DateTime<Utc>,
    ) -> Result<Interaction, InteractionLogError> {
        let duration_minutes = i32::try_from(interaction.duration_minutes).map_err(|_| {
            InteractionLogError::query("durationMinutes exceeds the storable range")
        })?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewInteractionRow {
            subject_id: *interaction.subject_id.as_uuid(),
            counterpart_id: *interaction.counterpart_id.as_uuid(),
            occurred_at: interaction.occurred_at,
            duration_minutes,
            notes: interaction.notes.as_deref(),
            recorded_at,
        };

        let stored: InteractionRow = diesel::insert_into(interactions::table)
            .values(&row)
            .returning(InteractionRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        row_to_interaction(stored)
    }

    async fn touching(&self, user: &UserId) -> Result<Vec<Interaction>, InteractionLogError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let uuid = *user.as_uuid();

        let rows: Vec<InteractionRow> = interactions::table
            .filter(
                interactions::subject_id
                    .eq(uuid)
                    .or(interactions::counterpart_id.eq(uuid)),
            )
            .order((interactions::occurred_at.desc(), interactions::id.desc()))
            .select(InteractionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows_to_interactions(rows)
    }

    async fn list_all(&self) -> Result<Vec<Interaction>, InteractionLogError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<InteractionRow> = interactions::table
            .order((interactions::occurred_at.desc(), interactions::id.desc()))
            .select(InteractionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows_to_interactions(rows)
    }
}
