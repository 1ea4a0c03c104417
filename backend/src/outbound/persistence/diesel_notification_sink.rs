//! PostgreSQL-backed `NotificationSink`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{NotificationSink, NotificationSinkError};
use crate::domain::{
    CaseId, NewNotification, NewNotificationTemplate, Notification, NotificationId,
    NotificationTemplate, TemplateId, UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    NewNotificationRow, NewNotificationTemplateRow, NotificationRow, NotificationTemplateRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{notification_templates, notifications};

/// Diesel-backed notification sink.
#[derive(Clone)]
pub struct DieselNotificationSink {
    pool: DbPool,
}

impl DieselNotificationSink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> NotificationSinkError {
    map_pool_error(error, NotificationSinkError::connection)
}

fn diesel_error(error: diesel::result::Error) -> NotificationSinkError {
    map_diesel_error(
        error,
        NotificationSinkError::query,
        NotificationSinkError::connection,
    )
}

impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Self {
            id: NotificationId::new(row.id),
            user_id: UserId::from_uuid(row.user_id),
            message: row.message,
            simulated_by: UserId::from_uuid(row.simulated_by),
            case_id: row.case_id.map(CaseId::new),
            created_at: row.created_at,
            read: row.read,
        }
    }
}

impl From<NotificationTemplateRow> for NotificationTemplate {
    fn from(row: NotificationTemplateRow) -> Self {
        let id = TemplateId::new(row.id);
        Self {
            id,
            name: row
                .name
                .unwrap_or_else(|| format!("template-{}", id.get())),
            message: row.message,
            created_by: row.created_by.map(UserId::from_uuid),
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl NotificationSink for DieselNotificationSink {
    async fn append(
        &self,
        notification: &NewNotification,
        created_at: DateTime<Utc>,
    ) -> Result<Notification, NotificationSinkError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewNotificationRow {
            user_id: *notification.user_id.as_uuid(),
            message: &notification.message,
            simulated_by: *notification.simulated_by.as_uuid(),
            case_id: notification.case_id.map(CaseId::get),
            created_at,
        };

        diesel::insert_into(notifications::table)
            .values(&row)
            .returning(NotificationRow::as_returning())
            .get_result::<NotificationRow>(&mut conn)
            .await
            .map(Notification::from)
            .map_err(diesel_error)
    }

    async fn list_for_user(
        &self,
        user: &UserId,
    ) -> Result<Vec<Notification>, NotificationSinkError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<NotificationRow> = notifications::table
            .filter(notifications::user_id.eq(user.as_uuid()))
            .order(notifications::id.asc())
            .select(NotificationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Notification::from).collect())
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        user: &UserId,
    ) -> Result<Option<Notification>, NotificationSinkError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let target = notifications::table
            .filter(notifications::id.eq(id.get()))
            .filter(notifications::user_id.eq(user.as_uuid()));

        diesel::update(target)
            .set(notifications::read.eq(true))
            .returning(NotificationRow::as_returning())
            .get_result::<NotificationRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(Notification::from))
            .map_err(diesel_error)
    }

    async fn list_templates(&self) -> Result<Vec<NotificationTemplate>, NotificationSinkError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<NotificationTemplateRow> = notification_templates::table
            .order(notification_templates::id.asc())
            .select(NotificationTemplateRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(NotificationTemplate::from).collect())
    }

    async fn create_template(
        &self,
        template: &NewNotificationTemplate,
        created_at: DateTime<Utc>,
    ) -> Result<NotificationTemplate, NotificationSinkError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewNotificationTemplateRow {
            name: template.name.as_deref(),
            message: &template.message,
            created_by: template.created_by.as_ref().map(|id| *id.as_uuid()),
            created_at,
        };

        diesel::insert_into(notification_templates::table)
            .values(&row)
            .returning(NotificationTemplateRow::as_returning())
            .get_result::<NotificationTemplateRow>(&mut conn)
            .await
            .map(NotificationTemplate::from)
            .map_err(diesel_error)
    }
}
