//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; adapters convert them into
//! validated domain values.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{cases, interactions, notification_templates, notifications, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_digest: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub password_digest: &'a str,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Changeset applied when bootstrapping an administrator.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserCredentialsUpdate<'a> {
    pub password_digest: &'a str,
    pub role: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = interactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InteractionRow {
    pub id: i64,
    pub subject_id: Uuid,
    pub counterpart_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub notes: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = interactions)]
pub(crate) struct NewInteractionRow<'a> {
    pub subject_id: Uuid,
    pub counterpart_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub notes: Option<&'a str>,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cases)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CaseRow {
    pub id: i64,
    pub subject_id: Uuid,
    pub reported_by: Uuid,
    pub reported_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = cases)]
pub(crate) struct NewCaseRow {
    pub subject_id: Uuid,
    pub reported_by: Uuid,
    pub reported_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationRow {
    pub id: i64,
    pub user_id: Uuid,
    pub message: String,
    pub simulated_by: Uuid,
    pub case_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notifications)]
pub(crate) struct NewNotificationRow<'a> {
    pub user_id: Uuid,
    pub message: &'a str,
    pub simulated_by: Uuid,
    pub case_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notification_templates)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationTemplateRow {
    pub id: i64,
    pub name: Option<String>,
    pub message: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = notification_templates)]
pub(crate) struct NewNotificationTemplateRow<'a> {
    pub name: Option<&'a str>,
    pub message: &'a str,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
