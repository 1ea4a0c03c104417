//! Port for the notification sink and its template catalogue.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    NewNotification, NewNotificationTemplate, Notification, NotificationId, NotificationTemplate,
    UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification sink adapters.
    pub enum NotificationSinkError {
        /// Sink backend could not be reached.
        Connection { message: String } => "notification sink connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "notification sink query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Record an unread notification.
    async fn append(
        &self,
        notification: &NewNotification,
        created_at: DateTime<Utc>,
    ) -> Result<Notification, NotificationSinkError>;

    /// Notifications addressed to `user`, oldest first.
    async fn list_for_user(&self, user: &UserId)
    -> Result<Vec<Notification>, NotificationSinkError>;

    /// Mark `id` read when it belongs to `user`; `None` when no such
    /// notification exists for that user.
    async fn mark_read(
        &self,
        id: NotificationId,
        user: &UserId,
    ) -> Result<Option<Notification>, NotificationSinkError>;

    /// All templates, oldest first.
    async fn list_templates(&self) -> Result<Vec<NotificationTemplate>, NotificationSinkError>;

    /// Store a template, resolving its default name from the new id.
    async fn create_template(
        &self,
        template: &NewNotificationTemplate,
        created_at: DateTime<Utc>,
    ) -> Result<NotificationTemplate, NotificationSinkError>;
}
