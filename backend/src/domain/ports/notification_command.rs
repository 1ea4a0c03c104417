//! Driving ports for simulated notifications and templates.

use async_trait::async_trait;

use crate::domain::{
    CaseId, Error, NewNotificationTemplate, Notification, NotificationId, NotificationTemplate,
    UserId,
};

/// Request to record a primary-contact notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulateNotifyRequest {
    pub target: UserId,
    pub triggered_by: UserId,
    pub case_id: Option<CaseId>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationCommand: Send + Sync {
    /// Record an unread primary-contact notice for the target.
    async fn simulate_notify(&self, request: SimulateNotifyRequest) -> Result<Notification, Error>;

    /// Mark a notification read on behalf of its recipient.
    async fn mark_read(&self, id: NotificationId, user: &UserId) -> Result<Notification, Error>;

    /// Store a notification template.
    async fn create_template(
        &self,
        template: NewNotificationTemplate,
    ) -> Result<NotificationTemplate, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationQuery: Send + Sync {
    /// The recipient's notifications, oldest first.
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Notification>, Error>;

    /// Every stored template.
    async fn list_templates(&self) -> Result<Vec<NotificationTemplate>, Error>;
}
