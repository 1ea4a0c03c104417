//! Notification simulation services.
//!
//! Recording a notice never delivers anything; recipients read it through
//! the query port and acknowledge it with `mark_read`.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    NotificationCommand, NotificationQuery, NotificationSink, NotificationSinkError,
    SimulateNotifyRequest,
};
use crate::domain::{
    Error, NewNotification, NewNotificationTemplate, Notification, NotificationId,
    NotificationTemplate, UserId,
};

fn map_sink_error(error: NotificationSinkError) -> Error {
    match error {
        NotificationSinkError::Connection { message } => {
            Error::service_unavailable(format!("notification sink unavailable: {message}"))
        }
        NotificationSinkError::Query { message } => {
            Error::internal(format!("notification sink error: {message}"))
        }
    }
}

/// Notification service implementing the command and query ports.
#[derive(Clone)]
pub struct NotificationService<N> {
    sink: Arc<N>,
    clock: Arc<dyn Clock>,
}

impl<N> NotificationService<N> {
    /// Create a notification service over the sink.
    pub fn new(sink: Arc<N>, clock: Arc<dyn Clock>) -> Self {
        Self { sink, clock }
    }
}

#[async_trait]
impl<N> NotificationCommand for NotificationService<N>
where
    N: NotificationSink,
{
    async fn simulate_notify(&self, request: SimulateNotifyRequest) -> Result<Notification, Error> {
        let draft =
            NewNotification::primary_contact(request.target, request.triggered_by, request.case_id);
        let notification = self
            .sink
            .append(&draft, self.clock.utc())
            .await
            .map_err(map_sink_error)?;
        info!(
            notification_id = %notification.id,
            recipient = %notification.user_id,
            "simulated primary contact notification"
        );
        Ok(notification)
    }

    async fn mark_read(&self, id: NotificationId, user: &UserId) -> Result<Notification, Error> {
        self.sink
            .mark_read(id, user)
            .await
            .map_err(map_sink_error)?
            .ok_or_else(|| Error::not_found("not found"))
    }

    async fn create_template(
        &self,
        template: NewNotificationTemplate,
    ) -> Result<NotificationTemplate, Error> {
        self.sink
            .create_template(&template, self.clock.utc())
            .await
            .map_err(map_sink_error)
    }
}

#[async_trait]
impl<N> NotificationQuery for NotificationService<N>
where
    N: NotificationSink,
{
    async fn list_for_user(&self, user: &UserId) -> Result<Vec<Notification>, Error> {
        self.sink.list_for_user(user).await.map_err(map_sink_error)
    }

    async fn list_templates(&self) -> Result<Vec<NotificationTemplate>, Error> {
        self.sink.list_templates().await.map_err(map_sink_error)
    }
}
