//! Simulated notifications and reusable notification templates.
//!
//! Nothing here delivers a message; a notification is a log entry the
//! recipient can read and acknowledge.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::case::CaseId;
use super::user::UserId;

/// Message recorded for every simulated primary-contact notification.
pub const PRIMARY_CONTACT_MESSAGE: &str = "Hello, this is the Epidemiology Prevention Center. \
You have been identified as a primary contact following contact tracing analysis. \
Please monitor your health closely and follow the recommended public health measures.";

/// Monotonically increasing notification identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(i64);

impl NotificationId {
    /// Wrap a raw identifier issued by storage.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Recorded notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub message: String,
    pub simulated_by: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<CaseId>,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

/// Notification awaiting insertion; always starts unread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub user_id: UserId,
    pub message: String,
    pub simulated_by: UserId,
    pub case_id: Option<CaseId>,
}

impl NewNotification {
    /// Primary-contact notice for `user_id`, triggered by `simulated_by`.
    pub fn primary_contact(user_id: UserId, simulated_by: UserId, case_id: Option<CaseId>) -> Self {
        Self {
            user_id,
            message: PRIMARY_CONTACT_MESSAGE.to_owned(),
            simulated_by,
            case_id,
        }
    }
}

/// Monotonically increasing template identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(i64);

impl TemplateId {
    /// Wrap a raw identifier issued by storage.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

/// Admin-authored notification template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTemplate {
    pub id: TemplateId,
    pub name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// Template awaiting insertion. A missing name becomes `template-<id>` once
/// the sink assigns an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotificationTemplate {
    pub name: Option<String>,
    pub message: String,
    pub created_by: Option<UserId>,
}

impl NewNotificationTemplate {
    /// Build a draft; blank names are treated as absent and the message
    /// defaults to empty.
    pub fn new(name: Option<String>, message: Option<String>, created_by: Option<UserId>) -> Self {
        Self {
            name: name.filter(|value| !value.trim().is_empty()),
            message: message.unwrap_or_default(),
            created_by,
        }
    }

    /// Name to store once `id` is known.
    pub fn resolved_name(&self, id: TemplateId) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("template-{}", id.get()))
    }
}
