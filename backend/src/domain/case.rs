//! Confirmed case reports.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Monotonically increasing case identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseId(i64);

impl CaseId {
    /// Wrap a raw identifier issued by storage.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Assertion that `subject_id` is a confirmed case as of `reported_at`.
///
/// Re-reporting the same subject produces a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: CaseId,
    pub subject_id: UserId,
    pub reported_by: UserId,
    pub reported_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Case awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCase {
    pub subject_id: UserId,
    pub reported_by: UserId,
    pub reported_at: DateTime<Utc>,
}
