//! Driving ports for case reporting.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Case, Error, UserId};

/// Case report as submitted by an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCaseRequest {
    pub subject_id: UserId,
    pub reported_by: UserId,
    pub reported_at: Option<DateTime<Utc>>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaseCommand: Send + Sync {
    /// Append a case; `reported_at` defaults to now.
    async fn report_case(&self, request: ReportCaseRequest) -> Result<Case, Error>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaseQuery: Send + Sync {
    /// Every case, most recently reported first.
    async fn list_cases(&self) -> Result<Vec<Case>, Error>;
}
