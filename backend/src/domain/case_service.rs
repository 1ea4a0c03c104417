//! Case reporting services.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    CaseCommand, CaseQuery, CaseRegister, CaseRegisterError, ReportCaseRequest,
};
use crate::domain::{Case, Error, NewCase};

fn map_register_error(error: CaseRegisterError) -> Error {
    match error {
        CaseRegisterError::Connection { message } => {
            Error::service_unavailable(format!("case register unavailable: {message}"))
        }
        CaseRegisterError::Query { message } => {
            Error::internal(format!("case register error: {message}"))
        }
    }
}

/// Case service implementing the command and query ports.
#[derive(Clone)]
pub struct CaseService<C> {
    register: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<C> CaseService<C> {
    /// Create a case service over the register.
    pub fn new(register: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self { register, clock }
    }
}

#[async_trait]
impl<C> CaseCommand for CaseService<C>
where
    C: CaseRegister,
{
    async fn report_case(&self, request: ReportCaseRequest) -> Result<Case, Error> {
        let now = self.clock.utc();
        let draft = NewCase {
            subject_id: request.subject_id,
            reported_by: request.reported_by,
            reported_at: request.reported_at.unwrap_or(now),
        };
        let case = self
            .register
            .append(&draft, now)
            .await
            .map_err(map_register_error)?;
        info!(case_id = %case.id, subject = %case.subject_id, "case reported");
        Ok(case)
    }
}

#[async_trait]
impl<C> CaseQuery for CaseService<C>
where
    C: CaseRegister,
{
    async fn list_cases(&self) -> Result<Vec<Case>, Error> {
        self.register.list().await.map_err(map_register_error)
    }
}
