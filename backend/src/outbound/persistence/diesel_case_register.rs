//! PostgreSQL-backed `CaseRegister`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CaseRegister, CaseRegisterError};
use crate::domain::{Case, CaseId, NewCase, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CaseRow, NewCaseRow};
use super::pool::{DbPool, PoolError};
use super::schema::cases;

/// Diesel-backed case register.
#[derive(Clone)]
pub struct DieselCaseRegister {
    pool: DbPool,
}

impl DieselCaseRegister {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> CaseRegisterError {
    map_pool_error(error, CaseRegisterError::connection)
}

fn diesel_error(error: diesel::result::Error) -> CaseRegisterError {
    map_diesel_error(error, CaseRegisterError::query, CaseRegisterError::connection)
}

impl From<CaseRow> for Case {
    fn from(row: CaseRow) -> Self {
        Self {
            id: CaseId::new(row.id),
            subject_id: UserId::from_uuid(row.subject_id),
            reported_by: UserId::from_uuid(row.reported_by),
            reported_at: row.reported_at,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl CaseRegister for DieselCaseRegister {
    async fn append(
        &self,
        case: &NewCase,
        created_at: DateTime<Utc>,
    ) -> Result<Case, CaseRegisterError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewCaseRow {
            subject_id: *case.subject_id.as_uuid(),
            reported_by: *case.reported_by.as_uuid(),
            reported_at: case.reported_at,
            created_at,
        };

        diesel::insert_into(cases::table)
            .values(&row)
            .returning(CaseRow::as_returning())
            .get_result::<CaseRow>(&mut conn)
            .await
            .map(Case::from)
            .map_err(diesel_error)
    }

    async fn list(&self) -> Result<Vec<Case>, CaseRegisterError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<CaseRow> = cases::table
            .order((cases::reported_at.desc(), cases::id.desc()))
            .select(CaseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Case::from).collect())
    }
}
