//! PostgreSQL-backed `UserDirectory`.
//!
//! Display names resolve with a single `WHERE id IN (...)` query per trace.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{StoredAccount, UserDirectory, UserDirectoryError};
use crate::domain::{Role, User, UserId, Username};

use super::diesel_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserCredentialsUpdate, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed user directory.
#[derive(Clone)]
pub struct DieselUserDirectory {
    pool: DbPool,
}

impl DieselUserDirectory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserDirectoryError {
    map_pool_error(error, UserDirectoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserDirectoryError {
    map_diesel_error(
        error,
        UserDirectoryError::query,
        UserDirectoryError::connection,
    )
}

fn row_to_account(row: UserRow) -> Result<StoredAccount, UserDirectoryError> {
    let UserRow {
        id,
        username,
        password_digest,
        role,
        created_at,
    } = row;
    let username = Username::new(&username)
        .map_err(|err| UserDirectoryError::query(format!("stored username {username:?}: {err}")))?;
    let role = Role::from_str(&role)
        .map_err(|err| UserDirectoryError::query(format!("stored role {role:?}: {err}")))?;
    Ok(StoredAccount {
        user: User::new(UserId::from_uuid(id), username, role, created_at),
        password_digest,
    })
}

#[async_trait]
impl UserDirectory for DieselUserDirectory {
    async fn resolve_display_names(
        &self,
        ids: &[UserId],
    ) -> Result<HashMap<UserId, String>, UserDirectoryError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<(Uuid, String)> = users::table
            .filter(users::id.eq_any(uuids))
            .select((users::id, users::username))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, username)| (UserId::from_uuid(id), username))
            .collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_account)
            .transpose()
            .map(|account| account.map(|a| a.user))
    }

    async fn find_account(
        &self,
        username: &str,
    ) -> Result<Option<StoredAccount>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::username.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter()
            .map(|row| row_to_account(row).map(|account| account.user))
            .collect()
    }

    async fn create(&self, account: &StoredAccount) -> Result<(), UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewUserRow {
            id: *account.user.id().as_uuid(),
            username: account.user.username().as_ref(),
            password_digest: &account.password_digest,
            role: account.user.role().as_str(),
            created_at: account.user.created_at(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserDirectoryError::conflict(format!(
                        "username {} already taken",
                        account.user.username()
                    ))
                } else {
                    diesel_error(err)
                }
            })?;
        Ok(())
    }

    async fn update_credentials(
        &self,
        id: &UserId,
        role: Role,
        password_digest: &str,
    ) -> Result<(), UserDirectoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changes = UserCredentialsUpdate {
            password_digest,
            role: role.as_str(),
        };

        let updated = diesel::update(users::table.filter(users::id.eq(id.as_uuid())))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        if updated == 0 {
            return Err(UserDirectoryError::query(format!("user {id} not found")));
        }
        Ok(())
    }
}
