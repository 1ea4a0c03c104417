//! Builders wiring the storage backend selected by [`AppSettings`] into the
//! HTTP state.

use std::io;
use std::sync::Arc;

use actix_web::web;
use chrono::Utc;
use mockable::{Clock, DefaultClock};
use tracing::info;

use backend::domain::LoginCredentials;
use backend::inbound::http::health::StorageBackend;
use backend::inbound::http::state::{HttpState, HttpStateRepositories};
use backend::outbound::memory::InMemoryStore;
use backend::outbound::persistence::{
    DbPool, DieselCaseRegister, DieselInteractionLog, DieselNotificationSink,
    DieselUserDirectory, PoolConfig, run_migrations,
};

use super::config::AppSettings;

/// HTTP state plus the backend it was built over.
pub(crate) struct BuiltState {
    pub(crate) http_state: web::Data<HttpState>,
    pub(crate) storage: StorageBackend,
}

fn io_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    io::Error::other(format!("{context}: {err}"))
}

async fn postgres_state(
    database_url: &str,
    max_size: u32,
    clock: Arc<dyn Clock>,
) -> io::Result<HttpState> {
    let applied = run_migrations(database_url)
        .await
        .map_err(|err| io_error("database migration failed", err))?;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(max_size))
        .await
        .map_err(|err| io_error("database pool setup failed", err))?;
    Ok(HttpState::from_repositories(
        HttpStateRepositories {
            interactions: Arc::new(DieselInteractionLog::new(pool.clone())),
            directory: Arc::new(DieselUserDirectory::new(pool.clone())),
            cases: Arc::new(DieselCaseRegister::new(pool.clone())),
            notifications: Arc::new(DieselNotificationSink::new(pool)),
        },
        clock,
    ))
}

fn memory_state(clock: Arc<dyn Clock>) -> HttpState {
    let store = Arc::new(InMemoryStore::seeded(Utc::now()));
    HttpState::from_repositories(
        HttpStateRepositories {
            interactions: store.clone(),
            directory: store.clone(),
            cases: store.clone(),
            notifications: store,
        },
        clock,
    )
}

async fn bootstrap_admin(state: &HttpState, credentials: &LoginCredentials) -> io::Result<()> {
    let admin = state
        .accounts
        .ensure_admin(credentials)
        .await
        .map_err(|err| io_error("admin bootstrap failed", err.message()))?;
    info!(user_id = %admin.id(), username = %admin.username(), "bootstrap admin ready");
    Ok(())
}

/// Build the HTTP state: Diesel adapters when a database URL is configured,
/// otherwise the seeded in-memory store. The bootstrap admin, if configured,
/// is ensured before returning.
///
/// # Errors
/// Invalid settings, migration or pool failures, and admin bootstrap
/// failures are reported as [`io::Error`].
pub(crate) async fn build_http_state(settings: &AppSettings) -> io::Result<BuiltState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let admin = settings
        .admin_credentials()
        .map_err(|err| io_error("invalid settings", err))?;

    let (state, storage) = match settings.database_url() {
        Some(url) => {
            let max_size = settings
                .pool_max_size()
                .map_err(|err| io_error("invalid settings", err))?;
            (postgres_state(url, max_size, clock).await?, StorageBackend::Postgres)
        }
        None => {
            info!("no database configured; using the in-memory store with demo accounts");
            (memory_state(clock), StorageBackend::Memory)
        }
    };

    if let Some(credentials) = admin {
        bootstrap_admin(&state, &credentials).await?;
    }

    Ok(BuiltState {
        http_state: web::Data::new(state),
        storage,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn settings(admin: Option<(&str, &str)>) -> AppSettings {
        AppSettings {
            bind_addr: "127.0.0.1:0".to_owned(),
            database_url: None,
            pool_max_size: 1,
            admin_username: admin.map(|(username, _)| username.to_owned()),
            admin_password: admin.map(|(_, password)| password.to_owned()),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn without_a_database_the_memory_store_is_used() {
        let built = build_http_state(&settings(None)).await.expect("state");

        assert_eq!(built.storage, StorageBackend::Memory);
        let users = built.http_state.users.list_users().await.expect("users");
        assert_eq!(users.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn bootstrap_admin_can_log_in() {
        let built = build_http_state(&settings(Some(("root", "hunter2"))))
            .await
            .expect("state");

        let credentials = LoginCredentials::try_from_parts("root", "hunter2").expect("valid");
        let user = built
            .http_state
            .login
            .authenticate(&credentials)
            .await
            .expect("bootstrap admin authenticates");
        assert!(user.role().is_admin());
    }

    #[rstest]
    #[tokio::test]
    async fn bootstrap_resets_the_seeded_admin_password() {
        let built = build_http_state(&settings(Some(("admin", "rotated"))))
            .await
            .expect("state");

        let stale = LoginCredentials::try_from_parts("admin", "admin").expect("valid");
        assert!(built.http_state.login.authenticate(&stale).await.is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn partial_admin_settings_are_rejected() {
        let mut partial = settings(None);
        partial.admin_username = Some("root".to_owned());

        let err = build_http_state(&partial).await.err().expect("rejected");
        assert!(err.to_string().contains("invalid settings"));
    }
}
