//! Application settings loaded via OrthoConfig and the resulting server
//! configuration.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use backend::domain::LoginCredentials;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Process settings read from `CONTACT_*` environment variables, config
/// files and command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTACT")]
pub struct AppSettings {
    /// Listen address.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
    /// PostgreSQL URL. Without it the process runs on the in-memory store.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = DEFAULT_POOL_MAX_SIZE)]
    pub pool_max_size: u32,
    /// Administrator created or reset at startup.
    pub admin_username: Option<String>,
    /// Password for the bootstrap administrator.
    pub admin_password: Option<String>,
}

/// Failures turning [`AppSettings`] into a runnable configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid CONTACT_BIND_ADDR {value:?}: {message}")]
    BindAddr { value: String, message: String },
    #[error("CONTACT_POOL_MAX_SIZE must be at least 1")]
    PoolSize,
    #[error("CONTACT_ADMIN_USERNAME and CONTACT_ADMIN_PASSWORD must be set together")]
    PartialAdmin,
    #[error("invalid bootstrap admin credentials: {0}")]
    AdminCredentials(String),
}

impl AppSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        self.bind_addr.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: self.bind_addr.clone(),
            message: err.to_string(),
        })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size {
            0 => Err(SettingsError::PoolSize),
            size => Ok(size),
        }
    }

    /// Bootstrap administrator credentials, when both halves are configured.
    pub fn admin_credentials(&self) -> Result<Option<LoginCredentials>, SettingsError> {
        match (self.admin_username.as_deref(), self.admin_password.as_deref()) {
            (None, None) => Ok(None),
            (Some(username), Some(password)) => LoginCredentials::try_from_parts(username, password)
                .map(Some)
                .map_err(|err| SettingsError::AdminCredentials(err.to_string())),
            _ => Err(SettingsError::PartialAdmin),
        }
    }
}

/// Everything the HTTP server needs once settings are validated.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    const VARS: [&str; 5] = [
        "CONTACT_BIND_ADDR",
        "CONTACT_DATABASE_URL",
        "CONTACT_POOL_MAX_SIZE",
        "CONTACT_ADMIN_USERNAME",
        "CONTACT_ADMIN_PASSWORD",
    ];

    fn load_with(vars: &[(&str, &str)]) -> AppSettings {
        let _guard = lock_env(VARS.map(|name| {
            (
                name,
                vars.iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| (*value).to_owned()),
            )
        }));
        AppSettings::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    #[rstest]
    fn defaults_select_the_in_memory_store() {
        let settings = load_with(&[]);

        assert_eq!(settings.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(settings.pool_max_size, DEFAULT_POOL_MAX_SIZE);
        assert_eq!(
            settings.bind_addr().expect("default address"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("literal")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.pool_max_size().expect("size"), DEFAULT_POOL_MAX_SIZE);
        assert!(settings.admin_credentials().expect("no admin").is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with(&[
            ("CONTACT_BIND_ADDR", "127.0.0.1:9000"),
            ("CONTACT_DATABASE_URL", "postgres://localhost/contact"),
            ("CONTACT_POOL_MAX_SIZE", "4"),
            ("CONTACT_ADMIN_USERNAME", "root"),
            ("CONTACT_ADMIN_PASSWORD", "hunter2"),
        ]);

        assert_eq!(
            settings.bind_addr().expect("address").port(),
            9000
        );
        assert_eq!(settings.database_url(), Some("postgres://localhost/contact"));
        assert_eq!(settings.pool_max_size().expect("size"), 4);
        let admin = settings
            .admin_credentials()
            .expect("valid")
            .expect("configured");
        assert_eq!(admin.username(), "root");
    }

    #[rstest]
    #[case(&[("CONTACT_BIND_ADDR", "nowhere")])]
    #[case(&[("CONTACT_POOL_MAX_SIZE", "0")])]
    #[case(&[("CONTACT_ADMIN_USERNAME", "root")])]
    fn invalid_settings_are_reported(#[case] vars: &[(&str, &str)]) {
        let settings = load_with(vars);

        let failed = settings.bind_addr().is_err()
            || settings.pool_max_size().is_err()
            || settings.admin_credentials().is_err();
        assert!(failed);
    }

    #[rstest]
    fn blank_database_url_means_memory() {
        let settings = load_with(&[("CONTACT_DATABASE_URL", "  ")]);
        assert!(settings.database_url().is_none());
    }
}
