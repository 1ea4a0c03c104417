//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel rows (`models.rs`,
//! `schema.rs`) and domain records. They share one `bb8` pool of
//! `diesel-async` connections and map every driver failure onto their port's
//! error type.
//!
//! # Example
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselInteractionLog, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/contacts")).await?;
//! let log = DieselInteractionLog::new(pool);
//! ```

mod diesel_case_register;
mod diesel_error_mapping;
mod diesel_interaction_log;
mod diesel_notification_sink;
mod diesel_user_directory;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_case_register::DieselCaseRegister;
pub use diesel_interaction_log::DieselInteractionLog;
pub use diesel_notification_sink::DieselNotificationSink;
pub use diesel_user_directory::DieselUserDirectory;
pub use migrations::run_migrations;
pub use pool::{DbPool, PoolConfig, PoolError};
