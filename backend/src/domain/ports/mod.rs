//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`InteractionLog`, `UserDirectory`, `CaseRegister`,
//! `NotificationSink`) are implemented by outbound adapters. Driving ports
//! (`ContactTrace`, `LoginService`, ...) are implemented by domain services
//! and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod case_command;
mod case_register;
mod contact_trace;
mod interaction_command;
mod interaction_log;
mod login_service;
mod notification_command;
mod notification_sink;
mod user_directory;
mod users_query;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::{ADMIN_SIGNUP_FORBIDDEN, AccountCommand};
#[cfg(test)]
pub use case_command::{MockCaseCommand, MockCaseQuery};
pub use case_command::{CaseCommand, CaseQuery, ReportCaseRequest};
#[cfg(test)]
pub use case_register::MockCaseRegister;
pub use case_register::{CaseRegister, CaseRegisterError};
#[cfg(test)]
pub use contact_trace::MockContactTrace;
pub use contact_trace::ContactTrace;
#[cfg(test)]
pub use interaction_command::{MockInteractionCommand, MockInteractionQuery};
pub use interaction_command::{InteractionCommand, InteractionQuery, LogInteractionRequest};
#[cfg(test)]
pub use interaction_log::MockInteractionLog;
pub use interaction_log::{InteractionLog, InteractionLogError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use notification_command::{MockNotificationCommand, MockNotificationQuery};
pub use notification_command::{NotificationCommand, NotificationQuery, SimulateNotifyRequest};
#[cfg(test)]
pub use notification_sink::MockNotificationSink;
pub use notification_sink::{NotificationSink, NotificationSinkError};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::{StoredAccount, UserDirectory, UserDirectoryError};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
