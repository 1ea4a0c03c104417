//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed contact-tracing model used by the API
//! and persistence layers, and the services implementing the driving ports.
//! Storage is reached only through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserId, Username, Role: directory identities.
//! - Interaction, Case, Notification, NotificationTemplate: stored records.
//! - TraceRequest, TraceWindow, TraceResult: the contact-trace query model.
//! - *Service types: driving port implementations.

pub mod account_service;
pub mod auth;
pub mod case;
pub mod case_service;
pub mod contact_trace_service;
pub mod error;
pub mod interaction;
pub mod interaction_service;
pub mod notification;
pub mod notification_service;
pub mod ports;
pub mod trace;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{CredentialsValidationError, LoginCredentials, PasswordDigest, SignupCredentials};
pub use self::case::{Case, CaseId, NewCase};
pub use self::case_service::CaseService;
pub use self::contact_trace_service::ContactTraceService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::interaction::{
    Interaction, InteractionId, InteractionValidationError, NewInteraction,
};
pub use self::interaction_service::InteractionService;
pub use self::notification::{
    NewNotification, NewNotificationTemplate, Notification, NotificationId, NotificationTemplate,
    PRIMARY_CONTACT_MESSAGE, TemplateId,
};
pub use self::notification_service::NotificationService;
pub use self::trace::{
    DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS, MIN_WINDOW_DAYS, PrimaryContact, TraceRequest,
    TraceResult, TraceValidationError, TraceWindow, select_primary_contacts,
};
pub use self::trace_id::TraceId;
pub use self::user::{Role, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
