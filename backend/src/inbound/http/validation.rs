//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper yields an `invalid_request` error whose details name the
//! offending field and a machine-readable code.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::{
    CredentialsValidationError, Error, TraceValidationError, UserId, UserValidationError,
};

/// Validation error codes carried in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidUuid,
    InvalidTimestamp,
    OutOfRange,
    InvalidValue,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidTimestamp => "invalid_timestamp",
            Self::OutOfRange => "out_of_range",
            Self::InvalidValue => "invalid_value",
        }
    }
}

/// Wire name of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn field_error(field: FieldName, code: ValidationCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

/// `<field> required`.
pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ValidationCode::MissingField,
        format!("{} required", field.as_str()),
    )
}

/// Trimmed, non-empty value of a required string field.
pub(crate) fn require_field(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    UserId::new(value).map_err(|_| {
        field_error(
            field,
            ValidationCode::InvalidUuid,
            format!("{} must be a valid user id", field.as_str()),
        )
    })
}

/// A required user id field: missing before malformed.
pub(crate) fn require_user_id(value: Option<String>, field: FieldName) -> Result<UserId, Error> {
    let raw = require_field(value, field)?;
    parse_user_id(&raw, field)
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    let Some(raw) = value.filter(|raw| !raw.trim().is_empty()) else {
        return Ok(None);
    };
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|timestamp| Some(timestamp.with_timezone(&Utc)))
        .map_err(|_| {
            field_error(
                field,
                ValidationCode::InvalidTimestamp,
                format!("{} must be an RFC 3339 timestamp", field.as_str()),
            )
        })
}

pub(crate) fn map_trace_validation_error(err: TraceValidationError) -> Error {
    let message = err.to_string();
    match err {
        TraceValidationError::MissingSubject => field_error(
            FieldName::new("caseUserId"),
            ValidationCode::MissingField,
            message,
        ),
        TraceValidationError::InvalidSubject => field_error(
            FieldName::new("caseUserId"),
            ValidationCode::InvalidUuid,
            message,
        ),
        TraceValidationError::WindowOutOfRange => field_error(
            FieldName::new("windowDays"),
            ValidationCode::OutOfRange,
            message,
        ),
    }
}

pub(crate) fn map_credentials_error(err: CredentialsValidationError) -> Error {
    let message = err.to_string();
    match err {
        CredentialsValidationError::EmptyUsername => field_error(
            FieldName::new("username"),
            ValidationCode::MissingField,
            message,
        ),
        CredentialsValidationError::EmptyPassword => field_error(
            FieldName::new("password"),
            ValidationCode::MissingField,
            message,
        ),
        CredentialsValidationError::InvalidUsername(_) => field_error(
            FieldName::new("username"),
            ValidationCode::InvalidValue,
            message,
        ),
    }
}

pub(crate) fn map_role_error(_err: UserValidationError) -> Error {
    field_error(
        FieldName::new("role"),
        ValidationCode::InvalidValue,
        "role must be admin or member",
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::Value;

    use super::*;

    const USER_ID: FieldName = FieldName::new("userId");

    fn detail(error: &Error, key: &str) -> Option<String> {
        error
            .details()
            .and_then(|d| d.get(key))
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    #[case(Some("   ".to_owned()))]
    fn absent_or_blank_fields_are_missing(#[case] value: Option<String>) {
        let err = require_user_id(value, USER_ID).expect_err("missing");
        assert_eq!(err.message(), "userId required");
        assert_eq!(detail(&err, "code").as_deref(), Some("missing_field"));
    }

    #[rstest]
    fn malformed_user_ids_are_rejected() {
        let err = require_user_id(Some("not-a-uuid".to_owned()), USER_ID).expect_err("bad id");
        assert_eq!(detail(&err, "code").as_deref(), Some("invalid_uuid"));
        assert_eq!(detail(&err, "field").as_deref(), Some("userId"));
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("  ".to_owned()), None)]
    #[case(
        Some("2026-03-15T10:00:00+02:00".to_owned()),
        Some("2026-03-15T08:00:00Z")
    )]
    fn optional_timestamps_parse(#[case] raw: Option<String>, #[case] expected: Option<&str>) {
        let parsed =
            parse_optional_rfc3339_timestamp(raw, FieldName::new("reportedAt")).expect("valid");
        let expected = expected.map(|s| {
            DateTime::parse_from_rfc3339(s)
                .expect("fixture timestamp")
                .with_timezone(&Utc)
        });
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn malformed_timestamps_are_rejected() {
        let err = parse_optional_rfc3339_timestamp(
            Some("yesterday".to_owned()),
            FieldName::new("occurredAt"),
        )
        .expect_err("bad timestamp");
        assert_eq!(detail(&err, "code").as_deref(), Some("invalid_timestamp"));
    }

    #[rstest]
    fn window_errors_keep_the_exact_message() {
        let err = map_trace_validation_error(TraceValidationError::WindowOutOfRange);
        assert_eq!(err.message(), "windowDays must be between 1 and 90");
        assert_eq!(detail(&err, "field").as_deref(), Some("windowDays"));
    }
}
