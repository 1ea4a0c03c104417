//! Contact-trace query model.
//!
//! A trace finds the distinct users who interacted with a subject inside a
//! lookback window, keeping the most recent interaction per contact.
//!
//! The selection itself is a pure function over interaction records
//! ([`select_primary_contacts`]) so storage backends only have to supply the
//! records touching the subject.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::interaction::{Interaction, InteractionId};
use super::user::UserId;

/// Lookback applied when the caller does not supply a usable window.
pub const DEFAULT_WINDOW_DAYS: u16 = 14;
/// Smallest accepted window, in days.
pub const MIN_WINDOW_DAYS: u16 = 1;
/// Largest accepted window, in days.
pub const MAX_WINDOW_DAYS: u16 = 90;

/// Caller-input errors for trace requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TraceValidationError {
    /// No subject identity was supplied.
    #[error("caseUserId required")]
    MissingSubject,
    /// The subject identity is not a valid user id.
    #[error("caseUserId must be a valid user id")]
    InvalidSubject,
    /// The window resolved outside `[1, 90]` or was fractional.
    #[error("windowDays must be between 1 and 90")]
    WindowOutOfRange,
}

/// Validated lookback window in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TraceWindow(u16);

impl Default for TraceWindow {
    fn default() -> Self {
        Self(DEFAULT_WINDOW_DAYS)
    }
}

impl TraceWindow {
    /// Validate an integral day count.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::TraceWindow;
    ///
    /// assert!(TraceWindow::from_days(90).is_ok());
    /// assert!(TraceWindow::from_days(0).is_err());
    /// ```
    pub fn from_days(days: i64) -> Result<Self, TraceValidationError> {
        u16::try_from(days)
            .ok()
            .filter(|value| (MIN_WINDOW_DAYS..=MAX_WINDOW_DAYS).contains(value))
            .map(Self)
            .ok_or(TraceValidationError::WindowOutOfRange)
    }

    /// Resolve a loosely typed window value as received from a client.
    ///
    /// - absent, `null`, blank or non-numeric values fall back to
    ///   [`DEFAULT_WINDOW_DAYS`];
    /// - numbers and numeric strings must be whole and within range.
    pub fn resolve(raw: Option<&Value>) -> Result<Self, TraceValidationError> {
        let number = match raw {
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
            _ => None,
        };
        match number {
            None => Ok(Self::default()),
            Some(value) if value.is_nan() => Ok(Self::default()),
            Some(value) if value.fract() != 0.0 || !value.is_finite() => {
                Err(TraceValidationError::WindowOutOfRange)
            }
            // Range-checked by `from_days`; the cast saturates out-of-range values.
            Some(value) => Self::from_days(value as i64),
        }
    }

    /// Window length in days.
    pub fn days(self) -> u16 {
        self.0
    }

    /// Earliest qualifying timestamp for a trace evaluated at `now`.
    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(i64::from(self.0))
    }
}

/// Validated trace request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRequest {
    pub subject_id: UserId,
    pub window: TraceWindow,
}

impl TraceRequest {
    /// Build a request from raw client input.
    ///
    /// A missing subject is reported before the window is examined.
    pub fn try_from_parts(
        subject: Option<&str>,
        window_days: Option<&Value>,
    ) -> Result<Self, TraceValidationError> {
        let subject = subject
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(TraceValidationError::MissingSubject)?;
        let window = TraceWindow::resolve(window_days)?;
        let subject_id =
            UserId::new(subject).map_err(|_| TraceValidationError::InvalidSubject)?;
        Ok(Self { subject_id, window })
    }
}

/// One primary contact, derived per trace and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceResult {
    pub contact_id: UserId,
    pub display_name: String,
    pub last_contact_at: DateTime<Utc>,
    pub duration_minutes: u32,
}

/// The representative interaction chosen for one contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryContact {
    pub contact_id: UserId,
    pub interaction_id: InteractionId,
    pub last_contact_at: DateTime<Utc>,
    pub duration_minutes: u32,
}

impl PrimaryContact {
    fn supersedes(&self, other: &Self) -> bool {
        (self.last_contact_at, self.interaction_id) > (other.last_contact_at, other.interaction_id)
    }
}

/// Select the primary contacts of `subject` from `interactions`.
///
/// Records before `cutoff` are ignored (a record exactly at `cutoff`
/// qualifies), records not touching `subject` and self-contacts are skipped,
/// and each contact keeps its most recent record, ties going to the larger
/// interaction id. The result is ordered by last contact descending, then
/// contact id ascending.
pub fn select_primary_contacts(
    subject: &UserId,
    interactions: &[Interaction],
    cutoff: DateTime<Utc>,
) -> Vec<PrimaryContact> {
    let mut by_contact: HashMap<&UserId, PrimaryContact> = HashMap::new();

    for record in interactions {
        if record.occurred_at < cutoff || !record.touches(subject) {
            continue;
        }
        let other = record.other_party(subject);
        if other == subject {
            continue;
        }

        let candidate = PrimaryContact {
            contact_id: other.clone(),
            interaction_id: record.id,
            last_contact_at: record.occurred_at,
            duration_minutes: record.duration_minutes,
        };
        match by_contact.get(other) {
            Some(current) if !candidate.supersedes(current) => {}
            _ => {
                by_contact.insert(other, candidate);
            }
        }
    }

    let mut contacts: Vec<PrimaryContact> = by_contact.into_values().collect();
    contacts.sort_by(|left, right| {
        right
            .last_contact_at
            .cmp(&left.last_contact_at)
            .then_with(|| left.contact_id.cmp(&right.contact_id))
    });
    contacts
}

#[cfg(test)]
#[path = "trace_tests.rs"]
mod tests;
