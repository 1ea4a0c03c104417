//! Logged contact events between two users.
//!
//! An interaction is stored with a directional author (`subject_id`) for
//! audit purposes, but for tracing the two parties are symmetric.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Monotonically increasing interaction identifier assigned by the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InteractionId(i64);

impl InteractionId {
    /// Wrap a raw identifier issued by storage.
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for InteractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors raised when building an interaction draft.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InteractionValidationError {
    #[error("durationMinutes must be a non-negative integer")]
    DurationOutOfRange,
}

/// Largest storable duration; the column is a signed 32-bit integer.
pub const MAX_DURATION_MINUTES: u32 = i32::MAX.unsigned_abs();

/// Persisted interaction record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    pub id: InteractionId,
    pub subject_id: UserId,
    pub counterpart_id: UserId,
    pub occurred_at: DateTime<Utc>,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl Interaction {
    /// Whether `user` is either party of the record.
    pub fn touches(&self, user: &UserId) -> bool {
        &self.subject_id == user || &self.counterpart_id == user
    }

    /// The party that is not `user`, from `user`'s point of view.
    ///
    /// Returns the counterpart when `user` authored the record and the
    /// author otherwise. For a degenerate self-interaction this yields
    /// `user` itself; callers filter that case.
    pub fn other_party(&self, user: &UserId) -> &UserId {
        if &self.subject_id == user {
            &self.counterpart_id
        } else {
            &self.subject_id
        }
    }
}

/// Interaction awaiting insertion; the log assigns `id` and `recorded_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInteraction {
    pub subject_id: UserId,
    pub counterpart_id: UserId,
    pub occurred_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub notes: Option<String>,
}

impl NewInteraction {
    /// Build a draft, rejecting negative or oversized durations. Blank notes
    /// are dropped.
    pub fn try_new(
        subject_id: UserId,
        counterpart_id: UserId,
        occurred_at: DateTime<Utc>,
        duration_minutes: Option<i64>,
        notes: Option<String>,
    ) -> Result<Self, InteractionValidationError> {
        let duration_minutes = match duration_minutes {
            None => 0,
            Some(value) => u32::try_from(value)
                .ok()
                .filter(|minutes| *minutes <= MAX_DURATION_MINUTES)
                .ok_or(InteractionValidationError::DurationOutOfRange)?,
        };
        let notes = notes.filter(|text| !text.trim().is_empty());
        Ok(Self {
            subject_id,
            counterpart_id,
            occurred_at,
            duration_minutes,
            notes,
        })
    }
}
