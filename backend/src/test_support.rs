//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`), which
//! enable the `test-support` feature.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to a settable instant.
#[derive(Debug)]
pub struct FixtureClock {
    utc_now: Mutex<DateTime<Utc>>,
}

impl FixtureClock {
    /// Clock reporting `utc_now` until advanced.
    pub fn at(utc_now: DateTime<Utc>) -> Self {
        Self {
            utc_now: Mutex::new(utc_now),
        }
    }

    /// Move the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        let mut guard = self
            .utc_now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard += step;
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self
            .utc_now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Instant used by fixtures across the suite: 2026-03-15T12:00:00Z.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Shared fixed clock at [`fixture_timestamp`].
pub fn fixture_clock() -> Arc<FixtureClock> {
    Arc::new(FixtureClock::at(fixture_timestamp()))
}
