//! Tests for the contact trace service.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockInteractionLog, MockUserDirectory};
use crate::domain::{ErrorCode, Interaction, InteractionId, TraceWindow};
use crate::test_support::{fixture_clock, fixture_timestamp};

#[fixture]
fn now() -> DateTime<Utc> {
    fixture_timestamp()
}

fn interaction(
    id: i64,
    author: &UserId,
    counterpart: &UserId,
    occurred_at: DateTime<Utc>,
    duration_minutes: u32,
) -> Interaction {
    Interaction {
        id: InteractionId::new(id),
        subject_id: author.clone(),
        counterpart_id: counterpart.clone(),
        occurred_at,
        duration_minutes,
        notes: None,
        recorded_at: occurred_at,
    }
}

fn request(subject: &UserId, days: i64) -> TraceRequest {
    TraceRequest {
        subject_id: subject.clone(),
        window: TraceWindow::from_days(days).expect("valid window"),
    }
}

fn service(
    log: MockInteractionLog,
    directory: MockUserDirectory,
) -> ContactTraceService<MockInteractionLog, MockUserDirectory> {
    ContactTraceService::new(Arc::new(log), Arc::new(directory), fixture_clock())
}

#[rstest]
#[tokio::test]
async fn resolves_display_names_in_one_batch(now: DateTime<Utc>) {
    let subject = UserId::random();
    let known = UserId::random();
    let unknown = UserId::random();
    let records = vec![
        interaction(1, &subject, &known, now - Duration::days(1), 30),
        interaction(2, &unknown, &subject, now - Duration::days(2), 15),
    ];

    let mut log = MockInteractionLog::new();
    log.expect_touching()
        .with(eq(subject.clone()))
        .times(1)
        .return_once(move |_| Ok(records));

    let known_for_directory = known.clone();
    let mut directory = MockUserDirectory::new();
    directory
        .expect_resolve_display_names()
        .times(1)
        .return_once(move |ids| {
            assert_eq!(ids.len(), 2);
            Ok(HashMap::from([(known_for_directory, "user1".to_owned())]))
        });

    let results = service(log, directory)
        .trace(&request(&subject, 14))
        .await
        .expect("trace succeeds");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].contact_id, known);
    assert_eq!(results[0].display_name, "user1");
    assert_eq!(results[0].duration_minutes, 30);
    assert_eq!(results[1].contact_id, unknown);
    assert_eq!(results[1].display_name, unknown.to_string());
}

#[rstest]
#[tokio::test]
async fn empty_window_skips_directory(now: DateTime<Utc>) {
    let subject = UserId::random();
    let stale = vec![interaction(
        1,
        &subject,
        &UserId::random(),
        now - Duration::days(30),
        5,
    )];

    let mut log = MockInteractionLog::new();
    log.expect_touching().return_once(move |_| Ok(stale));
    let mut directory = MockUserDirectory::new();
    directory.expect_resolve_display_names().times(0);

    let results = service(log, directory)
        .trace(&request(&subject, 14))
        .await
        .expect("trace succeeds");

    assert!(results.is_empty());
}

#[rstest]
#[case(InteractionLogError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(InteractionLogError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn log_failures_propagate(#[case] failure: InteractionLogError, #[case] expected: ErrorCode) {
    let mut log = MockInteractionLog::new();
    log.expect_touching()
        .times(1)
        .return_once(move |_| Err(failure));
    let mut directory = MockUserDirectory::new();
    directory.expect_resolve_display_names().times(0);

    let err = service(log, directory)
        .trace(&request(&UserId::random(), 14))
        .await
        .expect_err("dependency failure");

    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn directory_failures_propagate(now: DateTime<Utc>) {
    let subject = UserId::random();
    let records = vec![interaction(
        1,
        &subject,
        &UserId::random(),
        now - Duration::hours(2),
        5,
    )];

    let mut log = MockInteractionLog::new();
    log.expect_touching().return_once(move |_| Ok(records));
    let mut directory = MockUserDirectory::new();
    directory
        .expect_resolve_display_names()
        .times(1)
        .return_once(|_| Err(UserDirectoryError::connection("timeout")));

    let err = service(log, directory)
        .trace(&request(&subject, 14))
        .await
        .expect_err("dependency failure");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[case(1, 1)]
#[case(90, 2)]
#[tokio::test]
async fn window_bounds_are_applied(
    now: DateTime<Utc>,
    #[case] days: i64,
    #[case] expected_contacts: usize,
) {
    let subject = UserId::random();
    let records = vec![
        interaction(1, &subject, &UserId::random(), now - Duration::hours(23), 5),
        interaction(2, &subject, &UserId::random(), now - Duration::days(60), 5),
    ];

    let mut log = MockInteractionLog::new();
    log.expect_touching().return_once(move |_| Ok(records));
    let mut directory = MockUserDirectory::new();
    directory
        .expect_resolve_display_names()
        .return_once(|_| Ok(HashMap::new()));

    let results = service(log, directory)
        .trace(&request(&subject, days))
        .await
        .expect("trace succeeds");

    assert_eq!(results.len(), expected_contacts);
}
