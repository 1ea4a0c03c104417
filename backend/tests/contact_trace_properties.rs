//! Behavioural properties of the contact trace engine over the in-memory
//! store, exercised through the public driving port.

use std::sync::Arc;

use backend::domain::ports::{ContactTrace, InteractionLog, StoredAccount, UserDirectory};
use backend::domain::{
    ContactTraceService, NewInteraction, PasswordDigest, Role, TraceRequest,
    TraceResult, TraceValidationError, TraceWindow, User, UserId, Username,
};
use backend::outbound::memory::InMemoryStore;
use backend::test_support::{FixtureClock, fixture_clock, fixture_timestamp};
use chrono::{DateTime, Duration, Utc};
use rstest::{fixture, rstest};
use serde_json::json;

struct World {
    store: Arc<InMemoryStore>,
    clock: Arc<FixtureClock>,
}

impl World {
    fn now(&self) -> DateTime<Utc> {
        fixture_timestamp()
    }

    async fn member(&self, name: &str) -> UserId {
        let user = User::new(
            UserId::random(),
            Username::new(name).expect("valid username"),
            Role::Member,
            self.now(),
        );
        let id = user.id().clone();
        UserDirectory::create(
            &*self.store,
            &StoredAccount {
                user,
                password_digest: PasswordDigest::generate("pw").expect("hash").to_stored(),
            },
        )
        .await
        .expect("account stored");
        id
    }

    async fn log(&self, subject: &UserId, counterpart: &UserId, at: DateTime<Utc>, minutes: i64) {
        let draft =
            NewInteraction::try_new(subject.clone(), counterpart.clone(), at, Some(minutes), None)
                .expect("valid draft");
        InteractionLog::append(&*self.store, &draft, self.now())
            .await
            .expect("append");
    }

    async fn trace(&self, subject: &UserId, days: i64) -> Vec<TraceResult> {
        let service = ContactTraceService::new(
            self.store.clone(),
            self.store.clone(),
            self.clock.clone(),
        );
        let request = TraceRequest {
            subject_id: subject.clone(),
            window: TraceWindow::from_days(days).expect("window in range"),
        };
        service.trace(&request).await.expect("trace succeeds")
    }
}

#[fixture]
fn world() -> World {
    World {
        store: Arc::new(InMemoryStore::empty()),
        clock: fixture_clock(),
    }
}

#[rstest]
#[case(0, false)]
#[case(91, false)]
#[case(-5, false)]
#[case(1, true)]
#[case(90, true)]
fn window_bounds(#[case] days: i64, #[case] accepted: bool) {
    let subject = UserId::random().to_string();
    let result = TraceRequest::try_from_parts(Some(&subject), Some(&json!(days)));

    assert_eq!(result.is_ok(), accepted);
    if let Err(err) = result {
        assert_eq!(err, TraceValidationError::WindowOutOfRange);
        assert_eq!(err.to_string(), "windowDays must be between 1 and 90");
    }
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("   "))]
fn missing_subject(#[case] subject: Option<&str>) {
    let err = TraceRequest::try_from_parts(subject, Some(&json!(14))).expect_err("rejected");
    assert_eq!(err, TraceValidationError::MissingSubject);
}

#[rstest]
#[tokio::test]
async fn cutoff_is_inclusive(world: World) {
    let subject = world.member("subject").await;
    let on_boundary = world.member("boundary").await;
    let just_outside = world.member("outside").await;
    let cutoff = world.now() - Duration::days(14);
    world.log(&subject, &on_boundary, cutoff, 5).await;
    world
        .log(&subject, &just_outside, cutoff - Duration::seconds(1), 5)
        .await;

    let results = world.trace(&subject, 14).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].contact_id, on_boundary);
    assert_eq!(results[0].last_contact_at, cutoff);
}

#[rstest]
#[tokio::test]
async fn deduplication_keeps_the_most_recent_record(world: World) {
    let subject = world.member("subject").await;
    let contact = world.member("contact").await;
    let now = world.now();
    world.log(&subject, &contact, now - Duration::days(2), 40).await;
    world.log(&subject, &contact, now - Duration::days(1), 15).await;
    world.log(&contact, &subject, now - Duration::days(3), 90).await;

    let results = world.trace(&subject, 14).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].last_contact_at, now - Duration::days(1));
    assert_eq!(results[0].duration_minutes, 15);
}

#[rstest]
#[tokio::test]
async fn equal_timestamps_prefer_the_later_log_entry(world: World) {
    let subject = world.member("subject").await;
    let contact = world.member("contact").await;
    let at = world.now() - Duration::hours(6);
    world.log(&subject, &contact, at, 10).await;
    world.log(&contact, &subject, at, 25).await;

    let results = world.trace(&subject, 14).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].duration_minutes, 25);
}

#[rstest]
#[tokio::test]
async fn authorship_direction_does_not_hide_contacts(world: World) {
    let subject = world.member("subject").await;
    let author = world.member("author").await;
    world
        .log(&author, &subject, world.now() - Duration::days(1), 20)
        .await;

    let results = world.trace(&subject, 14).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].contact_id, author);
    assert_eq!(results[0].display_name, "author");
}

#[rstest]
#[tokio::test]
async fn self_interactions_never_yield_the_subject(world: World) {
    let subject = world.member("subject").await;
    world
        .log(&subject, &subject, world.now() - Duration::hours(1), 5)
        .await;

    assert!(world.trace(&subject, 14).await.is_empty());
}

#[rstest]
#[tokio::test]
async fn unresolvable_identities_fall_back_to_the_raw_id(world: World) {
    let subject = world.member("subject").await;
    let ghost = UserId::random();
    world
        .log(&subject, &ghost, world.now() - Duration::days(1), 5)
        .await;

    let results = world.trace(&subject, 14).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].display_name, ghost.to_string());
}

#[rstest]
#[tokio::test]
async fn no_qualifying_interactions_is_an_empty_result(world: World) {
    let subject = world.member("subject").await;
    let old = world.member("old").await;
    world
        .log(&subject, &old, world.now() - Duration::days(30), 5)
        .await;

    assert!(world.trace(&subject, 14).await.is_empty());
    assert!(world.trace(&UserId::random(), 14).await.is_empty());
}

#[rstest]
#[tokio::test]
async fn end_to_end_example(world: World) {
    let x = world.member("x-ray").await;
    let y = world.member("yankee").await;
    let z = world.member("zulu").await;
    let now = world.now();
    world.log(&x, &y, now - Duration::days(1), 30).await;
    world.log(&x, &z, now - Duration::days(20), 10).await;

    let results = world.trace(&x, 14).await;

    assert_eq!(
        results,
        vec![TraceResult {
            contact_id: y,
            display_name: "yankee".to_owned(),
            last_contact_at: now - Duration::days(1),
            duration_minutes: 30,
        }]
    );
}

#[rstest]
#[tokio::test]
async fn results_are_ordered_by_recency_then_id(world: World) {
    let subject = world.member("subject").await;
    let first = world.member("first").await;
    let second = world.member("second").await;
    let third = world.member("third").await;
    let now = world.now();
    let tied = now - Duration::days(2);
    world.log(&subject, &first, now - Duration::days(5), 1).await;
    world.log(&subject, &second, tied, 1).await;
    world.log(&subject, &third, tied, 1).await;

    let results = world.trace(&subject, 14).await;

    let mut tied_ids = vec![second.clone(), third.clone()];
    tied_ids.sort_by_key(ToString::to_string);
    let ordered: Vec<UserId> = results.into_iter().map(|r| r.contact_id).collect();
    assert_eq!(ordered, [tied_ids[0].clone(), tied_ids[1].clone(), first]);
}

#[rstest]
#[tokio::test]
async fn trace_does_not_write(world: World) {
    let subject = world.member("subject").await;
    let contact = world.member("contact").await;
    world
        .log(&subject, &contact, world.now() - Duration::days(1), 5)
        .await;
    let before = InteractionLog::list_all(&*world.store).await.expect("log");

    world.trace(&subject, 14).await;

    let after = InteractionLog::list_all(&*world.store).await.expect("log");
    assert_eq!(before, after);
}
