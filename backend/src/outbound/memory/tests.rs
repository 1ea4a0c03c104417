//! Tests for the in-memory store.

use chrono::Duration;
use rstest::{fixture, rstest};

use super::*;
use crate::test_support::fixture_timestamp;

#[fixture]
fn store() -> InMemoryStore {
    InMemoryStore::seeded(fixture_timestamp())
}

fn draft(author: &UserId, counterpart: &UserId, days_ago: i64) -> NewInteraction {
    NewInteraction {
        subject_id: author.clone(),
        counterpart_id: counterpart.clone(),
        occurred_at: fixture_timestamp() - Duration::days(days_ago),
        duration_minutes: 10,
        notes: None,
    }
}

async fn account(store: &InMemoryStore, username: &str) -> StoredAccount {
    store
        .find_account(username)
        .await
        .expect("lookup succeeds")
        .expect("account exists")
}

#[rstest]
#[tokio::test]
async fn seeded_store_has_demo_accounts(store: InMemoryStore) {
    let admin = account(&store, "admin").await;
    let member = account(&store, "user1").await;

    assert_eq!(admin.user.role(), Role::Admin);
    assert_eq!(member.user.role(), Role::Member);
    let digest = PasswordDigest::parse(&member.password_digest).expect("digest");
    assert!(digest.verify("password"));
}

#[rstest]
#[tokio::test]
async fn users_are_listed_by_username(store: InMemoryStore) {
    let users = UserDirectory::list(&store).await.expect("list");
    let names: Vec<&str> = users.iter().map(|u| u.username().as_ref()).collect();
    assert_eq!(names, vec!["admin", "user1"]);
}

#[rstest]
#[tokio::test]
async fn duplicate_usernames_conflict(store: InMemoryStore) {
    let existing = account(&store, "user1").await;
    let duplicate = StoredAccount {
        user: User::new(
            UserId::random(),
            existing.user.username().clone(),
            Role::Member,
            fixture_timestamp(),
        ),
        password_digest: existing.password_digest,
    };

    let err = store.create(&duplicate).await.expect_err("conflict");
    assert!(matches!(err, UserDirectoryError::Conflict { .. }));
}

#[rstest]
#[tokio::test]
async fn touching_returns_both_directions_newest_first(store: InMemoryStore) {
    let x = UserId::random();
    let y = UserId::random();
    let z = UserId::random();
    for record in [draft(&x, &y, 3), draft(&y, &x, 1), draft(&y, &z, 0)] {
        InteractionLog::append(&store, &record, fixture_timestamp())
            .await
            .expect("append");
    }

    let touching = store.touching(&x).await.expect("touching");

    assert_eq!(touching.len(), 2);
    assert_eq!(touching[0].id, InteractionId::new(2));
    assert_eq!(touching[1].id, InteractionId::new(1));
}

#[rstest]
#[tokio::test]
async fn identifiers_increase_monotonically(store: InMemoryStore) {
    let x = UserId::random();
    let y = UserId::random();
    let first = InteractionLog::append(&store, &draft(&x, &y, 1), fixture_timestamp())
        .await
        .expect("append");
    let second = InteractionLog::append(&store, &draft(&x, &y, 1), fixture_timestamp())
        .await
        .expect("append");

    assert!(second.id > first.id);
}

#[rstest]
#[tokio::test]
async fn display_names_resolve_known_ids_only(store: InMemoryStore) {
    let member = account(&store, "user1").await;
    let stranger = UserId::random();

    let names = store
        .resolve_display_names(&[member.user.id().clone(), stranger.clone()])
        .await
        .expect("resolve");

    assert_eq!(names.get(member.user.id()).map(String::as_str), Some("user1"));
    assert!(!names.contains_key(&stranger));
}

#[rstest]
#[tokio::test]
async fn cases_list_most_recent_report_first(store: InMemoryStore) {
    let subject = UserId::random();
    let reporter = UserId::random();
    for days_ago in [5, 1, 3] {
        let case = NewCase {
            subject_id: subject.clone(),
            reported_by: reporter.clone(),
            reported_at: fixture_timestamp() - Duration::days(days_ago),
        };
        CaseRegister::append(&store, &case, fixture_timestamp())
            .await
            .expect("append");
    }

    let cases = CaseRegister::list(&store).await.expect("list");
    let ids: Vec<i64> = cases.iter().map(|c| c.id.get()).collect();
    assert_eq!(ids, vec![2, 3, 1]);
}

#[rstest]
#[tokio::test]
async fn mark_read_only_touches_recipient_notifications(store: InMemoryStore) {
    let recipient = UserId::random();
    let other = UserId::random();
    let draft = NewNotification::primary_contact(recipient.clone(), UserId::random(), None);
    let stored = NotificationSink::append(&store, &draft, fixture_timestamp())
        .await
        .expect("append");

    let foreign = store.mark_read(stored.id, &other).await.expect("mark");
    assert!(foreign.is_none());

    let marked = store
        .mark_read(stored.id, &recipient)
        .await
        .expect("mark")
        .expect("own notification");
    assert!(marked.read);

    let listed = store.list_for_user(&recipient).await.expect("list");
    assert!(listed[0].read);
}

#[rstest]
#[tokio::test]
async fn templates_default_their_name(store: InMemoryStore) {
    let template = NewNotificationTemplate::new(None, Some("stay home".to_owned()), None);

    let stored = store
        .create_template(&template, fixture_timestamp())
        .await
        .expect("create");

    assert_eq!(stored.name, "template-1");
    assert_eq!(store.list_templates().await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test]
async fn reset_restores_seeded_state(store: InMemoryStore) {
    let x = UserId::random();
    InteractionLog::append(&store, &draft(&x, &UserId::random(), 1), fixture_timestamp())
        .await
        .expect("append");

    store.reset();

    assert!(InteractionLog::list_all(&store).await.expect("list").is_empty());
    assert_eq!(UserDirectory::list(&store).await.expect("users").len(), 2);
}
