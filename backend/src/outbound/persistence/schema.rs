//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` when a migration changes a table.

diesel::table! {
    /// Directory accounts. `username` is unique.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        password_digest -> Text,
        /// `admin` or `member`.
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only interaction log, indexed on both parties.
    interactions (id) {
        id -> Int8,
        subject_id -> Uuid,
        counterpart_id -> Uuid,
        occurred_at -> Timestamptz,
        duration_minutes -> Int4,
        notes -> Nullable<Text>,
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only case register.
    cases (id) {
        id -> Int8,
        subject_id -> Uuid,
        reported_by -> Uuid,
        reported_at -> Timestamptz,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Simulated notifications.
    notifications (id) {
        id -> Int8,
        user_id -> Uuid,
        message -> Text,
        simulated_by -> Uuid,
        case_id -> Nullable<Int8>,
        created_at -> Timestamptz,
        read -> Bool,
    }
}

diesel::table! {
    /// Admin-authored notification templates.
    notification_templates (id) {
        id -> Int8,
        name -> Nullable<Text>,
        message -> Text,
        created_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(interactions -> users (subject_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    interactions,
    cases,
    notifications,
    notification_templates,
);
