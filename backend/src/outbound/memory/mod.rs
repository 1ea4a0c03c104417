//! In-process storage backend.
//!
//! [`InMemoryStore`] implements every driven port over plain vectors guarded
//! by one mutex. It is created once at startup and shared through `Arc`; the
//! lock is only held while copying records in or out, never across an await.
//!
//! Used when no database URL is configured, and by tests that need real
//! storage semantics without PostgreSQL.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::ports::{
    CaseRegister, CaseRegisterError, InteractionLog, InteractionLogError, NotificationSink,
    NotificationSinkError, StoredAccount, UserDirectory, UserDirectoryError,
};
use crate::domain::{
    Case, CaseId, Interaction, InteractionId, NewCase, NewInteraction, NewNotification,
    NewNotificationTemplate, Notification, NotificationId, NotificationTemplate, PasswordDigest,
    Role, TemplateId, User, UserId, Username,
};

/// Demo accounts created by [`InMemoryStore::seeded`].
pub const DEMO_ACCOUNTS: [(&str, &str, Role); 2] = [
    ("admin", "admin", Role::Admin),
    ("user1", "password", Role::Member),
];

#[derive(Debug, Default)]
struct MemoryState {
    accounts: Vec<StoredAccount>,
    interactions: Vec<Interaction>,
    cases: Vec<Case>,
    notifications: Vec<Notification>,
    templates: Vec<NotificationTemplate>,
}

impl MemoryState {
    fn seeded(created_at: DateTime<Utc>) -> Self {
        let accounts = DEMO_ACCOUNTS
            .iter()
            .filter_map(|(username, password, role)| {
                let username = Username::new(username).ok()?;
                let digest = PasswordDigest::generate(password).ok()?;
                Some(StoredAccount {
                    user: User::new(UserId::random(), username, *role, created_at),
                    password_digest: digest.to_stored(),
                })
            })
            .collect();
        Self {
            accounts,
            ..Self::default()
        }
    }
}

fn next_id(len: usize) -> i64 {
    i64::try_from(len).map_or(i64::MAX, |count| count.saturating_add(1))
}

/// Shared in-memory store implementing all driven ports.
#[derive(Debug)]
pub struct InMemoryStore {
    state: Mutex<MemoryState>,
    seed_demo_accounts: bool,
    seeded_at: DateTime<Utc>,
}

impl InMemoryStore {
    /// Empty store with no accounts.
    pub fn empty() -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
            seed_demo_accounts: false,
            seeded_at: Utc::now(),
        }
    }

    /// Store pre-populated with the [`DEMO_ACCOUNTS`].
    pub fn seeded(created_at: DateTime<Utc>) -> Self {
        Self {
            state: Mutex::new(MemoryState::seeded(created_at)),
            seed_demo_accounts: true,
            seeded_at: created_at,
        }
    }

    /// Drop every record and restore the initial accounts. Test harnesses
    /// only.
    pub fn reset(&self) {
        let fresh = if self.seed_demo_accounts {
            MemoryState::seeded(self.seeded_at)
        } else {
            MemoryState::default()
        };
        *self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = fresh;
        debug!("in-memory store reset");
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, String> {
        self.state
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

fn newest_first(records: &mut [Interaction]) {
    records.sort_by(|a, b| {
        b.occurred_at
            .cmp(&a.occurred_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[async_trait]
impl InteractionLog for InMemoryStore {
    async fn append(
        &self,
        interaction: &NewInteraction,
        recorded_at: DateTime<Utc>,
    ) -> Result<Interaction, InteractionLogError> {
        let mut state = self.lock().map_err(InteractionLogError::query)?;
        let record = Interaction {
            id: InteractionId::new(next_id(state.interactions.len())),
            subject_id: interaction.subject_id.clone(),
            counterpart_id: interaction.counterpart_id.clone(),
            occurred_at: interaction.occurred_at,
            duration_minutes: interaction.duration_minutes,
            notes: interaction.notes.clone(),
            recorded_at,
        };
        state.interactions.push(record.clone());
        Ok(record)
    }

    async fn touching(&self, user: &UserId) -> Result<Vec<Interaction>, InteractionLogError> {
        let mut records: Vec<Interaction> = {
            let state = self.lock().map_err(InteractionLogError::query)?;
            state
                .interactions
                .iter()
                .filter(|record| record.touches(user))
                .cloned()
                .collect()
        };
        newest_first(&mut records);
        Ok(records)
    }

    async fn list_all(&self) -> Result<Vec<Interaction>, InteractionLogError> {
        let mut records = self
            .lock()
            .map_err(InteractionLogError::query)?
            .interactions
            .clone();
        newest_first(&mut records);
        Ok(records)
    }
}

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn resolve_display_names(
        &self,
        ids: &[UserId],
    ) -> Result<HashMap<UserId, String>, UserDirectoryError> {
        let state = self.lock().map_err(UserDirectoryError::query)?;
        Ok(state
            .accounts
            .iter()
            .filter(|account| ids.contains(account.user.id()))
            .map(|account| {
                (
                    account.user.id().clone(),
                    account.user.username().to_string(),
                )
            })
            .collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        let state = self.lock().map_err(UserDirectoryError::query)?;
        Ok(state
            .accounts
            .iter()
            .find(|account| account.user.id() == id)
            .map(|account| account.user.clone()))
    }

    async fn find_account(
        &self,
        username: &str,
    ) -> Result<Option<StoredAccount>, UserDirectoryError> {
        let state = self.lock().map_err(UserDirectoryError::query)?;
        Ok(state
            .accounts
            .iter()
            .find(|account| account.user.username().as_ref() == username)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserDirectoryError> {
        let mut users: Vec<User> = {
            let state = self.lock().map_err(UserDirectoryError::query)?;
            state.accounts.iter().map(|a| a.user.clone()).collect()
        };
        users.sort_by(|a, b| a.username().as_ref().cmp(b.username().as_ref()));
        Ok(users)
    }

    async fn create(&self, account: &StoredAccount) -> Result<(), UserDirectoryError> {
        let mut state = self.lock().map_err(UserDirectoryError::query)?;
        if state
            .accounts
            .iter()
            .any(|existing| existing.user.username() == account.user.username())
        {
            return Err(UserDirectoryError::conflict(format!(
                "username {} already taken",
                account.user.username()
            )));
        }
        state.accounts.push(account.clone());
        Ok(())
    }

    async fn update_credentials(
        &self,
        id: &UserId,
        role: Role,
        password_digest: &str,
    ) -> Result<(), UserDirectoryError> {
        let mut state = self.lock().map_err(UserDirectoryError::query)?;
        let account = state
            .accounts
            .iter_mut()
            .find(|account| account.user.id() == id)
            .ok_or_else(|| UserDirectoryError::query(format!("user {id} not found")))?;
        account.user = account.user.clone().with_role(role);
        password_digest.clone_into(&mut account.password_digest);
        Ok(())
    }
}

#[async_trait]
impl CaseRegister for InMemoryStore {
    async fn append(
        &self,
        case: &NewCase,
        created_at: DateTime<Utc>,
    ) -> Result<Case, CaseRegisterError> {
        let mut state = self.lock().map_err(CaseRegisterError::query)?;
        let record = Case {
            id: CaseId::new(next_id(state.cases.len())),
            subject_id: case.subject_id.clone(),
            reported_by: case.reported_by.clone(),
            reported_at: case.reported_at,
            created_at,
        };
        state.cases.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<Case>, CaseRegisterError> {
        let mut cases = self.lock().map_err(CaseRegisterError::query)?.cases.clone();
        cases.sort_by(|a, b| {
            b.reported_at
                .cmp(&a.reported_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(cases)
    }
}

#[async_trait]
impl NotificationSink for InMemoryStore {
    async fn append(
        &self,
        notification: &NewNotification,
        created_at: DateTime<Utc>,
    ) -> Result<Notification, NotificationSinkError> {
        let mut state = self.lock().map_err(NotificationSinkError::query)?;
        let record = Notification {
            id: NotificationId::new(next_id(state.notifications.len())),
            user_id: notification.user_id.clone(),
            message: notification.message.clone(),
            simulated_by: notification.simulated_by.clone(),
            case_id: notification.case_id,
            created_at,
            read: false,
        };
        state.notifications.push(record.clone());
        Ok(record)
    }

    async fn list_for_user(
        &self,
        user: &UserId,
    ) -> Result<Vec<Notification>, NotificationSinkError> {
        let state = self.lock().map_err(NotificationSinkError::query)?;
        Ok(state
            .notifications
            .iter()
            .filter(|n| &n.user_id == user)
            .cloned()
            .collect())
    }

    async fn mark_read(
        &self,
        id: NotificationId,
        user: &UserId,
    ) -> Result<Option<Notification>, NotificationSinkError> {
        let mut state = self.lock().map_err(NotificationSinkError::query)?;
        Ok(state
            .notifications
            .iter_mut()
            .find(|n| n.id == id && &n.user_id == user)
            .map(|n| {
                n.read = true;
                n.clone()
            }))
    }

    async fn list_templates(&self) -> Result<Vec<NotificationTemplate>, NotificationSinkError> {
        Ok(self
            .lock()
            .map_err(NotificationSinkError::query)?
            .templates
            .clone())
    }

    async fn create_template(
        &self,
        template: &NewNotificationTemplate,
        created_at: DateTime<Utc>,
    ) -> Result<NotificationTemplate, NotificationSinkError> {
        let mut state = self.lock().map_err(NotificationSinkError::query)?;
        let id = TemplateId::new(next_id(state.templates.len()));
        let record = NotificationTemplate {
            id,
            name: template.resolved_name(id),
            message: template.message.clone(),
            created_by: template.created_by.clone(),
            created_at,
        };
        state.templates.push(record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests;
