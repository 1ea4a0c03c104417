//! Shared HTTP adapter state.
//!
//! Handlers receive this state via `actix_web::web::Data` and depend only on
//! the driving ports, so they can be exercised with mocks or the in-memory
//! store without any I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountCommand, CaseCommand, CaseQuery, CaseRegister, ContactTrace, InteractionCommand,
    InteractionLog, InteractionQuery, LoginService, NotificationCommand, NotificationQuery,
    NotificationSink, UserDirectory, UsersQuery,
};
use crate::domain::{
    AccountService, CaseService, ContactTraceService, InteractionService, NotificationService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn AccountCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub trace: Arc<dyn ContactTrace>,
    pub interactions: Arc<dyn InteractionCommand>,
    pub interactions_query: Arc<dyn InteractionQuery>,
    pub cases: Arc<dyn CaseCommand>,
    pub cases_query: Arc<dyn CaseQuery>,
    pub notifications: Arc<dyn NotificationCommand>,
    pub notifications_query: Arc<dyn NotificationQuery>,
}

/// Driven-port implementations the services are built over.
pub struct HttpStateRepositories<L, D, C, N> {
    pub interactions: Arc<L>,
    pub directory: Arc<D>,
    pub cases: Arc<C>,
    pub notifications: Arc<N>,
}

impl HttpState {
    /// Wire every domain service over one set of repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::inbound::http::state::{HttpState, HttpStateRepositories};
    /// use backend::outbound::memory::InMemoryStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryStore::empty());
    /// let state = HttpState::from_repositories(
    ///     HttpStateRepositories {
    ///         interactions: store.clone(),
    ///         directory: store.clone(),
    ///         cases: store.clone(),
    ///         notifications: store,
    ///     },
    ///     Arc::new(DefaultClock),
    /// );
    /// let _trace = state.trace.clone();
    /// ```
    pub fn from_repositories<L, D, C, N>(
        repositories: HttpStateRepositories<L, D, C, N>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        L: InteractionLog + 'static,
        D: UserDirectory + 'static,
        C: CaseRegister + 'static,
        N: NotificationSink + 'static,
    {
        let HttpStateRepositories {
            interactions,
            directory,
            cases,
            notifications,
        } = repositories;

        let accounts = Arc::new(AccountService::new(directory.clone(), clock.clone()));
        let interaction_service = Arc::new(InteractionService::new(
            interactions.clone(),
            clock.clone(),
        ));
        let case_service = Arc::new(CaseService::new(cases, clock.clone()));
        let notification_service = Arc::new(NotificationService::new(notifications, clock.clone()));
        let trace = Arc::new(ContactTraceService::new(interactions, directory, clock));

        Self {
            login: accounts.clone(),
            accounts: accounts.clone(),
            users: accounts,
            trace,
            interactions: interaction_service.clone(),
            interactions_query: interaction_service,
            cases: case_service.clone(),
            cases_query: case_service,
            notifications: notification_service.clone(),
            notifications_query: notification_service,
        }
    }
}
