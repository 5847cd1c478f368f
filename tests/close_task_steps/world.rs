//! Shared world state for close-task BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskdesk::lookup::{LookupError, LookupResolver};
use taskdesk::registry::{
    domain::{Category, Company},
    services::RegistrationService,
};
use taskdesk::storage::memory::InMemoryStore;
use taskdesk::task::{
    domain::Task,
    services::{TaskLifecycleError, TaskLifecycleService},
};

/// Failure of the step under test.
#[derive(Debug)]
pub enum CloseFailure {
    Lookup(LookupError),
    Lifecycle(TaskLifecycleError),
}

/// Scenario world for close-task behaviour tests.
pub struct CloseTaskWorld {
    pub registry: RegistrationService<InMemoryStore>,
    pub tasks: TaskLifecycleService<InMemoryStore, DefaultClock>,
    pub lookup: LookupResolver<InMemoryStore, InMemoryStore>,
    pub company: Option<Company>,
    pub category: Option<Category>,
    pub task: Option<Task>,
    pub last_close: Option<Result<Task, CloseFailure>>,
}

impl CloseTaskWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            registry: RegistrationService::new(Arc::clone(&store)),
            tasks: TaskLifecycleService::new(Arc::clone(&store), Arc::new(DefaultClock)),
            lookup: LookupResolver::new(Arc::clone(&store), store),
            company: None,
            category: None,
            task: None,
            last_close: None,
        }
    }

    /// Returns the task filed by the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been filed yet.
    pub fn filed_task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing filed task in scenario world"))
    }
}

impl Default for CloseTaskWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CloseTaskWorld {
    CloseTaskWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
