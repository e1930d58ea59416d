//! Shared world state for task status lifecycle BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tasklane::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{TaskLifecycleResult, TaskLifecycleService},
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for task status behaviour tests.
pub struct TaskTransitionWorld {
    pub service: TestTaskService,
    pub current_external_id: Option<String>,
    pub last_update_result: Option<TaskLifecycleResult<Option<Task>>>,
    pub next_task: Option<Option<Task>>,
}

impl TaskTransitionWorld {
    /// Creates a world backed by an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            current_external_id: None,
            last_update_result: None,
            next_task: None,
        }
    }

    /// Returns the external identifier the scenario is working on.
    pub fn current_external_id(&self) -> Result<String, eyre::Report> {
        self.current_external_id
            .clone()
            .ok_or_else(|| eyre::eyre!("missing current task in scenario world"))
    }
}

impl Default for TaskTransitionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskTransitionWorld {
    TaskTransitionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
