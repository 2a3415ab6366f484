//! Shared world state for comment import BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tdg_sync::backlog::{
    adapters::memory::InMemoryTracker,
    config::ImportConfig,
    domain::{ImportReport, ProjectId, Task},
    ports::TaskStore,
    services::{ImportError, Reconciler, TodoImportService},
};

/// Service type used by the BDD world.
pub type TestImportService = TodoImportService<
    InMemoryTracker,
    InMemoryTracker,
    InMemoryTracker,
    InMemoryTracker,
    InMemoryTracker,
    DefaultClock,
>;

/// Scenario world for comment import behaviour tests.
pub struct ImportWorld {
    pub tracker: InMemoryTracker,
    pub project_id: Option<ProjectId>,
    pub config: ImportConfig,
    pub last_result: Option<Result<ImportReport, ImportError>>,
}

impl ImportWorld {
    /// Creates a world with an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tracker: InMemoryTracker::new(),
            project_id: None,
            config: ImportConfig::default(),
            last_result: None,
        }
    }

    /// Builds an import service over the world's tracker.
    pub fn service(&self) -> TestImportService {
        let tracker = Arc::new(self.tracker.clone());
        let reconciler = Reconciler::new(
            Arc::clone(&tracker),
            Arc::clone(&tracker),
            Arc::clone(&tracker),
            Arc::clone(&tracker),
            Arc::new(DefaultClock),
        )
        .with_config(self.config.clone());
        TodoImportService::new(tracker, reconciler)
    }

    /// Returns the scenario project.
    ///
    /// # Errors
    ///
    /// Returns an error when no project was set up.
    pub fn project_id(&self) -> Result<ProjectId, eyre::Report> {
        self.project_id
            .ok_or_else(|| eyre::eyre!("missing project in scenario world"))
    }

    /// Finds the project's task with the given title.
    ///
    /// # Errors
    ///
    /// Returns an error when the tasks cannot be listed or none matches.
    pub fn task_titled(&self, title: &str) -> Result<Task, eyre::Report> {
        let tasks = run_async(self.tracker.list_all(self.project_id()?))?;
        tasks
            .into_iter()
            .find(|task| task.title == title)
            .ok_or_else(|| eyre::eyre!("no task titled '{title}'"))
    }

    /// Returns the report of the last successful import.
    ///
    /// # Errors
    ///
    /// Returns an error when no import ran or it failed.
    pub fn report(&self) -> Result<&ImportReport, eyre::Report> {
        self.last_result
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing import result in scenario world"))?
            .as_ref()
            .map_err(|err| eyre::eyre!("unexpected import failure: {err}"))
    }
}

impl Default for ImportWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ImportWorld {
    ImportWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
