//! Shared helpers for in-memory import integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use tdg_sync::backlog::{
    adapters::memory::InMemoryTracker,
    config::ImportConfig,
    domain::{Comment, CommentKind, ProjectId, Task},
    ports::TaskStore,
    services::{Reconciler, TodoImportService},
};

/// Import service wired entirely to one in-memory tracker.
pub type TestImportService = TodoImportService<
    InMemoryTracker,
    InMemoryTracker,
    InMemoryTracker,
    InMemoryTracker,
    InMemoryTracker,
    DefaultClock,
>;

/// Tracker holding a `backend` project plus a service importing into it.
pub struct Harness {
    pub tracker: InMemoryTracker,
    pub project_id: ProjectId,
}

impl Harness {
    /// Builds an import service with the given configuration.
    pub fn service_with(&self, config: ImportConfig) -> TestImportService {
        let tracker = Arc::new(self.tracker.clone());
        let reconciler = Reconciler::new(
            Arc::clone(&tracker),
            Arc::clone(&tracker),
            Arc::clone(&tracker),
            Arc::clone(&tracker),
            Arc::new(DefaultClock),
        )
        .with_config(config);
        TodoImportService::new(tracker, reconciler)
    }

    /// Builds an import service with the default configuration.
    pub fn service(&self) -> TestImportService {
        self.service_with(ImportConfig::default())
    }

    /// Lists the project's tasks in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error when the tracker cannot list the tasks.
    pub async fn tasks(&self) -> Result<Vec<Task>, eyre::Report> {
        Ok(self.tracker.list_all(self.project_id).await?)
    }

    /// Finds the project's task with the given title.
    ///
    /// # Errors
    ///
    /// Returns an error when no task carries the title.
    pub async fn task_titled(&self, title: &str) -> Result<Task, eyre::Report> {
        self.tasks()
            .await?
            .into_iter()
            .find(|task| task.title == title)
            .ok_or_else(|| eyre::eyre!("no task titled '{title}'"))
    }
}

/// Provides a tracker with a three-column `backend` project.
#[fixture]
pub fn harness() -> Harness {
    let tracker = InMemoryTracker::new();
    let project_id = tracker
        .add_project("backend", &["Backlog", "Work in progress", "Done"])
        .expect("project should be created");
    Harness {
        tracker,
        project_id,
    }
}

/// Builds a comment of `kind` at `file:line`.
pub fn comment(kind: CommentKind, title: &str, body: &str, file: &str, line: u32) -> Comment {
    Comment::new(kind, title, body).at(file, line)
}
