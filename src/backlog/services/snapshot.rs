//! Loads the tasks already tracked for a project, keyed by content digest.

use crate::backlog::{
    domain::{DigestIndex, ProjectId, Task},
    ports::{StoreResult, TaskStore},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Builds the digest index of a project's existing tasks.
#[derive(Clone)]
pub struct SnapshotLoader<T>
where
    T: TaskStore,
{
    tasks: Arc<T>,
}

impl<T> SnapshotLoader<T>
where
    T: TaskStore,
{
    /// Creates a loader over the task store.
    #[must_use]
    pub const fn new(tasks: Arc<T>) -> Self {
        Self { tasks }
    }

    /// Loads every task of `project_id` and indexes it by digest.
    ///
    /// When two tasks share a digest the one listed last wins.
    ///
    /// # Errors
    ///
    /// Returns the store error when the listing fails; a run must not
    /// proceed against an incomplete snapshot.
    pub async fn load(&self, project_id: ProjectId) -> StoreResult<DigestIndex<Task>> {
        let tasks = self.tasks.list_all(project_id).await?;
        let listed = tasks.len();

        let mut index = DigestIndex::new();
        for task in tasks {
            let digest = task.digest();
            if let Some(shadowed) = index.insert(digest, task) {
                warn!(
                    project = %project_id,
                    digest = %digest.short(),
                    shadowed_task = %shadowed.id,
                    "existing tasks share a content digest, keeping the last listed"
                );
            }
        }

        debug!(project = %project_id, listed, indexed = index.len(), "loaded task snapshot");
        Ok(index)
    }
}
