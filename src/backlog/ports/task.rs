//! Task read, validation and write contract.

use super::StoreResult;
use crate::backlog::domain::{ProjectId, Task, TaskId, TaskValues};
use async_trait::async_trait;

/// Verdict of the tracker's task validation rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidation {
    /// The values may be written.
    Valid,
    /// The values break one or more rules.
    Invalid(Vec<String>),
}

/// Task persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Returns every task of the project, in the store's listing order.
    async fn list_all(&self, project_id: ProjectId) -> StoreResult<Vec<Task>>;

    /// Checks `values` against the creation rules (no `id`) or the update
    /// rules (with `id`).
    async fn validate(&self, values: &TaskValues) -> StoreResult<TaskValidation>;

    /// Creates a task and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns a store error when the task cannot be persisted.
    async fn create(&self, values: &TaskValues) -> StoreResult<TaskId>;

    /// Updates the task named by `values.id`.
    ///
    /// Tags are left untouched when `values.tags` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`super::StoreError::NotFound`] when the task does not exist.
    async fn update(&self, values: &TaskValues) -> StoreResult<()>;
}
