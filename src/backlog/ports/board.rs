//! Workflow column, task move and tag lookup contract.

use super::StoreResult;
use crate::backlog::domain::{ColumnId, ProjectId, SwimlaneId, TaskId, TaskTag};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Where a retired task lands in the last column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetirePlacement {
    /// Keep the task's current position as the placement hint.
    #[default]
    KeepPosition,
    /// Append the task after the column's existing tasks.
    Append,
}

impl RetirePlacement {
    /// Returns the `append` flag passed to the move operation.
    #[must_use]
    pub const fn is_append(self) -> bool {
        matches!(self, Self::Append)
    }
}

/// Parameter object for moving a task to another column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTaskRequest {
    /// Project owning the task.
    pub project_id: ProjectId,
    /// Task to move.
    pub task_id: TaskId,
    /// Destination column.
    pub column_id: ColumnId,
    /// Source position of the task.
    pub position: u32,
    /// Swimlane to keep the task in.
    pub swimlane_id: SwimlaneId,
    /// Whether to append instead of using `position`.
    pub append: bool,
}

/// Board layout contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Returns the project's last workflow column.
    ///
    /// # Errors
    ///
    /// Returns [`super::StoreError::NotFound`] when the project has no
    /// columns.
    async fn last_column_id(&self, project_id: ProjectId) -> StoreResult<ColumnId>;

    /// Moves a task to another column.
    async fn move_task(&self, request: &MoveTaskRequest) -> StoreResult<()>;

    /// Returns the tags attached to a task.
    async fn tags_for_task(&self, task_id: TaskId) -> StoreResult<Vec<TaskTag>>;
}
