//! Retirement gate based on branch ownership tags.

use crate::backlog::{
    domain::{TaskId, TaskTag},
    ports::{BoardStore, StoreResult},
};
use std::sync::Arc;

/// Decides whether a task missing from a batch may be retired.
///
/// A run scoped to one branch only retires tasks that branch introduced,
/// so tasks imported from other branches survive scans of trees where their
/// comments simply do not exist. Tasks created without a branch carry no
/// ownership tag and are never retired.
#[derive(Clone)]
pub struct BranchCloseGuard<B>
where
    B: BoardStore,
{
    board: Arc<B>,
}

impl<B> BranchCloseGuard<B>
where
    B: BoardStore,
{
    /// Creates a guard reading tags from the board store.
    #[must_use]
    pub const fn new(board: Arc<B>) -> Self {
        Self { board }
    }

    /// Returns whether `task_id` carries the `@<branch>` ownership tag.
    ///
    /// An empty branch owns nothing, so this returns `false` without a
    /// lookup.
    ///
    /// # Errors
    ///
    /// Returns the store error when the task's tags cannot be read.
    pub async fn can_close(&self, task_id: TaskId, branch: &str) -> StoreResult<bool> {
        if TaskTag::branch(branch).is_none() {
            return Ok(false);
        }
        let tags = self.board.tags_for_task(task_id).await?;
        Ok(tags.iter().any(|tag| tag.is_owned_by(branch)))
    }
}
