//! Category read and write contract.

use super::StoreResult;
use crate::backlog::domain::{CategoryId, ProjectId};
use async_trait::async_trait;

/// Category record scoped to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Category identifier.
    pub id: CategoryId,
    /// Category name, unique within the project.
    pub name: String,
}

/// Category persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Returns the project's categories.
    async fn list(&self, project_id: ProjectId) -> StoreResult<Vec<Category>>;

    /// Creates a category.
    ///
    /// Returns `None` when the store accepted the call but produced no usable
    /// identifier.
    async fn create(&self, project_id: ProjectId, name: &str) -> StoreResult<Option<CategoryId>>;
}
