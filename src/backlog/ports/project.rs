//! Project lookup and import authorization.

use super::StoreResult;
use crate::backlog::domain::ProjectId;
use async_trait::async_trait;

/// Project record as returned by the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Project identifier.
    pub id: ProjectId,
    /// Unique project name.
    pub name: String,
}

/// Project directory contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectDirectory: Send + Sync {
    /// Finds a project by its unique name.
    ///
    /// Returns `None` when no project has that name.
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Project>>;

    /// Checks that `author` may import comments into `project_id`.
    ///
    /// # Errors
    ///
    /// Returns [`super::StoreError::Forbidden`] when the author lacks access.
    async fn authorize_import(&self, project_id: ProjectId, author: &str) -> StoreResult<()>;
}
