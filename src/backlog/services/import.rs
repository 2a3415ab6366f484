//! Entry point for a comment import: project resolution, authorization,
//! reconciliation.

use super::{ReconcileError, Reconciler};
use crate::backlog::{
    domain::{BacklogDomainError, Comment, ImportReport},
    ports::{BoardStore, CategoryStore, ColorCatalog, ProjectDirectory, StoreError, TaskStore},
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for importing one batch of extracted comments.
///
/// Mirrors the remote call made by the extraction tool: the scanned `root`,
/// the `branch` it was scanned on, the importing `author`, the target
/// `project_name`, and the `comments` themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportTodoCommentsRequest {
    #[serde(default)]
    root: String,
    #[serde(default)]
    branch: String,
    #[serde(default)]
    author: String,
    project_name: String,
    #[serde(default)]
    comments: Vec<Comment>,
}

impl ImportTodoCommentsRequest {
    /// Creates a request with the fields the run depends on.
    #[must_use]
    pub fn new(
        project_name: impl Into<String>,
        branch: impl Into<String>,
        comments: Vec<Comment>,
    ) -> Self {
        Self {
            root: String::new(),
            branch: branch.into(),
            author: String::new(),
            project_name: project_name.into(),
            comments,
        }
    }

    /// Sets the scanned source root.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    /// Sets the importing author.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Parses a request from its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the document does not match the
    /// request shape.
    pub fn from_json_str(document: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(document)
    }

    /// Returns the scanned source root.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns the scanned branch.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Returns the importing author.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the target project name.
    #[must_use]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Returns the comment batch.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }
}

/// Service-level errors for comment imports.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Request validation failed.
    #[error(transparent)]
    Domain(#[from] BacklogDomainError),
    /// No project has the requested name.
    #[error("project not found: {0}")]
    ProjectNotFound(String),
    /// The author may not import into the project.
    #[error("import not authorized: {0}")]
    Unauthorized(#[source] StoreError),
    /// The project directory failed.
    #[error("project lookup failed: {0}")]
    Directory(#[source] StoreError),
    /// The run aborted before writing.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Comment import orchestration service.
#[derive(Clone)]
pub struct TodoImportService<P, T, B, K, L, C>
where
    P: ProjectDirectory,
    T: TaskStore,
    B: BoardStore,
    K: CategoryStore,
    L: ColorCatalog,
    C: Clock + Send + Sync,
{
    directory: Arc<P>,
    reconciler: Reconciler<T, B, K, L, C>,
}

impl<P, T, B, K, L, C> TodoImportService<P, T, B, K, L, C>
where
    P: ProjectDirectory,
    T: TaskStore,
    B: BoardStore,
    K: CategoryStore,
    L: ColorCatalog,
    C: Clock + Send + Sync,
{
    /// Creates a new import service.
    #[must_use]
    pub const fn new(directory: Arc<P>, reconciler: Reconciler<T, B, K, L, C>) -> Self {
        Self {
            directory,
            reconciler,
        }
    }

    /// Imports one comment batch into the named project.
    ///
    /// The project is resolved and the author authorized before anything
    /// is written. Callers must not run two imports for the same project
    /// concurrently.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::ProjectNotFound`] for an unknown project,
    /// [`ImportError::Unauthorized`] when the author is refused, and
    /// [`ImportError::Reconcile`] when the run cannot read the state it
    /// needs. Per-comment failures do not fail the import; they are counted
    /// in the returned report.
    pub async fn import_todo_comments(
        &self,
        request: &ImportTodoCommentsRequest,
    ) -> ImportResult<ImportReport> {
        let project_name = request.project_name.trim();
        if project_name.is_empty() {
            return Err(BacklogDomainError::EmptyProjectName.into());
        }

        let project = self
            .directory
            .find_by_name(project_name)
            .await
            .map_err(ImportError::Directory)?
            .ok_or_else(|| ImportError::ProjectNotFound(project_name.to_owned()))?;

        if let Err(err) = self
            .directory
            .authorize_import(project.id, &request.author)
            .await
        {
            warn!(
                project = %project.name,
                author = %request.author,
                error = %err,
                "import refused"
            );
            return Err(match err {
                StoreError::Forbidden(_) => ImportError::Unauthorized(err),
                other => ImportError::Directory(other),
            });
        }

        info!(
            project = %project.name,
            root = %request.root,
            author = %request.author,
            "importing comments"
        );
        Ok(self
            .reconciler
            .reconcile(project.id, &request.branch, &request.comments)
            .await?)
    }
}
