//! Core reconciliation run: match, upsert, retire.

use super::{BranchCloseGuard, CategoryMap, CategoryResolver, ColorResolver, SnapshotLoader};
use crate::backlog::{
    config::ImportConfig,
    domain::{
        ColorMap, ColumnId, Comment, ContentDigest, DigestIndex, ImportReport, ItemOutcome,
        ProjectId, SkipReason, Task, TaskId, TaskTag, TaskValues,
    },
    ports::{
        BoardStore, CategoryStore, ColorCatalog, MoveTaskRequest, StoreError, TaskStore,
        TaskValidation,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a run before any task is written.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The existing tasks could not be listed.
    #[error("failed to load task snapshot: {0}")]
    Snapshot(#[source] StoreError),
    /// The existing categories could not be listed.
    #[error("failed to load categories: {0}")]
    Categories(#[source] StoreError),
    /// The project's last column could not be determined.
    #[error("failed to resolve last column: {0}")]
    LastColumn(#[source] StoreError),
}

/// Result type for reconciliation runs.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

/// Scoped parameters shared by every step of one run.
struct RunContext<'run> {
    project_id: ProjectId,
    branch: &'run str,
    last_column: ColumnId,
    categories: &'run CategoryMap,
    colors: &'run ColorMap,
}

impl RunContext<'_> {
    /// Assembles the value set for `comment`.
    ///
    /// Tags are only assigned when creating; an update leaves them alone.
    fn values_for(&self, comment: &Comment, existing: Option<TaskId>) -> TaskValues {
        let tags = existing
            .is_none()
            .then(|| TaskTag::for_new_task(self.branch, comment.issue()));
        TaskValues {
            id: existing,
            project_id: self.project_id,
            title: comment.title().to_owned(),
            description: comment.body().to_owned(),
            reference: comment.reference(),
            color_id: self.colors.color_for(comment.kind()).cloned(),
            category_id: comment
                .category()
                .and_then(|name| self.categories.get(name)),
            tags,
        }
    }
}

/// Reconciliation engine over the tracker's stores.
#[derive(Clone)]
pub struct Reconciler<T, B, K, L, C>
where
    T: TaskStore,
    B: BoardStore,
    K: CategoryStore,
    L: ColorCatalog,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    board: Arc<B>,
    snapshot: SnapshotLoader<T>,
    categories: CategoryResolver<K>,
    colors: ColorResolver<L>,
    guard: BranchCloseGuard<B>,
    clock: Arc<C>,
    config: ImportConfig,
}

impl<T, B, K, L, C> Reconciler<T, B, K, L, C>
where
    T: TaskStore,
    B: BoardStore,
    K: CategoryStore,
    L: ColorCatalog,
    C: Clock + Send + Sync,
{
    /// Creates a reconciler with the default configuration.
    #[must_use]
    pub fn new(
        tasks: Arc<T>,
        board: Arc<B>,
        categories: Arc<K>,
        colors: Arc<L>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            snapshot: SnapshotLoader::new(Arc::clone(&tasks)),
            guard: BranchCloseGuard::new(Arc::clone(&board)),
            categories: CategoryResolver::new(categories),
            colors: ColorResolver::new(colors),
            tasks,
            board,
            clock,
            config: ImportConfig::default(),
        }
    }

    /// Replaces the run configuration.
    #[must_use]
    pub fn with_config(mut self, config: ImportConfig) -> Self {
        self.config = config;
        self
    }

    /// Reconciles `comments` scanned on `branch` with the tasks of
    /// `project_id`.
    ///
    /// Every read the run depends on (task snapshot, last column, colors,
    /// existing categories) happens before the first write. Comments are
    /// then upserted in input order; a comment whose digest repeats later in
    /// the batch takes the later comment's values. Finally every existing
    /// task whose digest is absent from the batch is offered for retirement
    /// in snapshot order.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError`] when one of the up-front reads fails. Item
    /// failures after that point are recorded in the report instead.
    pub async fn reconcile(
        &self,
        project_id: ProjectId,
        branch: &str,
        comments: &[Comment],
    ) -> ReconcileResult<ImportReport> {
        let mut report = ImportReport::new(self.clock.utc(), self.config.dry_run);
        info!(
            project = %project_id,
            branch,
            comments = comments.len(),
            dry_run = self.config.dry_run,
            "reconciling comment batch"
        );

        let existing = self
            .snapshot
            .load(project_id)
            .await
            .map_err(ReconcileError::Snapshot)?;
        let last_column = self
            .board
            .last_column_id(project_id)
            .await
            .map_err(ReconcileError::LastColumn)?;
        let colors = self.colors.resolve(&self.config.palette).await;
        let categories = self
            .categories
            .resolve(project_id, comments, self.config.dry_run)
            .await
            .map_err(ReconcileError::Categories)?;
        report.set_categories_created(categories.created.clone());

        let incoming = DigestIndex::from_items(comments.iter(), |comment| {
            ContentDigest::of(comment.title(), comment.body())
        });
        let context = RunContext {
            project_id,
            branch,
            last_column,
            categories: &categories.map,
            colors: &colors,
        };

        for (digest, comment) in incoming.iter() {
            let outcome = self
                .upsert(&context, *digest, comment, existing.get(digest))
                .await;
            report.record(outcome);
        }

        for (digest, task) in existing.iter() {
            if incoming.contains(digest) {
                continue;
            }
            let outcome = self.retire(&context, *digest, task).await;
            report.record(outcome);
        }

        report.finish(self.clock.utc());
        info!(
            project = %project_id,
            branch,
            created = report.created(),
            updated = report.updated(),
            retired = report.retired(),
            skipped = report.skipped(),
            "comment batch reconciled"
        );
        Ok(report)
    }

    async fn upsert(
        &self,
        context: &RunContext<'_>,
        digest: ContentDigest,
        comment: &Comment,
        existing: Option<&Task>,
    ) -> ItemOutcome {
        let existing_id = existing.map(|task| task.id);
        let values = context.values_for(comment, existing_id);

        match self.tasks.validate(&values).await {
            Ok(TaskValidation::Valid) => {}
            Ok(TaskValidation::Invalid(errors)) => {
                return skipped(existing_id, digest, SkipReason::Validation(errors));
            }
            Err(err) => {
                return skipped(
                    existing_id,
                    digest,
                    SkipReason::ValidationUnavailable(err.to_string()),
                );
            }
        }

        match existing_id {
            Some(task_id) => self.update(task_id, digest, &values).await,
            None => self.create(digest, &values).await,
        }
    }

    async fn create(&self, digest: ContentDigest, values: &TaskValues) -> ItemOutcome {
        if self.config.dry_run {
            return ItemOutcome::Created {
                task_id: None,
                digest,
            };
        }
        match self.tasks.create(values).await {
            Ok(task_id) => {
                debug!(
                    task = %task_id,
                    digest = %digest.short(),
                    reference = %values.reference,
                    "created task"
                );
                ItemOutcome::Created {
                    task_id: Some(task_id),
                    digest,
                }
            }
            Err(err) => skipped(None, digest, SkipReason::WriteFailed(err.to_string())),
        }
    }

    async fn update(
        &self,
        task_id: TaskId,
        digest: ContentDigest,
        values: &TaskValues,
    ) -> ItemOutcome {
        if !self.config.dry_run {
            if let Err(err) = self.tasks.update(values).await {
                return skipped(Some(task_id), digest, SkipReason::WriteFailed(err.to_string()));
            }
            debug!(
                task = %task_id,
                digest = %digest.short(),
                reference = %values.reference,
                "updated task"
            );
        }
        ItemOutcome::Updated { task_id, digest }
    }

    async fn retire(
        &self,
        context: &RunContext<'_>,
        digest: ContentDigest,
        task: &Task,
    ) -> ItemOutcome {
        if task.column_id == context.last_column {
            return skipped(Some(task.id), digest, SkipReason::AlreadyRetired);
        }

        match self.guard.can_close(task.id, context.branch).await {
            Ok(true) => {}
            Ok(false) => return skipped(Some(task.id), digest, SkipReason::BranchNotOwned),
            Err(err) => {
                return skipped(Some(task.id), digest, SkipReason::GuardFailed(err.to_string()));
            }
        }

        if !self.config.dry_run {
            let request = MoveTaskRequest {
                project_id: context.project_id,
                task_id: task.id,
                column_id: context.last_column,
                position: task.position,
                swimlane_id: task.swimlane_id,
                append: self.config.retire_placement.is_append(),
            };
            if let Err(err) = self.board.move_task(&request).await {
                return skipped(Some(task.id), digest, SkipReason::MoveFailed(err.to_string()));
            }
            debug!(
                task = %task.id,
                digest = %digest.short(),
                column = %context.last_column,
                "retired task"
            );
        }
        ItemOutcome::Retired {
            task_id: task.id,
            digest,
        }
    }
}

fn skipped(task_id: Option<TaskId>, digest: ContentDigest, reason: SkipReason) -> ItemOutcome {
    if reason.is_failure() {
        warn!(digest = %digest.short(), %reason, "skipping item");
    } else {
        debug!(digest = %digest.short(), %reason, "leaving task untouched");
    }
    ItemOutcome::Skipped {
        task_id,
        digest,
        reason,
    }
}
