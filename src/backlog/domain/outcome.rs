//! Per-item results and the run-level report.

use super::{ContentDigest, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason an item was left untouched during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The tracker rejected the assembled values.
    Validation(Vec<String>),
    /// The tracker could not validate the assembled values.
    ValidationUnavailable(String),
    /// The create or update call failed.
    WriteFailed(String),
    /// The task already sits in the last column.
    AlreadyRetired,
    /// The task does not carry the current branch's ownership tag.
    BranchNotOwned,
    /// The task's tags could not be read.
    GuardFailed(String),
    /// The move to the last column failed.
    MoveFailed(String),
}

impl SkipReason {
    /// Returns whether the skip was caused by a failure rather than by a
    /// deliberate decision to leave the task alone.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        !matches!(self, Self::AlreadyRetired | Self::BranchNotOwned)
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "validation failed: {}", errors.join("; ")),
            Self::ValidationUnavailable(message) => write!(f, "validation unavailable: {message}"),
            Self::WriteFailed(message) => write!(f, "write failed: {message}"),
            Self::AlreadyRetired => f.write_str("already in the last column"),
            Self::BranchNotOwned => f.write_str("not owned by the current branch"),
            Self::GuardFailed(message) => write!(f, "tag lookup failed: {message}"),
            Self::MoveFailed(message) => write!(f, "move failed: {message}"),
        }
    }
}

/// Result of processing one comment or one retirement candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ItemOutcome {
    /// A new task was created. `task_id` is `None` in a dry run.
    Created {
        /// Identifier assigned by the tracker.
        task_id: Option<TaskId>,
        /// Digest of the comment.
        digest: ContentDigest,
    },
    /// An existing task was refreshed from its comment.
    Updated {
        /// Identifier of the matched task.
        task_id: TaskId,
        /// Digest shared by the comment and the task.
        digest: ContentDigest,
    },
    /// A task whose comment vanished was moved to the last column.
    Retired {
        /// Identifier of the retired task.
        task_id: TaskId,
        /// Digest of the retired task.
        digest: ContentDigest,
    },
    /// The item was left untouched.
    Skipped {
        /// Task concerned, when the item referred to an existing task.
        task_id: Option<TaskId>,
        /// Digest of the comment or task.
        digest: ContentDigest,
        /// Why the item was skipped.
        reason: SkipReason,
    },
}

/// Summary of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    outcomes: Vec<ItemOutcome>,
    created: usize,
    updated: usize,
    retired: usize,
    skipped: usize,
    categories_created: Vec<String>,
    dry_run: bool,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl ImportReport {
    /// Starts an empty report.
    #[must_use]
    pub const fn new(started_at: DateTime<Utc>, dry_run: bool) -> Self {
        Self {
            outcomes: Vec::new(),
            created: 0,
            updated: 0,
            retired: 0,
            skipped: 0,
            categories_created: Vec::new(),
            dry_run,
            started_at,
            finished_at: None,
        }
    }

    /// Appends an outcome and updates the counters.
    pub fn record(&mut self, outcome: ItemOutcome) {
        match &outcome {
            ItemOutcome::Created { .. } => self.created += 1,
            ItemOutcome::Updated { .. } => self.updated += 1,
            ItemOutcome::Retired { .. } => self.retired += 1,
            ItemOutcome::Skipped { reason, .. } if reason.is_failure() => self.skipped += 1,
            ItemOutcome::Skipped { .. } => {}
        }
        self.outcomes.push(outcome);
    }

    /// Records the categories created while resolving the category map.
    pub fn set_categories_created(&mut self, names: Vec<String>) {
        self.categories_created = names;
    }

    /// Marks the run as finished.
    pub const fn finish(&mut self, finished_at: DateTime<Utc>) {
        self.finished_at = Some(finished_at);
    }

    /// Returns every outcome in dispatch order.
    #[must_use]
    pub fn outcomes(&self) -> &[ItemOutcome] {
        &self.outcomes
    }

    /// Returns the number of created tasks.
    #[must_use]
    pub const fn created(&self) -> usize {
        self.created
    }

    /// Returns the number of updated tasks.
    #[must_use]
    pub const fn updated(&self) -> usize {
        self.updated
    }

    /// Returns the number of retired tasks.
    #[must_use]
    pub const fn retired(&self) -> usize {
        self.retired
    }

    /// Returns the number of items skipped because of a failure.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns the category names created during the run.
    #[must_use]
    pub fn categories_created(&self) -> &[String] {
        &self.categories_created
    }

    /// Returns whether the run was a dry run.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the run start timestamp.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns the run completion timestamp, once finished.
    #[must_use]
    pub const fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Returns whether the run completed. Individual skipped items do not
    /// make a run unsuccessful.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.finished_at.is_some()
    }
}
