//! Tracked task snapshots and the value sets written back to the tracker.

use super::{CategoryId, ColorId, ColumnId, ContentDigest, ProjectId, SwimlaneId, TaskId, TaskTag};
use serde::{Deserialize, Serialize};

/// Snapshot of a task as read from the tracker.
///
/// The tracker owns the task; the fields here are the subset the
/// reconciliation engine reads or writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Tracker-assigned identifier.
    pub id: TaskId,
    /// Owning project.
    pub project_id: ProjectId,
    /// Task title, mirrored from the comment title.
    pub title: String,
    /// Task description, mirrored from the comment body.
    pub description: String,
    /// Resolved color, if any.
    pub color_id: Option<ColorId>,
    /// Resolved category, if any.
    pub category_id: Option<CategoryId>,
    /// Informational `file:line` reference.
    pub reference: String,
    /// Tags recorded at creation time.
    pub tags: Vec<TaskTag>,
    /// Current workflow column.
    pub column_id: ColumnId,
    /// Position within the column.
    pub position: u32,
    /// Current swimlane.
    pub swimlane_id: SwimlaneId,
}

impl Task {
    /// Returns the content digest identifying this task.
    #[must_use]
    pub fn digest(&self) -> ContentDigest {
        ContentDigest::of(&self.title, &self.description)
    }
}

/// Value set submitted to the tracker for a create or an update.
///
/// `id` is present exactly for updates. `tags` is present exactly for
/// creates: tags are written once and never touched by later updates.
/// On an update, an absent `color_id` or `category_id` leaves the stored
/// value unchanged rather than clearing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskValues {
    /// Target task for an update; `None` for a create.
    pub id: Option<TaskId>,
    /// Owning project.
    pub project_id: ProjectId,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// `file:line` reference.
    pub reference: String,
    /// Resolved color; `None` keeps the current color on update.
    pub color_id: Option<ColorId>,
    /// Resolved category; `None` keeps the current category on update.
    pub category_id: Option<CategoryId>,
    /// Tags to assign at creation; `None` leaves tags untouched.
    pub tags: Option<Vec<TaskTag>>,
}
