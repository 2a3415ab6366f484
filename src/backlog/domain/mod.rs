//! Domain model for backlog reconciliation.
//!
//! Comments arrive as typed records, tasks are read back from the tracker as
//! typed snapshots, and both sides are keyed by a content digest so matching
//! is a map lookup rather than a pairwise comparison.

mod color;
mod comment;
mod digest;
mod error;
mod ids;
mod index;
mod outcome;
mod tag;
mod task;

pub use color::{ColorMap, ColorPalette};
pub use comment::{Comment, CommentKind};
pub use digest::ContentDigest;
pub use error::BacklogDomainError;
pub use ids::{CategoryId, ColorId, ColumnId, ProjectId, SwimlaneId, TaskId};
pub use index::DigestIndex;
pub use outcome::{ImportReport, ItemOutcome, SkipReason};
pub use tag::TaskTag;
pub use task::{Task, TaskValues};
