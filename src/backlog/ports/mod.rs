//! Port contracts for backlog reconciliation.
//!
//! Ports define the task tracker's stores as infrastructure-agnostic
//! interfaces. Each run calls them serially; implementations need not
//! serialize concurrent runs against the same project, the caller does.

pub mod board;
pub mod category;
pub mod color;
pub mod error;
pub mod project;
pub mod task;

pub use board::{BoardStore, MoveTaskRequest, RetirePlacement};
pub use category::{Category, CategoryStore};
pub use color::ColorCatalog;
pub use error::{StoreError, StoreResult};
pub use project::{Project, ProjectDirectory};
pub use task::{TaskStore, TaskValidation};
