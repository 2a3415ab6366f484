//! tdg-sync: TODO-comment backlog synchronization.
//!
//! This crate reconciles a task tracker's backlog with the annotation
//! comments (`TODO`, `FIXME`, `BUG`, `HACK`) extracted from a source tree.
//! Given one batch of comments for a project and branch, it creates tasks
//! for new comments, refreshes tasks whose comments are still present, and
//! retires tasks whose comments vanished from the branch that introduced
//! them.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure reconciliation records with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the task tracker's stores
//! - **Adapters**: Concrete implementations of ports (an in-memory board)
//!
//! # Modules
//!
//! - [`backlog`]: Comment matching, category resolution and task retirement

pub mod backlog;
