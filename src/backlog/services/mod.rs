//! Application services for backlog reconciliation.
//!
//! [`SnapshotLoader`], [`CategoryResolver`], [`ColorResolver`] and
//! [`BranchCloseGuard`] are the building blocks; [`Reconciler`] drives one
//! run over them and [`TodoImportService`] wraps it with project resolution
//! and authorization.

mod categories;
mod colors;
mod guard;
mod import;
mod reconciler;
mod snapshot;

pub use categories::{CategoryMap, CategoryResolver, ResolvedCategories};
pub use colors::ColorResolver;
pub use guard::BranchCloseGuard;
pub use import::{ImportError, ImportResult, ImportTodoCommentsRequest, TodoImportService};
pub use reconciler::{ReconcileError, ReconcileResult, Reconciler};
pub use snapshot::SnapshotLoader;
