//! TODO-comment backlog reconciliation.
//!
//! Keeps a project's task backlog in step with the `TODO`, `FIXME`, `BUG`
//! and `HACK` comments extracted from a source tree. Each run matches the
//! incoming comment batch against the tasks already tracked for a project by
//! content digest and decides, per comment, whether to create or update a
//! task, and, per vanished comment, whether its task may be retired.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]
//! - Run configuration in [`config`]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
