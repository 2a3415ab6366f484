//! In-memory tracker adapter.
//!
//! A small board model implementing every port, used by tests and by
//! embedders that want a reference store.

mod tracker;

pub use tracker::{InMemoryTracker, SeedTask};
