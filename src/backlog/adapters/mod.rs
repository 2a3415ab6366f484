//! Adapter implementations for backlog reconciliation ports.

pub mod memory;
