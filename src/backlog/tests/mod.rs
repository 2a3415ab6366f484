//! Unit tests for backlog reconciliation.
