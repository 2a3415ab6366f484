//! Step definitions for comment import scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
