//! Run configuration for backlog reconciliation.

use crate::backlog::{domain::ColorPalette, ports::RetirePlacement};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a configuration document cannot be parsed.
#[derive(Debug, Error)]
#[error("invalid import configuration: {0}")]
pub struct ConfigError(#[from] serde_json::Error);

/// Settings applied to every reconciliation run of a service.
///
/// Every field has a default, so an empty JSON object is a valid
/// configuration.
///
/// # Examples
///
/// ```rust
/// use tdg_sync::backlog::{config::ImportConfig, ports::RetirePlacement};
///
/// let config = ImportConfig::from_json_str(r#"{"retire_placement": "append"}"#)
///     .expect("valid configuration");
/// assert_eq!(config.retire_placement, RetirePlacement::Append);
/// assert_eq!(config.palette.bug, "red");
/// assert!(!config.dry_run);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Color names per annotation keyword.
    pub palette: ColorPalette,
    /// Placement of retired tasks in the last column.
    pub retire_placement: RetirePlacement,
    /// Computes outcomes without writing to the tracker.
    pub dry_run: bool,
}

impl ImportConfig {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the document is not valid JSON or holds
    /// fields of the wrong type.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(document)?)
    }

    /// Returns a copy with dry-run mode switched on or off.
    #[must_use]
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns a copy with the given retirement placement.
    #[must_use]
    pub fn with_retire_placement(mut self, placement: RetirePlacement) -> Self {
        self.retire_placement = placement;
        self
    }
}
