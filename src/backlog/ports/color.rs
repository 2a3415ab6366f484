//! Color catalog contract.

use super::StoreResult;
use crate::backlog::domain::ColorId;
use async_trait::async_trait;

/// Read-only catalog of the tracker's task colors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ColorCatalog: Send + Sync {
    /// Finds a color by display name, case-insensitively.
    ///
    /// Returns `None` when the catalog has no such color.
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<ColorId>>;
}
