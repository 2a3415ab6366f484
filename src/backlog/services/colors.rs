//! Resolves the configured palette against the tracker's color catalog.

use crate::backlog::{
    domain::{ColorMap, ColorPalette},
    ports::ColorCatalog,
};
use std::sync::Arc;
use tracing::warn;

/// Turns palette color names into catalog color identifiers.
#[derive(Clone)]
pub struct ColorResolver<L>
where
    L: ColorCatalog,
{
    catalog: Arc<L>,
}

impl<L> ColorResolver<L>
where
    L: ColorCatalog,
{
    /// Creates a resolver over the color catalog.
    #[must_use]
    pub const fn new(catalog: Arc<L>) -> Self {
        Self { catalog }
    }

    /// Looks up every palette entry once.
    ///
    /// Names the catalog does not know, and failed lookups, leave that
    /// keyword without a color.
    pub async fn resolve(&self, palette: &ColorPalette) -> ColorMap {
        let mut colors = ColorMap::new();
        for (kind, name) in palette.entries() {
            match self.catalog.find_by_name(name).await {
                Ok(Some(color_id)) => colors.insert(kind, color_id),
                Ok(None) => warn!(%kind, color = name, "color not found in catalog"),
                Err(err) => warn!(%kind, color = name, error = %err, "color lookup failed"),
            }
        }
        colors
    }
}
