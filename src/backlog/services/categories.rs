//! Ensures the categories referenced by a batch exist in the project.

use crate::backlog::{
    domain::{CategoryId, Comment, ProjectId},
    ports::{CategoryStore, StoreResult},
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Category names mapped to identifiers for one project and one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap {
    ids: HashMap<String, CategoryId>,
}

impl CategoryMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a category.
    pub fn insert(&mut self, name: impl Into<String>, id: CategoryId) {
        self.ids.insert(name.into(), id);
    }

    /// Returns the identifier of the category called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<CategoryId> {
        self.ids.get(name).copied()
    }

    /// Returns whether a category called `name` is known.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Returns the number of known categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns whether no category is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Category map together with the names created while building it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedCategories {
    /// Every usable category, existing and new.
    pub map: CategoryMap,
    /// Names created during this run, or that a dry run would create.
    pub created: Vec<String>,
}

/// Builds the category map for a batch, creating missing categories.
#[derive(Clone)]
pub struct CategoryResolver<K>
where
    K: CategoryStore,
{
    categories: Arc<K>,
}

impl<K> CategoryResolver<K>
where
    K: CategoryStore,
{
    /// Creates a resolver over the category store.
    #[must_use]
    pub const fn new(categories: Arc<K>) -> Self {
        Self { categories }
    }

    /// Resolves every category named in `comments`.
    ///
    /// Each missing name is created once, in order of first appearance.
    /// A failed creation, or one returning no identifier, is logged and the
    /// name stays unmapped. In a dry run nothing is created and missing
    /// names stay unmapped but are still reported in `created`.
    ///
    /// # Errors
    ///
    /// Returns the store error when the existing categories cannot be
    /// listed.
    pub async fn resolve(
        &self,
        project_id: ProjectId,
        comments: &[Comment],
        dry_run: bool,
    ) -> StoreResult<ResolvedCategories> {
        let mut resolved = ResolvedCategories::default();
        for category in self.categories.list(project_id).await? {
            resolved.map.insert(category.name, category.id);
        }

        for name in distinct_categories(comments) {
            if resolved.map.contains(name) {
                continue;
            }
            if dry_run {
                resolved.created.push(name.to_owned());
                continue;
            }
            match self.categories.create(project_id, name).await {
                Ok(Some(id)) => {
                    debug!(project = %project_id, category = name, "created category");
                    resolved.map.insert(name, id);
                    resolved.created.push(name.to_owned());
                }
                Ok(None) => {
                    warn!(
                        project = %project_id,
                        category = name,
                        "category creation returned no identifier"
                    );
                }
                Err(err) => {
                    warn!(
                        project = %project_id,
                        category = name,
                        error = %err,
                        "category creation failed"
                    );
                }
            }
        }

        Ok(resolved)
    }
}

/// Distinct non-blank category names in order of first appearance.
fn distinct_categories(comments: &[Comment]) -> Vec<&str> {
    let mut seen = HashSet::new();
    comments
        .iter()
        .filter_map(Comment::category)
        .filter(|name| seen.insert(*name))
        .collect()
}
