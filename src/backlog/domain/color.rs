//! Mapping from annotation keyword to task color.

use super::{ColorId, CommentKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Color names assigned to each known annotation keyword.
///
/// Names are looked up in the tracker's color catalog at the start of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorPalette {
    /// Color name for `TODO` comments.
    pub todo: String,
    /// Color name for `FIXME` comments.
    pub fixme: String,
    /// Color name for `BUG` comments.
    pub bug: String,
    /// Color name for `HACK` comments.
    pub hack: String,
}

impl ColorPalette {
    /// Returns the configured color name for `kind`.
    ///
    /// Unknown keywords have no color.
    #[must_use]
    pub fn name_for(&self, kind: &CommentKind) -> Option<&str> {
        match kind {
            CommentKind::Todo => Some(&self.todo),
            CommentKind::Fixme => Some(&self.fixme),
            CommentKind::Bug => Some(&self.bug),
            CommentKind::Hack => Some(&self.hack),
            CommentKind::Other(_) => None,
        }
    }

    /// Returns every known keyword with its configured color name.
    #[must_use]
    pub fn entries(&self) -> [(CommentKind, &str); 4] {
        [
            (CommentKind::Todo, self.todo.as_str()),
            (CommentKind::Fixme, self.fixme.as_str()),
            (CommentKind::Bug, self.bug.as_str()),
            (CommentKind::Hack, self.hack.as_str()),
        ]
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            todo: "green".to_owned(),
            fixme: "yellow".to_owned(),
            bug: "red".to_owned(),
            hack: "amber".to_owned(),
        }
    }
}

/// Colors resolved against the tracker for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorMap {
    colors: HashMap<CommentKind, ColorId>,
}

impl ColorMap {
    /// Creates an empty color map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the resolved color for `kind`.
    pub fn insert(&mut self, kind: CommentKind, color_id: ColorId) {
        self.colors.insert(kind, color_id);
    }

    /// Returns the resolved color for `kind`, if one was found.
    #[must_use]
    pub fn color_for(&self, kind: &CommentKind) -> Option<&ColorId> {
        self.colors.get(kind)
    }

    /// Returns the number of resolved colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns whether no color was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
