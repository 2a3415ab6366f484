//! Task tags used to record branch ownership and issue linkage.

use super::BacklogDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix marking the branch a task was first imported from.
const BRANCH_PREFIX: char = '@';

/// Prefix marking an external issue linked to a task.
const ISSUE_PREFIX: char = '#';

/// A single task tag, such as `@main` or `#42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTag(String);

impl TaskTag {
    /// Creates a tag from a raw tag name.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogDomainError::EmptyTag`] when the value is empty after
    /// trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, BacklogDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(BacklogDomainError::EmptyTag);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the ownership tag for `branch`, or `None` for an empty branch.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tdg_sync::backlog::domain::TaskTag;
    ///
    /// let tag = TaskTag::branch("main").expect("non-empty branch");
    /// assert_eq!(tag.as_str(), "@main");
    /// assert!(TaskTag::branch("").is_none());
    /// ```
    #[must_use]
    pub fn branch(branch: &str) -> Option<Self> {
        let normalized = branch.trim();
        (!normalized.is_empty()).then(|| Self(format!("{BRANCH_PREFIX}{normalized}")))
    }

    /// Returns the linkage tag for `issue`, or `None` for an empty issue.
    #[must_use]
    pub fn issue(issue: &str) -> Option<Self> {
        let normalized = issue.trim();
        (!normalized.is_empty()).then(|| Self(format!("{ISSUE_PREFIX}{normalized}")))
    }

    /// Returns the tags assigned to a newly created task.
    #[must_use]
    pub fn for_new_task(branch: &str, issue: Option<&str>) -> Vec<Self> {
        Self::branch(branch)
            .into_iter()
            .chain(issue.and_then(Self::issue))
            .collect()
    }

    /// Returns whether this tag records ownership by `branch`.
    ///
    /// Only an exact match counts; `@main` does not own `main-2`.
    #[must_use]
    pub fn is_owned_by(&self, branch: &str) -> bool {
        Self::branch(branch).is_some_and(|owner| owner == *self)
    }

    /// Returns the tag as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
