//! Extracted source-comment records that form the input of a run.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Annotation keyword that introduced a comment.
///
/// Keywords outside the known set are preserved as [`CommentKind::Other`]
/// so a batch containing them still imports; such comments simply receive
/// no color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CommentKind {
    /// `TODO` annotation.
    Todo,
    /// `FIXME` annotation.
    Fixme,
    /// `BUG` annotation.
    Bug,
    /// `HACK` annotation.
    Hack,
    /// Any other annotation keyword, kept verbatim.
    Other(String),
}

impl CommentKind {
    /// Returns the keyword in canonical upper-case form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Todo => "TODO",
            Self::Fixme => "FIXME",
            Self::Bug => "BUG",
            Self::Hack => "HACK",
            Self::Other(keyword) => keyword,
        }
    }
}

impl From<&str> for CommentKind {
    fn from(value: &str) -> Self {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "TODO" => Self::Todo,
            "FIXME" => Self::Fixme,
            "BUG" => Self::Bug,
            "HACK" => Self::Hack,
            _ => Self::Other(value.trim().to_owned()),
        }
    }
}

impl From<String> for CommentKind {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<CommentKind> for String {
    fn from(value: CommentKind) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for CommentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted source-code annotation.
///
/// The wire shape matches the extraction tool's JSON output: `type`,
/// `title`, `body`, `file`, `line`, and optional `category` and `issue`.
/// Missing `title` and `body` deserialize as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "type")]
    kind: CommentKind,
    #[serde(default, deserialize_with = "null_as_empty")]
    title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    body: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    file: String,
    #[serde(default)]
    line: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(
        default,
        deserialize_with = "issue_reference",
        skip_serializing_if = "Option::is_none"
    )]
    issue: Option<String>,
}

impl Comment {
    /// Creates a comment with its identity-bearing content.
    #[must_use]
    pub fn new(kind: CommentKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            body: body.into(),
            file: String::new(),
            line: 0,
            category: None,
            issue: None,
        }
    }

    /// Sets the source location.
    #[must_use]
    pub fn at(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = file.into();
        self.line = line;
        self
    }

    /// Sets the free-form category label.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the external issue reference.
    #[must_use]
    pub fn with_issue(mut self, issue: impl Into<String>) -> Self {
        self.issue = Some(issue.into());
        self
    }

    /// Returns the annotation keyword.
    #[must_use]
    pub const fn kind(&self) -> &CommentKind {
        &self.kind
    }

    /// Returns the comment title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the comment body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the source file path.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the source line.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the `file:line` reference recorded on the task.
    #[must_use]
    pub fn reference(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }

    /// Returns the category label, or `None` when absent or blank.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }

    /// Returns the issue reference, or `None` when absent or blank.
    #[must_use]
    pub fn issue(&self) -> Option<&str> {
        non_blank(self.issue.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts issue references written either as strings or as bare numbers.
fn issue_reference<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawIssue {
        Text(String),
        Number(u64),
    }

    Ok(
        Option::<RawIssue>::deserialize(deserializer)?.map(|raw| match raw {
            RawIssue::Text(text) => text,
            RawIssue::Number(number) => number.to_string(),
        }),
    )
}
