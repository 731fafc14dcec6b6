use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Unique identifier for a task (e.g., task-0, task-7, task-120)
///
/// Ids are opaque to the board. The only place that looks inside one is
/// [`TaskId::numeric_suffix`], which the stock adjacency rule relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    const DEFAULT_PREFIX: &'static str = "task";
    const SEPARATOR: char = '-';

    /// Creates a new TaskId from a counter
    pub fn new(counter: u32) -> Self {
        Self(format!("{}{}{}", Self::DEFAULT_PREFIX, Self::SEPARATOR, counter))
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer after the last `-`, if there is one.
    ///
    /// ```
    /// use tasklane_core::TaskId;
    ///
    /// assert_eq!(TaskId::new(12).numeric_suffix(), Some(12));
    /// assert_eq!(TaskId::from("release-notes").numeric_suffix(), None);
    /// assert_eq!(TaskId::from("42").numeric_suffix(), None);
    /// ```
    pub fn numeric_suffix(&self) -> Option<u64> {
        let (_, suffix) = self.0.rsplit_once(Self::SEPARATOR)?;
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        suffix.parse().ok()
    }
}

impl FromStr for TaskId {
    type Err = crate::error::TasklaneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.len() != s.len() {
            return Err(crate::error::TasklaneError::InvalidTaskId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A card on the board. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub content: String,
}

impl Task {
    /// Creates a new task with the given ID and content
    pub fn new(id: TaskId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
        }
    }

    /// Task numbered `counter` with the stock `Task <n>` content.
    pub fn numbered(counter: u32) -> Self {
        Self::new(TaskId::new(counter), format!("Task {}", counter))
    }
}
