//! Checklist catalog items offered by a project.

use super::{ParseChecklistKindError, ProjectDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a checklist item within a project catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChecklistTaskId(String);

impl ChecklistTaskId {
    /// Creates a validated checklist task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyChecklistTaskId`] for blank input.
    pub fn new(value: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProjectDomainError::EmptyChecklistTaskId);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChecklistTaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Channel a checklist item is carried out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistKind {
    /// Community server activity, optionally split into subtasks.
    Discord,
    /// Social network activity.
    Social,
}

impl ChecklistKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discord => "discord",
            Self::Social => "social",
        }
    }
}

impl fmt::Display for ChecklistKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ChecklistKind {
    type Error = ParseChecklistKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "discord" => Ok(Self::Discord),
            "social" => Ok(Self::Social),
            _ => Err(ParseChecklistKindError(value.to_owned())),
        }
    }
}

/// A catalog item users complete for points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    id: ChecklistTaskId,
    kind: ChecklistKind,
    title: String,
    points: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    subtasks: Vec<String>,
}

impl ChecklistItem {
    /// Creates a checklist item without subtasks.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyChecklistTitle`] for a blank title.
    pub fn new(
        id: ChecklistTaskId,
        kind: ChecklistKind,
        title: impl Into<String>,
        points: u64,
    ) -> Result<Self, ProjectDomainError> {
        let raw_title = title.into();
        let trimmed = raw_title.trim();
        if trimmed.is_empty() {
            return Err(ProjectDomainError::EmptyChecklistTitle);
        }
        Ok(Self {
            id,
            kind,
            title: trimmed.to_owned(),
            points,
            subtasks: Vec::new(),
        })
    }

    /// Declares the subtasks a submission must complete.
    ///
    /// Only discord items track subtasks; social items ignore them.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptySubtask`] when any label is blank.
    pub fn with_subtasks(
        mut self,
        subtasks: impl IntoIterator<Item = String>,
    ) -> Result<Self, ProjectDomainError> {
        let mut labels = Vec::new();
        for label in subtasks {
            let trimmed = label.trim();
            if trimmed.is_empty() {
                return Err(ProjectDomainError::EmptySubtask(self.id));
            }
            labels.push(trimmed.to_owned());
        }
        if self.kind == ChecklistKind::Discord {
            self.subtasks = labels;
        }
        Ok(self)
    }

    /// Returns the item identifier.
    #[must_use]
    pub const fn id(&self) -> &ChecklistTaskId {
        &self.id
    }

    /// Returns the item channel.
    #[must_use]
    pub const fn kind(&self) -> ChecklistKind {
        self.kind
    }

    /// Returns the item title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the points awarded for completing the item.
    #[must_use]
    pub const fn points(&self) -> u64 {
        self.points
    }

    /// Returns the declared subtask labels.
    #[must_use]
    pub fn subtasks(&self) -> &[String] {
        &self.subtasks
    }
}
