//! Task content and the proposed-change overlay used in negotiation.

use super::{ParsePlatformError, TaskDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Channel the task work is delivered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Twitter / X.
    Twitter,
    /// Discord.
    Discord,
    /// Telegram.
    Telegram,
    /// Any other channel.
    Other,
}

impl Platform {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Discord => "discord",
            Self::Telegram => "telegram",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Platform {
    type Error = ParsePlatformError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "twitter" | "x" => Ok(Self::Twitter),
            "discord" => Ok(Self::Discord),
            "telegram" => Ok(Self::Telegram),
            "other" => Ok(Self::Other),
            _ => Err(ParsePlatformError(value.to_owned())),
        }
    }
}

/// Negotiable terms of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskContent {
    title: String,
    description: String,
    platform: Platform,
    deliverables: Vec<String>,
}

impl TaskContent {
    /// Creates validated task content.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title,
    /// [`TaskDomainError::EmptyDeliverables`] when no deliverable is given,
    /// and [`TaskDomainError::EmptyDeliverable`] for a blank entry.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        platform: Platform,
        deliverables: impl IntoIterator<Item = String>,
    ) -> Result<Self, TaskDomainError> {
        Ok(Self {
            title: normalize_title(title.into())?,
            description: description.into().trim().to_owned(),
            platform,
            deliverables: normalize_deliverables(deliverables)?,
        })
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the delivery platform.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the ordered deliverables.
    #[must_use]
    pub fn deliverables(&self) -> &[String] {
        &self.deliverables
    }
}

/// Partial overlay of task content proposed during negotiation.
///
/// Only fields carrying a non-empty value replace the task's current terms
/// when the proposal is approved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    platform: Option<Platform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deliverables: Option<Vec<String>>,
}

impl ProposedChanges {
    /// Creates an empty overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Proposes a new title. Blank values are ignored.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = non_blank(title.into());
        self
    }

    /// Proposes a new description. Blank values are ignored.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_blank(description.into());
        self
    }

    /// Proposes a new platform.
    #[must_use]
    pub const fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Proposes a replacement deliverables list.
    ///
    /// Blank entries are dropped; an all-blank list proposes nothing.
    #[must_use]
    pub fn with_deliverables(mut self, deliverables: impl IntoIterator<Item = String>) -> Self {
        let cleaned: Vec<String> = deliverables.into_iter().filter_map(non_blank).collect();
        self.deliverables = (!cleaned.is_empty()).then_some(cleaned);
        self
    }

    /// Returns the proposed title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the proposed description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the proposed platform, if any.
    #[must_use]
    pub const fn platform(&self) -> Option<Platform> {
        self.platform
    }

    /// Returns the proposed deliverables, if any.
    #[must_use]
    pub fn deliverables(&self) -> Option<&[String]> {
        self.deliverables.as_deref()
    }

    /// Returns `true` when the overlay proposes no change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.platform.is_none()
            && self.deliverables.is_none()
    }

    /// Overlays the proposed fields onto `content`.
    pub(crate) fn apply_to(&self, content: &mut TaskContent) {
        if let Some(title) = &self.title {
            content.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            content.description.clone_from(description);
        }
        if let Some(platform) = self.platform {
            content.platform = platform;
        }
        if let Some(deliverables) = &self.deliverables {
            content.deliverables.clone_from(deliverables);
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn normalize_title(raw: String) -> Result<String, TaskDomainError> {
    non_blank(raw).ok_or(TaskDomainError::EmptyTitle)
}

fn normalize_deliverables(
    deliverables: impl IntoIterator<Item = String>,
) -> Result<Vec<String>, TaskDomainError> {
    let normalized = deliverables
        .into_iter()
        .enumerate()
        .map(|(position, entry)| {
            non_blank(entry).ok_or(TaskDomainError::EmptyDeliverable(position))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if normalized.is_empty() {
        return Err(TaskDomainError::EmptyDeliverables);
    }
    Ok(normalized)
}
