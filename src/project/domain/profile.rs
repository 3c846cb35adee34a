//! Project profile as seen by the engine.

use super::{ChecklistItem, ChecklistTaskId, ProjectDomainError};
use crate::identity::ProjectId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Engine-relevant view of a published project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectProfile {
    id: ProjectId,
    name: String,
    collaboration_enabled: bool,
    checklist: Vec<ChecklistItem>,
}

impl ProjectProfile {
    /// Creates a profile with collaboration disabled and an empty checklist.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectName`] for a blank name.
    pub fn new(id: ProjectId, name: impl Into<String>) -> Result<Self, ProjectDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ProjectDomainError::EmptyProjectName);
        }
        Ok(Self {
            id,
            name: trimmed.to_owned(),
            collaboration_enabled: false,
            checklist: Vec::new(),
        })
    }

    /// Sets whether the project accepts ambassador applications.
    #[must_use]
    pub const fn with_collaboration(mut self, enabled: bool) -> Self {
        self.collaboration_enabled = enabled;
        self
    }

    /// Sets the checklist catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::DuplicateChecklistItem`] when two items
    /// share an identifier.
    pub fn with_checklist(
        mut self,
        items: impl IntoIterator<Item = ChecklistItem>,
    ) -> Result<Self, ProjectDomainError> {
        let catalog: Vec<ChecklistItem> = items.into_iter().collect();
        let mut seen = HashSet::new();
        for item in &catalog {
            if !seen.insert(item.id()) {
                return Err(ProjectDomainError::DuplicateChecklistItem(
                    item.id().clone(),
                ));
            }
        }
        self.checklist = catalog;
        Ok(self)
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` when the project accepts ambassador applications.
    #[must_use]
    pub const fn collaboration_enabled(&self) -> bool {
        self.collaboration_enabled
    }

    /// Returns the full checklist catalog in declaration order.
    #[must_use]
    pub fn checklist(&self) -> &[ChecklistItem] {
        &self.checklist
    }

    /// Looks up a checklist item by identifier.
    #[must_use]
    pub fn checklist_item(&self, id: &ChecklistTaskId) -> Option<&ChecklistItem> {
        self.checklist.iter().find(|item| item.id() == id)
    }
}
