//! Applicant profile submitted with a collaboration application.

use super::{AudienceType, CollaborationDomainError, Ecosystem, Niche, SelectionSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Required sections of an application profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailCategory {
    /// Spoken languages.
    Languages,
    /// Covered niches.
    Niches,
    /// Active ecosystems.
    Ecosystems,
    /// Reached audience segments.
    Audience,
    /// Social accounts.
    Socials,
    /// Free-text introduction.
    Description,
}

impl DetailCategory {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Languages => "languages",
            Self::Niches => "niches",
            Self::Ecosystems => "ecosystems",
            Self::Audience => "audience type",
            Self::Socials => "socials",
            Self::Description => "description",
        }
    }
}

impl fmt::Display for DetailCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Network a social handle lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialPlatform {
    /// Twitter / X.
    Twitter,
    /// Discord.
    Discord,
    /// Telegram.
    Telegram,
    /// YouTube.
    Youtube,
    /// Any other network.
    Other,
}

/// An applicant's account on one network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocialHandle {
    platform: SocialPlatform,
    handle: String,
}

impl SocialHandle {
    /// Creates a handle.
    ///
    /// # Errors
    ///
    /// Returns [`CollaborationDomainError::EmptySocialHandle`] for blank
    /// input.
    pub fn new(
        platform: SocialPlatform,
        handle: impl Into<String>,
    ) -> Result<Self, CollaborationDomainError> {
        let raw = handle.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CollaborationDomainError::EmptySocialHandle);
        }
        Ok(Self {
            platform,
            handle: trimmed.to_owned(),
        })
    }

    /// Returns the network.
    #[must_use]
    pub const fn platform(&self) -> SocialPlatform {
        self.platform
    }

    /// Returns the handle.
    #[must_use]
    pub fn handle(&self) -> &str {
        &self.handle
    }
}

/// Structured applicant profile.
///
/// Built incrementally; [`ApplicationDetails::validate`] checks that every
/// required category is present before an application is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDetails {
    #[serde(default)]
    languages: Vec<String>,
    #[serde(default)]
    niches: SelectionSet<Niche>,
    #[serde(default)]
    ecosystems: SelectionSet<Ecosystem>,
    #[serde(default)]
    audience: SelectionSet<AudienceType>,
    #[serde(default)]
    socials: Vec<SocialHandle>,
    #[serde(default)]
    description: String,
}

impl ApplicationDetails {
    /// Creates an empty profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the spoken languages. Blank and repeated entries are dropped.
    #[must_use]
    pub fn with_languages(mut self, languages: impl IntoIterator<Item = String>) -> Self {
        let mut cleaned: Vec<String> = Vec::new();
        for language in languages {
            let trimmed = language.trim();
            if !trimmed.is_empty() && !cleaned.iter().any(|known| known == trimmed) {
                cleaned.push(trimmed.to_owned());
            }
        }
        self.languages = cleaned;
        self
    }

    /// Sets the covered niches.
    #[must_use]
    pub fn with_niches(mut self, niches: SelectionSet<Niche>) -> Self {
        self.niches = niches;
        self
    }

    /// Sets the active ecosystems.
    #[must_use]
    pub fn with_ecosystems(mut self, ecosystems: SelectionSet<Ecosystem>) -> Self {
        self.ecosystems = ecosystems;
        self
    }

    /// Sets the reached audience segments.
    #[must_use]
    pub fn with_audience(mut self, audience: SelectionSet<AudienceType>) -> Self {
        self.audience = audience;
        self
    }

    /// Sets the social accounts.
    #[must_use]
    pub fn with_socials(mut self, socials: impl IntoIterator<Item = SocialHandle>) -> Self {
        self.socials = socials.into_iter().collect();
        self
    }

    /// Sets the free-text introduction.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into().trim().to_owned();
        self
    }

    /// Returns the spoken languages.
    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Returns the covered niches.
    #[must_use]
    pub const fn niches(&self) -> &SelectionSet<Niche> {
        &self.niches
    }

    /// Returns the active ecosystems.
    #[must_use]
    pub const fn ecosystems(&self) -> &SelectionSet<Ecosystem> {
        &self.ecosystems
    }

    /// Returns the reached audience segments.
    #[must_use]
    pub const fn audience(&self) -> &SelectionSet<AudienceType> {
        &self.audience
    }

    /// Returns the social accounts.
    #[must_use]
    pub fn socials(&self) -> &[SocialHandle] {
        &self.socials
    }

    /// Returns the free-text introduction.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Checks that every required category is present and well formed.
    ///
    /// Categories are checked in declaration order and the first failure is
    /// reported.
    ///
    /// # Errors
    ///
    /// Returns [`CollaborationDomainError::MissingDetail`] naming the first
    /// absent category, or a note or name error from a selection set.
    pub fn validate(&self) -> Result<(), CollaborationDomainError> {
        if self.languages.is_empty() {
            return Err(CollaborationDomainError::MissingDetail(
                DetailCategory::Languages,
            ));
        }
        self.niches.validate(DetailCategory::Niches)?;
        self.ecosystems.validate(DetailCategory::Ecosystems)?;
        self.audience.validate(DetailCategory::Audience)?;
        if self.socials.is_empty() {
            return Err(CollaborationDomainError::MissingDetail(
                DetailCategory::Socials,
            ));
        }
        if self.description.trim().is_empty() {
            return Err(CollaborationDomainError::MissingDetail(
                DetailCategory::Description,
            ));
        }
        Ok(())
    }
}
