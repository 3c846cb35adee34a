//! Typed category selections for application profiles.

use super::{CollaborationDomainError, DetailCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One chosen entry in a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "note", rename_all = "snake_case")]
pub enum Selection {
    /// Chosen without further explanation.
    Default,
    /// Chosen with a free-text note, e.g. how the applicant covers it.
    CustomWithNote(String),
}

impl Selection {
    /// Creates a selection carrying a note.
    #[must_use]
    pub fn with_note(note: impl Into<String>) -> Self {
        Self::CustomWithNote(note.into().trim().to_owned())
    }

    /// Returns the note, if any.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::CustomWithNote(note) => Some(note),
        }
    }

    fn has_blank_note(&self) -> bool {
        matches!(self, Self::CustomWithNote(note) if note.trim().is_empty())
    }
}

/// Project niches an applicant can cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Niche {
    /// Decentralized finance.
    Defi,
    /// Games.
    Gaming,
    /// Collectibles and digital art.
    Nft,
    /// Infrastructure and tooling.
    Infrastructure,
    /// Education and onboarding.
    Education,
}

/// Chain ecosystems an applicant is active in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ecosystem {
    /// Ethereum and its rollups.
    Ethereum,
    /// Solana.
    Solana,
    /// Bitcoin.
    Bitcoin,
    /// Cosmos.
    Cosmos,
    /// Polkadot.
    Polkadot,
}

/// Audience segments an applicant reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudienceType {
    /// Builders.
    Developers,
    /// Traders.
    Traders,
    /// Content creators.
    Creators,
    /// Investors.
    Investors,
    /// General community members.
    Community,
}

/// Known categories plus an open list of named extensions.
///
/// Known categories are keyed by `K`; anything else is recorded under a
/// free-form name so new categories need no schema change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(deserialize = "K: Ord + Deserialize<'de>"))]
pub struct SelectionSet<K: Ord> {
    #[serde(default)]
    known: BTreeMap<K, Selection>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    extensions: BTreeMap<String, Selection>,
}

impl<K: Ord> Default for SelectionSet<K> {
    fn default() -> Self {
        Self {
            known: BTreeMap::new(),
            extensions: BTreeMap::new(),
        }
    }
}

impl<K: Ord> SelectionSet<K> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a known category.
    #[must_use]
    pub fn with(mut self, key: K) -> Self {
        self.known.insert(key, Selection::Default);
        self
    }

    /// Selects a known category with a note.
    #[must_use]
    pub fn with_note(mut self, key: K, note: impl Into<String>) -> Self {
        self.known.insert(key, Selection::with_note(note));
        self
    }

    /// Adds a named entry outside the known categories.
    #[must_use]
    pub fn with_extension(mut self, name: impl Into<String>, selection: Selection) -> Self {
        self.extensions
            .insert(name.into().trim().to_owned(), selection);
        self
    }

    /// Returns the selection for a known category.
    #[must_use]
    pub fn selection(&self, key: &K) -> Option<&Selection> {
        self.known.get(key)
    }

    /// Iterates over the known selections in category order.
    pub fn known(&self) -> impl Iterator<Item = (&K, &Selection)> {
        self.known.iter()
    }

    /// Iterates over the extension entries in name order.
    pub fn extensions(&self) -> impl Iterator<Item = (&str, &Selection)> {
        self.extensions
            .iter()
            .map(|(name, selection)| (name.as_str(), selection))
    }

    /// Returns the number of known and extension entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.known.len() + self.extensions.len()
    }

    /// Returns `true` when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.known.is_empty() && self.extensions.is_empty()
    }

    pub(crate) fn validate(&self, category: DetailCategory) -> Result<(), CollaborationDomainError> {
        if self.is_empty() {
            return Err(CollaborationDomainError::MissingDetail(category));
        }
        if self.extensions.keys().any(|name| name.is_empty()) {
            return Err(CollaborationDomainError::EmptyExtensionName(category));
        }
        let mut selections = self.known.values().chain(self.extensions.values());
        if selections.any(Selection::has_blank_note) {
            return Err(CollaborationDomainError::EmptyNote(category));
        }
        Ok(())
    }
}
