//! Caller identity and role capability.
//!
//! Authentication happens outside the engine. Callers arrive as an opaque
//! principal string together with the role the authentication layer granted
//! them, and every service operation receives that pairing explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Errors returned while constructing identity values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The principal string is empty after trimming.
    #[error("user principal must not be empty")]
    EmptyPrincipal,
}

/// Opaque principal identifying a platform user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a user principal.
    ///
    /// The value is opaque: only surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::EmptyPrincipal`] for blank input.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentityError::EmptyPrincipal);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the principal as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a published project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Creates a new random project identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a project identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role capability granted to a caller by the authentication layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallerRole {
    /// A regular platform user acting on their own records.
    User,
    /// A project administrator.
    Admin,
}

impl CallerRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for CallerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated caller of an engine operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Caller {
    principal: UserId,
    role: CallerRole,
}

impl Caller {
    /// Creates a caller acting as a regular user.
    #[must_use]
    pub const fn user(principal: UserId) -> Self {
        Self {
            principal,
            role: CallerRole::User,
        }
    }

    /// Creates a caller acting as an administrator.
    #[must_use]
    pub const fn admin(principal: UserId) -> Self {
        Self {
            principal,
            role: CallerRole::Admin,
        }
    }

    /// Returns the caller principal.
    #[must_use]
    pub const fn principal(&self) -> &UserId {
        &self.principal
    }

    /// Returns the caller role.
    #[must_use]
    pub const fn role(&self) -> CallerRole {
        self.role
    }

    /// Returns `true` when the caller holds the admin capability.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, CallerRole::Admin)
    }

    /// Returns `true` when the caller acts as the given user.
    #[must_use]
    pub fn is_user(&self, user: &UserId) -> bool {
        matches!(self.role, CallerRole::User) && &self.principal == user
    }
}
