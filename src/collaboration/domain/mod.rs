//! Domain model for collaboration applications.

mod application;
mod details;
mod error;
mod ids;
mod selection;

pub use application::{
    ApplicationDecision, ApplicationStatus, CollaborationApplication, PersistedApplicationData,
};
pub use details::{ApplicationDetails, DetailCategory, SocialHandle, SocialPlatform};
pub use error::{CollaborationDomainError, ParseApplicationStatusError};
pub use ids::ApplicationId;
pub use selection::{AudienceType, Ecosystem, Niche, Selection, SelectionSet};
