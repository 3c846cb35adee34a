//! Port for the task audit and communication feed.

use crate::task::domain::TaskEvent;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for event publication.
pub type TaskEventResult<T> = Result<T, TaskEventError>;

/// Receives an event after every committed task mutation.
///
/// Publication happens after the write commits, so implementations must not
/// assume they can veto the change they are told about.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskEventPublisher: Send + Sync {
    /// Publishes one event.
    ///
    /// # Errors
    ///
    /// Returns [`TaskEventError`] when the feed cannot accept the event.
    async fn publish(&self, event: &TaskEvent) -> TaskEventResult<()>;
}

/// Errors returned by event publishers.
#[derive(Debug, Clone, Error)]
pub enum TaskEventError {
    /// The feed is unavailable.
    #[error("event feed unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskEventError {
    /// Wraps a feed error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
