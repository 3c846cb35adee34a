//! Event publisher that writes the audit feed to the `tracing` pipeline.

use async_trait::async_trait;
use tracing::info;

use crate::task::{
    domain::TaskEvent,
    ports::{TaskEventPublisher, TaskEventResult},
};

/// Emits each task event as a structured `tracing` record under the
/// `ambassador::audit` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    /// Creates the publisher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TaskEventPublisher for TracingEventPublisher {
    async fn publish(&self, event: &TaskEvent) -> TaskEventResult<()> {
        info!(
            target: "ambassador::audit",
            task_id = %event.task_id,
            project_id = %event.project_id,
            actor = %event.actor,
            actor_role = %event.actor_role,
            event = event.kind.label(),
            status = %event.status,
            occurred_at = %event.occurred_at,
            "task event"
        );
        Ok(())
    }
}
