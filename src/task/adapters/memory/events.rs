//! Recording event publisher.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{TaskEvent, TaskId},
    ports::{TaskEventError, TaskEventPublisher, TaskEventResult},
};

/// Event publisher that keeps every event in memory, in publication order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventLog {
    events: Arc<RwLock<Vec<TaskEvent>>>,
}

impl InMemoryEventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<TaskEvent> {
        self.events
            .read()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Returns the recorded events for one task.
    #[must_use]
    pub fn events_for(&self, task_id: TaskId) -> Vec<TaskEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.task_id == task_id)
            .collect()
    }
}

#[async_trait]
impl TaskEventPublisher for InMemoryEventLog {
    async fn publish(&self, event: &TaskEvent) -> TaskEventResult<()> {
        let mut events = self
            .events
            .write()
            .map_err(|err| TaskEventError::unavailable(std::io::Error::other(err.to_string())))?;
        events.push(event.clone());
        Ok(())
    }
}
