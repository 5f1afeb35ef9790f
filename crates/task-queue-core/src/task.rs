use crate::{TaskError, Result, MAX_PAYLOAD_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a task
pub type TaskId = Uuid;

/// Registered task name (e.g., "send_email", "tasks.add")
pub type TaskName = String;

/// Task payload (arbitrary bytes)
pub type TaskPayload = Vec<u8>;

/// A request to run a named task on a named queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSignature {
    /// Identifier assigned at submission time
    pub id: TaskId,

    /// Task name the worker dispatches on
    pub name: TaskName,

    /// Task payload (arbitrary bytes, max 10MB)
    pub payload: TaskPayload,

    /// Queue the broker routes the task to
    pub queue: String,
}

impl TaskSignature {
    /// Create a new signature with a fresh identifier
    pub fn new(
        name: impl Into<TaskName>,
        payload: TaskPayload,
        queue: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let queue = queue.into();

        if name.trim().is_empty() {
            return Err(TaskError::EmptyTaskName);
        }

        if queue.trim().is_empty() {
            return Err(TaskError::EmptyQueueName);
        }

        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(TaskError::PayloadTooLarge {
                max: MAX_PAYLOAD_SIZE,
                actual: payload.len(),
            });
        }

        Ok(TaskSignature {
            id: Uuid::new_v4(),
            name,
            payload,
            queue,
        })
    }

    /// Handle the caller keeps once the broker accepted the signature
    pub fn handle(&self) -> TaskHandle {
        TaskHandle {
            id: self.id,
            name: self.name.clone(),
            queue: self.queue.clone(),
        }
    }
}

/// Reference to a submitted task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHandle {
    pub id: TaskId,
    pub name: TaskName,
    pub queue: String,
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<TaskHandle {}[{}]>", self.name, self.id)
    }
}
