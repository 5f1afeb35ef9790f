mod async_client;
mod sync_client;

pub use async_client::TaskQueueAsyncClient;
pub use sync_client::TaskQueueClient;

use async_trait::async_trait;
use std::time::Duration;
use task_queue_core::{ActiveTasks, RevokeSignal, TaskHandle, TaskId, TaskSignature};
use thiserror::Error;

/// Default bound on a single broker round-trip
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Default time the broker waits for inspection replies from workers
pub const DEFAULT_INSPECT_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Protocol error: {0}")]
    ProtocolError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Server error: {0}")]
    ServerError(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Broker operations the operator tools rely on
#[async_trait]
pub trait TaskQueueControl: Send + Sync {
    /// Publish a task and return its handle
    async fn send_task(&self, signature: TaskSignature) -> Result<TaskHandle>;

    /// Revoke a task, optionally terminating it if already running
    async fn revoke(&self, task_id: TaskId, terminate: bool, signal: RevokeSignal) -> Result<()>;

    /// Active tasks of every worker that answered
    async fn inspect_active(&self) -> Result<ActiveTasks>;
}
