use crate::async_client::TaskQueueAsyncClient;
use crate::{ClientError, Result, DEFAULT_REQUEST_TIMEOUT};
use std::time::Duration;
use task_queue_core::{ActiveTasks, RevokeSignal, TaskHandle, TaskId, TaskSignature, WorkerName};

/// Synchronous client for task queue (wraps async client)
pub struct TaskQueueClient {
    runtime: tokio::runtime::Runtime,
    broker_address: String,
    request_timeout: Duration,
}

impl TaskQueueClient {
    /// Connect to broker
    pub fn connect(broker_address: impl Into<String>) -> Result<Self> {
        Self::connect_with_timeout(broker_address, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn connect_with_timeout(
        broker_address: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

        Ok(TaskQueueClient {
            runtime,
            broker_address: broker_address.into(),
            request_timeout,
        })
    }

    fn with_client<T, F, Fut>(&self, f: F) -> Result<T>
    where
        F: FnOnce(TaskQueueAsyncClient) -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        self.runtime.block_on(async {
            let client =
                TaskQueueAsyncClient::connect_with_timeout(&self.broker_address, self.request_timeout)
                    .await?;
            f(client).await
        })
    }

    /// Submit a task
    pub fn send_task(&self, signature: TaskSignature) -> Result<TaskHandle> {
        self.with_client(|client| async move { client.send_task(signature).await })
    }

    /// Revoke a single task
    pub fn revoke(&self, task_id: TaskId, terminate: bool, signal: RevokeSignal) -> Result<()> {
        self.with_client(|client| async move { client.revoke(task_id, terminate, signal).await })
    }

    /// Inspect active tasks
    pub fn inspect_active(&self, destination: Option<Vec<WorkerName>>) -> Result<ActiveTasks> {
        self.with_client(|client| async move { client.inspect_active(destination).await })
    }
}
