use crate::{ClientError, Result, TaskQueueControl, DEFAULT_INSPECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
use task_queue_core::{
    ActiveTasks, RevokeRequest, RevokeSignal, TaskHandle, TaskId, TaskSignature, WorkerName,
};
use task_queue_protocol::{
    InspectActiveRequest, Message, MessageCodec, RevokeTasksRequest, SendTaskRequest,
};

use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_util::codec::Framed;
use tracing::debug;

/// Async client for task queue
pub struct TaskQueueAsyncClient {
    broker_address: String,
    request_timeout: Duration,
    inspect_timeout: Duration,
}

impl TaskQueueAsyncClient {
    /// Connect to broker
    pub async fn connect(broker_address: impl Into<String>) -> Result<Self> {
        Self::connect_with_timeout(broker_address, DEFAULT_REQUEST_TIMEOUT).await
    }

    /// Connect to broker, bounding every request by `request_timeout`
    pub async fn connect_with_timeout(
        broker_address: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self> {
        let client = TaskQueueAsyncClient {
            broker_address: broker_address.into(),
            request_timeout,
            inspect_timeout: DEFAULT_INSPECT_TIMEOUT,
        };

        // Test connection
        let _ = client.open().await?;

        Ok(client)
    }

    /// Set how long the broker collects worker replies during inspection
    pub fn with_inspect_timeout(mut self, inspect_timeout: Duration) -> Self {
        self.inspect_timeout = inspect_timeout;
        self
    }

    async fn open(&self) -> Result<TcpStream> {
        // Outer error is the elapsed timer, inner the connect failure
        tokio::time::timeout(self.request_timeout, TcpStream::connect(&self.broker_address))
            .await
            .map_err(|_| ClientError::Timeout)?
            .map_err(|e| ClientError::ConnectionError(e.to_string()))
    }

    /// Send one message on a fresh connection and wait for the reply
    async fn request(&self, message: Message) -> Result<Message> {
        // One connection per request; the broker closes it after replying
        let stream = self.open().await?;
        let mut framed = Framed::new(stream, MessageCodec);

        debug!("Sending {:?} to {}", message.message_type(), self.broker_address);

        let exchange = async {
            // Send request
            framed
                .send(message)
                .await
                .map_err(|e| ClientError::ProtocolError(e.to_string()))?;

            // Wait for the reply
            match framed.next().await {
                Some(Ok(Message::Nack(nack))) => Err(ClientError::ServerError(nack.error)),
                Some(Ok(reply)) => Ok(reply),
                Some(Err(e)) => Err(ClientError::ProtocolError(e.to_string())),
                None => Err(ClientError::ConnectionError("Connection closed".to_string())),
            }
        };

        // Inspection replies arrive only after the broker's own collection window
        tokio::time::timeout(self.request_timeout + self.inspect_timeout, exchange)
            .await
            .map_err(|_| ClientError::Timeout)?
    }

    /// Submit a task
    pub async fn send_task(&self, signature: TaskSignature) -> Result<TaskHandle> {
        let handle = signature.handle();

        match self.request(Message::SendTask(SendTaskRequest { signature })).await? {
            Message::Ack(_) => Ok(handle),
            _ => Err(ClientError::ProtocolError("Unexpected response".to_string())),
        }
    }

    /// Revoke a single task
    pub async fn revoke(
        &self,
        task_id: TaskId,
        terminate: bool,
        signal: RevokeSignal,
    ) -> Result<()> {
        self.revoke_many(RevokeRequest {
            task_ids: vec![task_id],
            terminate,
            signal,
        })
        .await
    }

    /// Revoke every task in the request
    pub async fn revoke_many(&self, request: RevokeRequest) -> Result<()> {
        match self.request(Message::Revoke(RevokeTasksRequest { request })).await? {
            Message::Ack(_) => Ok(()),
            _ => Err(ClientError::ProtocolError("Unexpected response".to_string())),
        }
    }

    /// Inspect active tasks, optionally restricted to some workers
    pub async fn inspect_active(
        &self,
        destination: Option<Vec<WorkerName>>,
    ) -> Result<ActiveTasks> {
        let message = Message::InspectActive(InspectActiveRequest {
            destination,
            reply_timeout_ms: self.inspect_timeout.as_millis() as u64,
        });

        match self.request(message).await? {
            Message::ActiveReport(report) => Ok(report.active),
            _ => Err(ClientError::ProtocolError("Unexpected response".to_string())),
        }
    }
}

#[async_trait]
impl TaskQueueControl for TaskQueueAsyncClient {
    async fn send_task(&self, signature: TaskSignature) -> Result<TaskHandle> {
        TaskQueueAsyncClient::send_task(self, signature).await
    }

    async fn revoke(&self, task_id: TaskId, terminate: bool, signal: RevokeSignal) -> Result<()> {
        TaskQueueAsyncClient::revoke(self, task_id, terminate, signal).await
    }

    async fn inspect_active(&self) -> Result<ActiveTasks> {
        TaskQueueAsyncClient::inspect_active(self, None).await
    }
}
