use serde::{Deserialize, Serialize};
use task_queue_core::{ActiveTasks, RevokeRequest, TaskSignature, WorkerName};

/// Message types for the TCP protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum MessageType {
    SendTask = 1,
    Revoke = 2,
    InspectActive = 3,
    ActiveReport = 4,
    Ack = 5,
    Nack = 6,
}

impl MessageType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(MessageType::SendTask),
            2 => Some(MessageType::Revoke),
            3 => Some(MessageType::InspectActive),
            4 => Some(MessageType::ActiveReport),
            5 => Some(MessageType::Ack),
            6 => Some(MessageType::Nack),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

/// Protocol messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Message {
    /// Publish a task to a queue
    SendTask(SendTaskRequest),

    /// Broadcast a revoke to the workers
    Revoke(RevokeTasksRequest),

    /// Ask workers for their currently executing tasks
    InspectActive(InspectActiveRequest),

    /// Collected inspection replies
    ActiveReport(ActiveReport),

    /// Positive acknowledgment
    Ack(AckResponse),

    /// Negative acknowledgment
    Nack(NackResponse),
}

impl Message {
    pub fn message_type(&self) -> MessageType {
        match self {
            Message::SendTask(_) => MessageType::SendTask,
            Message::Revoke(_) => MessageType::Revoke,
            Message::InspectActive(_) => MessageType::InspectActive,
            Message::ActiveReport(_) => MessageType::ActiveReport,
            Message::Ack(_) => MessageType::Ack,
            Message::Nack(_) => MessageType::Nack,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendTaskRequest {
    pub signature: TaskSignature,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokeTasksRequest {
    pub request: RevokeRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectActiveRequest {
    /// Only ask these workers; `None` broadcasts to all
    pub destination: Option<Vec<WorkerName>>,
    /// How long the broker collects worker replies
    pub reply_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveReport {
    pub active: ActiveTasks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    /// Optional message
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NackResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_conversion() {
        assert_eq!(MessageType::from_u8(1), Some(MessageType::SendTask));
        assert_eq!(MessageType::from_u8(4), Some(MessageType::ActiveReport));
        assert_eq!(MessageType::from_u8(0), None);
        assert_eq!(MessageType::from_u8(99), None);

        assert_eq!(MessageType::Revoke.as_u8(), 2);
        assert_eq!(MessageType::Nack.as_u8(), 6);
    }

    #[test]
    fn test_message_reports_its_type() {
        let ack = Message::Ack(AckResponse { message: None });
        assert_eq!(ack.message_type(), MessageType::Ack);

        let inspect = Message::InspectActive(InspectActiveRequest {
            destination: None,
            reply_timeout_ms: 1000,
        });
        assert_eq!(inspect.message_type(), MessageType::InspectActive);
    }
}
