use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Payload size exceeds maximum allowed size of {max} bytes (got {actual})")]
    PayloadTooLarge { max: usize, actual: usize },

    #[error("Task name must not be empty")]
    EmptyTaskName,

    #[error("Queue name must not be empty")]
    EmptyQueueName,

    #[error("Invalid worker name: {0:?}")]
    InvalidWorkerName(String),

    #[error("Unknown signal: {0}")]
    UnknownSignal(String),
}

pub type Result<T> = std::result::Result<T, TaskError>;
