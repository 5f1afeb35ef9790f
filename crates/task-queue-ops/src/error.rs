use task_queue_client::ClientError;
use task_queue_core::TaskError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpsError {
    #[error("Broker error: {0}")]
    Client(#[from] ClientError),

    #[error("Invalid task: {0}")]
    Task(#[from] TaskError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Cannot determine {0}")]
    Identity(&'static str),

    #[error("Process table unavailable: {0}")]
    ProcessTable(String),

    #[error("Failed to signal process {pid}: {reason}")]
    Kill { pid: u32, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_yaml::Error> for OpsError {
    fn from(err: serde_yaml::Error) -> Self {
        OpsError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OpsError>;
