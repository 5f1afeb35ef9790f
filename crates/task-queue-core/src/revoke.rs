use crate::{TaskError, TaskId, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signal a worker sends to the process executing a terminated task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RevokeSignal {
    #[default]
    Term,
    Kill,
    Int,
    Quit,
    Hup,
}

impl RevokeSignal {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevokeSignal::Term => "TERM",
            RevokeSignal::Kill => "KILL",
            RevokeSignal::Int => "INT",
            RevokeSignal::Quit => "QUIT",
            RevokeSignal::Hup => "HUP",
        }
    }
}

impl fmt::Display for RevokeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SIG{}", self.as_str())
    }
}

impl FromStr for RevokeSignal {
    type Err = TaskError;

    /// Accepts `KILL`, `SIGKILL` and lowercase spellings
    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        let name = upper.strip_prefix("SIG").unwrap_or(&upper);

        match name {
            "TERM" => Ok(RevokeSignal::Term),
            "KILL" => Ok(RevokeSignal::Kill),
            "INT" => Ok(RevokeSignal::Int),
            "QUIT" => Ok(RevokeSignal::Quit),
            "HUP" => Ok(RevokeSignal::Hup),
            _ => Err(TaskError::UnknownSignal(s.to_string())),
        }
    }
}

/// Cancellation request for one or more tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokeRequest {
    pub task_ids: Vec<TaskId>,

    /// Also stop the task if a worker is already executing it
    pub terminate: bool,

    pub signal: RevokeSignal,
}

impl RevokeRequest {
    /// Revoke a single task, terminating it if it is running
    pub fn terminate(task_id: TaskId, signal: RevokeSignal) -> Self {
        RevokeRequest {
            task_ids: vec![task_id],
            terminate: true,
            signal,
        }
    }
}
