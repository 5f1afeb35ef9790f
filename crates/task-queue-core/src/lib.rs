mod task;
mod worker;
mod revoke;
mod error;

pub use task::{TaskHandle, TaskId, TaskName, TaskPayload, TaskSignature};
pub use worker::{ActiveTask, ActiveTasks, WorkerName};
pub use revoke::{RevokeRequest, RevokeSignal};
pub use error::{TaskError, Result};

pub const MAX_PAYLOAD_SIZE: usize = 10 * 1024 * 1024; // 10MB
