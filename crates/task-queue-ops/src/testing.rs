//! Fakes shared by the flow tests.

use crate::Prompt;
use async_trait::async_trait;
use std::io::Cursor;
use std::sync::Mutex;
use task_queue_client::{ClientError, Result, TaskQueueControl};
use task_queue_core::{ActiveTasks, RevokeSignal, TaskHandle, TaskId, TaskSignature};

#[derive(Default)]
pub struct FakeBroker {
    pub active: ActiveTasks,
    pub sent: Mutex<Vec<TaskSignature>>,
    pub revoked: Mutex<Vec<(TaskId, bool, RevokeSignal)>>,
    pub reject_send: bool,
}

impl FakeBroker {
    pub fn with_active(active: ActiveTasks) -> Self {
        FakeBroker {
            active,
            ..FakeBroker::default()
        }
    }

    pub fn revoked_ids(&self) -> Vec<TaskId> {
        self.revoked.lock().unwrap().iter().map(|(id, _, _)| *id).collect()
    }
}

#[async_trait]
impl TaskQueueControl for FakeBroker {
    async fn send_task(&self, signature: TaskSignature) -> Result<TaskHandle> {
        if self.reject_send {
            return Err(ClientError::ServerError("unknown queue".to_string()));
        }
        let handle = signature.handle();
        self.sent.lock().unwrap().push(signature);
        Ok(handle)
    }

    async fn revoke(&self, task_id: TaskId, terminate: bool, signal: RevokeSignal) -> Result<()> {
        self.revoked.lock().unwrap().push((task_id, terminate, signal));
        Ok(())
    }

    async fn inspect_active(&self) -> Result<ActiveTasks> {
        Ok(self.active.clone())
    }
}

pub type TestPrompt = Prompt<Cursor<Vec<u8>>, Vec<u8>>;

pub fn prompt(input: &str) -> TestPrompt {
    Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

pub fn output(prompt: TestPrompt) -> String {
    String::from_utf8(prompt.into_output()).unwrap()
}
