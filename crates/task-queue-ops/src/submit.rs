//! Submit a task, then offer to revoke it.

use crate::config::TaskConfig;
use crate::{Prompt, Result};
use std::io::{BufRead, Write};
use task_queue_client::TaskQueueControl;
use task_queue_core::{RevokeSignal, TaskHandle, TaskSignature, WorkerName};
use tracing::{debug, info};

/// Command-line values that take precedence over the `task` config section
#[derive(Debug, Clone, Default)]
pub struct TaskOverrides {
    pub name: Option<String>,
    pub payload: Option<String>,
    pub queue: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub handle: TaskHandle,
    pub revoked: bool,
}

/// Build the signature to submit. Flags win over the config file; with no
/// queue from either, `local` supplies the `<user>@<host>` queue.
pub fn signature_from<F>(
    config: &TaskConfig,
    overrides: TaskOverrides,
    local: F,
) -> Result<TaskSignature>
where
    F: FnOnce() -> Result<WorkerName>,
{
    let queue = match overrides.queue.or_else(|| config.queue.clone()) {
        Some(queue) => queue,
        None => {
            let local = local()?;
            debug!("No queue configured, using local queue {}", local);
            local.to_string()
        }
    };
    let name = overrides.name.unwrap_or_else(|| config.name.clone());
    let payload = overrides
        .payload
        .unwrap_or_else(|| config.payload.clone())
        .into_bytes();

    let signature = TaskSignature::new(name, payload, queue)?;
    Ok(signature)
}

/// Send `signature`, print its handle and id, and revoke it with forced
/// termination if the operator confirms.
pub async fn submit_task<C, R, W>(
    client: &C,
    prompt: &mut Prompt<R, W>,
    signature: TaskSignature,
    signal: RevokeSignal,
) -> Result<SubmitOutcome>
where
    C: TaskQueueControl + ?Sized,
    R: BufRead,
    W: Write,
{
    let handle = client.send_task(signature).await?;
    info!("Submitted {} to queue {}", handle.id, handle.queue);

    prompt.say(&handle)?;
    prompt.say(handle.id)?;

    if !prompt.confirm(format_args!("Revoke task {}?", handle.id))? {
        return Ok(SubmitOutcome { handle, revoked: false });
    }

    client.revoke(handle.id, true, signal).await?;
    prompt.say(format_args!("Task {} revoked", handle.id))?;

    Ok(SubmitOutcome { handle, revoked: true })
}
