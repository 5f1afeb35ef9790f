//! Abort every active task of one worker.

use crate::{Prompt, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use std::io::{BufRead, Write};
use std::process::ExitCode;
use task_queue_client::TaskQueueControl;
use task_queue_core::{ActiveTasks, RevokeSignal, TaskId, WorkerName};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortOutcome {
    /// No worker had an active task
    Idle,
    /// The operator did not confirm
    Declined { worker: WorkerName },
    /// The typed name matched no busy worker
    UnknownWorker { name: String },
    Aborted { worker: WorkerName, revoked: Vec<TaskId> },
}

impl AbortOutcome {
    /// 1 when the operator named an unknown worker, 0 otherwise
    pub fn exit_status(&self) -> u8 {
        match self {
            AbortOutcome::UnknownWorker { .. } => 1,
            _ => 0,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

/// Inspect the workers, let the operator pick one, and force-revoke all of
/// its active tasks.
pub async fn abort_worker<C, R, W>(
    client: &C,
    prompt: &mut Prompt<R, W>,
    signal: RevokeSignal,
) -> Result<AbortOutcome>
where
    C: TaskQueueControl + ?Sized,
    R: BufRead,
    W: Write,
{
    let active = client.inspect_active().await?;
    debug!("{} active tasks reported", active.total());

    let busy: Vec<WorkerName> = active.busy_workers().into_iter().cloned().collect();

    let worker = match busy.as_slice() {
        [] => {
            prompt.say("No active tasks, workers are idle")?;
            return Ok(AbortOutcome::Idle);
        }
        [only] => {
            prompt.say(active_table(&active))?;
            if !prompt.confirm(format_args!("Abort worker {}?", only))? {
                return Ok(AbortOutcome::Declined { worker: only.clone() });
            }
            only.clone()
        }
        _ => {
            prompt.say(active_table(&active))?;
            let answer = prompt.ask("Which worker should be aborted?")?;
            match busy.iter().find(|worker| worker.as_str() == answer) {
                Some(worker) => worker.clone(),
                None => {
                    prompt.say(format_args!("Worker {} not found among active workers", answer))?;
                    return Ok(AbortOutcome::UnknownWorker { name: answer });
                }
            }
        }
    };

    let tasks = active.get(&worker).unwrap_or_default();
    let mut revoked = Vec::with_capacity(tasks.len());

    for task in tasks {
        client.revoke(task.id, true, signal).await?;
        info!("Revoked {} ({}) on {} with {}", task.id, task.name, worker, signal);
        prompt.say(format_args!("Revoked task {} on {}", task.id, worker))?;
        revoked.push(task.id);
    }

    prompt.say(format_args!("Done aborting {}", worker))?;

    Ok(AbortOutcome::Aborted { worker, revoked })
}

/// One row per active task
fn active_table(active: &ActiveTasks) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Worker", "Task ID", "Name", "PID", "Started"]);

    for (worker, tasks) in active.iter() {
        for task in tasks {
            table.add_row(vec![
                worker.to_string(),
                task.id.to_string(),
                task.name.clone(),
                task.worker_pid.map(|pid| pid.to_string()).unwrap_or_default(),
                task.started_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            ]);
        }
    }

    table
}
