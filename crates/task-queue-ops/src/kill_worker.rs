//! Shut down the worker process serving the local `<user>@<host>` queue.

use crate::process::{find_matching, ProcessTable};
use crate::{Prompt, Result};
use std::io::{BufRead, Write};
use task_queue_core::{RevokeSignal, WorkerName};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillOutcome {
    NotRunning,
    Declined { found: usize },
    Killed { pids: Vec<u32> },
}

/// Find processes serving `queue` and signal each one once the operator
/// confirms. Delivery failures abort the run.
pub fn kill_worker<T, R, W>(
    table: &T,
    prompt: &mut Prompt<R, W>,
    queue: &WorkerName,
    signal: RevokeSignal,
) -> Result<KillOutcome>
where
    T: ProcessTable + ?Sized,
    R: BufRead,
    W: Write,
{
    let found = find_matching(table, queue.as_str(), std::process::id());

    if found.is_empty() {
        prompt.say(format_args!("No worker running for {}", queue))?;
        return Ok(KillOutcome::NotRunning);
    }

    for process in &found {
        prompt.say(format_args!("{:>8}  {}", process.pid, process.command))?;
    }

    let question = format!("Kill {} worker process(es) for {}?", found.len(), queue);
    if !prompt.confirm(question)? {
        return Ok(KillOutcome::Declined { found: found.len() });
    }

    let mut pids = Vec::with_capacity(found.len());
    for process in found {
        table.kill(process.pid, signal)?;
        info!("Sent {} to {}", signal, process.pid);
        prompt.say(format_args!("Killed {}", process.pid))?;
        pids.push(process.pid);
    }

    Ok(KillOutcome::Killed { pids })
}
