use crate::{OpsError, Result};
use sysinfo::{Pid, Signal, System};
use task_queue_core::RevokeSignal;

/// A running process as seen in the process table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerProcess {
    pub pid: u32,
    pub command: String,
}

/// Read access to the local process table plus signal delivery
pub trait ProcessTable {
    fn list(&self) -> Result<Vec<WorkerProcess>>;

    fn kill(&self, pid: u32, signal: RevokeSignal) -> Result<()>;
}

/// Process table backed by `sysinfo`, snapshotted at construction
pub struct SystemProcessTable {
    system: System,
}

impl SystemProcessTable {
    pub fn snapshot() -> Self {
        SystemProcessTable {
            system: System::new_all(),
        }
    }
}

impl ProcessTable for SystemProcessTable {
    fn list(&self) -> Result<Vec<WorkerProcess>> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(OpsError::ProcessTable(
                "process listing is not supported on this platform".to_string(),
            ));
        }

        let processes = self
            .system
            .processes()
            .iter()
            .map(|(pid, process)| {
                // Kernel threads have no argv; fall back to the process name
                let command = if process.cmd().is_empty() {
                    process.name().to_string_lossy().into_owned()
                } else {
                    process
                        .cmd()
                        .iter()
                        .map(|arg| arg.to_string_lossy())
                        .collect::<Vec<_>>()
                        .join(" ")
                };
                WorkerProcess {
                    pid: pid.as_u32(),
                    command,
                }
            })
            .collect();

        Ok(processes)
    }

    fn kill(&self, pid: u32, signal: RevokeSignal) -> Result<()> {
        let process = self.system.process(Pid::from_u32(pid)).ok_or_else(|| OpsError::Kill {
            pid,
            reason: "no such process".to_string(),
        })?;

        match process.kill_with(to_system_signal(signal)) {
            Some(true) => Ok(()),
            Some(false) => Err(OpsError::Kill {
                pid,
                reason: format!("{} was not delivered", signal),
            }),
            None => Err(OpsError::Kill {
                pid,
                reason: format!("{} is not supported on this platform", signal),
            }),
        }
    }
}

fn to_system_signal(signal: RevokeSignal) -> Signal {
    match signal {
        RevokeSignal::Term => Signal::Term,
        RevokeSignal::Kill => Signal::Kill,
        RevokeSignal::Int => Signal::Interrupt,
        RevokeSignal::Quit => Signal::Quit,
        RevokeSignal::Hup => Signal::Hangup,
    }
}

/// Processes whose command line carries `pattern` as a whole argument,
/// excluding `own_pid`. Arguments are split on whitespace and `=`, so
/// `--queue=alice@box` matches but `malice@box` does not.
///
/// A process table that cannot be read yields no matches.
pub fn find_matching<T>(table: &T, pattern: &str, own_pid: u32) -> Vec<WorkerProcess>
where
    T: ProcessTable + ?Sized,
{
    let processes = match table.list() {
        Ok(processes) => processes,
        Err(e) => {
            tracing::debug!("Process search failed: {}", e);
            return Vec::new();
        }
    };

    let mut matches: Vec<WorkerProcess> = processes
        .into_iter()
        .filter(|p| p.pid != own_pid && mentions(&p.command, pattern))
        .collect();
    matches.sort_by_key(|p| p.pid);
    matches
}

fn mentions(command: &str, pattern: &str) -> bool {
    command
        .split(|c: char| c.is_whitespace() || c == '=')
        .any(|token| token == pattern)
}
