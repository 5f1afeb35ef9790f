use crate::{OpsError, Result};
use task_queue_core::WorkerName;

/// Environment variables consulted for the login name, in order
const USER_VARS: [&str; 4] = ["LOGNAME", "USER", "LNAME", "USERNAME"];

/// Login name of the current user
pub fn current_user() -> Result<String> {
    user_from(|var| std::env::var(var).ok())
}

fn user_from<F>(lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    USER_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .ok_or(OpsError::Identity("current user"))
}

pub fn local_hostname() -> Result<String> {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .filter(|h| !h.is_empty())
        .ok_or(OpsError::Identity("local hostname"))
}

/// `<user>@<host>` name of the worker (and queue) owned by this login
pub fn local_worker_name() -> Result<WorkerName> {
    Ok(WorkerName::for_local(&current_user()?, &local_hostname()?))
}
