use crate::{TaskError, TaskId, TaskName, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Name a worker registers under, conventionally `<user>@<host>`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerName(String);

impl WorkerName {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TaskError::InvalidWorkerName(name));
        }
        Ok(WorkerName(name))
    }

    /// Build the `<user>@<host>` name used for a local worker and its queue
    pub fn for_local(user: &str, host: &str) -> Self {
        WorkerName(format!("{}@{}", user, host))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// User part of a `<user>@<host>` name
    pub fn user(&self) -> Option<&str> {
        self.0.split_once('@').map(|(user, _)| user)
    }

    /// Host part of a `<user>@<host>` name
    pub fn host(&self) -> Option<&str> {
        self.0.split_once('@').map(|(_, host)| host)
    }
}

impl fmt::Display for WorkerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for WorkerName {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        WorkerName::new(s.trim())
    }
}

impl AsRef<str> for WorkerName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A task a worker reports as currently executing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTask {
    pub id: TaskId,

    pub name: TaskName,

    /// Pool process running the task, if the worker reports it
    pub worker_pid: Option<u32>,

    pub started_at: Option<DateTime<Utc>>,
}

impl ActiveTask {
    pub fn new(id: TaskId, name: impl Into<TaskName>) -> Self {
        ActiveTask {
            id,
            name: name.into(),
            worker_pid: None,
            started_at: None,
        }
    }
}

/// Inspection reply: every responding worker and its active tasks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveTasks(BTreeMap<WorkerName, Vec<ActiveTask>>);

impl ActiveTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, worker: WorkerName, tasks: Vec<ActiveTask>) {
        self.0.insert(worker, tasks);
    }

    pub fn get(&self, worker: &WorkerName) -> Option<&[ActiveTask]> {
        self.0.get(worker).map(Vec::as_slice)
    }

    /// Workers with at least one active task, in name order
    pub fn busy_workers(&self) -> Vec<&WorkerName> {
        self.0
            .iter()
            .filter(|(_, tasks)| !tasks.is_empty())
            .map(|(worker, _)| worker)
            .collect()
    }

    /// Total number of active tasks across all workers
    pub fn total(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&WorkerName, &[ActiveTask])> {
        self.0.iter().map(|(worker, tasks)| (worker, tasks.as_slice()))
    }
}

impl FromIterator<(WorkerName, Vec<ActiveTask>)> for ActiveTasks {
    fn from_iter<I: IntoIterator<Item = (WorkerName, Vec<ActiveTask>)>>(iter: I) -> Self {
        ActiveTasks(iter.into_iter().collect())
    }
}
