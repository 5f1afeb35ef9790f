//! Operator tools for the task queue: submit and revoke a task, abort the
//! active tasks of a worker, and shut down the local worker process.

pub mod abort;
pub mod cli;
pub mod config;
pub mod error;
pub mod identity;
pub mod kill_worker;
pub mod logging;
pub mod process;
pub mod prompt;
pub mod submit;

#[cfg(test)]
mod testing;

pub use config::OpsConfig;
pub use error::{OpsError, Result};
pub use prompt::Prompt;
