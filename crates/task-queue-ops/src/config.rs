use crate::cli::CommonArgs;
use crate::{OpsError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use task_queue_core::RevokeSignal;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpsConfig {
    pub broker_address: String,
    pub request_timeout_secs: u64,
    pub task: TaskConfig,
    /// Signal used when revoking with termination (e.g. "TERM", "SIGKILL")
    pub revoke_signal: String,
    /// Signal sent to local worker processes
    pub kill_signal: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskConfig {
    pub name: String,
    pub payload: String,
    /// Target queue; the local `<user>@<host>` queue when unset
    pub queue: Option<String>,
}

impl Default for OpsConfig {
    fn default() -> Self {
        OpsConfig {
            broker_address: "127.0.0.1:6379".to_string(),
            request_timeout_secs: 5,
            task: TaskConfig::default(),
            revoke_signal: "TERM".to_string(),
            kill_signal: "KILL".to_string(),
        }
    }
}

impl Default for TaskConfig {
    fn default() -> Self {
        TaskConfig {
            name: "echo".to_string(),
            payload: "hello".to_string(),
            queue: None,
        }
    }
}

impl OpsConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| OpsError::Config(format!("{}: {}", path.display(), e)))?;
        let config: OpsConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from `--config` if given, then apply command-line overrides
    pub fn load(args: &CommonArgs) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => OpsConfig::from_file(path)?,
            None => OpsConfig::default(),
        };

        if let Some(broker) = &args.broker {
            config.broker_address = broker.clone();
        }
        if let Some(timeout) = args.timeout_secs {
            config.request_timeout_secs = timeout;
        }

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn revoke_signal(&self) -> Result<RevokeSignal> {
        let signal = self.revoke_signal.parse::<RevokeSignal>()?;
        Ok(signal)
    }

    pub fn kill_signal(&self) -> Result<RevokeSignal> {
        let signal = self.kill_signal.parse::<RevokeSignal>()?;
        Ok(signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn args(config: Option<PathBuf>, broker: Option<&str>) -> CommonArgs {
        CommonArgs {
            config,
            broker: broker.map(str::to_string),
            timeout_secs: None,
            verbose: false,
        }
    }

    #[test]
    fn test_defaults() {
        let config = OpsConfig::default();
        assert_eq!(config.broker_address, "127.0.0.1:6379");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.revoke_signal().unwrap(), RevokeSignal::Term);
        assert_eq!(config.kill_signal().unwrap(), RevokeSignal::Kill);
        assert!(config.task.queue.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "broker_address: broker.internal:7000\ntask:\n  name: tasks.add\n  queue: reports\nrevoke_signal: SIGKILL"
        )
        .unwrap();

        let config = OpsConfig::from_file(file.path()).unwrap();
        assert_eq!(config.broker_address, "broker.internal:7000");
        assert_eq!(config.task.name, "tasks.add");
        assert_eq!(config.task.payload, "hello");
        assert_eq!(config.task.queue.as_deref(), Some("reports"));
        assert_eq!(config.revoke_signal().unwrap(), RevokeSignal::Kill);
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "broker_address: from-file:1\nrequest_timeout_secs: 9").unwrap();

        let mut common = args(Some(file.path().to_path_buf()), Some("from-cli:2"));
        common.timeout_secs = Some(1);

        let config = OpsConfig::load(&common).unwrap();
        assert_eq!(config.broker_address, "from-cli:2");
        assert_eq!(config.request_timeout_secs, 1);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let common = args(Some(PathBuf::from("/nonexistent/tq-ops.yaml")), None);
        assert!(matches!(OpsConfig::load(&common), Err(OpsError::Config(_))));
    }

    #[test]
    fn test_bad_signal() {
        let config = OpsConfig {
            kill_signal: "BOOM".to_string(),
            ..OpsConfig::default()
        };
        assert!(matches!(config.kill_signal(), Err(OpsError::Task(_))));
    }
}
