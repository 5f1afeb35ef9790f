use clap::Args;
use std::path::PathBuf;

/// Flags shared by every operator tool. All are optional.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Path to a YAML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Broker address (overrides the configuration file)
    #[arg(short, long, env = "TQ_BROKER")]
    pub broker: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long = "timeout")]
    pub timeout_secs: Option<u64>,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
