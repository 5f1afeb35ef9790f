use clap::Parser;
use task_queue_client::TaskQueueAsyncClient;
use task_queue_ops::cli::CommonArgs;
use task_queue_ops::submit::{self, TaskOverrides};
use task_queue_ops::{identity, logging, OpsConfig, Prompt};

#[derive(Parser, Debug)]
#[command(name = "tq-submit")]
#[command(about = "Submit a task and optionally revoke it", long_about = None)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Task name (overrides the configuration file)
    #[arg(short, long)]
    task: Option<String>,

    /// Task payload
    #[arg(short, long)]
    payload: Option<String>,

    /// Target queue (defaults to <user>@<host>)
    #[arg(short, long)]
    queue: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.common.verbose);

    let config = OpsConfig::load(&args.common)?;
    let signal = config.revoke_signal()?;

    let overrides = TaskOverrides {
        name: args.task,
        payload: args.payload,
        queue: args.queue,
    };
    let signature = submit::signature_from(&config.task, overrides, identity::local_worker_name)?;

    let client =
        TaskQueueAsyncClient::connect_with_timeout(&config.broker_address, config.request_timeout())
            .await?;

    let mut prompt = Prompt::stdio();
    submit::submit_task(&client, &mut prompt, signature, signal).await?;

    Ok(())
}
