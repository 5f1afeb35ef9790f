use clap::Parser;
use std::process::ExitCode;
use task_queue_client::TaskQueueAsyncClient;
use task_queue_ops::cli::CommonArgs;
use task_queue_ops::{abort, logging, OpsConfig, Prompt};

#[derive(Parser, Debug)]
#[command(name = "tq-abort")]
#[command(about = "Revoke every active task of a chosen worker", long_about = None)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    logging::init(args.common.verbose);

    let config = OpsConfig::load(&args.common)?;
    let signal = config.revoke_signal()?;

    let client =
        TaskQueueAsyncClient::connect_with_timeout(&config.broker_address, config.request_timeout())
            .await?;

    let mut prompt = Prompt::stdio();
    let outcome = abort::abort_worker(&client, &mut prompt, signal).await?;

    Ok(outcome.exit_code())
}
