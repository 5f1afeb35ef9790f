use clap::Parser;
use task_queue_ops::cli::CommonArgs;
use task_queue_ops::process::SystemProcessTable;
use task_queue_ops::{identity, kill_worker, logging, OpsConfig, Prompt};

#[derive(Parser, Debug)]
#[command(name = "tq-kill-worker")]
#[command(about = "Kill the local worker serving <user>@<host>", long_about = None)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.common.verbose);

    let config = OpsConfig::load(&args.common)?;
    let signal = config.kill_signal()?;
    let queue = identity::local_worker_name()?;

    let table = SystemProcessTable::snapshot();
    let mut prompt = Prompt::stdio();
    kill_worker::kill_worker(&table, &mut prompt, &queue, signal)?;

    Ok(())
}
