#[macro_use]
extern crate tracing;

use clap::Parser;
use cmd::{add::Add, context::Ctx, context::HubArgs, delete::Delete, list::List, set::Set};

mod cmd;

/// Manage automated builds on docker hub
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    #[command(flatten)]
    hub: HubArgs,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Parser, Debug)]
enum Commands {
    List(List),
    #[command(alias = "create")]
    Add(Add),
    #[command(alias = "single")]
    Set(Set),
    Delete(Delete),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let ctx = Ctx::init(&args.hub)?;

    match args.command {
        Commands::List(cmd) => cmd.run(&ctx).await?,
        Commands::Add(cmd) => cmd.run(&ctx).await?,
        Commands::Set(cmd) => cmd.run(&ctx).await?,
        Commands::Delete(cmd) => cmd.run(&ctx).await?,
    }
    Ok(())
}
