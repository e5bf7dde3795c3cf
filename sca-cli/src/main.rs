//! SCA CLI - Command line tool for satellite snow cover analysis.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "sca-cli",
    version,
    about = "Snow cover analysis toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: sca_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    sca_cmd::run(cli.command).await
}
