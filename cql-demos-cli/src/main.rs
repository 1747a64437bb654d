//! cql-demos - runnable example programs for a CQL database.

use clap::Parser;

use cql_demos_cli::cli::{Cli, Command};
use cql_demos_cli::commands;
use cql_demos_cli::error::CliResult;
use cql_demos_cli::{logging, output};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        output::newline();
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref(), cli.log_format.as_deref());

    let config = cli.config;
    match cli.command {
        Command::Version => commands::version::run().await,
        Command::Embedded(args) => commands::embedded::run(args).await,
        Command::Setup(args) => commands::setup::run(commands::connect(&config).await?, args).await,
        Command::Simple => commands::simple::run(commands::connect(&config).await?).await,
        Command::Paging(args) => {
            commands::paging::run(commands::connect(&config).await?, args).await
        }
        Command::Prepared(args) => {
            commands::prepared::run(commands::connect(&config).await?, args).await
        }
        Command::Async => commands::async_select::run(commands::connect(&config).await?).await,
        Command::Orm => commands::orm::run(commands::connect(&config).await?).await,
        Command::All(args) => commands::all::run(commands::connect(&config).await?, args).await,
    }
}
