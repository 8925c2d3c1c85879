//! Companion Forge CLI entry point.
//!
//! Binary name: `companion`
//!
//! Parses CLI arguments, sets up tracing, loads the client configuration,
//! then dispatches to the appropriate command handler.

mod cli;
mod sink;
mod state;

use anyhow::Context;
use clap::Parser;
use clap_complete::generate;

use companion_observe::tracing_setup::{TracingOptions, init_tracing, shutdown_tracing};
use companion_types::companion::CompanionId;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = TracingOptions {
        enable_otel: cli.otel,
        ..TracingOptions::from_verbosity(cli.verbose, cli.quiet)
    };
    init_tracing(&options).map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "companion", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.api_url).await?;

    match cli.command {
        Commands::Create { fields } => {
            cli::companion::run_form(&state, None, &fields, cli.json, cli.quiet).await?;
        }

        Commands::Edit { id, fields } => {
            let id: CompanionId = id
                .parse()
                .with_context(|| format!("'{id}' is not a companion id"))?;
            cli::companion::run_form(&state, Some(id), &fields, cli.json, cli.quiet).await?;
        }

        Commands::Categories => {
            cli::category::list_categories(&state, cli.json).await?;
        }

        Commands::Validate { file } => {
            cli::validate::validate_file(&state, &file, cli.json, cli.quiet)?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
