use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod client;
mod commands;
mod output;
mod templates;
mod web;

use cli::{Cli, Commands, ServeArgs};
use output::OutputFormat;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("pragyan=info".parse().unwrap()),
        )
        .init();

    let format = OutputFormat::from_flag(cli.json);
    match cli.command {
        Some(Commands::Serve(args)) => commands::serve::run(&args).await,
        None => commands::serve::run(&ServeArgs::default()).await,
        Some(Commands::Health(args)) => commands::health::run(&args, format).await,
        Some(Commands::Session(args)) => commands::session::run(&args, format).await,
        Some(Commands::Info(args)) => commands::info::run(&args, format).await,
    }
}
