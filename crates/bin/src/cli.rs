//! CLI argument definitions for the Pragyan binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pragyan::constants::{
    DEFAULT_AUTH_URL, DEFAULT_CREDIT_CARDS_URL, DEFAULT_GIFT_CARDS_URL, DEFAULT_LOANS_URL,
    DEFAULT_LOCKERS_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_TRANSACTIONS_URL,
};

/// Pragyan banking client
#[derive(Parser, Debug)]
#[command(name = "pragyan")]
#[command(about = "Pragyan: session-aware client for the Pragyan banking services")]
#[command(version)]
pub struct Cli {
    /// Print machine-readable JSON where a command supports it
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the local web front (default)
    Serve(ServeArgs),
    /// Check health of a running web front
    Health(HealthArgs),
    /// Inspect or end the persisted session
    Session(SessionArgs),
    /// Show the configured service endpoints
    Info(InfoArgs),
}

/// Backend endpoints and client storage, shared by every command that talks
/// to the banking services.
#[derive(clap::Args, Debug, Clone)]
pub struct ClientArgs {
    /// Identity service base URL
    #[arg(long, default_value = DEFAULT_AUTH_URL, env = "PRAGYAN_AUTH_URL")]
    pub auth_url: String,

    /// Accounts and transactions service base URL
    #[arg(long, default_value = DEFAULT_TRANSACTIONS_URL, env = "PRAGYAN_TRANSACTIONS_URL")]
    pub transactions_url: String,

    /// Credit card service base URL
    #[arg(long, default_value = DEFAULT_CREDIT_CARDS_URL, env = "PRAGYAN_CREDIT_CARDS_URL")]
    pub credit_cards_url: String,

    /// Gift card service base URL
    #[arg(long, default_value = DEFAULT_GIFT_CARDS_URL, env = "PRAGYAN_GIFT_CARDS_URL")]
    pub gift_cards_url: String,

    /// Loan service base URL
    #[arg(long, default_value = DEFAULT_LOANS_URL, env = "PRAGYAN_LOANS_URL")]
    pub loans_url: String,

    /// Locker service base URL
    #[arg(long, default_value = DEFAULT_LOCKERS_URL, env = "PRAGYAN_LOCKERS_URL")]
    pub lockers_url: String,

    /// Data directory for the durable client storage (client-storage.json).
    /// Defaults to the current directory.
    #[arg(short = 'D', long, env = "PRAGYAN_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep the credential in memory only; nothing survives a restart
    #[arg(long, conflicts_with = "data_dir")]
    pub ephemeral: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, env = "PRAGYAN_TIMEOUT")]
    pub timeout: u64,
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 3000, env = "PRAGYAN_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "127.0.0.1", env = "PRAGYAN_HOST")]
    pub host: String,

    #[command(flatten)]
    pub client: ClientArgs,
}

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Port of the web front to check
    #[arg(short, long, default_value_t = 3000, env = "PRAGYAN_PORT")]
    pub port: u16,

    /// Host of the web front to check
    #[arg(long, default_value = "127.0.0.1", env = "PRAGYAN_HOST")]
    pub host: String,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}

/// Arguments for the session command
#[derive(clap::Args, Debug)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommand,

    #[command(flatten)]
    pub client: ClientArgs,
}

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Resume the persisted session once and print who is signed in
    Show,
    /// Erase the persisted credential
    Logout,
}

/// Arguments for the info command
#[derive(clap::Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub client: ClientArgs,
}

/// `serve` with every default and env fallback applied, for a bare `pragyan`.
#[derive(Parser, Debug)]
#[command(name = "pragyan")]
struct DefaultServe {
    #[command(flatten)]
    args: ServeArgs,
}

impl Default for ServeArgs {
    fn default() -> Self {
        DefaultServe::parse_from(["pragyan"]).args
    }
}
