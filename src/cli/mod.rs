//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod args;
pub mod context;
pub mod create;
pub mod list;
pub mod run;

pub use args::{HeaderEchoArgs, OutputFormat, TableArgs, TransportArgs};
pub use context::ProbeContext;

use crate::config::{DEFAULT_BASE_URL, DEFAULT_ENV_FILE};

/// xnode-probe - smoke-test sweep over the xnode backend functions
#[derive(Parser, Debug)]
#[command(name = "xnode-probe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute (defaults to `run`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "XNODE_PROBE_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Base URL of the xnode functions API
    #[arg(
        long,
        global = true,
        env = "XNODE_PROBE_BASE_URL",
        default_value = DEFAULT_BASE_URL,
        hide_env = true
    )]
    pub base_url: String,

    /// Env file providing APPID and SESSIONTOKEN
    #[arg(
        long,
        global = true,
        env = "XNODE_PROBE_ENV_FILE",
        default_value = DEFAULT_ENV_FILE,
        hide_env = true
    )]
    pub env_file: PathBuf,

    /// Enable debug logging
    #[arg(long, global = true, env = "XNODE_PROBE_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send the create call, then one request per endpoint table entry
    Run(RunArgs),

    /// Send only the fixed createXnode call
    Create(CreateArgs),

    /// Show the requests a run would issue without sending anything
    List {
        /// Leave out the leading createXnode call
        #[arg(long)]
        skip_create: bool,

        #[command(flatten)]
        table: TableArgs,
    },

    /// Display version information
    Version,
}

/// Options for a full sweep
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub table: TableArgs,

    #[command(flatten)]
    pub transport: TransportArgs,

    #[command(flatten)]
    pub headers: HeaderEchoArgs,

    /// Leave out the leading createXnode call
    #[arg(long)]
    pub skip_create: bool,

    /// Print the planned requests and exit without sending
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with a non-zero status if any request fails at the transport level
    #[arg(long)]
    pub strict: bool,
}

/// Options for the create-only call
#[derive(Args, Debug, Default, Clone)]
pub struct CreateArgs {
    #[command(flatten)]
    pub transport: TransportArgs,

    #[command(flatten)]
    pub headers: HeaderEchoArgs,
}
