//! xnode-probe - smoke-test sweep over the xnode backend functions API

use clap::Parser;

mod cli;
mod config;
mod error;
mod output;
mod probe;

use cli::args::GlobalOptions;
use cli::{Cli, Commands, RunArgs};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let opts = GlobalOptions::from_cli(&cli);
    init_logging(opts.debug);

    if let Err(err) = run(cli, opts).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// Warn by default, debug for this crate with `--debug`; `RUST_LOG` wins over both
fn init_logging(debug: bool) {
    let default_filter = if debug { "warn,xnode_probe=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli, opts: GlobalOptions) -> Result<()> {
    match cli.command {
        None => cli::run::run(&opts, &RunArgs::default()).await,
        Some(Commands::Run(args)) => cli::run::run(&opts, &args).await,
        Some(Commands::Create(args)) => cli::create::run(&opts, &args).await,
        Some(Commands::List { skip_create, table }) => cli::list::run(&opts, &table, skip_create),
        Some(Commands::Version) => {
            println!("xnode-probe version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
