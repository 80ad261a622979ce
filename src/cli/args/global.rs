//! Global CLI options shared across all commands

use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// Precedence is CLI flag > environment variable > default.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json)
    pub format: OutputFormat,

    /// Base URL of the xnode functions API
    pub base_url: String,

    /// Env file holding APPID and SESSIONTOKEN
    pub env_file: PathBuf,

    /// Debug logging enabled
    pub debug: bool,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            base_url: cli.base_url.clone(),
            env_file: cli.env_file.clone(),
            debug: cli.debug,
        }
    }
}
