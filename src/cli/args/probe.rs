//! Argument groups shared by the probing commands

use std::num::{NonZeroU32, NonZeroU64};
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;

use crate::config::TableSource;
use crate::probe::MethodPolicy;

/// Endpoint table selection
#[derive(Args, Debug, Default, Clone)]
pub struct TableArgs {
    /// YAML file mapping endpoint names to methods (defaults to the built-in xnode table)
    #[arg(long, value_name = "FILE")]
    pub table: Option<PathBuf>,

    /// Skip table entries with unsupported methods instead of rejecting the table
    #[arg(long)]
    pub skip_unknown_methods: bool,
}

impl TableArgs {
    pub fn source(&self) -> TableSource {
        match &self.table {
            Some(path) => TableSource::File(path.clone()),
            None => TableSource::Builtin,
        }
    }

    pub fn method_policy(&self) -> MethodPolicy {
        if self.skip_unknown_methods {
            MethodPolicy::Skip
        } else {
            MethodPolicy::Strict
        }
    }
}

/// HTTP transport tuning
#[derive(Args, Debug, Default, Clone)]
pub struct TransportArgs {
    /// Per-request timeout in seconds (no timeout by default)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<NonZeroU64>,

    /// Maximum requests per second
    #[arg(long, value_name = "N")]
    pub rate: Option<NonZeroU32>,
}

impl TransportArgs {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(|secs| Duration::from_secs(secs.get()))
    }
}

/// Opt-in header echo
#[derive(Args, Debug, Default, Clone)]
pub struct HeaderEchoArgs {
    /// Print the request headers before sending (secrets masked)
    #[arg(long)]
    pub show_headers: bool,

    /// Show secret header values verbatim when printing headers
    #[arg(long, requires = "show_headers")]
    pub reveal_secrets: bool,
}
