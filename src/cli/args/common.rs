//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - raw responses streamed as they arrive (default)
    #[default]
    Pretty,
    /// Table format - one summary row per request after the sweep
    Table,
    /// JSON format - structured for scripts
    Json,
}
