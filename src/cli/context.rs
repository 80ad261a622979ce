//! Command execution context
//!
//! Resolves settings, loads credentials and builds the header set once, so
//! every command handler works from the same immutable inputs.

use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{OutputFormat, TableArgs, TransportArgs};
use crate::config::{Credentials, ProbeSettings};
use crate::error::Result;
use crate::probe::{EndpointTable, HeaderSet, HttpTransport, Prober};

/// Everything a probing command needs
pub struct ProbeContext {
    /// Resolved run settings
    pub settings: ProbeSettings,
    /// Header set shared by every request
    pub headers: HeaderSet,
    /// Endpoint table for the sweep
    pub table: EndpointTable,
    /// Output format preference
    pub format: OutputFormat,
}

impl ProbeContext {
    /// Build the context from global options and per-command arguments.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid, the env file cannot be
    /// parsed, or the endpoint table cannot be loaded.
    pub fn new(
        opts: &GlobalOptions,
        table: &TableArgs,
        transport: &TransportArgs,
        send_create: bool,
    ) -> Result<Self> {
        let settings = ProbeSettings {
            base_url: opts.base_url.clone(),
            env_file: opts.env_file.clone(),
            table: table.source(),
            method_policy: table.method_policy(),
            send_create,
            timeout: transport.timeout(),
            rate: transport.rate,
        };
        settings.validate()?;

        let table = settings.endpoint_table()?;
        debug!("Endpoint table: {} entries", table.len());

        let credentials = Credentials::load(&settings.env_file)?;
        let headers = HeaderSet::from_credentials(&credentials);

        Ok(Self {
            settings,
            headers,
            table,
            format: opts.format,
        })
    }

    /// Build a prober over the real HTTP transport
    pub fn prober(&self) -> Result<Prober<HttpTransport>> {
        let transport = HttpTransport::new(self.settings.timeout, self.settings.rate)?;
        Ok(Prober::new(
            transport,
            self.settings.base_url.clone(),
            self.headers.clone(),
            self.table.clone(),
        )
        .with_create(self.settings.send_create))
    }
}
