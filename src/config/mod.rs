//! Run configuration for the prober
//!
//! Credentials come from an env file (default `test/.env`) with process
//! environment variables taking precedence. Everything else is resolved from
//! CLI flags into [`ProbeSettings`].

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use reqwest::Url;

use crate::error::{ConfigError, Result};
use crate::probe::{EndpointTable, MethodPolicy};

/// Default base URL of the xnode functions controller
pub const DEFAULT_BASE_URL: &str = "http://localhost:3003/xnodes/functions/";

/// Default env file holding the credentials
pub const DEFAULT_ENV_FILE: &str = "test/.env";

/// Env key for the Parse application id
pub const APP_ID_KEY: &str = "APPID";

/// Env key for the Parse session token
pub const SESSION_TOKEN_KEY: &str = "SESSIONTOKEN";

/// Application id and session token, both optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub app_id: Option<String>,
    pub session_token: Option<String>,
}

impl Credentials {
    /// Load credentials from `env_file`, letting the process environment win.
    ///
    /// A missing file or missing keys is not an error.
    pub fn load(env_file: &Path) -> Result<Self> {
        Self::load_with(env_file, |key| std::env::var(key).ok())
    }

    /// Load credentials with a custom environment lookup
    pub fn load_with<F>(env_file: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut credentials = Self::from_env_file(env_file)?;

        if let Some(app_id) = lookup(APP_ID_KEY) {
            debug!("{} taken from process environment", APP_ID_KEY);
            credentials.app_id = Some(app_id);
        }
        if let Some(token) = lookup(SESSION_TOKEN_KEY) {
            debug!("{} taken from process environment", SESSION_TOKEN_KEY);
            credentials.session_token = Some(token);
        }

        if credentials.app_id.is_none() || credentials.session_token.is_none() {
            debug!("Credentials incomplete; requests will be sent with empty auth headers");
        }

        Ok(credentials)
    }

    /// Read only the env file, without touching the process environment.
    ///
    /// Values are taken literally: `$VAR` and `${VAR}` are not expanded.
    fn from_env_file(path: &Path) -> Result<Self> {
        let env_file_error = |reason: String| ConfigError::EnvFile {
            path: path.to_path_buf(),
            reason,
        };

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("Env file {} not found", path.display());
                return Ok(Self::default());
            }
            Err(err) => return Err(env_file_error(err.to_string()).into()),
        };

        let literal = escape_substitutions(&raw);
        let mut credentials = Self::default();
        for item in dotenvy::from_read_iter(literal.as_bytes()) {
            let (key, value) = item.map_err(|err| env_file_error(err.to_string()))?;

            match key.as_str() {
                APP_ID_KEY => credentials.app_id = Some(value),
                SESSION_TOKEN_KEY => credentials.session_token = Some(value),
                _ => {}
            }
        }

        debug!("Loaded credentials from {}", path.display());
        Ok(credentials)
    }
}

/// Escape every `$` that dotenvy would treat as a substitution.
///
/// Single-quoted text is already literal and comments are left alone.
/// Existing backslash escapes pass through unchanged.
fn escape_substitutions(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut single = false;
    let mut double = false;

    for line in raw.split_inclusive('\n') {
        let mut after_space = true;
        let mut chars = line.chars();
        while let Some(c) = chars.next() {
            match c {
                '#' if after_space && !single && !double => {
                    out.push(c);
                    out.extend(chars.by_ref());
                    break;
                }
                '\'' if !double => single = !single,
                '"' if !single => double = !double,
                '\\' if !single => {
                    out.push(c);
                    out.extend(chars.next());
                    after_space = false;
                    continue;
                }
                '$' if !single => out.push('\\'),
                _ => {}
            }
            after_space = c.is_whitespace();
            out.push(c);
        }
    }

    out
}

/// Where the endpoint table comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    /// The built-in xnode functions table
    Builtin,
    /// A YAML file of `name: METHOD`
    File(PathBuf),
}

/// Resolved settings for one run
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub base_url: String,
    pub env_file: PathBuf,
    pub table: TableSource,
    pub method_policy: MethodPolicy,
    pub send_create: bool,
    pub timeout: Option<Duration>,
    pub rate: Option<NonZeroU32>,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            table: TableSource::Builtin,
            method_policy: MethodPolicy::Strict,
            send_create: true,
            timeout: None,
            rate: None,
        }
    }
}

impl ProbeSettings {
    /// Check that the base URL is an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        validate_base_url(&self.base_url)
    }

    /// Load the configured endpoint table
    pub fn endpoint_table(&self) -> Result<EndpointTable> {
        match &self.table {
            TableSource::Builtin => Ok(EndpointTable::xnode_functions()),
            TableSource::File(path) => EndpointTable::load(path, self.method_policy),
        }
    }
}

/// Validate a base URL
pub fn validate_base_url(base_url: &str) -> Result<()> {
    let invalid = |reason: &str| ConfigError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason: reason.to_string(),
    };

    if base_url.trim().is_empty() {
        return Err(invalid("must not be empty").into());
    }

    let url = Url::parse(base_url).map_err(|e| invalid(&e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(invalid("scheme must be http or https").into()),
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host").into());
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not contain a query or fragment").into());
    }

    Ok(())
}
