//! Shared header set attached to every probe request

use std::fmt;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};

use crate::config::Credentials;
use crate::error::{ProbeError, Result};

/// Parse application id header
pub const APP_ID_HEADER: &str = "x-parse-application-id";

/// Parse session token header
pub const SESSION_TOKEN_HEADER: &str = "x-parse-session-token";

const CONTENT_TYPE_HEADER: &str = "content-type";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Immutable header set built once per run.
///
/// `Debug` and `Display` never show secret values; use [`HeaderSet::revealed`]
/// to render them verbatim.
#[derive(Clone, PartialEq, Eq)]
pub struct HeaderSet {
    app_id: String,
    session_token: String,
}

impl HeaderSet {
    /// Build the header set; missing credentials become empty values, never missing keys.
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self {
            app_id: credentials.app_id.clone().unwrap_or_default(),
            session_token: credentials.session_token.clone().unwrap_or_default(),
        }
    }

    /// Look up a header value by (case-insensitive) name
    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Header name/value pairs in a stable order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (APP_ID_HEADER, self.app_id.as_str()),
            (SESSION_TOKEN_HEADER, self.session_token.as_str()),
            (CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE),
        ]
        .into_iter()
    }

    /// Convert to a reqwest header map
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(3);
        map.insert(
            HeaderName::from_static(APP_ID_HEADER),
            HeaderValue::from_str(&self.app_id)
                .map_err(|_| ProbeError::InvalidHeader(APP_ID_HEADER))?,
        );
        map.insert(
            HeaderName::from_static(SESSION_TOKEN_HEADER),
            HeaderValue::from_str(&self.session_token)
                .map_err(|_| ProbeError::InvalidHeader(SESSION_TOKEN_HEADER))?,
        );
        map.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        Ok(map)
    }

    /// View that renders secret values verbatim
    pub fn revealed(&self) -> Revealed<'_> {
        Revealed(self)
    }

    fn is_secret(name: &str) -> bool {
        name == APP_ID_HEADER || name == SESSION_TOKEN_HEADER
    }
}

fn mask(value: &str) -> &'static str {
    if value.is_empty() { "<empty>" } else { "<redacted>" }
}

impl fmt::Display for HeaderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            let shown = if Self::is_secret(name) { mask(value) } else { value };
            writeln!(f, "{name}: {shown}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for HeaderSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderSet")
            .field("app_id", &mask(&self.app_id))
            .field("session_token", &mask(&self.session_token))
            .finish()
    }
}

/// Unredacted rendering of a [`HeaderSet`]
pub struct Revealed<'a>(&'a HeaderSet);

impl fmt::Display for Revealed<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.0.iter() {
            writeln!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}
