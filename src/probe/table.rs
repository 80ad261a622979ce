//! Endpoint table driving the probe sweep
//!
//! The table is an ordered list of endpoint name to HTTP method. Order is the
//! dispatch order but entries are independent of each other.

use std::path::Path;

use log::warn;
use serde::Serialize;

use super::method::Method;
use crate::error::{ConfigError, ProbeError, Result};

/// Endpoint names of the xnode functions controller, in sweep order
const XNODE_FUNCTIONS: [(&str, Method); 9] = [
    ("createXnode", Method::Post),
    ("pushXnodeHeartbeat", Method::Post),
    ("getXnodeServices", Method::Get),
    ("storeXnodeSigningMessage", Method::Post),
    ("updateXnode", Method::Put),
    ("getXnode", Method::Get),
    ("getNodesValidatorsStats", Method::Get),
    ("getXnodesWithNodesValidatorsStats", Method::Post),
    ("getXnodes", Method::Get),
];

/// How to treat entries whose method is not GET, POST or PUT
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MethodPolicy {
    /// Reject the whole table at load time
    #[default]
    Strict,
    /// Drop the entry with a warning and never dispatch it
    Skip,
}

/// A single table entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub name: String,
    pub method: Method,
}

/// Ordered endpoint name to method mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointTable {
    entries: Vec<Endpoint>,
}

impl EndpointTable {
    /// The built-in xnode functions table
    pub fn xnode_functions() -> Self {
        Self {
            entries: XNODE_FUNCTIONS
                .iter()
                .map(|(name, method)| Endpoint {
                    name: (*name).to_string(),
                    method: *method,
                })
                .collect(),
        }
    }

    /// Build a table from raw `(name, method)` pairs.
    ///
    /// Endpoint names are always validated; unknown methods are handled per `policy`.
    pub fn from_entries<I, N, M>(entries: I, policy: MethodPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = (N, M)>,
        N: Into<String>,
        M: AsRef<str>,
    {
        let mut table = Vec::new();

        for (name, method) in entries {
            let name = name.into();
            validate_name(&name)?;

            match method.as_ref().parse::<Method>() {
                Ok(method) => table.push(Endpoint { name, method }),
                Err(err) => match policy {
                    MethodPolicy::Strict => return Err(err.into()),
                    MethodPolicy::Skip => {
                        warn!(
                            "Skipping endpoint {}: unsupported method '{}'",
                            name,
                            method.as_ref()
                        );
                    }
                },
            }
        }

        Ok(Self { entries: table })
    }

    /// Load a table from a YAML mapping of `name: METHOD`, keeping document order
    pub fn load(path: &Path, policy: MethodPolicy) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::TableNotFound(path.to_path_buf()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        Self::parse_yaml(&contents, policy)
    }

    /// Parse a YAML table document
    pub fn parse_yaml(contents: &str, policy: MethodPolicy) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(contents).map_err(ConfigError::from)?;

        let mapping = match value {
            serde_yaml::Value::Mapping(mapping) => mapping,
            serde_yaml::Value::Null => serde_yaml::Mapping::new(),
            _ => {
                return Err(ConfigError::InvalidTable(
                    "expected a mapping of endpoint name to method".to_string(),
                )
                .into());
            }
        };

        let mut raw = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let name = key.as_str().ok_or_else(|| {
                ConfigError::InvalidTable(format!("endpoint name must be a string: {key:?}"))
            })?;
            let method = value.as_str().ok_or_else(|| {
                ConfigError::InvalidTable(format!("method for {name} must be a string"))
            })?;
            raw.push((name.to_string(), method.to_string()));
        }

        Self::from_entries(raw, policy)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }
}

fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed != name || name.contains(['/', '?', '#']) {
        return Err(ProbeError::InvalidEndpointName(name.to_string()).into());
    }
    Ok(())
}
