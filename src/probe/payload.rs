//! Fixed body of the `createXnode` call

use serde::{Deserialize, Serialize};

/// Create request sent once at the start of every sweep.
///
/// Field names match what the sweep has always sent, including the
/// snake_case `deployment_auth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateXnodeRequest {
    pub name: String,
    pub location: String,
    pub description: String,
    pub provider: String,
    #[serde(rename = "isUnit")]
    pub is_unit: bool,
    pub deployment_auth: String,
    /// JSON-encoded services list, sent as a string
    pub services: String,
}

impl CreateXnodeRequest {
    /// The literal payload; identical on every call
    pub fn fixed() -> Self {
        Self {
            name: "config.name".to_string(),
            location: "config.location".to_string(),
            description: "config.desc".to_string(),
            provider: "config.provider".to_string(),
            is_unit: true,
            deployment_auth: "001124".to_string(),
            services: "{}".to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
