use serde::{Deserialize, Serialize};

/// Root hostver configuration (`hostver.json` / `hostver.yaml`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HostverConfig {
    pub host: Option<HostConfig>,
    pub logging: Option<LoggingConfig>,
}

/// Where the host version comes from. `version` wins over `command`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HostConfig {
    pub version: Option<String>,
    pub command: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}
