pub mod types;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::HostVersionError;
use crate::source::{CommandSource, HostVersionSource, PackageSource, StaticSource};
pub use types::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error(transparent)]
    Host(#[from] HostVersionError),
}

/// Resolve the hostver config directory.
pub fn resolve_config_dir() -> PathBuf {
    if let Ok(override_dir) = std::env::var("HOSTVER_CONFIG_DIR") {
        let trimmed = override_dir.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hostver")
}

/// Resolve the path to the config file.
pub fn resolve_config_path() -> PathBuf {
    let dir = resolve_config_dir();
    let json_path = dir.join("hostver.json");
    if json_path.exists() {
        return json_path;
    }
    for name in ["hostver.yaml", "hostver.yml"] {
        let path = dir.join(name);
        if path.exists() {
            return path;
        }
    }
    json_path
}

/// Load configuration from the default config path.
pub fn load_config() -> Result<HostverConfig, ConfigError> {
    load_config_from_path(&resolve_config_path())
}

/// Load configuration from a specific path. A missing file yields defaults.
pub fn load_config_from_path(path: &Path) -> Result<HostverConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(HostverConfig::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let contents = substitute_env_vars(&contents);

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let config = match ext {
        "yaml" | "yml" => serde_yaml::from_str(&contents)?,
        _ => serde_json::from_str(&contents)?,
    };
    Ok(config)
}

/// Simple ${ENV_VAR} substitution in config strings.
fn substitute_env_vars(input: &str) -> String {
    let re = regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
    re.replace_all(input, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_default()
    })
    .into_owned()
}

impl HostverConfig {
    /// Build the configured host version source, falling back to this
    /// crate's own version when nothing is configured.
    pub fn source(&self) -> Result<Box<dyn HostVersionSource>, ConfigError> {
        let host = self.host.as_ref();
        if let Some(version) = host.and_then(|h| h.version.as_deref()) {
            return Ok(Box::new(StaticSource::new(version)));
        }
        if let Some(argv) = host.and_then(|h| h.command.as_deref()) {
            return Ok(Box::new(CommandSource::from_argv(argv)?));
        }
        Ok(Box::new(PackageSource))
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}
