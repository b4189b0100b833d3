//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::LinkConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable that overrides `rpc.url`.
pub const RPC_URL_ENV_VAR: &str = "WALLET_LINK_RPC_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, apply environment overrides, and validate a TOML file.
pub fn load_config(path: &Path) -> Result<LinkConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Same as [`load_config`] for in-memory TOML.
pub fn parse_config(content: &str) -> Result<LinkConfig, ConfigError> {
    let mut config: LinkConfig = toml::from_str(content)?;
    apply_env_overrides(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply `WALLET_LINK_RPC_URL` when set and non-empty.
pub fn apply_env_overrides(config: &mut LinkConfig) {
    if let Ok(url) = std::env::var(RPC_URL_ENV_VAR) {
        let url = url.trim();
        if !url.is_empty() {
            tracing::debug!(rpc_url = %url, "RPC URL overridden from environment");
            config.rpc.url = url.to_string();
        }
    }
}
