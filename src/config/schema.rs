//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML, and every
//! field has a default so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::platform::DEFAULT_MOBILE_PATTERN;
use crate::resilience::BackoffKind;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct LinkConfig {
    /// Fixed JSON-RPC endpoint used by desktop connections.
    pub rpc: RpcConfig,

    /// Endpoint ranking for the desktop fallback set.
    pub fallback: FallbackConfig,

    /// Liveness probe retry settings.
    pub liveness: LivenessConfig,

    /// Mobile detection.
    pub platform: PlatformConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// JSON-RPC endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL.
    pub url: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl RpcConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "https://eth.llamarpc.com".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Rank and stall timeout of one fallback endpoint.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Lower is preferred.
    pub priority: u32,

    /// Milliseconds before the next endpoint is raced as well.
    pub stall_timeout_ms: u64,
}

impl EndpointConfig {
    pub fn stall_timeout(&self) -> Duration {
        Duration::from_millis(self.stall_timeout_ms)
    }
}

/// Desktop fallback configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct FallbackConfig {
    pub json_rpc: EndpointConfig,
    pub injected: EndpointConfig,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            json_rpc: EndpointConfig {
                priority: 1,
                stall_timeout_ms: 1000,
            },
            injected: EndpointConfig {
                priority: 2,
                stall_timeout_ms: 1000,
            },
        }
    }
}

/// Liveness probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LivenessConfig {
    /// Total probe attempts, including the first.
    pub max_attempts: u32,

    /// Delay between attempts in milliseconds (base delay for exponential).
    pub retry_interval_ms: u64,

    /// Delay schedule.
    pub backoff: BackoffKind,

    /// Cap for exponential backoff in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for LivenessConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            retry_interval_ms: 2000,
            backoff: BackoffKind::Fixed,
            max_delay_ms: 30_000,
        }
    }
}

/// Platform detection configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlatformConfig {
    /// Case-insensitive regex matched against the user agent.
    pub mobile_user_agent_pattern: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            mobile_user_agent_pattern: DEFAULT_MOBILE_PATTERN.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LinkConfig::default();
        assert_eq!(config.fallback.json_rpc.priority, 1);
        assert_eq!(config.fallback.injected.priority, 2);
        assert_eq!(config.fallback.json_rpc.stall_timeout(), Duration::from_millis(1000));
        assert_eq!(config.liveness.max_attempts, 10);
        assert_eq!(config.liveness.retry_interval_ms, 2000);
        assert_eq!(config.liveness.backoff, BackoffKind::Fixed);
        assert_eq!(config.rpc.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: LinkConfig = toml::from_str("").unwrap();
        assert_eq!(config, LinkConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: LinkConfig = toml::from_str(
            r#"
            [rpc]
            url = "http://localhost:8545"

            [liveness]
            max_attempts = 3
            backoff = "exponential"
            "#,
        )
        .unwrap();
        assert_eq!(config.rpc.url, "http://localhost:8545");
        assert_eq!(config.rpc.request_timeout_secs, 10);
        assert_eq!(config.liveness.max_attempts, 3);
        assert_eq!(config.liveness.retry_interval_ms, 2000);
        assert_eq!(config.liveness.backoff, BackoffKind::Exponential);
    }
}
