//! Configuration validation.
//!
//! Serde handles syntax; this checks values. All problems are reported at
//! once rather than stopping at the first.

use thiserror::Error;

use crate::config::schema::LinkConfig;
use crate::platform::UserAgentClassifier;
use crate::resilience::BackoffKind;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("rpc.url '{url}' is not a valid http(s) URL")]
    InvalidRpcUrl { url: String },

    #[error("rpc.request_timeout_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("fallback.{endpoint}.stall_timeout_ms must be greater than zero")]
    ZeroStallTimeout { endpoint: &'static str },

    #[error("fallback endpoints share priority {0}")]
    DuplicatePriority(u32),

    #[error("liveness.max_attempts must be at least 1")]
    ZeroAttempts,

    #[error("liveness.max_delay_ms ({max}) is below retry_interval_ms ({interval})")]
    MaxDelayBelowInterval { max: u64, interval: u64 },

    #[error("platform.mobile_user_agent_pattern is not a valid regex: {0}")]
    InvalidPattern(String),

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Check a parsed configuration.
pub fn validate_config(config: &LinkConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match url::Url::parse(&config.rpc.url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::InvalidRpcUrl {
            url: config.rpc.url.clone(),
        }),
    }
    if config.rpc.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let fallback = &config.fallback;
    if fallback.json_rpc.stall_timeout_ms == 0 {
        errors.push(ValidationError::ZeroStallTimeout { endpoint: "json_rpc" });
    }
    if fallback.injected.stall_timeout_ms == 0 {
        errors.push(ValidationError::ZeroStallTimeout { endpoint: "injected" });
    }
    if fallback.json_rpc.priority == fallback.injected.priority {
        errors.push(ValidationError::DuplicatePriority(fallback.json_rpc.priority));
    }

    let liveness = &config.liveness;
    if liveness.max_attempts == 0 {
        errors.push(ValidationError::ZeroAttempts);
    }
    // max_delay_ms only caps the exponential curve
    if liveness.backoff == BackoffKind::Exponential && liveness.max_delay_ms < liveness.retry_interval_ms {
        errors.push(ValidationError::MaxDelayBelowInterval {
            max: liveness.max_delay_ms,
            interval: liveness.retry_interval_ms,
        });
    }

    if let Err(e) = UserAgentClassifier::new(&config.platform.mobile_user_agent_pattern) {
        errors.push(ValidationError::InvalidPattern(e.to_string()));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(config.observability.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
