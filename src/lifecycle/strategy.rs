//! Connection strategies.
//!
//! One strategy is chosen per initialization, before any I/O:
//! - mobile: `Direct` through the injected handle, which must exist
//! - desktop: `Fallback` across the JSON-RPC endpoint and the injected handle

use crate::blockchain::{
    Connection, ConnectionEndpoint, ConnectionError, ConnectionResult, FallbackLink, LinkFactory,
    ProviderHandle,
};
use crate::config::{EndpointConfig, LinkConfig};
use crate::platform::Platform;

/// Talk to the injected handle directly.
#[derive(Clone)]
pub struct DirectStrategy {
    handle: ProviderHandle,
}

impl DirectStrategy {
    pub fn new(handle: ProviderHandle) -> Self {
        Self { handle }
    }

    pub fn build(self) -> Connection {
        Connection::direct(self.handle)
    }
}

/// Race the JSON-RPC endpoint against the injected handle.
#[derive(Clone)]
pub struct FallbackStrategy {
    rpc_url: String,
    json_rpc: EndpointConfig,
    injected: Option<(ProviderHandle, EndpointConfig)>,
}

impl FallbackStrategy {
    pub fn new(rpc_url: &str, json_rpc: EndpointConfig, injected: Option<(ProviderHandle, EndpointConfig)>) -> Self {
        Self {
            rpc_url: rpc_url.to_string(),
            json_rpc,
            injected,
        }
    }

    pub fn build(self, factory: &dyn LinkFactory) -> ConnectionResult<Connection> {
        let mut endpoints = vec![ConnectionEndpoint::new(
            factory.json_rpc(&self.rpc_url)?,
            self.json_rpc.priority,
            self.json_rpc.stall_timeout(),
        )];
        if let Some((handle, ranking)) = self.injected {
            endpoints.push(ConnectionEndpoint::new(handle, ranking.priority, ranking.stall_timeout()));
        }
        Ok(Connection::fallback(FallbackLink::new(endpoints)?))
    }
}

/// The closed set of ways to build a connection.
#[derive(Clone)]
pub enum ConnectionStrategy {
    Direct(DirectStrategy),
    Fallback(FallbackStrategy),
}

impl ConnectionStrategy {
    /// Pick a strategy from what the environment reported. Performs no I/O.
    pub fn select(
        platform: Platform,
        handle: Option<ProviderHandle>,
        config: &LinkConfig,
    ) -> ConnectionResult<Self> {
        match platform {
            Platform::Mobile => {
                let handle = handle.ok_or(ConnectionError::NoProviderAvailable)?;
                Ok(Self::Direct(DirectStrategy::new(handle)))
            }
            Platform::Desktop => {
                if handle.is_none() {
                    tracing::warn!("No injected provider on desktop, using JSON-RPC endpoint only");
                }
                let injected = handle.map(|h| (h, config.fallback.injected));
                Ok(Self::Fallback(FallbackStrategy::new(
                    &config.rpc.url,
                    config.fallback.json_rpc,
                    injected,
                )))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Direct(_) => "direct",
            Self::Fallback(_) => "fallback",
        }
    }

    pub fn build(self, factory: &dyn LinkFactory) -> ConnectionResult<Connection> {
        match self {
            Self::Direct(strategy) => Ok(strategy.build()),
            Self::Fallback(strategy) => strategy.build(factory),
        }
    }
}

impl std::fmt::Debug for ConnectionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
