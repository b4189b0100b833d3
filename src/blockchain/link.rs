//! Request capability shared by wallet handles and RPC endpoints.
//!
//! # Responsibilities
//! - Define the `RpcLink` trait the connection layer talks to
//! - Wrap an alloy HTTP provider with per-request timeouts
//! - Build JSON-RPC links from URLs through a swappable factory

use alloy::primitives::{Address, U256};
use alloy::providers::{Provider, ProviderBuilder};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{ConnectionError, ConnectionResult};

/// Read access to a chain through one upstream.
#[async_trait]
pub trait RpcLink: Send + Sync {
    /// Short identifier used in logs and metrics.
    fn label(&self) -> &str;

    /// Get the chain ID from the RPC.
    async fn get_chain_id(&self) -> ConnectionResult<u64>;

    /// Get the latest block number.
    async fn get_block_number(&self) -> ConnectionResult<u64>;

    /// Get the balance of an address in wei.
    async fn get_balance(&self, address: Address) -> ConnectionResult<U256>;
}

/// The wallet-injected handle supplied by the host environment.
pub type ProviderHandle = Arc<dyn RpcLink>;

/// Builds the fixed-URL JSON-RPC link used by desktop connections.
pub trait LinkFactory: Send + Sync {
    fn json_rpc(&self, url: &str) -> ConnectionResult<Arc<dyn RpcLink>>;
}

/// `RpcLink` backed by an alloy provider.
#[derive(Clone)]
pub struct AlloyLink {
    label: String,
    provider: Arc<dyn Provider + Send + Sync>,
    timeout_duration: Duration,
}

impl AlloyLink {
    /// Connect to a JSON-RPC endpoint over HTTP.
    ///
    /// No request is made here; the URL is only parsed.
    pub fn http(label: &str, rpc_url: &str, timeout_duration: Duration) -> ConnectionResult<Self> {
        let url: url::Url = rpc_url.parse().map_err(|e: url::ParseError| ConnectionError::InvalidUrl {
            url: rpc_url.to_string(),
            reason: e.to_string(),
        })?;
        let provider = ProviderBuilder::new().connect_http(url);
        Ok(Self::from_provider(label, Arc::new(provider), timeout_duration))
    }

    /// Wrap an already constructed provider.
    pub fn from_provider(
        label: &str,
        provider: Arc<dyn Provider + Send + Sync>,
        timeout_duration: Duration,
    ) -> Self {
        Self {
            label: label.to_string(),
            provider,
            timeout_duration,
        }
    }

    fn timeout_error(&self) -> ConnectionError {
        tracing::warn!(link = %self.label, "RPC timeout");
        ConnectionError::Timeout(self.timeout_duration.as_secs())
    }
}

#[async_trait]
impl RpcLink for AlloyLink {
    fn label(&self) -> &str {
        &self.label
    }

    async fn get_chain_id(&self) -> ConnectionResult<u64> {
        match timeout(self.timeout_duration, self.provider.get_chain_id()).await {
            Ok(result) => result.map_err(|e| ConnectionError::Rpc(e.to_string())),
            Err(_) => Err(self.timeout_error()),
        }
    }

    async fn get_block_number(&self) -> ConnectionResult<u64> {
        match timeout(self.timeout_duration, self.provider.get_block_number()).await {
            Ok(result) => result.map_err(|e| ConnectionError::Rpc(e.to_string())),
            Err(_) => Err(self.timeout_error()),
        }
    }

    async fn get_balance(&self, address: Address) -> ConnectionResult<U256> {
        match timeout(self.timeout_duration, self.provider.get_balance(address)).await {
            Ok(result) => result.map_err(|e| ConnectionError::Rpc(e.to_string())),
            Err(_) => Err(self.timeout_error()),
        }
    }
}

impl std::fmt::Debug for AlloyLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlloyLink")
            .field("label", &self.label)
            .field("timeout", &self.timeout_duration)
            .finish()
    }
}

/// Production factory: HTTP links through alloy.
#[derive(Debug, Clone)]
pub struct AlloyLinkFactory {
    timeout_duration: Duration,
}

impl AlloyLinkFactory {
    pub fn new(timeout_duration: Duration) -> Self {
        Self { timeout_duration }
    }
}

impl LinkFactory for AlloyLinkFactory {
    fn json_rpc(&self, url: &str) -> ConnectionResult<Arc<dyn RpcLink>> {
        let link = AlloyLink::http("json-rpc", url, self.timeout_duration)?;
        Ok(Arc::new(link))
    }
}
