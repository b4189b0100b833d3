//! Chain-specific types and error definitions.

use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Network identity reported by a connection's metadata read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkInfo {
    /// Chain ID returned by the upstream.
    pub chain_id: ChainId,
    /// Display name from the network registry, if the chain is known.
    pub name: Option<&'static str>,
}

/// Errors that can occur while building or using a connection.
///
/// Cloneable so a single initialization outcome can be handed to every
/// caller waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// Mobile-class environment without an injected wallet handle.
    #[error("No Ethereum provider available on mobile")]
    NoProviderAvailable,

    /// The liveness probe failed on every allowed attempt.
    #[error("Provider failed to initialize after {attempts} attempts: {last_error}")]
    ProviderInitializationTimeout { attempts: u32, last_error: String },

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Endpoint URL could not be parsed.
    #[error("Invalid RPC URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A fallback connection was composed with no endpoints.
    #[error("No RPC endpoints configured")]
    NoEndpoints,

    /// Connection setup panicked, usually inside an injected handle.
    #[error("Provider initialization panicked: {0}")]
    InitializationPanicked(String),
}

/// Result type for connection operations.
pub type ConnectionResult<T> = Result<T, ConnectionError>;
