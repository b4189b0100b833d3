//! Wallet connection library for EVM networks.
//!
//! Builds a single RPC connection lazily, lets concurrent callers share one
//! initialization, and keeps the result as a process-wide singleton until it
//! is explicitly reset.

pub mod blockchain;
pub mod config;
pub mod lifecycle;
pub mod networks;
pub mod observability;
pub mod platform;
pub mod resilience;

pub use blockchain::{Connection, ConnectionError, ProviderHandle, RpcLink};
pub use config::LinkConfig;
pub use lifecycle::ConnectionManager;
