//! Network registry.
//!
//! Read-only lookup of the EVM networks offered to the user, keyed by chain
//! ID. RPC URLs can be overridden per network through environment variables.

pub mod registry;

pub use registry::{default_network, network_by_chain_id, NativeCurrency, Network, SUPPORTED_NETWORKS};
