//! The connection object handed to callers.

use alloy::primitives::{Address, U256};
use std::sync::Arc;

use crate::blockchain::fallback::FallbackLink;
use crate::blockchain::link::{ProviderHandle, RpcLink};
use crate::blockchain::types::{ChainId, ConnectionResult, NetworkInfo};
use crate::blockchain::units::EtherUnits;
use crate::networks;

/// How a connection reaches the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Straight through the injected wallet handle.
    Direct,
    /// Priority race across several endpoints.
    Fallback { endpoints: usize },
}

/// Immutable, cheaply cloned RPC connection with a unit conversion surface.
#[derive(Clone)]
pub struct Connection {
    inner: Arc<ConnectionInner>,
}

struct ConnectionInner {
    topology: Topology,
    link: Arc<dyn RpcLink>,
    units: EtherUnits,
}

impl Connection {
    /// Connection that talks to the injected handle directly.
    pub fn direct(handle: ProviderHandle) -> Self {
        Self::with_topology(Topology::Direct, handle)
    }

    /// Connection that races the endpoints of a fallback set.
    pub fn fallback(link: FallbackLink) -> Self {
        let topology = Topology::Fallback {
            endpoints: link.endpoints().len(),
        };
        Self::with_topology(topology, Arc::new(link))
    }

    fn with_topology(topology: Topology, link: Arc<dyn RpcLink>) -> Self {
        Self {
            inner: Arc::new(ConnectionInner {
                topology,
                link,
                units: EtherUnits,
            }),
        }
    }

    pub fn topology(&self) -> Topology {
        self.inner.topology
    }

    /// Decimal conversions at 18-decimal precision.
    pub fn utils(&self) -> &EtherUnits {
        &self.inner.units
    }

    /// Whether two handles refer to the same published connection.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Read the network identity; used as the liveness probe.
    pub async fn get_network(&self) -> ConnectionResult<NetworkInfo> {
        let chain_id = self.inner.link.get_chain_id().await?;
        Ok(NetworkInfo {
            chain_id: ChainId(chain_id),
            name: networks::network_by_chain_id(chain_id).map(|n| n.name),
        })
    }

    pub async fn get_block_number(&self) -> ConnectionResult<u64> {
        self.inner.link.get_block_number().await
    }

    pub async fn get_balance(&self, address: Address) -> ConnectionResult<U256> {
        self.inner.link.get_balance(address).await
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("topology", &self.inner.topology)
            .field("link", &self.inner.link.label())
            .finish()
    }
}
