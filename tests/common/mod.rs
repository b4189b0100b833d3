//! Shared test doubles for integration tests.

#![allow(dead_code)]

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use wallet_link::blockchain::{ConnectionError, ConnectionResult, LinkFactory, RpcLink};
use wallet_link::config::LinkConfig;
use wallet_link::ConnectionManager;

/// Scriptable upstream: fails a set number of probes, then answers after a delay.
pub struct ScriptedLink {
    label: &'static str,
    chain_id: u64,
    delay: Duration,
    failures_left: AtomicU32,
    probes: AtomicU32,
}

impl ScriptedLink {
    pub fn healthy(label: &'static str, chain_id: u64) -> Arc<Self> {
        Self::new(label, chain_id, 0, Duration::ZERO)
    }

    pub fn failing(label: &'static str, chain_id: u64, failures: u32) -> Arc<Self> {
        Self::new(label, chain_id, failures, Duration::ZERO)
    }

    pub fn slow(label: &'static str, chain_id: u64, delay_ms: u64) -> Arc<Self> {
        Self::new(label, chain_id, 0, Duration::from_millis(delay_ms))
    }

    pub fn new(label: &'static str, chain_id: u64, failures: u32, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            label,
            chain_id,
            delay,
            failures_left: AtomicU32::new(failures),
            probes: AtomicU32::new(0),
        })
    }

    /// Number of chain ID requests received.
    pub fn probes(&self) -> u32 {
        self.probes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RpcLink for ScriptedLink {
    fn label(&self) -> &str {
        self.label
    }

    async fn get_chain_id(&self) -> ConnectionResult<u64> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if fail {
            Err(ConnectionError::Rpc(format!("{} connection refused", self.label)))
        } else {
            Ok(self.chain_id)
        }
    }

    async fn get_block_number(&self) -> ConnectionResult<u64> {
        Ok(19_000_000)
    }

    async fn get_balance(&self, _address: Address) -> ConnectionResult<U256> {
        Ok(U256::from(1_500_000_000_000_000_000u128))
    }
}

/// Factory handing out a fixed JSON-RPC link and counting builds.
pub struct StubFactory {
    link: Arc<ScriptedLink>,
    built: AtomicU32,
}

impl StubFactory {
    pub fn new(link: Arc<ScriptedLink>) -> Arc<Self> {
        Arc::new(Self {
            link,
            built: AtomicU32::new(0),
        })
    }

    pub fn built(&self) -> u32 {
        self.built.load(Ordering::SeqCst)
    }
}

impl LinkFactory for StubFactory {
    fn json_rpc(&self, _url: &str) -> ConnectionResult<Arc<dyn RpcLink>> {
        self.built.fetch_add(1, Ordering::SeqCst);
        Ok(self.link.clone())
    }
}

/// Manager with default timings and the given JSON-RPC link.
pub fn manager_with(json_rpc: Arc<ScriptedLink>) -> (ConnectionManager, Arc<StubFactory>) {
    let factory = StubFactory::new(json_rpc);
    let manager = ConnectionManager::with_factory(LinkConfig::default(), factory.clone());
    (manager, factory)
}
