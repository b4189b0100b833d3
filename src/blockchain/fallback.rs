//! Priority-ordered fallback across RPC endpoints.
//!
//! # Racing rules
//! ```text
//! start endpoint[0]
//!     resolves Ok before its stall timeout  → use it
//!     stall timeout elapses                 → also start endpoint[1], first Ok wins
//!     resolves Err                          → start the next endpoint now
//! settled → every other in-flight request is dropped
//! ```

use alloy::primitives::{Address, U256};
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use futures_util::FutureExt;
use std::sync::Arc;
use std::time::Duration;

use crate::blockchain::link::RpcLink;
use crate::blockchain::types::{ConnectionError, ConnectionResult};
use crate::observability::metrics;

/// A single upstream candidate in a fallback set.
#[derive(Clone)]
pub struct ConnectionEndpoint {
    pub link: Arc<dyn RpcLink>,
    /// Lower is preferred.
    pub priority: u32,
    /// How long to wait before also racing the next endpoint.
    pub stall_timeout: Duration,
}

impl ConnectionEndpoint {
    pub fn new(link: Arc<dyn RpcLink>, priority: u32, stall_timeout: Duration) -> Self {
        Self {
            link,
            priority,
            stall_timeout,
        }
    }
}

impl std::fmt::Debug for ConnectionEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionEndpoint")
            .field("link", &self.link.label())
            .field("priority", &self.priority)
            .field("stall_timeout", &self.stall_timeout)
            .finish()
    }
}

/// `RpcLink` that races its endpoints by priority with stall timeouts.
pub struct FallbackLink {
    endpoints: Vec<ConnectionEndpoint>,
}

impl FallbackLink {
    /// Compose endpoints; they are sorted by priority (stable for ties).
    pub fn new(mut endpoints: Vec<ConnectionEndpoint>) -> ConnectionResult<Self> {
        if endpoints.is_empty() {
            return Err(ConnectionError::NoEndpoints);
        }
        endpoints.sort_by_key(|e| e.priority);
        Ok(Self { endpoints })
    }

    pub fn endpoints(&self) -> &[ConnectionEndpoint] {
        &self.endpoints
    }

    async fn race<T, F>(&self, call: F) -> ConnectionResult<T>
    where
        T: Send + 'static,
        F: Fn(Arc<dyn RpcLink>) -> BoxFuture<'static, ConnectionResult<T>>,
    {
        let mut pending = self.endpoints.iter();
        let mut in_flight: FuturesUnordered<Racing<T>> = FuturesUnordered::new();
        let mut last_error = ConnectionError::NoEndpoints;

        let mut stall_timeout = launch_next(&mut pending, &mut in_flight, &call);

        while !in_flight.is_empty() {
            // No stall timer once the last endpoint is running
            let settled = match stall_timeout.filter(|_| !pending.as_slice().is_empty()) {
                Some(stall) => tokio::select! {
                    next = in_flight.next() => next,
                    () = tokio::time::sleep(stall) => None,
                },
                None => in_flight.next().await,
            };

            match settled {
                Some((label, Ok(value))) => {
                    tracing::debug!(endpoint = %label, "Endpoint request succeeded");
                    return Ok(value);
                }
                Some((label, Err(e))) => {
                    tracing::warn!(endpoint = %label, error = %e, "Endpoint request failed, trying next endpoint");
                    last_error = e;
                    if let Some(stall) = launch_next(&mut pending, &mut in_flight, &call) {
                        stall_timeout = Some(stall);
                    }
                }
                None => {
                    tracing::debug!("Endpoint stalled, racing next endpoint");
                    metrics::record_endpoint_stall();
                    stall_timeout = launch_next(&mut pending, &mut in_flight, &call);
                }
            }
        }

        Err(last_error)
    }
}

type Racing<T> = BoxFuture<'static, (String, ConnectionResult<T>)>;

/// Start the next pending endpoint, returning its stall timeout.
fn launch_next<T, F>(
    pending: &mut std::slice::Iter<'_, ConnectionEndpoint>,
    in_flight: &mut FuturesUnordered<Racing<T>>,
    call: &F,
) -> Option<Duration>
where
    T: Send + 'static,
    F: Fn(Arc<dyn RpcLink>) -> BoxFuture<'static, ConnectionResult<T>>,
{
    let endpoint = pending.next()?;
    let label = endpoint.link.label().to_string();
    tracing::debug!(endpoint = %label, priority = endpoint.priority, "Starting endpoint request");

    let request = call(endpoint.link.clone());
    in_flight.push(async move { (label, request.await) }.boxed());
    Some(endpoint.stall_timeout)
}

#[async_trait]
impl RpcLink for FallbackLink {
    fn label(&self) -> &str {
        "fallback"
    }

    async fn get_chain_id(&self) -> ConnectionResult<u64> {
        self.race(|link| async move { link.get_chain_id().await }.boxed()).await
    }

    async fn get_block_number(&self) -> ConnectionResult<u64> {
        self.race(|link| async move { link.get_block_number().await }.boxed()).await
    }

    async fn get_balance(&self, address: Address) -> ConnectionResult<U256> {
        self.race(move |link| async move { link.get_balance(address).await }.boxed()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct DelayedLink {
        label: &'static str,
        delay: Duration,
        chain_id: Option<u64>,
        calls: AtomicU32,
    }

    impl DelayedLink {
        fn arc(label: &'static str, delay_ms: u64, chain_id: Option<u64>) -> Arc<Self> {
            Arc::new(Self {
                label,
                delay: Duration::from_millis(delay_ms),
                chain_id,
                calls: AtomicU32::new(0),
            })
        }
    }

    #[async_trait]
    impl RpcLink for DelayedLink {
        fn label(&self) -> &str {
            self.label
        }

        async fn get_chain_id(&self) -> ConnectionResult<u64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.chain_id
                .ok_or_else(|| ConnectionError::Rpc(format!("{} unavailable", self.label)))
        }

        async fn get_block_number(&self) -> ConnectionResult<u64> {
            self.get_chain_id().await.map(|id| id * 100)
        }

        async fn get_balance(&self, _address: Address) -> ConnectionResult<U256> {
            self.get_chain_id().await.map(U256::from)
        }
    }

    fn fallback(primary: Arc<DelayedLink>, secondary: Arc<DelayedLink>) -> FallbackLink {
        FallbackLink::new(vec![
            ConnectionEndpoint::new(secondary, 2, Duration::from_millis(1000)),
            ConnectionEndpoint::new(primary, 1, Duration::from_millis(1000)),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_fallback_rejected() {
        assert!(matches!(FallbackLink::new(Vec::new()), Err(ConnectionError::NoEndpoints)));
    }

    #[test]
    fn test_endpoints_sorted_by_priority() {
        let link = fallback(DelayedLink::arc("p1", 0, Some(1)), DelayedLink::arc("p2", 0, Some(2)));
        let priorities: Vec<u32> = link.endpoints().iter().map(|e| e.priority).collect();
        assert_eq!(priorities, vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_primary_within_stall_timeout_wins() {
        let primary = DelayedLink::arc("p1", 500, Some(1));
        let secondary = DelayedLink::arc("p2", 0, Some(2));
        let link = fallback(primary.clone(), secondary.clone());

        assert_eq!(link.get_chain_id().await.unwrap(), 1);
        assert_eq!(secondary.calls.load(Ordering::SeqCst), 0, "secondary must not be raced");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_primary_loses_to_secondary() {
        let primary = DelayedLink::arc("p1", 5000, Some(1));
        let secondary = DelayedLink::arc("p2", 100, Some(2));
        let link = fallback(primary.clone(), secondary.clone());

        assert_eq!(link.get_chain_id().await.unwrap(), 2);
        assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
        assert_eq!(secondary.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_primary_still_wins_if_first() {
        // Primary stalls past 1s but finishes at 1.2s; secondary needs 2s
        let primary = DelayedLink::arc("p1", 1200, Some(1));
        let secondary = DelayedLink::arc("p2", 2000, Some(2));
        let link = fallback(primary, secondary.clone());

        assert_eq!(link.get_chain_id().await.unwrap(), 1);
        assert_eq!(secondary.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_primary_falls_through_immediately() {
        let primary = DelayedLink::arc("p1", 10, None);
        let secondary = DelayedLink::arc("p2", 10, Some(2));
        let link = fallback(primary, secondary);

        let started = tokio::time::Instant::now();
        assert_eq!(link.get_chain_id().await.unwrap(), 2);
        assert!(started.elapsed() < Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_endpoints_failing_returns_last_error() {
        let link = fallback(DelayedLink::arc("p1", 10, None), DelayedLink::arc("p2", 10, None));
        let err = link.get_block_number().await.unwrap_err();
        assert_eq!(err, ConnectionError::Rpc("p2 unavailable".into()));
    }
}
