//! Connection lifecycle manager.
//!
//! # States
//! ```text
//! Absent ──acquire──▶ Initializing { generation, signal } ──probe ok──▶ Ready(Connection)
//!   ▲                              │ failure                                │
//!   └──────────────────────────────┴────────────── reset ───────────────────┘
//! ```
//!
//! The signal is a shared future: whichever caller polls it drives the
//! initialization, and every caller awaiting it gets the same outcome.
//! A result is only published if its generation is still the current one,
//! so an initialization detached by `reset` can never reappear.
//!
//! The signal only holds a weak reference back to the manager. A panic while
//! building or probing is caught and published as an ordinary failure.

use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::blockchain::{AlloyLinkFactory, Connection, ConnectionError, ConnectionResult, LinkFactory};
use crate::config::LinkConfig;
use crate::lifecycle::strategy::ConnectionStrategy;
use crate::observability::metrics;
use crate::platform::EnvironmentProbe;
use crate::resilience::RetryPolicy;

type InitSignal = Shared<BoxFuture<'static, ConnectionResult<Connection>>>;

enum LifecycleState {
    Absent,
    Initializing { generation: u64, signal: InitSignal },
    Ready(Connection),
}

/// Snapshot of the manager's state for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleStatus {
    Absent,
    Initializing,
    Ready,
}

struct Slot {
    state: LifecycleState,
    /// Last generation handed out.
    generation: u64,
}

struct Inner {
    slot: Mutex<Slot>,
    config: LinkConfig,
    factory: Arc<dyn LinkFactory>,
    retry: RetryPolicy,
}

/// Owns the lazily built, single-flight connection.
#[derive(Clone)]
pub struct ConnectionManager {
    inner: Arc<Inner>,
}

impl ConnectionManager {
    /// Manager building JSON-RPC links with alloy.
    pub fn new(config: LinkConfig) -> Self {
        let factory = Arc::new(AlloyLinkFactory::new(config.rpc.request_timeout()));
        Self::with_factory(config, factory)
    }

    pub fn with_factory(config: LinkConfig, factory: Arc<dyn LinkFactory>) -> Self {
        let retry = RetryPolicy::from_config(&config.liveness);
        Self {
            inner: Arc::new(Inner {
                slot: Mutex::new(Slot {
                    state: LifecycleState::Absent,
                    generation: 0,
                }),
                config,
                factory,
                retry,
            }),
        }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.inner.config
    }

    /// Return the connection, joining or starting its initialization.
    pub async fn acquire(&self, env: &dyn EnvironmentProbe) -> ConnectionResult<Connection> {
        // Probe code runs outside the lock; it may call back into the manager
        let platform = env.platform();
        let handle = env.injected_handle();

        let signal = {
            let mut guard = self.inner.lock();
            let slot = &mut *guard;
            match &slot.state {
                LifecycleState::Ready(connection) => return Ok(connection.clone()),
                LifecycleState::Initializing { generation, signal } => {
                    tracing::debug!(generation, "Joining in-flight initialization");
                    signal.clone()
                }
                LifecycleState::Absent => {
                    // Selection failures leave the state Absent
                    let strategy = ConnectionStrategy::select(platform, handle, &self.inner.config)?;
                    slot.generation += 1;
                    let generation = slot.generation;
                    tracing::info!(
                        generation,
                        %platform,
                        strategy = strategy.name(),
                        "Initializing connection"
                    );

                    let signal = initialize(
                        Arc::downgrade(&self.inner),
                        generation,
                        strategy,
                        self.inner.factory.clone(),
                        self.inner.retry.clone(),
                    )
                    .boxed()
                    .shared();
                    slot.state = LifecycleState::Initializing {
                        generation,
                        signal: signal.clone(),
                    };
                    signal
                }
            }
        };

        signal.await
    }

    /// The published connection, if any. Never blocks or initializes.
    pub fn peek(&self) -> Option<Connection> {
        match &self.inner.lock().state {
            LifecycleState::Ready(connection) => Some(connection.clone()),
            _ => None,
        }
    }

    /// Drop the published connection and detach any in-flight initialization.
    ///
    /// Callers already awaiting the detached initialization still receive its
    /// outcome; it is just never published.
    pub fn reset(&self) {
        let previous = {
            let mut slot = self.inner.lock();
            std::mem::replace(&mut slot.state, LifecycleState::Absent)
        };

        match previous {
            LifecycleState::Ready(_) => tracing::info!("Connection reset"),
            LifecycleState::Initializing { generation, .. } => {
                tracing::info!(generation, "Connection reset, in-flight initialization detached")
            }
            LifecycleState::Absent => tracing::debug!("Reset with no connection"),
        }
        metrics::record_connection_ready(false);
    }

    pub fn status(&self) -> LifecycleStatus {
        match self.inner.lock().state {
            LifecycleState::Absent => LifecycleStatus::Absent,
            LifecycleState::Initializing { .. } => LifecycleStatus::Initializing,
            LifecycleState::Ready(_) => LifecycleStatus::Ready,
        }
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("status", &self.status())
            .field("rpc_url", &self.inner.config.rpc.url)
            .field("max_attempts", &self.inner.retry.max_attempts())
            .finish()
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Slot> {
        // State stays consistent across a panic; every write is a single assignment
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, generation: u64, result: &ConnectionResult<Connection>) {
        let mut slot = self.lock();
        let current = matches!(
            &slot.state,
            LifecycleState::Initializing { generation: g, .. } if *g == generation
        );
        if !current {
            tracing::debug!(generation, "Initialization superseded by reset, result discarded");
            metrics::record_initialization("superseded");
            return;
        }

        let previous = match result {
            Ok(connection) => {
                metrics::record_initialization("ready");
                metrics::record_connection_ready(true);
                std::mem::replace(&mut slot.state, LifecycleState::Ready(connection.clone()))
            }
            Err(e) => {
                tracing::error!(generation, error = %e, "Connection initialization failed");
                metrics::record_initialization("failed");
                std::mem::replace(&mut slot.state, LifecycleState::Absent)
            }
        };
        drop(slot);
        // The old state holds a handle to the signal being resolved right now
        drop(previous);
    }
}

/// Build, probe and publish one generation.
///
/// Owns everything it needs so the shared signal never keeps the manager alive.
async fn initialize(
    manager: Weak<Inner>,
    generation: u64,
    strategy: ConnectionStrategy,
    factory: Arc<dyn LinkFactory>,
    retry: RetryPolicy,
) -> ConnectionResult<Connection> {
    let result = AssertUnwindSafe(build_and_probe(strategy, factory.as_ref(), &retry))
        .catch_unwind()
        .await
        .unwrap_or_else(|panic| {
            Err(ConnectionError::InitializationPanicked(panic_message(panic.as_ref())))
        });

    match manager.upgrade() {
        Some(inner) => inner.publish(generation, &result),
        None => tracing::debug!(generation, "Manager dropped before initialization finished"),
    }
    result
}

async fn build_and_probe(
    strategy: ConnectionStrategy,
    factory: &dyn LinkFactory,
    retry: &RetryPolicy,
) -> ConnectionResult<Connection> {
    let connection = strategy.build(factory)?;
    let max_attempts = retry.max_attempts();

    let network = retry
        .run(|attempt| {
            let connection = connection.clone();
            async move {
                connection.get_network().await.inspect_err(|e| {
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        error = %e,
                        "Waiting for provider to be ready"
                    );
                    metrics::record_probe_failure();
                })
            }
        })
        .await
        .map_err(|exhausted| ConnectionError::ProviderInitializationTimeout {
            attempts: exhausted.attempts,
            last_error: exhausted.last_error.to_string(),
        })?;

    tracing::info!(
        chain_id = %network.chain_id,
        network = network.name.unwrap_or("unknown"),
        topology = ?connection.topology(),
        "Connection initialized"
    );
    Ok(connection)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
