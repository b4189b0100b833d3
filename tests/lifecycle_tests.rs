//! Lifecycle manager behavior under concurrency, retries and resets.

use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;

use wallet_link::blockchain::{ConnectionError, Topology};
use wallet_link::lifecycle::LifecycleStatus;
use wallet_link::platform::{Platform, StaticEnvironment};
use wallet_link::Connection;

mod common;
use common::{manager_with, ScriptedLink};

fn mobile(handle: &Arc<ScriptedLink>) -> StaticEnvironment {
    StaticEnvironment::with_platform(Platform::Mobile, Some(handle.clone()))
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_acquires_share_one_initialization() {
    let wallet = ScriptedLink::slow("wallet", 1, 300);
    let (manager, factory) = manager_with(ScriptedLink::healthy("json-rpc", 1));
    let env = mobile(&wallet);

    let results = join_all((0..8).map(|_| manager.acquire(&env))).await;

    let connections: Vec<Connection> = results.into_iter().map(Result::unwrap).collect();
    assert_eq!(wallet.probes(), 1, "exactly one liveness probe");
    assert_eq!(factory.built(), 0, "mobile never builds a JSON-RPC link");
    for connection in &connections[1..] {
        assert!(Connection::ptr_eq(&connections[0], connection));
    }
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_acquires_share_one_failure() {
    let wallet = ScriptedLink::failing("wallet", 1, u32::MAX);
    let (manager, _) = manager_with(ScriptedLink::healthy("json-rpc", 1));
    let env = mobile(&wallet);

    let results = join_all((0..4).map(|_| manager.acquire(&env))).await;

    let errors: Vec<ConnectionError> = results.into_iter().map(Result::unwrap_err).collect();
    assert!(matches!(errors[0], ConnectionError::ProviderInitializationTimeout { attempts: 10, .. }));
    assert!(errors.iter().all(|e| *e == errors[0]));
    assert_eq!(wallet.probes(), 10);
    assert_eq!(manager.status(), LifecycleStatus::Absent);
}

#[tokio::test(start_paused = true)]
async fn test_probe_succeeds_on_tenth_attempt() {
    let wallet = ScriptedLink::failing("wallet", 1, 9);
    let (manager, _) = manager_with(ScriptedLink::healthy("json-rpc", 1));

    let started = tokio::time::Instant::now();
    let connection = manager.acquire(&mobile(&wallet)).await.unwrap();

    assert_eq!(wallet.probes(), 10);
    assert!(started.elapsed() >= Duration::from_millis(9 * 2000));
    assert!(Connection::ptr_eq(&connection, &manager.peek().unwrap()));
}

#[tokio::test(start_paused = true)]
async fn test_ten_failures_time_out_and_allow_retry() {
    let wallet = ScriptedLink::failing("wallet", 1, 10);
    let (manager, _) = manager_with(ScriptedLink::healthy("json-rpc", 1));
    let env = mobile(&wallet);

    let err = manager.acquire(&env).await.unwrap_err();
    assert_eq!(
        err,
        ConnectionError::ProviderInitializationTimeout {
            attempts: 10,
            last_error: "RPC error: wallet connection refused".into(),
        }
    );
    assert_eq!(manager.status(), LifecycleStatus::Absent);
    assert!(manager.peek().is_none());

    // A later acquire starts over from Absent
    manager.acquire(&env).await.unwrap();
    assert_eq!(wallet.probes(), 11);
}

#[tokio::test]
async fn test_mobile_without_handle_makes_no_network_call() {
    let json_rpc = ScriptedLink::healthy("json-rpc", 1);
    let (manager, factory) = manager_with(json_rpc.clone());
    let env = StaticEnvironment::with_platform(Platform::Mobile, None);

    let err = manager.acquire(&env).await.unwrap_err();
    assert_eq!(err, ConnectionError::NoProviderAvailable);
    assert_eq!(factory.built(), 0);
    assert_eq!(json_rpc.probes(), 0);
    assert_eq!(manager.status(), LifecycleStatus::Absent);
}

#[tokio::test(start_paused = true)]
async fn test_peek_does_not_initialize() {
    let wallet = ScriptedLink::slow("wallet", 1, 500);
    let (manager, _) = manager_with(ScriptedLink::healthy("json-rpc", 1));
    let env = mobile(&wallet);

    assert!(manager.peek().is_none());
    assert_eq!(wallet.probes(), 0);

    let pending = manager.acquire(&env);
    tokio::pin!(pending);
    assert!(futures_util::poll!(pending.as_mut()).is_pending());
    assert_eq!(manager.status(), LifecycleStatus::Initializing);
    assert!(manager.peek().is_none());
    assert_eq!(wallet.probes(), 1);

    let connection = pending.await.unwrap();
    assert!(Connection::ptr_eq(&connection, &manager.peek().unwrap()));
}

#[tokio::test]
async fn test_reset_then_acquire_builds_fresh_connection() {
    let wallet = ScriptedLink::healthy("wallet", 1);
    let (manager, _) = manager_with(ScriptedLink::healthy("json-rpc", 1));
    let env = mobile(&wallet);

    let first = manager.acquire(&env).await.unwrap();
    manager.reset();
    let second = manager.acquire(&env).await.unwrap();

    assert!(!Connection::ptr_eq(&first, &second));
    assert_eq!(wallet.probes(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_reset_detaches_in_flight_initialization() {
    let wallet = ScriptedLink::slow("wallet", 1, 1000);
    let (manager, _) = manager_with(ScriptedLink::healthy("json-rpc", 1));
    let env = mobile(&wallet);

    let detached = manager.acquire(&env);
    tokio::pin!(detached);
    assert!(futures_util::poll!(detached.as_mut()).is_pending());

    manager.reset();
    assert_eq!(manager.status(), LifecycleStatus::Absent);

    // A fresh initialization starts instead of joining the detached one
    let fresh = manager.acquire(&env).await.unwrap();
    assert_eq!(wallet.probes(), 2);

    // The detached caller still gets its own outcome, which is never published
    let stale = detached.await.unwrap();
    assert!(!Connection::ptr_eq(&stale, &fresh));
    assert!(Connection::ptr_eq(&fresh, &manager.peek().unwrap()));
}

#[tokio::test(start_paused = true)]
async fn test_dropping_manager_releases_parked_initialization() {
    let wallet = ScriptedLink::slow("wallet", 1, 10_000);
    let (manager, _) = manager_with(ScriptedLink::healthy("json-rpc", 1));
    let env = mobile(&wallet);

    let waited = tokio::time::timeout(Duration::from_millis(100), manager.acquire(&env)).await;
    assert!(waited.is_err());
    assert_eq!(manager.status(), LifecycleStatus::Initializing);

    drop(manager);
    drop(env);
    assert_eq!(Arc::strong_count(&wallet), 1);
}

#[tokio::test(start_paused = true)]
async fn test_desktop_prefers_json_rpc_within_stall_timeout() {
    let json_rpc = ScriptedLink::slow("json-rpc", 1, 200);
    let wallet = ScriptedLink::healthy("wallet", 137);
    let (manager, factory) = manager_with(json_rpc.clone());
    let env = StaticEnvironment::with_platform(Platform::Desktop, Some(wallet.clone()));

    let connection = manager.acquire(&env).await.unwrap();
    assert_eq!(connection.topology(), Topology::Fallback { endpoints: 2 });
    assert_eq!(factory.built(), 1);

    let network = connection.get_network().await.unwrap();
    assert_eq!(network.chain_id.0, 1);
    assert_eq!(network.name, Some("Ethereum Mainnet"));
    assert_eq!(wallet.probes(), 0, "injected endpoint never raced");
}

#[tokio::test(start_paused = true)]
async fn test_desktop_falls_back_to_wallet_when_json_rpc_stalls() {
    let json_rpc = ScriptedLink::slow("json-rpc", 1, 5000);
    let wallet = ScriptedLink::slow("wallet", 137, 100);
    let (manager, _) = manager_with(json_rpc.clone());
    let env = StaticEnvironment::with_platform(Platform::Desktop, Some(wallet.clone()));

    let started = tokio::time::Instant::now();
    let connection = manager.acquire(&env).await.unwrap();

    assert!(started.elapsed() < Duration::from_millis(5000));
    assert_eq!(json_rpc.probes(), 1);
    assert_eq!(wallet.probes(), 1);

    // Late primary answers are dropped; the published connection is unchanged
    tokio::time::sleep(Duration::from_millis(6000)).await;
    assert!(Connection::ptr_eq(&connection, &manager.peek().unwrap()));
}

#[tokio::test]
async fn test_connection_utils_are_18_decimal() {
    let wallet = ScriptedLink::healthy("wallet", 1);
    let (manager, _) = manager_with(ScriptedLink::healthy("json-rpc", 1));
    let connection = manager.acquire(&mobile(&wallet)).await.unwrap();

    let utils = connection.utils();
    let wei = utils.parse_ether("1.5").unwrap();
    assert_eq!(utils.format_ether(wei), "1.5");

    let balance = connection.get_balance(Default::default()).await.unwrap();
    assert_eq!(utils.format_ether(balance), "1.5");
}
