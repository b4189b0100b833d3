//! Process-wide connection manager.
//!
//! `install` must run before the first `global()` call to take effect;
//! otherwise a manager with the default configuration is created.

use std::sync::OnceLock;

use crate::blockchain::{Connection, ConnectionResult};
use crate::config::LinkConfig;
use crate::lifecycle::manager::ConnectionManager;
use crate::platform::EnvironmentProbe;

static GLOBAL: OnceLock<ConnectionManager> = OnceLock::new();

/// Set the process-wide manager. Returns it back if one is already set.
pub fn install(manager: ConnectionManager) -> Result<(), ConnectionManager> {
    GLOBAL.set(manager)
}

pub fn global() -> &'static ConnectionManager {
    GLOBAL.get_or_init(|| ConnectionManager::new(LinkConfig::default()))
}

pub async fn acquire(env: &dyn EnvironmentProbe) -> ConnectionResult<Connection> {
    global().acquire(env).await
}

pub fn peek() -> Option<Connection> {
    global().peek()
}

pub fn reset() {
    global().reset()
}
