//! Blockchain connection subsystem.
//!
//! # Data Flow
//! ```text
//! injected wallet handle / JSON-RPC URL
//!     → link.rs (RpcLink over an alloy provider, per-request timeouts)
//!     → fallback.rs (priority race with stall timeouts, desktop only)
//!     → connection.rs (Connection + units.rs conversion surface)
//! ```

pub mod connection;
pub mod fallback;
pub mod link;
pub mod types;
pub mod units;

pub use connection::{Connection, Topology};
pub use fallback::{ConnectionEndpoint, FallbackLink};
pub use link::{AlloyLink, AlloyLinkFactory, LinkFactory, ProviderHandle, RpcLink};
pub use types::{ChainId, ConnectionError, ConnectionResult, NetworkInfo};
pub use units::{format_ether, parse_ether, EtherUnits, UnitsError};
