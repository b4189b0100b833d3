//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse, WALLET_LINK_RPC_URL override)
//!     → validation.rs (semantic checks, all errors collected)
//!     → LinkConfig (immutable, owned by the connection manager)
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{EndpointConfig, FallbackConfig, LinkConfig, LivenessConfig, RpcConfig};
pub use validation::{validate_config, ValidationError};
