//! Connection lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! acquire(env):
//!     Ready         → return the connection
//!     Initializing  → await the shared signal
//!     Absent        → strategy.rs (Direct on mobile, Fallback on desktop)
//!                   → build connection → liveness probe with retries
//!                   → publish Ready, or revert to Absent on failure
//!
//! global.rs holds the process-wide manager behind acquire/peek/reset.
//! ```

pub mod global;
pub mod manager;
pub mod strategy;

pub use global::{acquire, global, install, peek, reset};
pub use manager::{ConnectionManager, LifecycleStatus};
pub use strategy::{ConnectionStrategy, DirectStrategy, FallbackStrategy};
