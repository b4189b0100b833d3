//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! connection manager, fallback racing, retries
//!     → tracing events with structured fields (logging.rs installs the subscriber)
//!     → metrics.rs (counters and gauges through the `metrics` facade)
//! ```

pub mod logging;
pub mod metrics;
