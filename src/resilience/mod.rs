//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Liveness probe of a new connection:
//!     → retries.rs (bounded attempts, stop on first success)
//!     → backoff.rs (fixed delay by default, jittered exponential optional)
//! ```
//!
//! Stall-timeout racing between endpoints lives with the connection types in
//! `blockchain::fallback`.

pub mod backoff;
pub mod retries;

pub use backoff::BackoffKind;
pub use retries::{RetryExhausted, RetryPolicy};
