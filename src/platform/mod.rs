//! Runtime environment probing.
//!
//! # Responsibilities
//! - Classify the host as mobile or desktop from its user agent
//! - Report the wallet handle injected by the host, if any

pub mod probe;

pub use probe::{EnvironmentProbe, Platform, StaticEnvironment, UserAgentClassifier, DEFAULT_MOBILE_PATTERN};
