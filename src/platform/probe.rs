//! Environment probe implementations.

use regex::{Regex, RegexBuilder};

use crate::blockchain::link::ProviderHandle;

/// User agents treated as mobile, matched case-insensitively.
pub const DEFAULT_MOBILE_PATTERN: &str = "iPhone|iPad|iPod|Android";

/// Platform class driving the connection topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Mobile,
    Desktop,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Mobile => write!(f, "mobile"),
            Platform::Desktop => write!(f, "desktop"),
        }
    }
}

/// What the connection manager needs to know about its host.
pub trait EnvironmentProbe: Send + Sync {
    fn platform(&self) -> Platform;

    fn injected_handle(&self) -> Option<ProviderHandle>;
}

/// Classifies user agent strings.
#[derive(Debug, Clone)]
pub struct UserAgentClassifier {
    mobile: Regex,
}

impl UserAgentClassifier {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let mobile = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { mobile })
    }

    pub fn classify(&self, user_agent: &str) -> Platform {
        if self.mobile.is_match(user_agent) {
            Platform::Mobile
        } else {
            Platform::Desktop
        }
    }
}

impl Default for UserAgentClassifier {
    fn default() -> Self {
        Self {
            mobile: RegexBuilder::new(DEFAULT_MOBILE_PATTERN)
                .case_insensitive(true)
                .build()
                .expect("default mobile pattern is valid"),
        }
    }
}

/// Fixed user agent plus an optional injected handle.
#[derive(Clone)]
pub struct StaticEnvironment {
    platform: Platform,
    handle: Option<ProviderHandle>,
}

impl StaticEnvironment {
    pub fn new(user_agent: &str, classifier: &UserAgentClassifier, handle: Option<ProviderHandle>) -> Self {
        let platform = classifier.classify(user_agent);
        tracing::debug!(user_agent, %platform, has_handle = handle.is_some(), "Platform detected");
        Self { platform, handle }
    }

    /// Skip classification, e.g. in tests.
    pub fn with_platform(platform: Platform, handle: Option<ProviderHandle>) -> Self {
        Self { platform, handle }
    }
}

impl EnvironmentProbe for StaticEnvironment {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn injected_handle(&self) -> Option<ProviderHandle> {
        self.handle.clone()
    }
}

impl std::fmt::Debug for StaticEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticEnvironment")
            .field("platform", &self.platform)
            .field("handle", &self.handle.as_ref().map(|h| h.label().to_string()))
            .finish()
    }
}
