//! Registry Configuration
//!
//! Delivery behaviour for a registry. Values are usually read from the
//! `[registry]` section of the configuration file.

use serde::{Deserialize, Serialize};

/// What happens when a callback fails during emit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeliveryPolicy {
    /// Stop delivery and return the callback's error to the emitter
    #[default]
    FailFast,

    /// Log the failure and keep delivering to the remaining callbacks
    Isolate,
}

impl std::str::FromStr for DeliveryPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail-fast" | "failfast" => Ok(DeliveryPolicy::FailFast),
            "isolate" => Ok(DeliveryPolicy::Isolate),
            _ => Err(format!("Invalid delivery policy: {}. Valid options: fail-fast, isolate", s)),
        }
    }
}

impl std::fmt::Display for DeliveryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryPolicy::FailFast => write!(f, "fail-fast"),
            DeliveryPolicy::Isolate => write!(f, "isolate"),
        }
    }
}

/// Signal registry configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Callback failure handling during emit
    pub delivery: DeliveryPolicy,
}

impl RegistryConfig {
    pub fn with_delivery(delivery: DeliveryPolicy) -> Self {
        Self { delivery }
    }
}
