// system-tests/src/config/profile.rs
// ============================================================================
// Module: Environment Profiles
// Description: Static settings for the development/test/staging/production runs.
// Purpose: Fix base URL, timeout, retry count, and log level per profile.
// Dependencies: std
// ============================================================================

use std::fmt;
use std::time::Duration;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Public base URL of the products service. Every profile targets it.
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";

// ============================================================================
// SECTION: Profile Types
// ============================================================================

/// Named configuration profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Profile {
    /// Local development runs.
    Development,
    /// Default profile for CI and plain `cargo test`.
    #[default]
    Test,
    /// Pre-release verification.
    Staging,
    /// Production smoke runs.
    Production,
}

/// Settings fixed by a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileSettings {
    /// Service base URL.
    pub base_url: &'static str,
    /// Per-request deadline.
    pub timeout: Duration,
    /// Retry attempts available to the retry helper.
    pub retry_attempts: u32,
    /// Default tracing filter directive.
    pub log_level: &'static str,
}

impl Profile {
    /// Every profile.
    pub const ALL: [Self; 4] = [Self::Development, Self::Test, Self::Staging, Self::Production];

    /// Returns the canonical profile name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }

    /// Parses a profile name, accepting common short forms.
    #[must_use]
    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Some(Self::Development),
            "test" => Some(Self::Test),
            "stage" | "staging" => Some(Self::Staging),
            "prod" | "production" => Some(Self::Production),
            _ => None,
        }
    }

    /// Returns the static settings for the profile.
    #[must_use]
    pub const fn settings(self) -> ProfileSettings {
        match self {
            Self::Development => ProfileSettings {
                base_url: DEFAULT_BASE_URL,
                timeout: Duration::from_secs(10),
                retry_attempts: 1,
                log_level: "debug",
            },
            Self::Test => ProfileSettings {
                base_url: DEFAULT_BASE_URL,
                timeout: Duration::from_secs(10),
                retry_attempts: 0,
                log_level: "warn",
            },
            Self::Staging => ProfileSettings {
                base_url: DEFAULT_BASE_URL,
                timeout: Duration::from_secs(15),
                retry_attempts: 2,
                log_level: "info",
            },
            Self::Production => ProfileSettings {
                base_url: DEFAULT_BASE_URL,
                timeout: Duration::from_secs(30),
                retry_attempts: 3,
                log_level: "error",
            },
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
