// system-tests/src/config/env.rs
// ============================================================================
// Module: Suite Environment
// Description: Environment-backed configuration for the products suites.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: url, thiserror
// ============================================================================

//! ## Overview
//! The profile named by `PRODUCTS_API_ENV` supplies defaults; individual
//! variables override them. Environment values are parsed with strict UTF-8
//! enforcement, empty values are rejected, and unknown profile names fail
//! closed rather than silently falling back.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use url::Url;

use super::profile::Profile;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for suite configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteEnv {
    /// Profile selector (`development`, `test`, `staging`, `production`).
    Profile,
    /// Optional base URL override.
    BaseUrl,
    /// Optional timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Optional tracing filter override.
    LogFilter,
    /// Demand rejection of invalid inputs (`true`/`false` or `1`/`0`).
    Strict,
    /// Optional artifact root override.
    RunRoot,
}

impl SuiteEnv {
    /// Every configuration key.
    pub const ALL: [Self; 6] = [
        Self::Profile,
        Self::BaseUrl,
        Self::TimeoutSeconds,
        Self::LogFilter,
        Self::Strict,
        Self::RunRoot,
    ];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "PRODUCTS_API_ENV",
            Self::BaseUrl => "PRODUCTS_API_BASE_URL",
            Self::TimeoutSeconds => "PRODUCTS_API_TIMEOUT_SEC",
            Self::LogFilter => "PRODUCTS_API_LOG",
            Self::Strict => "PRODUCTS_API_STRICT",
            Self::RunRoot => "PRODUCTS_API_RUN_ROOT",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// How scenarios treat a service that accepts nominally invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Accept or reject, but never a 5xx and always self-consistent.
    #[default]
    Permissive,
    /// Invalid input must be rejected with a 4xx.
    Strict,
}

/// Typed suite configuration derived from a profile and environment overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// Selected profile.
    pub profile: Profile,
    /// Service base URL.
    pub base_url: Url,
    /// Per-request deadline.
    pub timeout: Duration,
    /// Retry attempts for the retry helper.
    pub retry_attempts: u32,
    /// Tracing filter directive.
    pub log_filter: String,
    /// Invalid-input policy.
    pub strictness: Strictness,
    /// Optional artifact root override.
    pub run_root: Option<PathBuf>,
}

impl SuiteConfig {
    /// Builds the configuration for a profile with no overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error when the profile base URL does not parse.
    pub fn for_profile(profile: Profile) -> Result<Self, ConfigError> {
        let settings = profile.settings();
        Ok(Self {
            profile,
            base_url: parse_base_url(SuiteEnv::BaseUrl.as_str(), settings.base_url)?,
            timeout: settings.timeout,
            retry_attempts: settings.retry_attempts,
            log_filter: settings.log_level.to_string(),
            strictness: Strictness::Permissive,
            run_root: None,
        })
    }

    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an unknown profile or invalid URL).
    pub fn load() -> Result<Self, ConfigError> {
        let profile = read_env_nonempty(SuiteEnv::Profile.as_str())?
            .map(|raw| parse_profile(SuiteEnv::Profile.as_str(), &raw))
            .transpose()?
            .unwrap_or_default();
        let mut config = Self::for_profile(profile)?;

        if let Some(raw) = read_env_nonempty(SuiteEnv::BaseUrl.as_str())? {
            config.base_url = parse_base_url(SuiteEnv::BaseUrl.as_str(), &raw)?;
        }
        if let Some(raw) = read_env_nonempty(SuiteEnv::TimeoutSeconds.as_str())? {
            config.timeout = parse_timeout_seconds(SuiteEnv::TimeoutSeconds.as_str(), &raw)?;
        }
        if let Some(raw) = read_env_nonempty(SuiteEnv::LogFilter.as_str())? {
            config.log_filter = parse_log_filter(SuiteEnv::LogFilter.as_str(), &raw)?;
        }
        if parse_bool_env(
            SuiteEnv::Strict.as_str(),
            read_env_nonempty(SuiteEnv::Strict.as_str())?,
        )? {
            config.strictness = Strictness::Strict;
        }
        config.run_root = read_env_nonempty(SuiteEnv::RunRoot.as_str())?.map(PathBuf::from);
        Ok(config)
    }

    /// Returns a copy targeting another base URL (used by local stubs).
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is not an absolute http(s) URL.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(SuiteEnv::BaseUrl.as_str(), raw)?;
        Ok(self)
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url_str(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Variable is set but not valid UTF-8.
    #[error("{name} must be valid UTF-8")]
    InvalidUtf8 {
        /// Variable name.
        name: String,
    },
    /// Variable is set but empty or whitespace.
    #[error("{name} must not be empty")]
    Empty {
        /// Variable name.
        name: String,
    },
    /// Variable failed validation.
    #[error("{name} {reason}")]
    Invalid {
        /// Variable name.
        name: String,
        /// Validation failure.
        reason: String,
    },
}

impl ConfigError {
    /// Builds an [`ConfigError::Invalid`] value.
    fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| ConfigError::InvalidUtf8 {
            name: name.to_string(),
        })
    })
}

/// Reads an environment variable and rejects empty values.
fn read_env_nonempty(name: &str) -> Result<Option<String>, ConfigError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(ConfigError::Empty {
            name: name.to_string(),
        }),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a profile name.
fn parse_profile(name: &str, raw: &str) -> Result<Profile, ConfigError> {
    Profile::from_name(raw).ok_or_else(|| {
        ConfigError::invalid(name, "must be one of development, test, staging, or production")
    })
}

/// Parses an absolute http(s) base URL.
fn parse_base_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|err| ConfigError::invalid(name, format!("must be an absolute URL: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::invalid(name, "must use the http or https scheme"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::invalid(name, "must not carry a query or fragment"));
    }
    Ok(url)
}

/// Validates a tracing filter directive.
fn parse_log_filter(name: &str, raw: &str) -> Result<String, ConfigError> {
    let directive = raw.trim();
    EnvFilter::try_new(directive)
        .map_err(|err| ConfigError::invalid(name, format!("must be a tracing filter: {err}")))?;
    Ok(directive.to_string())
}

/// Parses a positive timeout value from an environment variable string.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(name, "must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(ConfigError::invalid(name, "must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

/// Parses a boolean environment variable, defaulting to false when unset.
fn parse_bool_env(name: &str, raw: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = raw else {
        return Ok(false);
    };
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        return Ok(true);
    }
    if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        return Ok(false);
    }
    Err(ConfigError::invalid(name, "must be 1, 0, true, or false"))
}
