//! Client configuration: where Claim.MD lives and how long to wait for it.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Production Claim.MD service host.
pub const DEFAULT_BASE_URL: &str = "https://svc.claim.md/";

/// Applied to the whole request, connect through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const BASE_URL_ENV: &str = "CLAIMMD_BASE_URL";
pub const TIMEOUT_ENV: &str = "CLAIMMD_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_url: Url,
    timeout: Duration,
}

impl Config {
    /// Configuration pointing at `base_url` with the default timeout.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Read `CLAIMMD_BASE_URL` and `CLAIMMD_TIMEOUT_SECS`, falling back to the
    /// defaults for whichever is unset. The timeout must be a positive number
    /// of seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup(BASE_URL_ENV) {
            Some(url) => Self::new(&url)?,
            None => Self::default(),
        };
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&secs| secs > 0)
                .ok_or_else(|| ConfigError::InvalidEnv {
                    name: TIMEOUT_ENV,
                    value: raw.clone(),
                })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).unwrap_or_else(|_| unreachable!("default base URL is valid")),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ConfigError::EmptyBaseUrl);
    }
    let url = Url::parse(raw)?;
    if url.cannot_be_a_base() || url.host().is_none() {
        return Err(ConfigError::RelativeBaseUrl(raw.to_string()));
    }
    Ok(url)
}
