use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_EMPLOYEES_URL: &str = "https://api.example.com/employees";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const URL_ENV: &str = "EMPLOYEES_URL";
const TIMEOUT_ENV: &str = "EMPLOYEES_TIMEOUT_SECS";

/// Where to fetch employees from and how long to wait for them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetcherSettings {
    url: String,
    timeout: Duration,
}

impl Default for FetcherSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_EMPLOYEES_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl FetcherSettings {
    /// Settings pointing at `url` with the default timeout.
    pub fn new(url: &str) -> Result<Self, ConfigError> {
        Self::default().with_url(url)
    }

    /// Read `EMPLOYEES_URL` and `EMPLOYEES_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`FetcherSettings::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        if let Some(url) = non_empty(lookup(URL_ENV)) {
            settings = settings.with_url(&url)?;
        }
        if let Some(raw) = non_empty(lookup(TIMEOUT_ENV)) {
            settings = settings.with_timeout(parse_timeout_secs(&raw)?)?;
        }
        Ok(settings)
    }

    /// Replace the URL; only absolute http(s) URLs are accepted.
    pub fn with_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.url = parse_url(url)?;
        Ok(self)
    }

    /// Replace the request timeout; zero is rejected.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ConfigError> {
        if timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout(format!("{timeout:?}")));
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// The validated URL, normalized by [`url::Url`].
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_url(value: &str) -> Result<String, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl {
        value: value.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url.into()),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
    raw.parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::InvalidTimeout(raw.to_string()))
}
