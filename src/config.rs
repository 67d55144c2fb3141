use std::{env, time::Duration};
use url::Url;

/// The address used when nothing else has been configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const BASE_URL_VAR: &str = "LINKEDIN_AGENT_API_URL";
const TIMEOUT_VAR: &str = "LINKEDIN_AGENT_TIMEOUT_SECS";

/// Everything an [`crate::ApiClient`] needs to know up front.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The backend's base address. Request paths are appended to it.
    pub base_url: Url,
    /// How long a single request may take. `None` leaves it to the
    /// transport.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Config {
    pub fn new(base_url: Url) -> Self {
        Config {
            base_url,
            ..Config::default()
        }
    }

    /// Parse the base address from a string.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(base_url)?;
        Ok(Config::new(base_url))
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Load the configuration from `LINKEDIN_AGENT_API_URL` and
    /// `LINKEDIN_AGENT_TIMEOUT_SECS`, falling back to the defaults for
    /// anything that isn't set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup(BASE_URL_VAR) {
            Some(url) if !url.trim().is_empty() => {
                Config::with_base_url(url.trim())?
            },
            _ => Config::default(),
        };

        match lookup(TIMEOUT_VAR) {
            Some(raw) if !raw.trim().is_empty() => {
                cfg.timeout = Some(parse_timeout(&raw)?);
            },
            _ => {},
        }

        log::debug!("Loaded configuration {:?}", cfg);

        Ok(cfg)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: Url::parse(DEFAULT_BASE_URL)
                .expect("the default base URL is always valid"),
            timeout: None,
            user_agent: String::from(crate::DEFAULT_USER_AGENT),
        }
    }
}

/// Parse a whole number of seconds, refusing zero since it would fail every
/// request immediately.
pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 =
        raw.trim().parse().map_err(|e| ConfigError::BadTimeout {
            value: raw.to_string(),
            source: e,
        })?;

    if secs == 0 {
        return Err(ConfigError::ZeroTimeout);
    }

    Ok(Duration::from_secs(secs))
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::BadBaseUrl {
        value: raw.to_string(),
        source: e,
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::NotABase {
            value: raw.to_string(),
        });
    }

    Ok(url)
}

/// Errors that may occur while building a [`Config`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("\"{}\" isn't a valid URL", value)]
    BadBaseUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("\"{}\" can't be used as a base address", value)]
    NotABase { value: String },
    #[error("\"{}\" isn't a valid number of seconds", value)]
    BadTimeout {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("The timeout must be at least one second")]
    ZeroTimeout,
}
