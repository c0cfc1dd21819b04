//! Configuration for the action set.

use std::env;
use std::time::Duration;

use transfer_form::{ConfigError, FormConfig};

use crate::lookup::{DEFAULT_LOOKUP_TIMEOUT, DEFAULT_USERS_URL};

/// Configuration for the action set.
#[derive(Debug, Clone)]
pub struct ActionsConfig {
    /// Base URL of the users endpoint.
    pub users_url: String,

    /// Timeout for one user lookup.
    pub lookup_timeout: Duration,

    /// Transfer form settings.
    pub form: FormConfig,
}

impl Default for ActionsConfig {
    fn default() -> Self {
        Self {
            users_url: DEFAULT_USERS_URL.to_string(),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            form: FormConfig::default(),
        }
    }
}

impl ActionsConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `API_USERS_URL` - Users endpoint (default: https://jsonplaceholder.typicode.com/users)
    /// - `USER_LOOKUP_TIMEOUT_SECS` - Lookup timeout in seconds (default: 10)
    /// - `TRANSFER_AMOUNT_CEILING` - Largest accepted amount (default: 1000000)
    pub fn from_env() -> Result<Self, ConfigError> {
        let users_url = env::var("API_USERS_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USERS_URL.to_string());

        let lookup_timeout = match env::var("USER_LOOKUP_TIMEOUT_SECS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "USER_LOOKUP_TIMEOUT_SECS",
                        value: raw,
                    })
                }
            },
            Err(_) => DEFAULT_LOOKUP_TIMEOUT,
        };

        Ok(Self {
            users_url,
            lookup_timeout,
            form: FormConfig::from_env()?,
        })
    }

    /// Builder: set the users endpoint.
    pub fn with_users_url(mut self, url: impl Into<String>) -> Self {
        self.users_url = url.into();
        self
    }

    /// Builder: set the form configuration.
    pub fn with_form(mut self, form: FormConfig) -> Self {
        self.form = form;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ActionsConfig::default();
        assert_eq!(config.users_url, "https://jsonplaceholder.typicode.com/users");
        assert_eq!(config.lookup_timeout, Duration::from_secs(10));
        assert_eq!(config.form.amount_ceiling, 1_000_000);
    }

    #[test]
    fn test_builders() {
        let config = ActionsConfig::default()
            .with_users_url("http://localhost:4000/users")
            .with_form(FormConfig::with_ceiling(10_000_000));
        assert_eq!(config.users_url, "http://localhost:4000/users");
        assert_eq!(config.form.amount_ceiling, 10_000_000);
    }
}
