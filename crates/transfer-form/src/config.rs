//! Configuration for the transfer form.

use std::env;

use crate::error::ConfigError;

/// Default ceiling for a single transfer, in FCFA.
pub const DEFAULT_AMOUNT_CEILING: u64 = 1_000_000;

/// Configuration for the transfer form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Largest accepted amount (inclusive).
    pub amount_ceiling: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            amount_ceiling: DEFAULT_AMOUNT_CEILING,
        }
    }
}

impl FormConfig {
    /// Create a configuration with the given ceiling.
    pub fn with_ceiling(amount_ceiling: u64) -> Self {
        Self { amount_ceiling }
    }

    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `TRANSFER_AMOUNT_CEILING` - Largest accepted amount (default: 1000000)
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var("TRANSFER_AMOUNT_CEILING") {
            Ok(raw) => Self::parse_ceiling(&raw).map(Self::with_ceiling),
            Err(_) => Ok(Self::default()),
        }
    }

    fn parse_ceiling(raw: &str) -> Result<u64, ConfigError> {
        let cleaned: String = raw.chars().filter(|c| !matches!(c, '_' | ',' | ' ')).collect();
        match cleaned.parse::<u64>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(ConfigError::InvalidValue {
                name: "TRANSFER_AMOUNT_CEILING",
                value: raw.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ceiling() {
        assert_eq!(FormConfig::default().amount_ceiling, 1_000_000);
    }

    #[test]
    fn test_parse_ceiling() {
        assert_eq!(FormConfig::parse_ceiling("10000000").unwrap(), 10_000_000);
        assert_eq!(FormConfig::parse_ceiling("10_000_000").unwrap(), 10_000_000);
        assert!(FormConfig::parse_ceiling("0").is_err());
        assert!(FormConfig::parse_ceiling("lots").is_err());
    }
}
