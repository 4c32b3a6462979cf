//! Startup configuration, read from the environment before the UI mounts.

use std::env;

pub const DEFAULT_RPC_URL: &str = "https://mainnet.base.org";

/// Base mainnet.
pub const DEFAULT_CHAIN_ID: u64 = 8453;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Wallet-connection service identifier. Required; startup aborts without it.
    pub project_id: String,
    pub rpc_url: String,
    pub chain_id: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("RAINDROP_PROJECT_ID is not set; add it to your environment")]
    MissingProjectId,
    #[error("RAINDROP_CHAIN_ID is not a number: {0:?}")]
    BadChainId(String),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let project_id = get("RAINDROP_PROJECT_ID")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingProjectId)?;
        let rpc_url = get("RAINDROP_RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
        let chain_id = match get("RAINDROP_CHAIN_ID") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::BadChainId(raw))?,
            None => DEFAULT_CHAIN_ID,
        };
        Ok(Self {
            project_id,
            rpc_url,
            chain_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn missing_project_id_is_fatal() {
        let result = AppConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(ConfigError::MissingProjectId)));

        let result = AppConfig::from_lookup(lookup(&[("RAINDROP_PROJECT_ID", "  ")]));
        assert!(matches!(result, Err(ConfigError::MissingProjectId)));
    }

    #[test]
    fn defaults_apply_when_only_project_id_is_set() {
        let config = AppConfig::from_lookup(lookup(&[("RAINDROP_PROJECT_ID", "abc123")])).unwrap();
        assert_eq!(config.project_id, "abc123");
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(config.chain_id, DEFAULT_CHAIN_ID);
    }

    #[test]
    fn overrides_are_honored() {
        let config = AppConfig::from_lookup(lookup(&[
            ("RAINDROP_PROJECT_ID", "abc123"),
            ("RAINDROP_RPC_URL", "http://localhost:8545"),
            ("RAINDROP_CHAIN_ID", "31337"),
        ]))
        .unwrap();
        assert_eq!(config.rpc_url, "http://localhost:8545");
        assert_eq!(config.chain_id, 31337);
    }

    #[test]
    fn garbage_chain_id_is_rejected() {
        let result = AppConfig::from_lookup(lookup(&[
            ("RAINDROP_PROJECT_ID", "abc123"),
            ("RAINDROP_CHAIN_ID", "base"),
        ]));
        assert!(matches!(result, Err(ConfigError::BadChainId(_))));
    }
}
