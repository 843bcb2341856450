// ⚙️ Core configuration - which network we are reading, how long to wait
// for recipient names
//
// Loaded from JSON. Every field has a default so an empty object is a valid
// config for the main network.

use crate::amount::{AmountNormalizer, NATIVE_CURRENCY};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// NETWORK
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Stable identifier, e.g. "MAINNET"
    #[serde(default = "default_network_key")]
    pub key: String,

    #[serde(default = "default_network_name")]
    pub name: String,

    /// Three-character code of the network's native asset
    #[serde(default = "default_native_asset")]
    pub native_asset: String,
}

fn default_network_key() -> String {
    "MAINNET".to_string()
}

fn default_network_name() -> String {
    "Mainnet".to_string()
}

fn default_native_asset() -> String {
    NATIVE_CURRENCY.to_string()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            key: default_network_key(),
            name: default_network_name(),
            native_asset: default_native_asset(),
        }
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Give up on a name lookup after this long and show the bare address
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    5000
}

impl Default for ResolverConfig {
    fn default() -> Self {
        ResolverConfig {
            timeout_ms: default_timeout_ms(),
        }
    }
}

// ============================================================================
// CORE CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,
}

impl CoreConfig {
    /// Load config from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_json_str(&content)
            .with_context(|| format!("Invalid config file: {:?}", path.as_ref()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: CoreConfig =
            serde_json::from_str(content).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let code = &self.network.native_asset;
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            bail!("native_asset must be three ASCII letters or digits, got {:?}", code);
        }

        if self.resolver.timeout_ms == 0 {
            bail!("resolver.timeout_ms must be greater than zero");
        }

        Ok(())
    }

    pub fn normalizer(&self) -> AmountNormalizer {
        AmountNormalizer::new(self.network.native_asset.clone())
    }

    pub fn resolver_timeout(&self) -> Duration {
        Duration::from_millis(self.resolver.timeout_ms)
    }
}

// ============================================================================
// TESTS
// ============================================================================
