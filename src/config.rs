use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_GENESIS_DATA: &str = "Hello";
pub const DEFAULT_GENESIS_HASH: &str = "202120212021";
pub const DEFAULT_GENESIS_TIMESTAMP: i64 = 123456;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub genesis: GenesisConfig,
}

/// Fixed values for the root-of-trust block. The genesis hash is taken as
/// given and is never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenesisConfig {
    #[serde(default = "default_genesis_data")]
    pub data: String,
    #[serde(default = "default_genesis_hash")]
    pub hash: String,
    #[serde(default = "default_genesis_timestamp")]
    pub timestamp: i64,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            data: default_genesis_data(),
            hash: default_genesis_hash(),
            timestamp: default_genesis_timestamp(),
        }
    }
}

impl Config {
    pub fn load_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Loads `path` when it exists, falling back to the built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> anyhow::Result<Self> {
        match path {
            Some(path) if path.as_ref().exists() => Self::load_from(path),
            Some(path) => {
                log::warn!(
                    "Config file {} not found, using defaults",
                    path.as_ref().display()
                );
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }
}

fn default_genesis_data() -> String {
    DEFAULT_GENESIS_DATA.to_string()
}

fn default_genesis_hash() -> String {
    DEFAULT_GENESIS_HASH.to_string()
}

fn default_genesis_timestamp() -> i64 {
    DEFAULT_GENESIS_TIMESTAMP
}
