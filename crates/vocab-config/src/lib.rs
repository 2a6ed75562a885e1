use serde::{Deserialize, Serialize};

use self::dataset::DatasetConfig;
use self::translator::TranslatorConfig;

pub mod dataset;
pub mod translator;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub translator: TranslatorConfig,
}

impl Config {
    /// Build config from environment variables, falling back to defaults
    pub fn new() -> Self {
        Config {
            dataset: DatasetConfig::new(),
            translator: TranslatorConfig::new(),
        }
    }
}

/// Read an env var, treating empty values as unset
pub(crate) fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
