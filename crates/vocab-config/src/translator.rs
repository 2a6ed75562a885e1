use serde::{Deserialize, Serialize};

use crate::env_var;

pub const DEFAULT_BATCH_SIZE: usize = 40;

fn default_api_url() -> String {
    "https://api-free.deepl.com/v2/translate".to_string()
}

fn default_target_lang() -> String {
    "JA".to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    /// Let the provider detect the source language when unset
    #[serde(default)]
    pub source_lang: Option<String>,
    /// Texts sent per external call
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Pause between external calls, in seconds
    #[serde(default)]
    pub delay_secs: f64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            target_lang: default_target_lang(),
            source_lang: None,
            batch_size: default_batch_size(),
            delay_secs: 0.0,
        }
    }
}

impl TranslatorConfig {
    pub fn new() -> Self {
        let defaults = Self::default();

        let batch_size = env_var("BATCH_SIZE")
            .and_then(|v| v.parse().ok())
            .filter(|size: &usize| *size > 0)
            .unwrap_or(defaults.batch_size);

        let delay_secs = env_var("BATCH_DELAY_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.delay_secs);

        Self {
            api_key: env_var("DEEPL_API_KEY").unwrap_or_default(),
            api_url: env_var("DEEPL_API_URL").unwrap_or(defaults.api_url),
            target_lang: env_var("TARGET_LANG").unwrap_or(defaults.target_lang),
            source_lang: env_var("SOURCE_LANG"),
            batch_size,
            delay_secs,
        }
    }
}
