use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use vocab_core::{CoreError, write_json};

/// Source text -> translated text, persisted as a flat JSON object.
///
/// A disabled cache starts empty and is never written back.
#[derive(Debug, Clone, Default)]
pub struct TranslationCache {
    path: Option<PathBuf>,
    entries: IndexMap<String, String>,
}

impl TranslationCache {
    /// In-memory cache that is never persisted
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Load from `path`. A missing or malformed file yields an empty cache.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let mut cache = Self {
            path: Some(path.to_path_buf()),
            entries: IndexMap::new(),
        };

        if !path.is_file() {
            tracing::debug!("No translation cache at {}", path.display());
            return Ok(cache);
        }

        let data = std::fs::read_to_string(path).map_err(|e| CoreError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        match serde_json::from_str(&data) {
            Ok(entries) => cache.entries = entries,
            Err(e) => {
                tracing::warn!(
                    "Ignoring malformed translation cache {}: {}",
                    path.display(),
                    e
                );
            }
        }

        tracing::info!("Loaded {} cached translations", cache.len());
        Ok(cache)
    }

    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    pub fn get(&self, text: &str) -> Option<&str> {
        self.entries.get(text).map(String::as_str)
    }

    pub fn insert(&mut self, text: String, translated: String) {
        self.entries.insert(text, translated);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the cache to its file; a disabled cache is a no-op
    pub fn save(&self) -> Result<(), CoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        write_json(path, &self.entries)?;
        tracing::info!("Saved {} cached translations to {}", self.len(), path.display());
        Ok(())
    }
}
