use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::env_var;

fn default_vocab_dir() -> PathBuf {
    PathBuf::from("src/assets/vocab/reiwa3_7")
}

fn default_raw_dir() -> PathBuf {
    PathBuf::from("src/assets/raw")
}

fn default_cache_file() -> String {
    ".translation_cache.json".to_string()
}

fn default_aggregate_file() -> String {
    "frequent-words.json".to_string()
}

/// Where the dataset lives on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Directory holding `<year>.unigram.json` files and the aggregate
    #[serde(default = "default_vocab_dir")]
    pub vocab_dir: PathBuf,
    /// Directory holding `<year>.txt` corpus files
    #[serde(default = "default_raw_dir")]
    pub raw_dir: PathBuf,
    /// Cache file name, relative to `vocab_dir`
    #[serde(default = "default_cache_file")]
    pub cache_file: String,
    #[serde(default = "default_aggregate_file")]
    pub aggregate_file: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            vocab_dir: default_vocab_dir(),
            raw_dir: default_raw_dir(),
            cache_file: default_cache_file(),
            aggregate_file: default_aggregate_file(),
        }
    }
}

impl DatasetConfig {
    pub fn new() -> Self {
        let defaults = Self::default();

        Self {
            vocab_dir: env_var("VOCAB_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.vocab_dir),
            raw_dir: env_var("RAW_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.raw_dir),
            cache_file: env_var("VOCAB_CACHE_FILE").unwrap_or(defaults.cache_file),
            aggregate_file: defaults.aggregate_file,
        }
    }

    pub fn cache_path(&self) -> PathBuf {
        self.vocab_dir.join(&self.cache_file)
    }

    pub fn aggregate_path(&self) -> PathBuf {
        self.vocab_dir.join(&self.aggregate_file)
    }

    pub fn corpus_path(&self, year: &str) -> PathBuf {
        self.raw_dir.join(format!("{year}.txt"))
    }

    pub fn with_vocab_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.vocab_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_raw_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.raw_dir = dir.as_ref().to_path_buf();
        self
    }
}
