//! Word counts over extracted plain-text files.

use std::fmt::Write as _;
use std::path::Path;

use indexmap::IndexMap;
use unicode_normalization::UnicodeNormalization;

use crate::dataset::read_dir_sorted;
use crate::error::CoreError;

/// Lower-cased ASCII words, apostrophes kept inside words
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .nfkc()
        .flat_map(char::to_lowercase)
        .map(|c| {
            if c.is_ascii_lowercase() || c == '\'' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|w| w.chars().any(|c| c.is_ascii_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Occurrence counts in first-seen order
#[derive(Debug, Clone, Default)]
pub struct WordFrequency {
    counts: IndexMap<String, usize>,
}

impl WordFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        let mut freq = Self::new();
        freq.add_text(text);
        freq
    }

    /// Count every `*.txt` file in `dir`, in file-name order
    pub fn from_dir(dir: &Path) -> Result<Self, CoreError> {
        if !dir.is_dir() {
            return Err(CoreError::MissingInput(dir.to_path_buf()));
        }

        let files: Vec<_> = read_dir_sorted(dir)?
            .into_iter()
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
            .collect();
        tracing::info!("Counting words in {} files under {}", files.len(), dir.display());

        let mut freq = Self::new();
        for path in files {
            let text = std::fs::read_to_string(&path).map_err(|e| CoreError::io(&path, e))?;
            freq.add_text(&text);
        }
        Ok(freq)
    }

    pub fn add_text(&mut self, text: &str) {
        for word in tokenize(text) {
            *self.counts.entry(word).or_insert(0) += 1;
        }
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.counts.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Most frequent first, ties in first-seen order
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> =
            self.counts.iter().map(|(w, c)| (w.as_str(), *c)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }

    pub fn to_csv(&self) -> String {
        let mut out = String::from("word,count\n");
        for (word, count) in self.sorted() {
            let _ = writeln!(out, "{word},{count}");
        }
        out
    }
}
