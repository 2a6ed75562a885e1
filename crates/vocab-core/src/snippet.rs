//! Example-sentence extraction from a raw corpus.
//!
//! Phrases are matched as whole, case-folded tokens only, so a multi-word
//! phrase never matches.

use std::collections::HashSet;
use std::ops::Range;
use std::path::Path;

use vocab_types::VocabRecord;

use crate::error::CoreError;
use crate::text::{EN_TERMINALS, MAX_TOKENS, collapse_whitespace, ensure_terminal, strip_fragments};

/// Artifacts stripped from corpus sentences before tokenizing
pub const SNIPPET_FRAGMENTS: &[&str] = &["cid", "∞", "—"];

/// Characters that end a candidate sentence when followed by whitespace
const SENTENCE_BREAKS: [char; 8] = ['.', '!', '?', '。', '！', '？', ':', ';'];

/// Deduplicated candidate sentences of one corpus, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    sentences: Vec<String>,
}

impl Corpus {
    pub fn from_text(text: &str) -> Self {
        let text = collapse_whitespace(text);
        let mut seen = HashSet::new();
        let sentences = split_sentences(&text)
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(*s))
            .map(str::to_string)
            .collect();

        Self { sentences }
    }

    /// Read a corpus file; a missing file is a missing-input error
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.is_file() {
            return Err(CoreError::MissingInput(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
        let corpus = Self::from_text(&text);
        tracing::debug!(
            "Loaded {} candidate sentences from {}",
            corpus.len(),
            path.display()
        );
        Ok(corpus)
    }

    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Longest window around `phrase` across all candidates, `None` if no
    /// candidate contains it as a whole token
    pub fn best_snippet(&self, phrase: &str) -> Option<String> {
        let needle = phrase.to_lowercase();
        if needle.is_empty() {
            return None;
        }

        let best = self
            .sentences
            .iter()
            .filter_map(|sentence| window_text(sentence, &needle))
            .fold(None::<String>, |best, snippet| match best {
                Some(b) if b.chars().count() >= snippet.chars().count() => Some(b),
                _ => Some(snippet),
            })?;

        Some(ensure_terminal(best, &EN_TERMINALS, '.'))
    }
}

/// Split at every space directly preceded by a sentence break
fn split_sentences(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut prev = None;

    for (i, c) in text.char_indices() {
        if c.is_whitespace() && prev.is_some_and(|p| SENTENCE_BREAKS.contains(&p)) {
            parts.push(&text[start..i]);
            start = i + c.len_utf8();
        }
        prev = Some(c);
    }
    parts.push(&text[start..]);

    parts
}

/// Window of at most `max` tokens around `index`, shifted left when it would
/// run past the end of the sentence
pub fn snippet_window(len: usize, index: usize, max: usize) -> Range<usize> {
    let mut start = index.saturating_sub(max / 2);
    let end = len.min(start + max);
    if end - start < max && start > 0 {
        start = end.saturating_sub(max);
    }
    start..end
}

fn window_text(sentence: &str, needle: &str) -> Option<String> {
    let cleaned = strip_fragments(sentence, SNIPPET_FRAGMENTS);
    let tokens: Vec<&str> = cleaned.split(' ').collect();
    let index = tokens.iter().position(|t| t.to_lowercase() == needle)?;

    let snippet = tokens[snippet_window(tokens.len(), index, MAX_TOKENS)].join(" ");
    (!snippet.is_empty()).then_some(snippet)
}

/// Whether the record's example sentences look broken enough to re-extract
pub fn needs_fix(record: &VocabRecord) -> bool {
    let sentence = record.one_phrase_str();
    let translated = record.one_phrase_ja_str();
    let has_garbage = |s: &str| SNIPPET_FRAGMENTS.iter().any(|frag| s.contains(frag));

    sentence.split_whitespace().count() > MAX_TOKENS
        || (!sentence.is_empty() && !sentence.trim().ends_with(EN_TERMINALS))
        || has_garbage(sentence)
        || has_garbage(translated)
}

/// Replace the record's example sentence with a corpus snippet when it needs
/// fixing. Returns true if the record was updated.
pub fn refresh_snippet(record: &mut VocabRecord, corpus: &Corpus) -> bool {
    if record.phrase.is_empty() || !needs_fix(record) {
        return false;
    }
    let Some(snippet) = corpus.best_snippet(&record.phrase) else {
        return false;
    };

    record.set_one_phrase(snippet);
    // keep an existing translation, make an empty one explicit for the translator
    if record.one_phrase_ja_is_blank() {
        record.clear_one_phrase_ja();
    }
    true
}
