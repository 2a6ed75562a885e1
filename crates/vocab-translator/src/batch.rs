//! Deduplicated, cached, batched translation of a whole dataset.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use vocab_core::Dataset;
use vocab_types::VocabRecord;

use crate::cache::TranslationCache;
use crate::{TranslateError, Translator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// `phrase` -> `mean`
    Phrase,
    /// `onePhrase` -> `onePhraseJa`
    Sentence,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationRequest {
    pub text: String,
    pub kind: RequestKind,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, kind: RequestKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub target_lang: String,
    pub source_lang: Option<String>,
    /// Texts per external call, at least one
    pub batch_size: usize,
    /// Pause between external calls
    pub delay: Duration,
}

/// Summary of one translation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationStats {
    /// Requests collected, duplicates included
    pub requested: usize,
    /// Distinct source texts
    pub unique: usize,
    /// Distinct texts answered from the cache
    pub cached: usize,
    /// Distinct texts sent to the provider
    pub translated: usize,
    /// External calls made
    pub batches: usize,
}

fn wants_mean(record: &VocabRecord, overwrite: bool) -> bool {
    !record.phrase.is_empty() && (overwrite || record.mean_is_blank())
}

fn wants_sentence(record: &VocabRecord, overwrite: bool) -> bool {
    !record.one_phrase_str().is_empty() && (overwrite || record.one_phrase_ja_is_blank())
}

/// Requests in record order: phrase before sentence for each record
pub fn collect_requests<'a>(
    records: impl IntoIterator<Item = &'a VocabRecord>,
    overwrite: bool,
) -> Vec<TranslationRequest> {
    let mut requests = Vec::new();
    for record in records {
        if wants_mean(record, overwrite) {
            requests.push(TranslationRequest::new(&record.phrase, RequestKind::Phrase));
        }
        if wants_sentence(record, overwrite) {
            requests.push(TranslationRequest::new(
                record.one_phrase_str(),
                RequestKind::Sentence,
            ));
        }
    }
    requests
}

/// Resolve every request text, from the cache when possible and otherwise
/// through the provider. Each distinct text is sent at most once. The first
/// failed call aborts the run.
pub async fn translate_requests<T: Translator + ?Sized>(
    translator: &T,
    requests: &[TranslationRequest],
    options: &BatchOptions,
    cache: &mut TranslationCache,
) -> Result<(HashMap<String, String>, TranslationStats), TranslateError> {
    let mut stats = TranslationStats {
        requested: requests.len(),
        ..TranslationStats::default()
    };
    let mut translations = HashMap::new();

    let mut seen = HashSet::new();
    let mut misses = Vec::new();
    for request in requests {
        if !seen.insert(request.text.as_str()) {
            continue;
        }
        stats.unique += 1;
        match cache.get(&request.text) {
            Some(cached) => {
                translations.insert(request.text.clone(), cached.to_string());
                stats.cached += 1;
            }
            None => misses.push(request.text.clone()),
        }
    }

    let batch_size = options.batch_size.max(1);
    let total_batches = misses.len().div_ceil(batch_size);
    tracing::info!(
        "{} unique texts: {} cached, {} to translate in {} batches",
        stats.unique,
        stats.cached,
        misses.len(),
        total_batches
    );

    for (i, batch) in misses.chunks(batch_size).enumerate() {
        if i > 0 && !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }

        let translated = translator
            .translate_batch(batch, &options.target_lang, options.source_lang.as_deref())
            .await?;
        if translated.len() != batch.len() {
            return Err(TranslateError::CountMismatch {
                expected: batch.len(),
                got: translated.len(),
            });
        }

        for (text, result) in batch.iter().zip(translated) {
            cache.insert(text.clone(), result.clone());
            translations.insert(text.clone(), result);
        }
        stats.batches += 1;
        stats.translated += batch.len();
        tracing::info!("Translated batch {}/{}", i + 1, total_batches);
    }

    Ok((translations, stats))
}

/// Write translations into the fields the record asked for. Empty
/// translations are skipped. Returns true if anything changed.
pub fn apply_translations(
    record: &mut VocabRecord,
    translations: &HashMap<String, String>,
    overwrite: bool,
) -> bool {
    let mut changed = false;

    if wants_mean(record, overwrite) {
        if let Some(mean) = translations.get(&record.phrase).filter(|t| !t.is_empty()) {
            record.set_mean(mean.clone());
            changed = true;
        }
    }

    if wants_sentence(record, overwrite) {
        if let Some(sentence) = translations
            .get(record.one_phrase_str())
            .filter(|t| !t.is_empty())
        {
            record.set_one_phrase_ja(sentence.clone());
            changed = true;
        }
    }

    changed
}

/// Translate every record of `dataset` in memory. Persisting the cache and
/// the files is left to the caller.
pub async fn translate_dataset<T: Translator + ?Sized>(
    translator: &T,
    dataset: &mut Dataset,
    options: &BatchOptions,
    cache: &mut TranslationCache,
    overwrite: bool,
) -> Result<TranslationStats, TranslateError> {
    let requests = collect_requests(dataset.records(), overwrite);
    if requests.is_empty() {
        tracing::info!("Nothing to translate");
        return Ok(TranslationStats::default());
    }

    let (translations, stats) = translate_requests(translator, &requests, options, cache).await?;

    let updated = dataset
        .records_mut()
        .map(|record| usize::from(apply_translations(record, &translations, overwrite)))
        .sum::<usize>();
    tracing::info!("Applied translations to {} records", updated);

    Ok(stats)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::ProviderMetadata;

    /// Prefixes every text and records each call
    #[derive(Default)]
    pub(crate) struct RecordingTranslator {
        pub calls: Mutex<Vec<Vec<String>>>,
        pub fail: bool,
        pub drop_last: bool,
    }

    impl RecordingTranslator {
        pub fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }

        pub fn sent_texts(&self) -> Vec<String> {
            self.calls().into_iter().flatten().collect()
        }
    }

    #[async_trait::async_trait]
    impl Translator for RecordingTranslator {
        async fn translate_batch(
            &self,
            texts: &[String],
            _target_lang: &str,
            _source_lang: Option<&str>,
        ) -> Result<Vec<String>, TranslateError> {
            self.calls.lock().unwrap().push(texts.to_vec());
            if self.fail {
                return Err(TranslateError::ApiError("HTTP 500".into()));
            }
            let mut out: Vec<String> = texts.iter().map(|t| format!("訳:{t}")).collect();
            if self.drop_last {
                out.pop();
            }
            Ok(out)
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "recording".into(),
                requires_api_key: false,
                free_tier_available: true,
            }
        }
    }

    fn options(batch_size: usize) -> BatchOptions {
        BatchOptions {
            target_lang: "JA".to_string(),
            source_lang: None,
            batch_size,
            delay: Duration::ZERO,
        }
    }

    fn phrases(texts: &[&str]) -> Vec<TranslationRequest> {
        texts
            .iter()
            .map(|t| TranslationRequest::new(*t, RequestKind::Phrase))
            .collect()
    }

    #[test]
    fn test_collect_requests_inclusion_rule() {
        let records = vec![
            VocabRecord::new("apple"),
            VocabRecord::new("dog").with_mean("犬"),
            VocabRecord::new("cat")
                .with_mean("")
                .with_one_phrase("A cat.")
                .with_one_phrase_ja("猫。"),
            VocabRecord::new("").with_one_phrase("Orphan."),
        ];

        let requests = collect_requests(&records, false);
        assert_eq!(
            requests,
            vec![
                TranslationRequest::new("apple", RequestKind::Phrase),
                TranslationRequest::new("cat", RequestKind::Phrase),
                TranslationRequest::new("Orphan.", RequestKind::Sentence),
            ]
        );

        let requests = collect_requests(&records, true);
        assert_eq!(requests.len(), 5);
    }

    #[test]
    fn test_non_string_mean_counts_as_filled() {
        let record: VocabRecord =
            serde_json::from_str(r#"{"phrase":"apple","mean":["x"],"onePhrase":"An apple.","onePhraseJa":null}"#)
                .unwrap();

        let requests = collect_requests([&record], false);
        assert_eq!(
            requests,
            vec![TranslationRequest::new("An apple.", RequestKind::Sentence)]
        );
    }

    #[tokio::test]
    async fn test_duplicates_sent_once() {
        let translator = RecordingTranslator::default();
        let mut cache = TranslationCache::disabled();
        let requests = phrases(&["a", "b", "a", "c", "a", "b"]);

        let (translations, stats) = translate_requests(&translator, &requests, &options(40), &mut cache)
            .await
            .unwrap();

        assert_eq!(translator.sent_texts(), vec!["a", "b", "c"]);
        assert_eq!(translations["a"], "訳:a");
        assert_eq!(
            stats,
            TranslationStats {
                requested: 6,
                unique: 3,
                cached: 0,
                translated: 3,
                batches: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_misses_are_batched_in_order() {
        let translator = RecordingTranslator::default();
        let mut cache = TranslationCache::disabled();
        cache.insert("b".into(), "cached-b".into());
        let requests = phrases(&["a", "b", "c", "d", "e"]);

        let (translations, stats) = translate_requests(&translator, &requests, &options(2), &mut cache)
            .await
            .unwrap();

        assert_eq!(
            translator.calls(),
            vec![vec!["a".to_string(), "c".to_string()], vec!["d".to_string(), "e".to_string()]]
        );
        assert_eq!(translations["b"], "cached-b");
        assert_eq!(translations["e"], "訳:e");
        assert_eq!(stats.batches, 2);
        assert_eq!(stats.cached, 1);
        assert_eq!(cache.get("d"), Some("訳:d"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_only_between_batches() {
        let translator = RecordingTranslator::default();
        let mut cache = TranslationCache::disabled();
        let options = BatchOptions {
            delay: Duration::from_secs(1),
            ..options(1)
        };

        let start = tokio::time::Instant::now();
        let (_, stats) = translate_requests(&translator, &phrases(&["a", "b", "c"]), &options, &mut cache)
            .await
            .unwrap();

        // two pauses: none before the first call, none after the last
        let elapsed = start.elapsed();
        assert_eq!(stats.batches, 3);
        assert!(elapsed >= Duration::from_secs(2), "{elapsed:?}");
        assert!(elapsed < Duration::from_secs(3), "{elapsed:?}");
    }

    #[tokio::test]
    async fn test_zero_batch_size_is_clamped() {
        let translator = RecordingTranslator::default();
        let mut cache = TranslationCache::disabled();
        let (_, stats) = translate_requests(&translator, &phrases(&["a", "b"]), &options(0), &mut cache)
            .await
            .unwrap();
        assert_eq!(stats.batches, 2);
    }

    #[tokio::test]
    async fn test_call_failure_aborts() {
        let translator = RecordingTranslator {
            fail: true,
            ..Default::default()
        };
        let mut cache = TranslationCache::disabled();
        let err = translate_requests(&translator, &phrases(&["a", "b", "c"]), &options(1), &mut cache)
            .await
            .unwrap_err();

        assert!(matches!(err, TranslateError::ApiError(_)));
        assert_eq!(translator.calls().len(), 1);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_count_mismatch_aborts() {
        let translator = RecordingTranslator {
            drop_last: true,
            ..Default::default()
        };
        let mut cache = TranslationCache::disabled();
        let err = translate_requests(&translator, &phrases(&["a", "b"]), &options(40), &mut cache)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TranslateError::CountMismatch {
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_apply_respects_targets() {
        let translations: HashMap<String, String> = [
            ("dog".to_string(), "犬".to_string()),
            ("A dog.".to_string(), "犬です。".to_string()),
            ("cat".to_string(), String::new()),
        ]
        .into_iter()
        .collect();

        let mut fresh = VocabRecord::new("dog").with_one_phrase("A dog.");
        assert!(apply_translations(&mut fresh, &translations, false));
        assert_eq!(fresh.mean(), Some("犬"));
        assert_eq!(fresh.one_phrase_ja(), Some("犬です。"));

        let mut kept = VocabRecord::new("dog").with_mean("いぬ");
        assert!(!apply_translations(&mut kept, &translations, false));
        assert_eq!(kept.mean(), Some("いぬ"));
        assert!(apply_translations(&mut kept, &translations, true));
        assert_eq!(kept.mean(), Some("犬"));

        let mut empty = VocabRecord::new("cat");
        assert!(!apply_translations(&mut empty, &translations, false));
        assert_eq!(empty.mean(), None);
    }

    fn dataset_fixture(dir: &std::path::Path) -> Dataset {
        std::fs::write(
            dir.join("reiwa3.unigram.json"),
            r#"[{"phrase":"dog","mean":null,"onePhrase":"A dog.","onePhraseJa":null}]"#,
        )
        .unwrap();
        std::fs::write(
            dir.join("frequent-words.json"),
            r#"{"reiwa3":{"animals":[{"phrase":"dog"},{"phrase":"cat","mean":"猫"}]}}"#,
        )
        .unwrap();
        Dataset::open_with_aggregate(dir, "frequent-words.json").unwrap()
    }

    #[tokio::test]
    async fn test_translate_dataset_updates_both_views() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut dataset = dataset_fixture(tmp.path());
        let translator = RecordingTranslator::default();
        let mut cache = TranslationCache::disabled();

        let stats = translate_dataset(&translator, &mut dataset, &options(40), &mut cache, false)
            .await
            .unwrap();

        assert_eq!(stats.requested, 3);
        assert_eq!(stats.unique, 2);
        assert_eq!(translator.sent_texts(), vec!["dog", "A dog."]);

        let year = &dataset.years[0].records[0];
        assert_eq!(year.mean(), Some("訳:dog"));
        assert_eq!(year.one_phrase_ja(), Some("訳:A dog."));

        let aggregate = dataset.aggregate.as_ref().unwrap();
        let animals = &aggregate.years["reiwa3"]["animals"];
        assert_eq!(animals[0].mean(), Some("訳:dog"));
        assert_eq!(animals[1].mean(), Some("猫"));
    }

    #[tokio::test]
    async fn test_persisted_cache_avoids_second_call() {
        let tmp = tempfile::TempDir::new().unwrap();
        let cache_path = tmp.path().join(".translation_cache.json");
        let translator = RecordingTranslator::default();

        let mut dataset = dataset_fixture(tmp.path());
        let mut cache = TranslationCache::load(&cache_path).unwrap();
        translate_dataset(&translator, &mut dataset, &options(40), &mut cache, false)
            .await
            .unwrap();
        cache.save().unwrap();
        assert_eq!(translator.calls().len(), 1);

        let mut dataset = dataset_fixture(tmp.path());
        let mut cache = TranslationCache::load(&cache_path).unwrap();
        let stats = translate_dataset(&translator, &mut dataset, &options(40), &mut cache, false)
            .await
            .unwrap();

        assert_eq!(translator.calls().len(), 1);
        assert_eq!(stats.cached, 2);
        assert_eq!(stats.batches, 0);
        assert_eq!(dataset.years[0].records[0].mean(), Some("訳:dog"));
    }

    #[tokio::test]
    async fn test_nothing_to_translate_is_noop() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("frequent-words.json"),
            r#"{"reiwa3":{"g":[{"phrase":"cat","mean":"猫"}]}}"#,
        )
        .unwrap();
        let mut dataset = Dataset::open_with_aggregate(tmp.path(), "frequent-words.json").unwrap();
        let translator = RecordingTranslator::default();
        let mut cache = TranslationCache::disabled();

        let stats = translate_dataset(&translator, &mut dataset, &options(40), &mut cache, false)
            .await
            .unwrap();

        assert_eq!(stats, TranslationStats::default());
        assert!(translator.calls().is_empty());
    }
}
