use std::time::Duration;

use anyhow::{Context, bail};
use clap::Args;
use vocab_config::Config;
use vocab_core::Dataset;
use vocab_translator::{
    BatchOptions, DeeplTranslator, TranslationCache, TranslationStats, Translator,
    translate_dataset,
};

#[derive(Debug, Clone, Default, Args)]
pub struct TranslateArgs {
    /// Target language code (e.g. JA, EN, ZH)
    #[arg(long)]
    pub target_lang: Option<String>,
    /// Source language code, detected by the provider when omitted
    #[arg(long)]
    pub source_lang: Option<String>,
    /// Texts sent per request
    #[arg(long)]
    pub batch_size: Option<usize>,
    /// Seconds to wait between requests
    #[arg(long)]
    pub delay: Option<f64>,
    /// Replace existing `mean` / `onePhraseJa` values
    #[arg(long)]
    pub overwrite: bool,
    /// Ignore and do not write the translation cache
    #[arg(long)]
    pub no_cache: bool,
}

impl TranslateArgs {
    fn batch_options(&self, config: &Config) -> anyhow::Result<BatchOptions> {
        let translator = &config.translator;
        let batch_size = self.batch_size.unwrap_or(translator.batch_size);
        if batch_size == 0 {
            bail!("Batch size must be at least 1");
        }
        let delay = self.delay.unwrap_or(translator.delay_secs);
        let delay = Duration::try_from_secs_f64(delay)
            .with_context(|| format!("Invalid delay: {delay}"))?;

        Ok(BatchOptions {
            target_lang: self
                .target_lang
                .clone()
                .unwrap_or_else(|| translator.target_lang.clone()),
            source_lang: self
                .source_lang
                .clone()
                .or_else(|| translator.source_lang.clone()),
            batch_size,
            delay,
        })
    }
}

pub async fn run(config: &Config, args: TranslateArgs) -> anyhow::Result<TranslationStats> {
    if config.translator.api_key.is_empty() {
        bail!("DEEPL_API_KEY is not set");
    }
    let translator = DeeplTranslator::new(
        config.translator.api_key.clone(),
        config.translator.api_url.clone(),
    );
    run_with(&translator, config, &args).await
}

/// Translate the dataset with the given provider, then persist the cache and
/// every file. Nothing is written when there is nothing to translate or the
/// provider fails.
pub async fn run_with<T: Translator + ?Sized>(
    translator: &T,
    config: &Config,
    args: &TranslateArgs,
) -> anyhow::Result<TranslationStats> {
    let options = args.batch_options(config)?;
    let dataset_config = &config.dataset;

    let mut dataset = Dataset::open_with_aggregate(
        &dataset_config.vocab_dir,
        &dataset_config.aggregate_file,
    )
    .context("Failed to load vocabulary files")?;

    let mut cache = if args.no_cache {
        TranslationCache::disabled()
    } else {
        TranslationCache::load(&dataset_config.cache_path())?
    };

    tracing::info!(
        "Translating with {} into {}",
        translator.metadata().name,
        options.target_lang
    );
    let stats = translate_dataset(translator, &mut dataset, &options, &mut cache, args.overwrite)
        .await
        .context("Translation failed")?;

    if stats.requested == 0 {
        return Ok(stats);
    }

    dataset.save().context("Failed to write translated files")?;
    cache.save().context("Failed to write translation cache")?;

    tracing::info!(
        "Done: {} requests, {} unique, {} cached, {} translated in {} batches",
        stats.requested,
        stats.unique,
        stats.cached,
        stats.translated,
        stats.batches
    );
    Ok(stats)
}
