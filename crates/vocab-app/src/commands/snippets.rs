use anyhow::Context;
use vocab_config::dataset::DatasetConfig;
use vocab_core::Dataset;
use vocab_core::snippet::{Corpus, refresh_snippet};

/// Re-extract broken example sentences, one corpus per year. A year is
/// processed when it has a year file or an aggregate bucket. Returns the
/// number of records updated across year files and the aggregate.
pub fn run(config: &DatasetConfig) -> anyhow::Result<usize> {
    let mut dataset = Dataset::open(&config.vocab_dir, &config.aggregate_file)
        .context("Failed to load vocabulary files")?;

    let mut total = 0;
    for year in dataset.all_years() {
        let corpus_path = config.corpus_path(&year);
        let corpus = Corpus::load(&corpus_path)
            .with_context(|| format!("Failed to load corpus for {}", year))?;

        let updated = dataset
            .year_records_mut(&year)
            .map(|record| refresh_snippet(record, &corpus))
            .filter(|updated| *updated)
            .count();

        tracing::info!("{}: {} snippets updated", year, updated);
        total += updated;
    }

    dataset.save().context("Failed to write updated files")?;
    tracing::info!("Updated snippets: {}", total);
    Ok(total)
}
