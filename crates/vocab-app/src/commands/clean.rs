use anyhow::Context;
use vocab_config::dataset::DatasetConfig;
use vocab_core::Dataset;
use vocab_core::normalize::normalize_all;

/// Normalize every record of every file and rewrite them. Returns the number
/// of records that changed.
pub fn run(config: &DatasetConfig) -> anyhow::Result<usize> {
    let mut dataset = Dataset::open(&config.vocab_dir, &config.aggregate_file)
        .context("Failed to load vocabulary files")?;

    let changed = normalize_all(dataset.records_mut());
    dataset.save().context("Failed to write cleaned files")?;

    tracing::info!("Cleaned {} records", changed);
    for name in dataset.json_files()? {
        tracing::info!("  {}", name);
    }
    Ok(changed)
}
