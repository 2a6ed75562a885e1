use anyhow::Context;
use vocab_config::dataset::DatasetConfig;
use vocab_core::{Dataset, FilterReport, NameFilter};

/// Drop name records from every file. Year files are only rewritten when
/// something was removed.
pub fn run(config: &DatasetConfig, extra_names: &[String]) -> anyhow::Result<FilterReport> {
    let mut dataset = Dataset::open(&config.vocab_dir, &config.aggregate_file)
        .context("Failed to load vocabulary files")?;

    let mut filter = NameFilter::with_defaults();
    filter.extend(extra_names);

    let report = filter.filter_dataset(&mut dataset);

    for entry in &dataset.years {
        if report.file_removed(&entry.file_name()) > 0 {
            entry.save()?;
        }
    }
    if let Some(aggregate) = &dataset.aggregate {
        aggregate.save()?;
    }

    tracing::info!("Removed per file:");
    for (file, removed) in &report.per_file {
        tracing::info!("  {}: {}", file, removed);
    }
    tracing::info!("Aggregate removed: {}", report.aggregate_removed());

    Ok(report)
}
