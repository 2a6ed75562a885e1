use std::path::Path;

use anyhow::Context;
use vocab_core::frequency::WordFrequency;

/// Word counts of every `.txt` file in `input_dir`, as CSV
pub fn run(input_dir: &Path) -> anyhow::Result<String> {
    let freq = WordFrequency::from_dir(input_dir)
        .context("Put extracted .txt files in the input directory")?;
    tracing::info!("{} distinct words", freq.len());
    Ok(freq.to_csv())
}
