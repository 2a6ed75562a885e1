
use std::fs;
use std::path::Path;

use tempfile::TempDir;
use vocab_config::dataset::DatasetConfig;

pub(crate) const YEAR_FILE: &str = r#"[
  {"phrase": "english", "mean": null, "onePhrase": "I  study English am.", "onePhraseJa": "英語を勉強する.."},
  {"phrase": "giraffe", "mean": "キリン", "onePhrase": "giraffe cid", "onePhraseJa": null},
  {"phrase": "Sabine", "mean": "サビーヌ", "onePhrase": "Sabine is here.", "onePhraseJa": "サビーヌはここにいる。"}
]"#;

pub(crate) const AGGREGATE_FILE: &str = r#"{
  "reiwa3": {
    "animals": [
      {"phrase": "giraffe", "mean": "ジラフ", "onePhrase": "giraffe", "onePhraseJa": ""},
      {"phrase": "hobbs", "mean": null}
    ]
  },
  "reiwa9": {
    "misc": [
      {"phrase": "morning", "mean": "モーニング"}
    ]
  }
}"#;

pub(crate) const CORPUS: &str = "Listen carefully.\nThe giraffe at the zoo was eating leaves from a very tall tree today. The giraffe ran.";

/// Corpus for the year that only appears in the aggregate
pub(crate) const LATE_CORPUS: &str = "Good morning everyone here.";

/// Vocab dir with one year file and the aggregate, plus a raw dir with a
/// corpus for each year
pub(crate) fn fixture() -> (TempDir, DatasetConfig) {
    let tmp = TempDir::new().unwrap();
    let vocab = tmp.path().join("vocab");
    let raw = tmp.path().join("raw");
    fs::create_dir_all(&vocab).unwrap();
    fs::create_dir_all(&raw).unwrap();

    fs::write(vocab.join("reiwa3.unigram.json"), YEAR_FILE).unwrap();
    fs::write(vocab.join("frequent-words.json"), AGGREGATE_FILE).unwrap();
    fs::write(raw.join("reiwa3.txt"), CORPUS).unwrap();
    fs::write(raw.join("reiwa9.txt"), LATE_CORPUS).unwrap();

    let config = DatasetConfig::default()
        .with_vocab_dir(&vocab)
        .with_raw_dir(&raw);
    (tmp, config)
}

pub(crate) fn read_value(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
