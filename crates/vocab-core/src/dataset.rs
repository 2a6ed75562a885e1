use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use vocab_types::{Aggregate, VocabRecord, YearFile};

use crate::error::CoreError;

/// Suffix of per-year files; the year is the file name without it
pub const YEAR_FILE_SUFFIX: &str = ".unigram.json";

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CoreError> {
    let data = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
    serde_json::from_str(&data).map_err(|e| CoreError::json(path, e))
}

/// Pretty-print `value` with two-space indentation, non-ASCII kept literal
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CoreError> {
    let data = serde_json::to_string_pretty(value).map_err(|e| CoreError::json(path, e))?;
    fs::write(path, data).map_err(|e| CoreError::io(path, e))
}

/// One `<year>.unigram.json` file
#[derive(Debug, Clone)]
pub struct YearEntry {
    pub year: String,
    pub path: PathBuf,
    pub records: YearFile,
}

impl YearEntry {
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let year = year_of(path).unwrap_or_default().to_string();
        let records = read_json(path)?;
        Ok(Self {
            year,
            path: path.to_path_buf(),
            records,
        })
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn save(&self) -> Result<(), CoreError> {
        write_json(&self.path, &self.records)
    }
}

/// The nested year -> group -> records file
#[derive(Debug, Clone)]
pub struct AggregateFile {
    pub path: PathBuf,
    pub years: Aggregate,
}

impl AggregateFile {
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        Ok(Self {
            path: path.to_path_buf(),
            years: read_json(path)?,
        })
    }

    pub fn save(&self) -> Result<(), CoreError> {
        write_json(&self.path, &self.years)
    }

    pub fn records(&self) -> impl Iterator<Item = &VocabRecord> {
        self.years.values().flat_map(|groups| groups.values()).flatten()
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut VocabRecord> {
        self.years
            .values_mut()
            .flat_map(|groups| groups.values_mut())
            .flatten()
    }

    /// Records of every group under `year`
    pub fn year_records_mut(&mut self, year: &str) -> impl Iterator<Item = &mut VocabRecord> {
        self.years
            .get_mut(year)
            .into_iter()
            .flat_map(|groups| groups.values_mut())
            .flatten()
    }
}

/// Every file of one vocab directory. The per-year files and the aggregate
/// are independent copies; passes that mutate records update both.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub dir: PathBuf,
    pub years: Vec<YearEntry>,
    pub aggregate: Option<AggregateFile>,
}

impl Dataset {
    /// Load all `*.unigram.json` files (sorted by name) and the aggregate if
    /// present
    pub fn open(dir: &Path, aggregate_file: &str) -> Result<Self, CoreError> {
        if !dir.is_dir() {
            return Err(CoreError::MissingInput(dir.to_path_buf()));
        }

        let years = year_file_paths(dir)?
            .iter()
            .map(|path| YearEntry::load(path))
            .collect::<Result<Vec<_>, _>>()?;

        let aggregate_path = dir.join(aggregate_file);
        let aggregate = if aggregate_path.is_file() {
            Some(AggregateFile::load(&aggregate_path)?)
        } else {
            tracing::debug!("No aggregate file at {}", aggregate_path.display());
            None
        };

        tracing::info!(
            "Loaded {} year files from {}{}",
            years.len(),
            dir.display(),
            if aggregate.is_some() { " plus aggregate" } else { "" }
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            years,
            aggregate,
        })
    }

    /// Like [`Dataset::open`] but the aggregate file must exist
    pub fn open_with_aggregate(dir: &Path, aggregate_file: &str) -> Result<Self, CoreError> {
        let dataset = Self::open(dir, aggregate_file)?;
        if dataset.aggregate.is_none() {
            return Err(CoreError::MissingInput(dir.join(aggregate_file)));
        }
        Ok(dataset)
    }

    pub fn year_names(&self) -> impl Iterator<Item = &str> {
        self.years.iter().map(|entry| entry.year.as_str())
    }

    /// Years named by a year file or an aggregate bucket, first seen first
    pub fn all_years(&self) -> Vec<String> {
        let mut years: Vec<String> = self.year_names().map(str::to_string).collect();
        if let Some(aggregate) = &self.aggregate {
            for year in aggregate.years.keys() {
                if !years.contains(year) {
                    years.push(year.clone());
                }
            }
        }
        years
    }

    /// Records of `year` in its year file, then in its aggregate bucket
    pub fn year_records_mut<'a>(
        &'a mut self,
        year: &'a str,
    ) -> impl Iterator<Item = &'a mut VocabRecord> {
        self.years
            .iter_mut()
            .filter(move |entry| entry.year == year)
            .flat_map(|entry| entry.records.iter_mut())
            .chain(
                self.aggregate
                    .iter_mut()
                    .flat_map(move |aggregate| aggregate.year_records_mut(year)),
            )
    }

    /// Year files first, then the aggregate, each in file order
    pub fn records(&self) -> impl Iterator<Item = &VocabRecord> {
        self.years
            .iter()
            .flat_map(|entry| entry.records.iter())
            .chain(self.aggregate.iter().flat_map(|aggregate| aggregate.records()))
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut VocabRecord> {
        self.years
            .iter_mut()
            .flat_map(|entry| entry.records.iter_mut())
            .chain(
                self.aggregate
                    .iter_mut()
                    .flat_map(|aggregate| aggregate.records_mut()),
            )
    }

    /// Rewrite every file
    pub fn save(&self) -> Result<(), CoreError> {
        for entry in &self.years {
            entry.save()?;
            tracing::info!("Updated {}", entry.path.display());
        }
        if let Some(aggregate) = &self.aggregate {
            aggregate.save()?;
            tracing::info!("Updated {}", aggregate.path.display());
        }
        Ok(())
    }

    /// Names of every JSON file in the directory, for reporting
    pub fn json_files(&self) -> Result<Vec<String>, CoreError> {
        Ok(read_dir_sorted(&self.dir)?
            .into_iter()
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect())
    }
}

fn year_of(path: &Path) -> Option<&str> {
    path.file_name()?.to_str()?.strip_suffix(YEAR_FILE_SUFFIX)
}

fn year_file_paths(dir: &Path) -> Result<Vec<PathBuf>, CoreError> {
    Ok(read_dir_sorted(dir)?
        .into_iter()
        .filter(|p| p.is_file() && year_of(p).is_some_and(|year| !year.is_empty()))
        .collect())
}

pub(crate) fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>, CoreError> {
    let mut paths = fs::read_dir(dir)
        .map_err(|e| CoreError::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CoreError::io(dir, e))?;
    paths.sort();
    Ok(paths)
}
