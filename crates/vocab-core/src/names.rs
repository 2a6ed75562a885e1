use std::collections::HashSet;

use indexmap::IndexMap;
use vocab_types::VocabRecord;

use crate::dataset::Dataset;

/// Headwords known to be personal names, stored case-folded
const DEFAULT_NAMES: &[&str] = &[
    "sabine",
    "berger",
    "roberts",
    "hobbs",
    "leigh",
    "wells",
    "liz",
    "farnsworth",
    "takuya",
    "kasumi",
];

/// Removes records whose headword is a known personal name
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    names: HashSet<String>,
}

impl NameFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut filter = Self::new();
        filter.extend(DEFAULT_NAMES.iter().copied());
        filter
    }

    /// Add names, case-folding each
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.names
            .extend(names.into_iter().map(|n| n.as_ref().trim().to_lowercase()));
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn is_name(&self, phrase: &str) -> bool {
        self.names.contains(&phrase.to_lowercase())
    }

    /// Drop matching records in place, returning how many were removed
    pub fn filter(&self, records: &mut Vec<VocabRecord>) -> usize {
        let before = records.len();
        records.retain(|record| !self.is_name(&record.phrase));
        before - records.len()
    }

    /// Filter every year file and every aggregate group
    pub fn filter_dataset(&self, dataset: &mut Dataset) -> FilterReport {
        let mut report = FilterReport::default();

        for entry in &mut dataset.years {
            let removed = self.filter(&mut entry.records);
            report.per_file.insert(entry.file_name(), removed);
        }

        if let Some(aggregate) = &mut dataset.aggregate {
            for (year, groups) in &mut aggregate.years {
                for (group, records) in groups {
                    let removed = self.filter(records);
                    report.per_group.insert((year.clone(), group.clone()), removed);
                }
            }
        }

        report
    }
}

/// Removal counts of one name-filter run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterReport {
    /// Year file name -> removed records
    pub per_file: IndexMap<String, usize>,
    /// (year, group) -> removed records in the aggregate
    pub per_group: IndexMap<(String, String), usize>,
}

impl FilterReport {
    pub fn file_removed(&self, file_name: &str) -> usize {
        self.per_file.get(file_name).copied().unwrap_or(0)
    }

    pub fn aggregate_removed(&self) -> usize {
        self.per_group.values().sum()
    }

    pub fn total_removed(&self) -> usize {
        self.per_file.values().sum::<usize>() + self.aggregate_removed()
    }
}
