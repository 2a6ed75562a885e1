pub mod dataset;
pub mod error;
pub mod frequency;
pub mod names;
pub mod normalize;
pub mod snippet;
pub mod text;

pub use dataset::{AggregateFile, Dataset, YearEntry, read_json, write_json};
pub use error::CoreError;
pub use names::{FilterReport, NameFilter};
pub use snippet::Corpus;
