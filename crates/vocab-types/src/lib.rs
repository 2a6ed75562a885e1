mod types;

pub use types::{Aggregate, FieldValue, Groups, VocabRecord, YearFile};
