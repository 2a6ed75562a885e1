pub mod clean;
pub mod frequency;
pub mod remove_names;
pub mod snippets;
pub mod translate;
