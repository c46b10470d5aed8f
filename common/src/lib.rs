//! Term Match Common Library
//!
//! デスクトップUIとテストで共有される型と照合ロジック（I/Oなし）

pub mod types;
pub mod matcher;
pub mod selection;
pub mod export;

pub use types::{column_label, ColumnOption, MatchResult, SelectionMode, Table};
pub use matcher::{extract_terms, find_matches, MatchRequest};
pub use selection::Selection;
pub use export::{checked_text, unique_terms, unique_text};
