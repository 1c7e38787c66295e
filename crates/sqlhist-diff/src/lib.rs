//! Diff classification engine for SQL schema histories.
//!
//! A unified diff is split into normalized per-hunk blocks, then run
//! through an ordered list of category passes. Each pass eliminates the
//! content its pattern recognizes; a category counts as detected when
//! the pass measurably shrank the residue. Whatever survives every pass
//! is unclassified.

mod category;
mod engine;
mod error;
mod segment;

pub use category::{Category, CategorySpec, MatchMode};
pub use engine::{apply_category_pass, classify_diff, total_line_count, Classification};
pub use error::{PatternError, PatternResult};
pub use segment::{has_hunk_headers, segment_and_normalize};
