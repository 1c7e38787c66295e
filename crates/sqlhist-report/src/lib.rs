//! Per-commit classification records and result emission.

mod error;
mod record;
mod writer;

pub use error::{ReportError, ReportResult};
pub use record::{ClassificationResult, CommitRecord};
pub use writer::{write_csv, write_json};
