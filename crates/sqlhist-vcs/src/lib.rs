//! Git collaborator for the schema-history miner.
//!
//! [`GitRunner`] drives the external `git` binary and captures its output;
//! the [`parse`] module turns that output into commit metadata, per-file
//! change entries and cleaned diff text ready for classification. The
//! exact `git show` flags matter: whitespace changes are suppressed at the
//! diff level so that whitespace-only edits reach the classifier as empty
//! text.

mod error;
pub mod parse;
mod runner;

pub use error::{VcsError, VcsResult};
pub use parse::{
    clean_file_diff, parse_commit_log, parse_name_status, split_renames, ChangeKind, CommitInfo,
    FileEntry,
};
pub use runner::GitRunner;
