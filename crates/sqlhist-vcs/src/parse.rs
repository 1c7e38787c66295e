//! Pure parsers for captured git output.

use crate::error::{VcsError, VcsResult};
use chrono::{DateTime, FixedOffset};
use tracing::warn;

/// One commit of the schema history log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub hash: String,
    /// Committer date (`%cI`).
    pub commit_date: DateTime<FixedOffset>,
    /// Author date (`%aI`).
    pub author_date: DateTime<FixedOffset>,
}

/// Status letter of a name-status entry. Rename and copy entries carry
/// the similarity score git reports after the letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Copied(u8),
    Deleted,
    Modified,
    Renamed(u8),
    TypeChanged,
}

/// One changed file of a commit. `path` is the post-change path; renames
/// and copies also carry the pre-change path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub kind: ChangeKind,
    pub path: String,
    pub old_path: Option<String>,
}

impl FileEntry {
    pub fn is_sql(&self) -> bool {
        self.path.ends_with(".sql")
    }
}

/// Parse `hash;committer-date;author-date` log lines. Empty lines are
/// skipped; anything else that does not split into three RFC 3339 parts
/// is a [`VcsError::MalformedLog`].
pub fn parse_commit_log(output: &str) -> VcsResult<Vec<CommitInfo>> {
    let mut commits = Vec::new();
    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.split(';');
        let (hash, commit_date, author_date) = match (parts.next(), parts.next(), parts.next()) {
            (Some(hash), Some(commit), Some(author)) if parts.next().is_none() => {
                (hash, commit, author)
            }
            _ => return Err(VcsError::MalformedLog(line.to_string())),
        };
        let commit_date = DateTime::parse_from_rfc3339(commit_date)
            .map_err(|_| VcsError::MalformedLog(line.to_string()))?;
        let author_date = DateTime::parse_from_rfc3339(author_date)
            .map_err(|_| VcsError::MalformedLog(line.to_string()))?;
        commits.push(CommitInfo {
            hash: hash.to_string(),
            commit_date,
            author_date,
        });
    }
    Ok(commits)
}

/// Parse `git show --oneline --name-status` output into file entries.
/// The leading commit-summary line is dropped; lines that do not follow
/// the tab-separated status format are skipped with a warning.
pub fn parse_name_status(output: &str) -> Vec<FileEntry> {
    let mut entries = Vec::new();
    for line in output.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        match parse_name_status_line(line) {
            Some(entry) => entries.push(entry),
            None => warn!(line, "skipping unparseable name-status line"),
        }
    }
    entries
}

fn parse_name_status_line(line: &str) -> Option<FileEntry> {
    let mut fields = line.split('\t');
    let status = fields.next()?;
    let first_path = fields.next()?;
    let second_path = fields.next();
    if fields.next().is_some() {
        return None;
    }

    let kind = match status.chars().next()? {
        'A' => ChangeKind::Added,
        'D' => ChangeKind::Deleted,
        'M' => ChangeKind::Modified,
        'T' => ChangeKind::TypeChanged,
        'R' => ChangeKind::Renamed(status[1..].parse().ok()?),
        'C' => ChangeKind::Copied(status[1..].parse().ok()?),
        _ => return None,
    };

    match (kind, second_path) {
        // Renames and copies list old then new path.
        (ChangeKind::Renamed(_) | ChangeKind::Copied(_), Some(new_path)) => Some(FileEntry {
            kind,
            path: new_path.to_string(),
            old_path: Some(first_path.to_string()),
        }),
        (ChangeKind::Renamed(_) | ChangeKind::Copied(_), None) => None,
        (_, None) => Some(FileEntry {
            kind,
            path: first_path.to_string(),
            old_path: None,
        }),
        (_, Some(_)) => None,
    }
}

/// Split rename entries into exact renames (similarity 100, content
/// untouched) and partial renames (renamed with edits). Returns the
/// post-change paths in input order.
pub fn split_renames(entries: &[FileEntry]) -> (Vec<String>, Vec<String>) {
    let mut exact = Vec::new();
    let mut partial = Vec::new();
    for entry in entries {
        match entry.kind {
            ChangeKind::Renamed(100) => exact.push(entry.path.clone()),
            ChangeKind::Renamed(_) => partial.push(entry.path.clone()),
            _ => {}
        }
    }
    (exact, partial)
}

/// Strip the leading commit-summary line and every "no newline at end of
/// file" marker from a per-file `git show` output, then trim. The result
/// is the DiffText the classifier expects: empty for whitespace-only
/// changes, header-less for mode-only ones.
pub fn clean_file_diff(raw: &str) -> String {
    let body = match raw.split_once('\n') {
        Some((_, rest)) => rest,
        None => "",
    };
    body.replace("\\ No newline at end of file", "")
        .trim()
        .to_string()
}
