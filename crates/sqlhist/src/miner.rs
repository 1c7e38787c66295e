//! Orchestrating loop: walk a project's schema commits, classify each
//! changed SQL file and assemble the per-commit records.

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use sqlhist_core::{Config, ProjectConfig};
use sqlhist_diff::{classify_diff, Category, CategorySpec};
use sqlhist_report::{write_csv, write_json, ClassificationResult, CommitRecord};
use sqlhist_vcs::{
    clean_file_diff, parse_commit_log, parse_name_status, split_renames, CommitInfo, FileEntry,
    GitRunner,
};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

pub fn mine_project(
    config: &Config,
    specs: &[CategorySpec],
    project: &ProjectConfig,
    json: bool,
) -> Result<()> {
    let repo_path = Path::new(&config.repos_dir).join(&project.name);
    let runner = GitRunner::open(&repo_path).with_context(|| {
        format!(
            "no checkout for '{}' at {}; run `sqlhist prepare` first",
            project.name,
            repo_path.display()
        )
    })?;

    let records = mine_repository(&runner, specs, &project.name)?;

    let results_dir = Path::new(&config.results_dir);
    fs::create_dir_all(results_dir)
        .with_context(|| format!("failed to create {}", results_dir.display()))?;

    let csv_path = results_dir.join(format!("{}.csv", project.name));
    write_csv(&csv_path, &records)?;
    if json {
        write_json(&results_dir.join(format!("{}.json", project.name)), &records)?;
    }

    info!(
        project = project.name.as_str(),
        commits = records.len(),
        "wrote {}",
        csv_path.display()
    );
    Ok(())
}

/// Classify every schema commit of an opened checkout, oldest first.
/// A commit that fails a git command is skipped with a warning rather
/// than aborting the project.
pub fn mine_repository(
    runner: &GitRunner,
    specs: &[CategorySpec],
    label: &str,
) -> Result<Vec<CommitRecord>> {
    let log = runner.schema_commit_log()?;
    let mut commits = parse_commit_log(&log)?;
    commits.sort_by(|a, b| a.commit_date.cmp(&b.commit_date));

    let bar = ProgressBar::new(commits.len() as u64);
    bar.set_message(label.to_string());

    let mut records = Vec::with_capacity(commits.len());
    for commit in &commits {
        match mine_commit(runner, specs, commit) {
            Ok(record) => records.push(record),
            Err(e) => warn!(commit = commit.hash.as_str(), "skipping commit: {e:#}"),
        }
        bar.inc(1);
    }
    bar.finish();
    Ok(records)
}

fn mine_commit(
    runner: &GitRunner,
    specs: &[CategorySpec],
    commit: &CommitInfo,
) -> Result<CommitRecord> {
    let status = runner.name_status(&commit.hash)?;
    let entries = parse_name_status(&status);
    let changed_files = entries.len();

    let sql_entries: Vec<FileEntry> = entries.into_iter().filter(|e| e.is_sql()).collect();
    let sql_files = sql_entries.len();

    let mut categories = ClassificationResult::new();

    let (exact_renames, partial_renames) = split_renames(&sql_entries);
    for path in exact_renames.iter().chain(partial_renames.iter()) {
        categories.insert(Category::Renaming, path);
    }

    for entry in &sql_entries {
        // An exact rename carries no content change worth diffing; a
        // partial rename is additionally diffed like any other change.
        if exact_renames.contains(&entry.path) {
            continue;
        }
        let raw = runner.file_diff(&commit.hash, &entry.path)?;
        let diff = clean_file_diff(&raw);
        let classification = classify_diff(&diff, specs);
        debug!(
            commit = commit.hash.as_str(),
            file = entry.path.as_str(),
            ?classification,
            "classified"
        );
        for category in classification.categories() {
            categories.insert(category, &entry.path);
        }
    }

    Ok(CommitRecord {
        commit: commit.hash.clone(),
        commit_date: commit.commit_date,
        author_date: commit.author_date,
        changed_files,
        sql_files,
        categories,
    })
}
