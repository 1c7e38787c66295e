use crate::cli::{Cli, Command};
use crate::miner;
use anyhow::{bail, Context, Result};
use sqlhist_core::{Config, Overrides};
use sqlhist_vcs::GitRunner;
use std::fs;
use std::path::Path;
use tracing::{error, warn};

pub fn execute(cli: Cli) -> Result<()> {
    let overrides = Overrides {
        repos_dir: cli.repos_dir.clone(),
        results_dir: cli.results_dir.clone(),
    };
    let config = Config::load(cli.config.as_deref(), &overrides)?;

    match cli.command {
        Command::Prepare => cmd_prepare(&config),
        Command::Mine { projects, json } => cmd_mine(&config, &projects, json),
    }
}

fn cmd_prepare(config: &Config) -> Result<()> {
    let repos_dir = Path::new(&config.repos_dir);
    if !repos_dir.exists() {
        fs::create_dir_all(repos_dir)
            .with_context(|| format!("failed to create {}", repos_dir.display()))?;
        eprintln!("Created repositories folder: {}", repos_dir.display());
    }

    for project in config.enabled_projects() {
        let dest = repos_dir.join(&project.name);
        // A bare created directory counts as missing too.
        let missing = !dest.exists() || fs::read_dir(&dest)?.count() < 2;
        if !missing {
            continue;
        }
        eprintln!("Cloning '{}'...", project.name);
        GitRunner::clone(&project.url, &dest, project.branch.as_deref())
            .with_context(|| format!("failed to clone '{}'", project.name))?;
    }
    Ok(())
}

fn cmd_mine(config: &Config, projects: &[String], json: bool) -> Result<()> {
    let specs = config.category_specs()?;

    for requested in projects {
        if !config.projects.iter().any(|p| &p.name == requested) {
            warn!(project = requested.as_str(), "not in configuration, ignoring");
        }
    }

    let mut failed = 0usize;
    for project in config.enabled_projects() {
        if !projects.is_empty() && !projects.contains(&project.name) {
            continue;
        }
        if let Err(e) = miner::mine_project(config, &specs, project, json) {
            error!(project = project.name.as_str(), "mining failed: {e:#}");
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{failed} project(s) failed");
    }
    Ok(())
}
