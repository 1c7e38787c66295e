use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use sqlhist_diff::{Category, CategorySpec};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the project checkouts.
    #[serde(default = "default_repos_dir")]
    pub repos_dir: String,

    /// Directory the per-project result files are written to.
    #[serde(default = "default_results_dir")]
    pub results_dir: String,

    #[serde(default)]
    pub projects: Vec<ProjectConfig>,

    /// Ordered category-pattern table. The order is load-bearing: passes
    /// are applied exactly in this order during classification.
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryPatternConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub url: String,

    /// Branch to clone; the remote default branch when absent.
    #[serde(default)]
    pub branch: Option<String>,

    /// Unchecked projects are skipped by both prepare and mine.
    #[serde(default = "default_true")]
    pub check: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPatternConfig {
    pub name: String,
    pub pattern: String,
}

/// Directory overrides taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub repos_dir: Option<String>,
    pub results_dir: Option<String>,
}

fn default_repos_dir() -> String {
    "repos".to_string()
}

fn default_results_dir() -> String {
    "results".to_string()
}

fn default_true() -> bool {
    true
}

fn default_categories() -> Vec<CategoryPatternConfig> {
    [
        (
            "DML",
            r"insert\s+into|delete\s+from|select\s+.+\s+from|update\s+\S+\s+set|truncate\s+table|replace\s+into",
        ),
        ("Comments", r"/\*[\s\S]*?\*/|--.*|#.*"),
        (
            "Index",
            r"create\s+(unique\s+)?index|drop\s+index|alter\s+table\s+.+\s+(add|drop)\s+index",
        ),
        ("PK", r"primary\s+key"),
        ("Engine", r"engine\s*=\s*\w+"),
        ("Privilege", r"^(grant|revoke)\s+"),
    ]
    .iter()
    .map(|(name, pattern)| CategoryPatternConfig {
        name: name.to_string(),
        pattern: pattern.to_string(),
    })
    .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repos_dir: default_repos_dir(),
            results_dir: default_results_dir(),
            projects: Vec::new(),
            categories: default_categories(),
        }
    }
}

impl Config {
    /// Load configuration with priority:
    /// 1. Defaults
    /// 2. Global config (`~/.config/sqlhist/config.toml`)
    /// 3. Repo config (`./sqlhist.toml`)
    /// 4. Explicit `--config` path (must exist)
    /// 5. CLI directory overrides
    pub fn load(cli_config: Option<&str>, overrides: &Overrides) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(home_dir) = dirs::home_dir() {
            let global_config = home_dir.join(".config").join("sqlhist").join("config.toml");
            if global_config.exists() {
                config = Self::from_file(&global_config)?;
            }
        }

        let repo_config = Path::new("sqlhist.toml");
        if repo_config.exists() {
            config = Self::from_file(repo_config)?;
        }

        if let Some(custom_config) = cli_config {
            let custom_path = expand_path(custom_config);
            let custom_path = Path::new(&custom_path);
            if !custom_path.exists() {
                return Err(ConfigError::NotFound(custom_path.to_path_buf()));
            }
            config = Self::from_file(custom_path)?;
        }

        if let Some(ref repos_dir) = overrides.repos_dir {
            config.repos_dir = repos_dir.clone();
        }
        if let Some(ref results_dir) = overrides.results_dir {
            config.results_dir = results_dir.clone();
        }

        config.repos_dir = expand_path(&config.repos_dir);
        config.results_dir = expand_path(&config.results_dir);

        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Projects with the check flag set.
    pub fn enabled_projects(&self) -> impl Iterator<Item = &ProjectConfig> {
        self.projects.iter().filter(|p| p.check)
    }

    /// Compile the configured category table into ordered specs. Unknown
    /// category names, patterns on derived categories and invalid regexes
    /// all fail here, before any mining starts.
    pub fn category_specs(&self) -> ConfigResult<Vec<CategorySpec>> {
        self.categories
            .iter()
            .map(|entry| {
                let category: Category = entry.name.parse()?;
                Ok(CategorySpec::compile(category, &entry.pattern)?)
            })
            .collect()
    }
}

/// Expand a leading tilde and `$VAR` references in a configured path.
/// Unset variables are left as written.
pub fn expand_path(path: &str) -> String {
    let mut expanded = match (path, dirs::home_dir()) {
        ("~", Some(home)) => return home.to_string_lossy().to_string(),
        (p, Some(home)) if p.starts_with("~/") => format!("{}{}", home.display(), &p[1..]),
        _ => path.to_string(),
    };

    if expanded.contains('$') {
        let var = regex::Regex::new(r"\$([A-Z_][A-Z0-9_]*)").unwrap();
        expanded = var
            .replace_all(&expanded, |caps: &regex::Captures| {
                std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
            })
            .to_string();
    }

    expanded
}
