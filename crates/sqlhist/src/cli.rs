use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "sqlhist",
    version,
    about = "Mine and classify SQL schema changes from git histories"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Specify configuration file path
    #[arg(long, env = "SQLHIST_CONFIG")]
    pub config: Option<String>,

    /// Override the repositories directory
    #[arg(long, env = "SQLHIST_REPOS_DIR")]
    pub repos_dir: Option<String>,

    /// Override the results directory
    #[arg(long, env = "SQLHIST_RESULTS_DIR")]
    pub results_dir: Option<String>,

    /// Log level
    #[arg(long, env = "SQLHIST_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the repositories folder and clone missing projects
    Prepare,

    /// Classify schema changes for the configured projects
    Mine {
        /// Restrict mining to the named project(s)
        #[arg(long = "project")]
        projects: Vec<String>,

        /// Also write results as JSON
        #[arg(long)]
        json: bool,
    },
}
