//! Configuration and logging for the schema-history miner.

mod config;
mod error;
mod logging;

pub use config::{expand_path, CategoryPatternConfig, Config, Overrides, ProjectConfig};
pub use error::{ConfigError, ConfigResult};
pub use logging::init_logging;
