//! ghpr - Create GitHub pull requests from a reusable, configurable task

pub mod config;
pub mod constants;
pub mod context;
pub mod task;
pub mod utils;

pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use config::Config;
pub use context::{SecretValue, Secrets, TaskContext};
pub use task::{CreatePullRequest, PrOverrides, TaskConfig, TaskError};

/// Helper to load the default config file, if one exists
pub fn load_default_config() -> anyhow::Result<Config> {
    Config::load_or_default(constants::config::DEFAULT_CONFIG_FILE)
}
