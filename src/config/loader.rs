//! Configuration file loading

use crate::context::Secrets;
use crate::task::{CreatePullRequest, TaskConfig};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Task defaults as written in the config file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaskSettings {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub checkpoint: Option<bool>,
    pub tags: Vec<String>,
    pub max_retries: Option<u32>,
    pub retry_delay_secs: Option<u64>,
    /// Also the HTTP request timeout when none is given on the command line
    pub timeout_secs: Option<u64>,
    pub repo: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub head: Option<String>,
    pub base: Option<String>,
    pub token_secret: Option<String>,
    pub api_base: Option<String>,
}

impl TaskSettings {
    /// Generic task options described by these settings
    pub fn task_config(&self) -> TaskConfig {
        let mut config = TaskConfig::new().with_tags(self.tags.iter().cloned());
        if let Some(name) = &self.name {
            config = config.with_name(name.clone());
        }
        if let Some(slug) = &self.slug {
            config = config.with_slug(slug.clone());
        }
        if let Some(checkpoint) = self.checkpoint {
            config = config.with_checkpoint(checkpoint);
        }
        if let Some(max_retries) = self.max_retries {
            config = config.with_max_retries(max_retries);
        }
        if let Some(secs) = self.retry_delay_secs {
            config = config.with_retry_delay(Duration::from_secs(secs));
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }

    /// Build the pull request task these settings describe
    pub fn build_task(&self) -> CreatePullRequest {
        let mut task = CreatePullRequest::new().with_task_config(self.task_config());

        if let Some(repo) = &self.repo {
            task = task.with_repo(repo.clone());
        }
        if let Some(title) = &self.title {
            task = task.with_title(title.clone());
        }
        if let Some(body) = &self.body {
            task = task.with_body(body.clone());
        }
        if let Some(head) = &self.head {
            task = task.with_head(head.clone());
        }
        if let Some(base) = &self.base {
            task = task.with_base(base.clone());
        }
        if let Some(token_secret) = &self.token_secret {
            task = task.with_token_secret(token_secret.clone());
        }
        if let Some(api_base) = &self.api_base {
            task = task.with_api_base(api_base.clone());
        }

        task
    }
}

/// Contents of a `ghpr.yaml` file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub task: TaskSettings,
    pub secrets: Secrets,
}

impl Config {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Load configuration, treating a missing file as empty
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Parse configuration from YAML text
    pub fn parse(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a mapping.
        if content.trim().is_empty() {
            return Ok(Self::new());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Build the configured task
    pub fn build_task(&self) -> CreatePullRequest {
        self.task.build_task()
    }

    /// Request timeout for the transport
    ///
    /// An explicit value (the `--timeout` flag) wins over the file's
    /// `timeout_secs`.
    pub fn transport_timeout(&self, explicit_secs: Option<u64>) -> Option<Duration> {
        explicit_secs
            .or(self.task.timeout_secs)
            .map(Duration::from_secs)
    }

    /// Secrets declared in the file
    pub fn secrets(&self) -> &Secrets {
        &self.secrets
    }
}
