//! Generic task options
//!
//! Every task embeds a [`TaskConfig`]. The pull request task stores these
//! options and exposes them, but their meaning belongs to whatever engine
//! schedules the task.

use crate::constants::task::DEFAULT_NAME;
use std::collections::BTreeSet;
use std::time::Duration;

/// Options shared by all tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskConfig {
    pub name: String,
    pub slug: Option<String>,
    pub checkpoint: Option<bool>,
    pub tags: BTreeSet<String>,
    pub max_retries: u32,
    pub retry_delay: Option<Duration>,
    pub timeout: Option<Duration>,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            slug: None,
            checkpoint: None,
            tags: BTreeSet::new(),
            max_retries: 0,
            retry_delay: None,
            timeout: None,
        }
    }
}

impl TaskConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn with_checkpoint(mut self, checkpoint: bool) -> Self {
        self.checkpoint = Some(checkpoint);
        self
    }

    /// Replace the tag set; duplicates collapse
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = Some(retry_delay);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
