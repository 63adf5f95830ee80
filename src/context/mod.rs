//! Execution context handed to tasks
//!
//! Tasks never read ambient state. Whatever a run needs from its
//! surroundings, such as secrets, travels in a [`TaskContext`] that the
//! caller builds and passes to `run`.

pub mod secrets;

pub use secrets::{SecretValue, Secrets};

/// Per-execution state supplied by the caller
#[derive(Debug, Clone, Default)]
pub struct TaskContext {
    pub secrets: Secrets,
}

impl TaskContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context carrying the given secrets
    pub fn with_secrets(secrets: Secrets) -> Self {
        Self { secrets }
    }
}
