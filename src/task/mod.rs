//! Tasks
//!
//! - [`base`]: Generic options every task carries
//! - [`pull_request`]: The pull request creation task
//! - [`error`]: Errors raised while running a task

pub mod base;
pub mod error;
pub mod pull_request;

pub use base::TaskConfig;
pub use error::TaskError;
pub use pull_request::{CreatePullRequest, PrOverrides, resolve};
