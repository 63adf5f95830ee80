//! HTTP plumbing for the ghpr task
//!
//! ## Modules
//!
//! - [`transport`]: The `HttpTransport` seam and its reqwest implementation
//! - [`util`]: Repository slug parsing

mod transport;
mod util;

// Re-export public API
pub use reqwest::header;
pub use transport::{HttpTransport, ReqwestTransport};
pub use util::{parse_github_url, repo_slug};
