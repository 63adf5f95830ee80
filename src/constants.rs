//! Central constants for the ghpr application

/// Default values for GitHub operations
pub mod github {
    /// GitHub API base URL
    pub const API_BASE: &str = "https://api.github.com";

    /// Media type requested from the REST API
    pub const ACCEPT: &str = "application/vnd.github.v3+json";

    /// Default User-Agent header for API requests
    pub const DEFAULT_USER_AGENT: &str = concat!("ghpr/", env!("CARGO_PKG_VERSION"));

    /// Scheme prepended to the secret in the authorization header
    pub const TOKEN_SCHEME: &str = "token";
}

/// Default values for tasks
pub mod task {
    /// Name given to a task when none is configured
    pub const DEFAULT_NAME: &str = "CreatePullRequest";
}

/// Default values for configuration
pub mod config {
    /// Default configuration file name
    pub const DEFAULT_CONFIG_FILE: &str = "ghpr.yaml";

    /// Prefix of environment variables that provide secrets
    pub const SECRET_ENV_PREFIX: &str = "GHPR_SECRET_";
}
