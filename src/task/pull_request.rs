//! Pull request creation task
//!
//! [`CreatePullRequest`] is configured once and can then be run any number
//! of times. Each run resolves its effective fields (run-time overrides
//! first, configured values second), optionally turns a named secret into
//! an authorization header, and sends a single POST to
//! `{api_base}/repos/{repo}/pulls`. The transport's response is returned
//! as-is; status codes are left for the caller to interpret.

use super::base::TaskConfig;
use super::error::TaskError;
use crate::constants::github::{
    ACCEPT as ACCEPT_MEDIA_TYPE, API_BASE, DEFAULT_USER_AGENT, TOKEN_SCHEME,
};
use crate::context::TaskContext;
use ghpr_http::HttpTransport;
use ghpr_http::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Serialize, Debug, PartialEq, Eq)]
pub(crate) struct CreatePullRequestPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    head: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    base: Option<&'a str>,
}

impl CreatePullRequestPayload<'_> {
    fn present_fields(&self) -> Vec<&'static str> {
        [
            ("title", self.title.is_some()),
            ("body", self.body.is_some()),
            ("head", self.head.is_some()),
            ("base", self.base.is_some()),
        ]
        .into_iter()
        .filter_map(|(field, present)| present.then_some(field))
        .collect()
    }
}

/// Pick the run-time value when given, otherwise the configured one
pub fn resolve<'a>(run_time: Option<&'a str>, configured: Option<&'a str>) -> Option<&'a str> {
    run_time.or(configured)
}

/// Values that replace the task's configuration for a single run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrOverrides {
    pub repo: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub head: Option<String>,
    pub base: Option<String>,
}

impl PrOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_head(mut self, head: impl Into<String>) -> Self {
        self.head = Some(head.into());
        self
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }
}

/// Task that opens a pull request through the GitHub REST API
///
/// ## Example
///
/// ```rust,no_run
/// use ghpr::context::{Secrets, TaskContext};
/// use ghpr::task::{CreatePullRequest, PrOverrides};
/// use ghpr_http::ReqwestTransport;
///
/// # async fn example() -> anyhow::Result<()> {
/// let task = CreatePullRequest::new()
///     .with_title("Bump dependencies")
///     .with_head("deps/bump")
///     .with_base("main")
///     .with_token_secret("GITHUB_ACCESS_TOKEN");
///
/// let mut secrets = Secrets::new();
/// secrets.insert("GITHUB_ACCESS_TOKEN", "ghp_example");
/// let context = TaskContext::with_secrets(secrets);
///
/// let response = task
///     .run(
///         &ReqwestTransport::new(),
///         &context,
///         &PrOverrides::new().with_repo("org/repo"),
///     )
///     .await?;
/// println!("GitHub answered {}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CreatePullRequest {
    repo: Option<String>,
    title: Option<String>,
    body: Option<String>,
    head: Option<String>,
    base: Option<String>,
    token_secret: Option<String>,
    api_base: Option<String>,
    config: TaskConfig,
}

impl CreatePullRequest {
    /// Create a task with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_head(mut self, head: impl Into<String>) -> Self {
        self.head = Some(head.into());
        self
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Name of the secret holding the access token
    pub fn with_token_secret(mut self, token_secret: impl Into<String>) -> Self {
        self.token_secret = Some(token_secret.into());
        self
    }

    /// Point the task at another API root, e.g. a GitHub Enterprise host
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Replace the generic task options wholesale
    pub fn with_task_config(mut self, config: TaskConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.config = self.config.with_name(name);
        self
    }

    pub fn with_checkpoint(mut self, checkpoint: bool) -> Self {
        self.config = self.config.with_checkpoint(checkpoint);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config = self.config.with_tags(tags);
        self
    }

    pub fn repo(&self) -> Option<&str> {
        self.repo.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn head(&self) -> Option<&str> {
        self.head.as_deref()
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn token_secret(&self) -> Option<&str> {
        self.token_secret.as_deref()
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(API_BASE)
    }

    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn checkpoint(&self) -> Option<bool> {
        self.config.checkpoint
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.config.tags
    }

    /// Pull request creation URL for `repo`
    pub fn endpoint(&self, repo: &str) -> String {
        format!("{}/repos/{}/pulls", self.api_base().trim_end_matches('/'), repo)
    }

    /// Send one pull request creation request
    ///
    /// # Arguments
    /// * `transport` - Sends the POST and produces the response
    /// * `context` - Secrets available to this run
    /// * `overrides` - Values used instead of the configured ones for this run only
    ///
    /// # Returns
    /// The transport's response, unchanged
    ///
    /// # Errors
    /// - [`TaskError::MissingField`] when no repository is configured or
    ///   given; nothing is sent in that case
    /// - [`TaskError::SecretNotFound`] when `token_secret` names a secret the
    ///   context does not have
    /// - [`TaskError::Transport`] with the transport's own error
    pub async fn run<T>(
        &self,
        transport: &T,
        context: &TaskContext,
        overrides: &PrOverrides,
    ) -> Result<T::Response, TaskError>
    where
        T: HttpTransport + ?Sized,
    {
        let repo = resolve(overrides.repo.as_deref(), self.repo())
            .ok_or(TaskError::MissingField { field: "repo" })?;

        let headers = self.headers(context)?;

        let payload = CreatePullRequestPayload {
            title: resolve(overrides.title.as_deref(), self.title()),
            body: resolve(overrides.body.as_deref(), self.body()),
            head: resolve(overrides.head.as_deref(), self.head()),
            base: resolve(overrides.base.as_deref(), self.base()),
        };
        let json = serde_json::to_value(&payload)?;
        let url = self.endpoint(repo);

        debug!(
            task = %self.config.name,
            repo,
            fields = ?payload.present_fields(),
            authenticated = headers.contains_key(AUTHORIZATION),
            "Sending pull request creation request"
        );

        let response = transport.post(&url, headers, &json).await?;
        Ok(response)
    }

    fn headers(&self, context: &TaskContext) -> Result<HeaderMap, TaskError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_MEDIA_TYPE));
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));

        if let Some(name) = self.token_secret() {
            let secret = context.secrets.get(name)?;
            let mut value = HeaderValue::from_str(&format!("{} {}", TOKEN_SCHEME, secret))
                .map_err(|source| TaskError::InvalidHeader {
                    name: name.to_string(),
                    source,
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }
}
