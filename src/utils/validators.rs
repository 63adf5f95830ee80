//! Command argument validation utilities
//!
//! This module provides validation for CLI arguments after clap parsing.
//! It covers rules that go beyond basic argument parsing.

use anyhow::{Result, anyhow};

/// Validation errors for command arguments
#[derive(Debug, PartialEq)]
pub enum CommandValidationError {
    /// Invalid argument value
    InvalidValue {
        argument: String,
        value: String,
        reason: String,
    },
}

impl std::fmt::Display for CommandValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandValidationError::InvalidValue {
                argument,
                value,
                reason,
            } => {
                write!(f, "Invalid value '{}' for {}: {}", value, argument, reason)
            }
        }
    }
}

impl std::error::Error for CommandValidationError {}

fn invalid(argument: &str, value: &str, reason: &str) -> anyhow::Error {
    anyhow!(CommandValidationError::InvalidValue {
        argument: argument.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    })
}

/// Validate and normalize a repository argument
///
/// Accepts `owner/name` or a GitHub URL and returns the `owner/name` slug.
pub fn validate_repo(repo: &Option<String>) -> Result<Option<String>> {
    match repo {
        None => Ok(None),
        Some(value) => ghpr_http::repo_slug(value)
            .map(Some)
            .map_err(|e| invalid("repo", value, &e.to_string())),
    }
}

/// Validate branch name
///
/// Ensures branch names follow basic Git naming conventions
pub fn validate_branch_name(argument: &str, branch: &Option<String>) -> Result<()> {
    if let Some(name) = branch {
        if name.trim().is_empty() {
            return Err(invalid(
                argument,
                name,
                "branch name cannot be empty or whitespace only",
            ));
        }

        if name.starts_with('-')
            || name.ends_with('.')
            || name.ends_with('/')
            || name.contains("..")
            || name.contains(char::is_whitespace)
        {
            return Err(invalid(argument, name, "invalid Git branch name format"));
        }
    }
    Ok(())
}

/// Validate secret name
///
/// Secret names are looked up verbatim, so stray whitespace would never match
pub fn validate_secret_name(secret: &Option<String>) -> Result<()> {
    if let Some(name) = secret
        && (name.is_empty() || name.contains(char::is_whitespace))
    {
        return Err(invalid(
            "token-secret",
            name,
            "secret name cannot be empty or contain whitespace",
        ));
    }
    Ok(())
}

/// Validate API base URL
pub fn validate_api_base(api_base: &Option<String>) -> Result<()> {
    if let Some(url) = api_base
        && !(url.starts_with("https://") || url.starts_with("http://"))
    {
        return Err(invalid(
            "api-base",
            url,
            "API base must start with http:// or https://",
        ));
    }
    Ok(())
}

/// Validate pull request title
///
/// Ensures titles are not blank when provided
pub fn validate_title(title: &Option<String>) -> Result<()> {
    if let Some(text) = title
        && text.trim().is_empty()
    {
        return Err(invalid(
            "title",
            text,
            "title cannot be empty or whitespace only",
        ));
    }
    Ok(())
}
