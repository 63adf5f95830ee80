//! Repository identifier helpers

use anyhow::{Result, anyhow};

/// Parse a GitHub URL into owner and repository name
///
/// Supports various GitHub URL formats:
/// - SSH: `git@github.com:owner/repo.git`
/// - HTTPS: `https://github.com/owner/repo.git`
/// - Legacy: `github.com/owner/repo`
///
/// # Errors
/// Returns an error if the URL format is not recognized
pub fn parse_github_url(url: &str) -> Result<(String, String)> {
    let url = url.trim_end_matches('/').trim_end_matches(".git");

    // git@github.com:owner/repo or git@github-enterprise:owner/repo
    if url.starts_with("git@")
        && let Some(colon_pos) = url.find(':')
    {
        let after_colon = &url[colon_pos + 1..];
        let parts: Vec<&str> = after_colon.split('/').collect();
        if parts.len() == 2 && parts.iter().all(|p| !p.is_empty()) {
            return Ok((parts[0].to_string(), parts[1].to_string()));
        }
    }

    if url.starts_with("https://") || url.starts_with("http://") {
        let without_protocol = url
            .trim_start_matches("https://")
            .trim_start_matches("http://");

        let parts: Vec<&str> = without_protocol.split('/').collect();
        if parts.len() >= 3 && !parts[1].is_empty() && !parts[2].is_empty() {
            return Ok((parts[1].to_string(), parts[2].to_string()));
        }
    }

    // github.com/owner/repo[/...]; owner and repo follow the host segment
    let parts: Vec<&str> = url.split('/').collect();
    if let Some(host) = parts.iter().position(|p| p.ends_with("github.com"))
        && let (Some(owner), Some(repo)) = (parts.get(host + 1), parts.get(host + 2))
        && !owner.is_empty()
        && !repo.is_empty()
    {
        return Ok((owner.to_string(), repo.to_string()));
    }

    Err(anyhow!("Invalid GitHub URL format: {}", url))
}

/// Normalize a repository reference to the `owner/name` slug
///
/// Accepts either a bare slug or anything [`parse_github_url`] understands.
///
/// # Errors
/// Returns an error if the input is neither a slug nor a GitHub URL
pub fn repo_slug(input: &str) -> Result<String> {
    let trimmed = input.trim();
    let is_url = trimmed.contains("://")
        || trimmed.starts_with("git@")
        || trimmed.contains("github.com");

    if !is_url {
        let parts: Vec<&str> = trimmed.split('/').collect();
        if parts.len() == 2 && parts.iter().all(|p| !p.is_empty()) {
            return Ok(trimmed.to_string());
        }
        return Err(anyhow!("Invalid repository '{}': expected owner/name", input));
    }

    let (owner, name) = parse_github_url(trimmed)?;
    Ok(format!("{}/{}", owner, name))
}
