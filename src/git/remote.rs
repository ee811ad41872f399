use std::path::Path;

use git2::Repository as Git2Repo;
use regex::Regex;

use crate::error::{ReleaseError, Result};
use crate::github::RepositorySlug;

/// Find the GitHub repository behind a remote of the local checkout
///
/// Discovers the git repository containing `path` and parses the URL of
/// `remote_name` (usually "origin").
///
/// # Returns
/// * `Ok(RepositorySlug)` - Owner and name parsed from the remote URL
/// * `Err` - If there is no repository, no such remote, or the URL is not a GitHub URL
pub fn detect_slug<P: AsRef<Path>>(path: P, remote_name: &str) -> Result<RepositorySlug> {
    let repo = Git2Repo::discover(path)?;
    let remote = repo.find_remote(remote_name).map_err(|e| {
        ReleaseError::repository(format!("Cannot find remote '{}': {}", remote_name, e))
    })?;

    let url = remote.url().ok_or_else(|| {
        ReleaseError::repository(format!("Remote '{}' has no usable URL", remote_name))
    })?;

    parse_remote_url(url)
}

/// Parse owner and name out of a GitHub remote URL
///
/// Accepts the HTTPS, scp-like SSH and `ssh://` forms, with or without a
/// trailing `.git`.
pub fn parse_remote_url(url: &str) -> Result<RepositorySlug> {
    let re = Regex::new(
        r"^(?:https?://(?:[^@/]+@)?|ssh://(?:[^@/]+@)?|[^@/]+@)github\.com[:/]([^/]+)/([^/]+?)(?:\.git)?/?$",
    )
    .map_err(|e| ReleaseError::repository(e.to_string()))?;

    let caps = re.captures(url.trim()).ok_or_else(|| {
        ReleaseError::repository(format!("Not a GitHub remote URL: {}", url))
    })?;

    Ok(RepositorySlug::new(&caps[1], &caps[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_https() {
        let slug = parse_remote_url("https://github.com/octocat/hello-world.git").unwrap();
        assert_eq!(slug, RepositorySlug::new("octocat", "hello-world"));

        let slug = parse_remote_url("https://github.com/octocat/hello-world").unwrap();
        assert_eq!(slug.name, "hello-world");
    }

    #[test]
    fn test_parse_https_with_credentials() {
        let slug = parse_remote_url("https://x-access-token@github.com/octocat/hello.git").unwrap();
        assert_eq!(slug, RepositorySlug::new("octocat", "hello"));
    }

    #[test]
    fn test_parse_scp_like() {
        let slug = parse_remote_url("git@github.com:octocat/hello-world.git").unwrap();
        assert_eq!(slug, RepositorySlug::new("octocat", "hello-world"));
    }

    #[test]
    fn test_parse_ssh_scheme() {
        let slug = parse_remote_url("ssh://git@github.com/octocat/hello-world.git").unwrap();
        assert_eq!(slug, RepositorySlug::new("octocat", "hello-world"));
    }

    #[test]
    fn test_parse_rejects_other_hosts() {
        assert!(parse_remote_url("https://gitlab.com/octocat/hello.git").is_err());
        assert!(parse_remote_url("/srv/git/hello.git").is_err());
    }

    #[test]
    fn test_detect_slug_from_origin() {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        repo.remote("origin", "git@github.com:acme/widget.git")
            .unwrap();

        let slug = detect_slug(dir.path(), "origin").unwrap();
        assert_eq!(slug, RepositorySlug::new("acme", "widget"));
        assert!(detect_slug(dir.path(), "upstream").is_err());
    }
}
