//! GitHub repository abstraction layer
//!
//! This module provides a trait-based abstraction over the remote repository
//! operations a release needs, allowing the real REST client and an in-memory
//! mock to be used interchangeably.
//!
//! # Overview
//!
//! The primary abstraction is the [ReleaseRepository] trait. The concrete
//! implementations include:
//!
//! - [client::GithubRepository]: talks to the GitHub REST API over `reqwest`
//! - [mock::MockRepository]: keeps tags and releases in memory for testing
//!
//! # Usage
//!
//! Workflow code should depend on the [ReleaseRepository] trait rather than
//! a concrete implementation.
//!
//! ```rust
//! # use gh_release::github::ReleaseRepository;
//! # fn example<R: ReleaseRepository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! match repo.find_release("v1.0.0")? {
//!     Some(release) => println!("release {} exists", release.id),
//!     None => println!("no release for v1.0.0"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod mock;

pub use client::{ApiEndpoints, GitHubToken, GithubRepository};
pub use mock::{MockCall, MockRepository};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::domain::{ReleaseParameters, Tagger};
use crate::error::{ReleaseError, Result};

/// Owner and name of a hosted repository (e.g., "rust-lang/cargo")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySlug {
    pub owner: String,
    pub name: String,
}

impl RepositorySlug {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        RepositorySlug {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl FromStr for RepositorySlug {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(RepositorySlug::new(owner, name.trim_end_matches(".git")))
            }
            _ => Err(ReleaseError::config(format!(
                "Invalid repository '{}': expected OWNER/NAME",
                s
            ))),
        }
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A tag as listed by the remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    /// SHA of the commit the tag points to
    pub sha: String,
}

/// A release object on the remote
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseInfo {
    pub id: u64,
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub upload_url: String,
    #[serde(default)]
    pub prerelease: bool,
}

/// An asset after it has been attached to a release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// Remote repository operations used by the release workflow
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync`.
///
/// ## Error Handling
///
/// Methods return [crate::error::Result<T>]. Transport and API failures are
/// surfaced as-is; nothing here retries.
///
/// ## Implementations
///
/// - [GithubRepository](client::GithubRepository): GitHub REST API
/// - [MockRepository](mock::MockRepository): in-memory test double
pub trait ReleaseRepository: Send + Sync {
    /// All tags of the repository
    fn list_tags(&self) -> Result<Vec<TagRef>>;

    /// All releases of the repository, drafts included
    fn list_releases(&self) -> Result<Vec<ReleaseInfo>>;

    /// SHA of the commit at the tip of `branch`
    fn branch_head(&self, branch: &str) -> Result<String>;

    /// Identity of the repository owner, used as the tagger
    fn owner_identity(&self) -> Result<Tagger>;

    /// Create an annotated tag object, its `refs/tags/` reference and the
    /// release in one logical step
    ///
    /// # Returns
    /// * `Ok(ReleaseInfo)` - The created release
    /// * `Err` - If any of the remote calls fails; earlier calls are not undone
    fn create_tag_and_release(&self, params: &ReleaseParameters) -> Result<ReleaseInfo>;

    /// Upload one local file and attach it to `release`
    fn upload_asset(&self, release: &ReleaseInfo, path: &Path) -> Result<UploadedAsset>;

    /// Delete the `refs/tags/<tag>` reference
    fn delete_tag_ref(&self, tag: &str) -> Result<()>;

    /// Delete a release object; its tag is left alone
    fn delete_release(&self, release: &ReleaseInfo) -> Result<()>;

    /// Find a tag by name
    ///
    /// # Returns
    /// * `Ok(Some(TagRef))` - If a tag with that exact name exists
    /// * `Ok(None)` - If it doesn't
    fn find_tag(&self, name: &str) -> Result<Option<TagRef>> {
        Ok(self.list_tags()?.into_iter().find(|t| t.name == name))
    }

    /// Find the release whose tag reference equals `tag`
    fn find_release(&self, tag: &str) -> Result<Option<ReleaseInfo>> {
        Ok(self.list_releases()?.into_iter().find(|r| r.tag_name == tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_from_str() {
        let slug: RepositorySlug = "octocat/hello-world".parse().unwrap();
        assert_eq!(slug, RepositorySlug::new("octocat", "hello-world"));
        assert_eq!(slug.to_string(), "octocat/hello-world");
    }

    #[test]
    fn test_slug_strips_git_suffix() {
        let slug: RepositorySlug = "octocat/hello-world.git".parse().unwrap();
        assert_eq!(slug.name, "hello-world");
    }

    #[test]
    fn test_slug_rejects_malformed() {
        for input in ["", "octocat", "/repo", "owner/", "a/b/c"] {
            assert!(
                input.parse::<RepositorySlug>().is_err(),
                "'{}' should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_find_defaults_use_exact_match() {
        let mut repo = MockRepository::new();
        repo.add_tag("v1.0.0", "aaa");
        repo.add_tag("v1.0.0-rc.1", "bbb");
        repo.add_release("v1.0.0-rc.1");

        assert_eq!(repo.find_tag("v1.0.0").unwrap().unwrap().sha, "aaa");
        assert!(repo.find_tag("v1.0").unwrap().is_none());
        assert!(repo.find_release("v1.0.0").unwrap().is_none());
        assert!(repo.find_release("v1.0.0-rc.1").unwrap().is_some());
    }
}
