use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, info};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::{ReleaseParameters, Tagger};
use crate::error::{ReleaseError, Result};
use crate::github::{ReleaseInfo, ReleaseRepository, RepositorySlug, TagRef, UploadedAsset};

const USER_AGENT: &str = concat!("gh-release/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";
const PER_PAGE: usize = 100;

/// Personal access token used to authorize API calls.
///
/// Read once at startup and handed to [GithubRepository::new]; never stored
/// globally. `Debug` output is redacted.
#[derive(Clone)]
pub struct GitHubToken(String);

impl GitHubToken {
    pub const ENV_VAR: &'static str = "GITHUB_TOKEN";

    pub fn new(token: impl Into<String>) -> Self {
        GitHubToken(token.into())
    }

    /// Read the token from `GITHUB_TOKEN`
    ///
    /// # Returns
    /// * `Ok(GitHubToken)` - If the variable is set and not blank
    /// * `Err(ReleaseError::MissingToken)` - Otherwise
    pub fn from_env() -> Result<Self> {
        match std::env::var(Self::ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => Ok(GitHubToken(value.trim().to_string())),
            _ => Err(ReleaseError::MissingToken),
        }
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for GitHubToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GitHubToken(***)")
    }
}

/// Base URLs of the REST API and of the asset upload host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    pub api_url: String,
    pub uploads_url: String,
}

impl ApiEndpoints {
    pub const DEFAULT_API_URL: &'static str = "https://api.github.com";
    pub const DEFAULT_UPLOADS_URL: &'static str = "https://uploads.github.com";

    pub fn new(api_url: impl Into<String>, uploads_url: impl Into<String>) -> Self {
        ApiEndpoints {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            uploads_url: uploads_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        ApiEndpoints::new(Self::DEFAULT_API_URL, Self::DEFAULT_UPLOADS_URL)
    }
}

#[derive(Debug, Deserialize)]
struct GitHubErrorResponse {
    message: String,
}

#[derive(Debug, Deserialize)]
struct CommitPointer {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
    commit: CommitPointer,
}

#[derive(Debug, Deserialize)]
struct BranchEntry {
    commit: CommitPointer,
}

#[derive(Debug, Deserialize)]
struct Account {
    login: String,
}

#[derive(Debug, Deserialize)]
struct RepositoryEntry {
    owner: Account,
}

#[derive(Debug, Deserialize)]
struct UserEntry {
    login: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateTagRequest<'a> {
    tag: &'a str,
    message: &'a str,
    object: &'a str,
    #[serde(rename = "type")]
    object_type: &'a str,
    tagger: &'a Tagger,
}

#[derive(Debug, Deserialize)]
struct TagObject {
    sha: String,
}

#[derive(Debug, Serialize)]
struct CreateRefRequest<'a> {
    #[serde(rename = "ref")]
    reference: String,
    sha: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateReleaseRequest<'a> {
    tag_name: &'a str,
    name: &'a str,
    body: &'a str,
    draft: bool,
    prerelease: bool,
}

/// [ReleaseRepository] backed by the GitHub REST API
pub struct GithubRepository {
    client: Client,
    endpoints: ApiEndpoints,
    slug: RepositorySlug,
    token: GitHubToken,
}

impl GithubRepository {
    /// Create a handle on `slug`, authenticated with `token`
    pub fn new(slug: RepositorySlug, token: GitHubToken, endpoints: ApiEndpoints) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(GithubRepository {
            client,
            endpoints,
            slug,
            token,
        })
    }

    pub fn slug(&self) -> &RepositorySlug {
        &self.slug
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.endpoints.api_url, self.slug.owner, self.slug.name, path
        )
    }

    /// `repo_url(prefix)` followed by `name`, split on `/` and each part
    /// percent-encoded as its own path segment
    fn named_url(&self, prefix: &str, name: &str) -> Result<String> {
        let mut url = Url::parse(&self.repo_url(prefix)).map_err(|e| {
            ReleaseError::config(format!("Invalid API URL {}: {}", self.endpoints.api_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ReleaseError::config(format!(
                    "API URL {} cannot carry a path",
                    self.endpoints.api_url
                ))
            })?
            .extend(name.split('/'));
        Ok(url.into())
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .bearer_auth(self.token.expose())
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    fn send(&self, builder: RequestBuilder) -> Result<Response> {
        check_status(builder.send()?)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        Ok(self.send(self.request(Method::GET, url))?.json()?)
    }

    fn post_json<B: Serialize, T: DeserializeOwned>(&self, url: &str, body: &B) -> Result<T> {
        Ok(self
            .send(self.request(Method::POST, url).json(body))?
            .json()?)
    }

    fn delete(&self, url: &str) -> Result<()> {
        self.send(self.request(Method::DELETE, url))?;
        Ok(())
    }

    /// Collect every page of a list endpoint
    fn get_paginated<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = self.repo_url(path);
        let mut items = Vec::new();

        for page in 1.. {
            let builder = self
                .request(Method::GET, &url)
                .query(&[("per_page", PER_PAGE), ("page", page)]);
            let batch: Vec<T> = self.send(builder)?.json()?;
            let last = batch.len() < PER_PAGE;
            items.extend(batch);
            if last {
                break;
            }
        }

        Ok(items)
    }
}

/// Turn a non-2xx response into [ReleaseError::Api], keeping GitHub's message
fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().unwrap_or_default();
    let message = match serde_json::from_str::<GitHubErrorResponse>(&text) {
        Ok(body) => body.message,
        Err(_) if text.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
        Err(_) => text,
    };

    Err(ReleaseError::api(status.as_u16(), message))
}

impl ReleaseRepository for GithubRepository {
    fn list_tags(&self) -> Result<Vec<TagRef>> {
        let entries: Vec<TagEntry> = self.get_paginated("/tags")?;
        Ok(entries
            .into_iter()
            .map(|e| TagRef {
                name: e.name,
                sha: e.commit.sha,
            })
            .collect())
    }

    fn list_releases(&self) -> Result<Vec<ReleaseInfo>> {
        self.get_paginated("/releases")
    }

    fn branch_head(&self, branch: &str) -> Result<String> {
        let entry: BranchEntry = self.get_json(&self.named_url("/branches", branch)?)?;
        Ok(entry.commit.sha)
    }

    fn owner_identity(&self) -> Result<Tagger> {
        let repo: RepositoryEntry = self.get_json(&self.repo_url(""))?;
        let user: UserEntry = self.get_json(&format!(
            "{}/users/{}",
            self.endpoints.api_url, repo.owner.login
        ))?;

        let email = user
            .email
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| format!("{}@users.noreply.github.com", user.login));
        let name = user.name.filter(|n| !n.is_empty()).unwrap_or(user.login);

        Ok(Tagger { name, email })
    }

    fn create_tag_and_release(&self, params: &ReleaseParameters) -> Result<ReleaseInfo> {
        let tag_object: TagObject = self.post_json(
            &self.repo_url("/git/tags"),
            &CreateTagRequest {
                tag: &params.tag,
                message: &params.tag_message,
                object: &params.object,
                object_type: &params.object_type,
                tagger: &params.tagger,
            },
        )?;
        debug!("created tag object {} for {}", tag_object.sha, params.tag);

        let _: serde_json::Value = self.post_json(
            &self.repo_url("/git/refs"),
            &CreateRefRequest {
                reference: format!("refs/tags/{}", params.tag),
                sha: &tag_object.sha,
            },
        )?;

        let release: ReleaseInfo = self.post_json(
            &self.repo_url("/releases"),
            &CreateReleaseRequest {
                tag_name: &params.tag,
                name: &params.release_name,
                body: &params.release_message,
                draft: false,
                prerelease: params.prerelease,
            },
        )?;
        info!("created release {} ({})", release.id, release.tag_name);

        Ok(release)
    }

    fn upload_asset(&self, release: &ReleaseInfo, path: &Path) -> Result<UploadedAsset> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ReleaseError::asset(format!("No file name in {}", path.display())))?
            .to_string();
        let bytes = fs::read(path)?;

        let url = format!(
            "{}/repos/{}/{}/releases/{}/assets",
            self.endpoints.uploads_url, self.slug.owner, self.slug.name, release.id
        );
        let builder = self
            .request(Method::POST, &url)
            .query(&[("name", file_name.as_str())])
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(bytes);

        Ok(self.send(builder)?.json()?)
    }

    fn delete_tag_ref(&self, tag: &str) -> Result<()> {
        self.delete(&self.named_url("/git/refs/tags", tag)?)
    }

    fn delete_release(&self, release: &ReleaseInfo) -> Result<()> {
        self.delete(&self.repo_url(&format!("/releases/{}", release.id)))
    }
}
