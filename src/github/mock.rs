use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::domain::{ReleaseParameters, Tagger};
use crate::error::{ReleaseError, Result};
use crate::github::{ReleaseInfo, ReleaseRepository, TagRef, UploadedAsset};

/// A mutating call received by [MockRepository], in arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    CreateTagAndRelease { tag: String, object: String },
    UploadAsset { release_id: u64, file_name: String },
    DeleteTagRef(String),
    DeleteRelease(u64),
}

struct MockState {
    tags: Vec<TagRef>,
    releases: Vec<ReleaseInfo>,
    assets: HashMap<u64, Vec<UploadedAsset>>,
    branch_heads: HashMap<String, String>,
    owner: Tagger,
    failing_uploads: HashSet<String>,
    calls: Vec<MockCall>,
    next_release_id: u64,
}

/// Mock repository for testing without touching the GitHub API
///
/// Tags and releases live in memory and are really created and removed by
/// the trait methods, so a create followed by a delete can be observed.
/// Every mutating call is recorded.
pub struct MockRepository {
    state: Mutex<MockState>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            state: Mutex::new(MockState {
                tags: Vec::new(),
                releases: Vec::new(),
                assets: HashMap::new(),
                branch_heads: HashMap::new(),
                owner: Tagger::new("Mock Owner", "owner@example.com"),
                failing_uploads: HashSet::new(),
                calls: Vec::new(),
                next_release_id: 1,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Add a tag pointing to a commit
    pub fn add_tag(&mut self, name: impl Into<String>, sha: impl Into<String>) {
        self.state().tags.push(TagRef {
            name: name.into(),
            sha: sha.into(),
        });
    }

    /// Add a release for a tag, returning its id
    pub fn add_release(&mut self, tag: impl Into<String>) -> u64 {
        let tag = tag.into();
        let mut state = self.state();
        let id = state.next_release_id;
        state.next_release_id += 1;
        state.releases.push(mock_release(id, &tag, None));
        id
    }

    /// Set a branch head
    pub fn set_branch_head(&mut self, branch: impl Into<String>, sha: impl Into<String>) {
        self.state().branch_heads.insert(branch.into(), sha.into());
    }

    /// Set the identity returned by `owner_identity`
    pub fn set_owner(&mut self, owner: Tagger) {
        self.state().owner = owner;
    }

    /// Make uploads of files with this name fail
    pub fn fail_upload_of(&mut self, file_name: impl Into<String>) {
        self.state().failing_uploads.insert(file_name.into());
    }

    /// Mutating calls received so far
    pub fn calls(&self) -> Vec<MockCall> {
        self.state().calls.clone()
    }

    pub fn mutation_count(&self) -> usize {
        self.state().calls.len()
    }

    /// Current tag names, in creation order
    pub fn tag_names(&self) -> Vec<String> {
        self.state().tags.iter().map(|t| t.name.clone()).collect()
    }

    /// Tag references of the current releases, in creation order
    pub fn release_tags(&self) -> Vec<String> {
        self.state()
            .releases
            .iter()
            .map(|r| r.tag_name.clone())
            .collect()
    }

    /// Assets attached to a release
    pub fn assets_of(&self, release_id: u64) -> Vec<UploadedAsset> {
        self.state()
            .assets
            .get(&release_id)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn mock_release(id: u64, tag: &str, params: Option<&ReleaseParameters>) -> ReleaseInfo {
    ReleaseInfo {
        id,
        tag_name: tag.to_string(),
        name: Some(params.map_or(tag, |p| p.release_name.as_str()).to_string()),
        body: params.map(|p| p.release_message.clone()),
        html_url: format!("https://github.invalid/mock/releases/tag/{}", tag),
        upload_url: format!("https://uploads.github.invalid/mock/releases/{}/assets", id),
        prerelease: params.map(|p| p.prerelease).unwrap_or(false),
    }
}

impl ReleaseRepository for MockRepository {
    fn list_tags(&self) -> Result<Vec<TagRef>> {
        Ok(self.state().tags.clone())
    }

    fn list_releases(&self) -> Result<Vec<ReleaseInfo>> {
        Ok(self.state().releases.clone())
    }

    fn branch_head(&self, branch: &str) -> Result<String> {
        self.state()
            .branch_heads
            .get(branch)
            .cloned()
            .ok_or_else(|| ReleaseError::api(404, format!("Branch not found: {}", branch)))
    }

    fn owner_identity(&self) -> Result<Tagger> {
        Ok(self.state().owner.clone())
    }

    fn create_tag_and_release(&self, params: &ReleaseParameters) -> Result<ReleaseInfo> {
        let mut state = self.state();
        state.calls.push(MockCall::CreateTagAndRelease {
            tag: params.tag.clone(),
            object: params.object.clone(),
        });

        if state.tags.iter().any(|t| t.name == params.tag) {
            return Err(ReleaseError::api(422, "Reference already exists"));
        }

        state.tags.push(TagRef {
            name: params.tag.clone(),
            sha: params.object.clone(),
        });

        let id = state.next_release_id;
        state.next_release_id += 1;
        let release = mock_release(id, &params.tag, Some(params));
        state.releases.push(release.clone());

        Ok(release)
    }

    fn upload_asset(&self, release: &ReleaseInfo, path: &Path) -> Result<UploadedAsset> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ReleaseError::asset(format!("No file name in {}", path.display())))?;

        let mut state = self.state();
        state.calls.push(MockCall::UploadAsset {
            release_id: release.id,
            file_name: file_name.clone(),
        });

        if state.failing_uploads.contains(&file_name) {
            return Err(ReleaseError::api(502, format!("Upload of {} failed", file_name)));
        }

        let asset = UploadedAsset {
            browser_download_url: format!(
                "https://github.invalid/mock/releases/download/{}/{}",
                release.tag_name, file_name
            ),
            name: file_name,
        };
        state
            .assets
            .entry(release.id)
            .or_default()
            .push(asset.clone());

        Ok(asset)
    }

    fn delete_tag_ref(&self, tag: &str) -> Result<()> {
        let mut state = self.state();
        state.calls.push(MockCall::DeleteTagRef(tag.to_string()));

        let before = state.tags.len();
        state.tags.retain(|t| t.name != tag);
        if state.tags.len() == before {
            return Err(ReleaseError::api(422, "Reference does not exist"));
        }
        Ok(())
    }

    fn delete_release(&self, release: &ReleaseInfo) -> Result<()> {
        let mut state = self.state();
        state.calls.push(MockCall::DeleteRelease(release.id));

        let before = state.releases.len();
        state.releases.retain(|r| r.id != release.id);
        if state.releases.len() == before {
            return Err(ReleaseError::api(404, "Not Found"));
        }
        state.assets.remove(&release.id);
        Ok(())
    }
}
