//! Release workflow: create a tag plus release with assets, or remove both.

use log::info;

use crate::assets::AssetSource;
use crate::boundary::BoundaryWarning;
use crate::changelog::ChangelogSource;
use crate::domain::{ReleaseParameters, ReleaseTag, TagMessageTemplate, OBJECT_TYPE_COMMIT};
use crate::error::{CollisionKind, ReleaseError, Result};
use crate::github::{ReleaseInfo, ReleaseRepository, UploadedAsset};
use crate::ui;

/// Knobs of the workflow that come from configuration
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    /// Branch whose tip is tagged when no commit is given
    pub default_branch: String,
    pub tag_message: TagMessageTemplate,
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        ReleaseOptions {
            default_branch: "master".to_string(),
            tag_message: TagMessageTemplate::default(),
        }
    }
}

/// What `create` did
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// Nothing was sent; these parameters would have been used
    DryRun(ReleaseParameters),
    Published {
        release: ReleaseInfo,
        assets: Vec<UploadedAsset>,
    },
}

/// Result of one delete step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Deleted,
    Absent,
}

/// What `delete` did. The two steps are independent of each other.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteOutcome {
    pub tag: Removal,
    pub release: Removal,
    /// Absence reports printed along the way, in order
    pub notices: Vec<BoundaryWarning>,
}

/// Drives create/delete for one tag against one repository handle
pub struct ReleaseHandler<'a, R: ReleaseRepository> {
    tag: ReleaseTag,
    repo: &'a R,
    changelog: &'a dyn ChangelogSource,
    assets: &'a dyn AssetSource,
    options: ReleaseOptions,
}

impl<'a, R: ReleaseRepository> ReleaseHandler<'a, R> {
    pub fn new(
        tag: impl Into<String>,
        repo: &'a R,
        changelog: &'a dyn ChangelogSource,
        assets: &'a dyn AssetSource,
    ) -> Self {
        ReleaseHandler {
            tag: ReleaseTag::new(tag),
            repo,
            changelog,
            assets,
            options: ReleaseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ReleaseOptions) -> Self {
        self.options = options;
        self
    }

    /// Assemble the parameters bundle for this tag
    ///
    /// `commit` defaults to the tip of the configured default branch.
    pub fn parameters(&self, commit: Option<&str>) -> Result<ReleaseParameters> {
        let object = match commit {
            Some(sha) => sha.to_string(),
            None => self.repo.branch_head(&self.options.default_branch)?,
        };

        Ok(ReleaseParameters {
            object,
            release_name: self.tag.name.clone(),
            release_message: self.changelog.get(&self.tag.name)?,
            tag: self.tag.name.clone(),
            tag_message: self.options.tag_message.render(&self.tag),
            tagger: self.repo.owner_identity()?,
            object_type: OBJECT_TYPE_COMMIT.to_string(),
            prerelease: self.tag.is_prerelease(),
        })
    }

    /// Fail if a tag or a release with this name already exists.
    ///
    /// Checked, not enforced: another client may still create either one
    /// before `create` gets to it.
    fn check_collision(&self) -> Result<()> {
        if self.repo.find_tag(&self.tag.name)?.is_some() {
            return Err(ReleaseError::collision(&self.tag.name, CollisionKind::Tag));
        }
        if self.repo.find_release(&self.tag.name)?.is_some() {
            return Err(ReleaseError::collision(
                &self.tag.name,
                CollisionKind::Release,
            ));
        }
        Ok(())
    }

    /// Create the tag and release, then upload every asset
    ///
    /// # Arguments
    /// * `commit` - Commit to tag; the default branch tip when `None`
    /// * `dry_run` - Only show the parameters, make no mutating call
    ///
    /// # Returns
    /// * `Ok(CreateOutcome)` - The preview or the published release
    /// * `Err(ReleaseError::Collision)` - If the tag or release already exists
    /// * `Err` - Any remote failure; uploads done before it are kept
    pub fn create(&self, commit: Option<&str>, dry_run: bool) -> Result<CreateOutcome> {
        let assets = self.assets.get_assets()?;
        let params = self.parameters(commit)?;
        self.check_collision()?;

        if dry_run {
            ui::display_release_parameters(&params);
            return Ok(CreateOutcome::DryRun(params));
        }

        if assets.is_empty() {
            ui::display_boundary_warning(&BoundaryWarning::NoAssets {
                tag: self.tag.name.clone(),
            });
        }

        ui::display_status(&format!(
            "Creating tag and release '{}' at {}",
            params.tag, params.object
        ));
        let release = self.repo.create_tag_and_release(&params)?;
        ui::display_success(&format!("Created release: {}", release.html_url));

        let mut uploaded = Vec::with_capacity(assets.len());
        for path in &assets {
            info!("uploading {}", path.display());
            match self.repo.upload_asset(&release, path) {
                Ok(asset) => {
                    ui::display_uploaded_asset(&asset);
                    uploaded.push(asset);
                }
                Err(e) => {
                    ui::display_boundary_warning(&BoundaryWarning::PartialAssets {
                        tag: self.tag.name.clone(),
                        uploaded: uploaded.len(),
                        expected: assets.len(),
                    });
                    return Err(e);
                }
            }
        }

        Ok(CreateOutcome::Published {
            release,
            assets: uploaded,
        })
    }

    /// Remove the tag reference, then the release, each only if present
    ///
    /// Absence is not an error: it is reported on stdout and recorded in
    /// `DeleteOutcome::notices`.
    pub fn delete(&self) -> Result<DeleteOutcome> {
        let mut notices = Vec::new();

        let tag = match self.repo.find_tag(&self.tag.name)? {
            Some(found) => {
                self.repo.delete_tag_ref(&found.name)?;
                ui::display_success(&format!("Deleted tag '{}'", found.name));
                Removal::Deleted
            }
            None => {
                let notice = BoundaryWarning::TagNotFound {
                    tag: self.tag.name.clone(),
                };
                ui::display_status(&notice.to_string());
                notices.push(notice);
                Removal::Absent
            }
        };

        let release = match self.repo.find_release(&self.tag.name)? {
            Some(found) => {
                self.repo.delete_release(&found)?;
                ui::display_success(&format!("Deleted release for '{}'", found.tag_name));
                Removal::Deleted
            }
            None => {
                let notice = BoundaryWarning::ReleaseNotFound {
                    tag: self.tag.name.clone(),
                };
                ui::display_status(&notice.to_string());
                notices.push(notice);
                Removal::Absent
            }
        };

        Ok(DeleteOutcome {
            tag,
            release,
            notices,
        })
    }
}
