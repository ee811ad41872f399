use std::fmt;

/// Non-fatal conditions met while creating or deleting a release.
/// These are reported to the user and the workflow carries on.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Delete found no tag with this name
    TagNotFound { tag: String },
    /// Delete found no release referencing this tag
    ReleaseNotFound { tag: String },
    /// The collector returned no files; the release is created without assets
    NoAssets { tag: String },
    /// An upload failed after the release was created; nothing is rolled back
    PartialAssets {
        tag: String,
        uploaded: usize,
        expected: usize,
    },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::TagNotFound { tag } => {
                write!(f, "Tag '{}' does not exist, skipping tag deletion", tag)
            }
            BoundaryWarning::ReleaseNotFound { tag } => {
                write!(
                    f,
                    "Release for tag '{}' does not exist, skipping release deletion",
                    tag
                )
            }
            BoundaryWarning::NoAssets { tag } => {
                write!(f, "No assets found for '{}'", tag)
            }
            BoundaryWarning::PartialAssets {
                tag,
                uploaded,
                expected,
            } => {
                write!(
                    f,
                    "Release '{}' was created but only {} of {} assets were uploaded",
                    tag, uploaded, expected
                )
            }
        }
    }
}
