use serde::Serialize;

/// Git object type of the tagged target; releases always tag commits
pub const OBJECT_TYPE_COMMIT: &str = "commit";

/// Identity recorded as the tagger of the annotated tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tagger {
    pub name: String,
    pub email: String,
}

impl Tagger {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Tagger {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Everything needed to create one tag plus its release.
///
/// Built fresh for every `create` invocation and never persisted. In dry-run
/// mode this bundle is what gets shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseParameters {
    /// Target commit SHA
    pub object: String,
    pub release_name: String,
    /// Release body, taken from the changelog
    pub release_message: String,
    pub tag: String,
    pub tag_message: String,
    pub tagger: Tagger,
    /// Sent as `type` in the create-tag request
    pub object_type: String,
    pub prerelease: bool,
}
