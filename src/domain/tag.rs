use semver::Version;

/// A tag name that a release is (or will be) attached to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag {
    pub name: String,
}

impl ReleaseTag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        ReleaseTag { name: name.into() }
    }

    /// Tag name without a leading 'v' or 'V' (e.g., "v1.2.3" -> "1.2.3")
    pub fn version_part(&self) -> &str {
        self.name
            .strip_prefix('v')
            .or_else(|| self.name.strip_prefix('V'))
            .unwrap_or(&self.name)
    }

    /// Parse the tag as a semantic version, if it is one
    pub fn semver(&self) -> Option<Version> {
        Version::parse(self.version_part()).ok()
    }

    /// Whether the tag names a pre-release (e.g., "v2.0.0-rc.1").
    ///
    /// Tags that are not semantic versions are never pre-releases.
    pub fn is_prerelease(&self) -> bool {
        self.semver().map(|v| !v.pre.is_empty()).unwrap_or(false)
    }
}

impl std::fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Annotated tag message template (e.g., "Release version {tag}")
#[derive(Debug, Clone)]
pub struct TagMessageTemplate {
    pub template: String,
}

impl TagMessageTemplate {
    pub const DEFAULT: &'static str = "Release version {tag}";

    pub fn new(template: impl Into<String>) -> Self {
        TagMessageTemplate {
            template: template.into(),
        }
    }

    /// Render the message for a tag
    /// Example: template="Release version {tag}", tag="v1.2.3" -> "Release version v1.2.3"
    pub fn render(&self, tag: &ReleaseTag) -> String {
        self.template.replace("{tag}", &tag.name)
    }
}

impl Default for TagMessageTemplate {
    fn default() -> Self {
        TagMessageTemplate::new(Self::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_version_part() {
        assert_eq!(ReleaseTag::new("v1.2.3").version_part(), "1.2.3");
        assert_eq!(ReleaseTag::new("V1.2.3").version_part(), "1.2.3");
        assert_eq!(ReleaseTag::new("1.2.3").version_part(), "1.2.3");
        assert_eq!(ReleaseTag::new("nightly").version_part(), "nightly");
    }

    #[test]
    fn test_tag_semver() {
        let version = ReleaseTag::new("v1.2.3").semver().unwrap();
        assert_eq!((version.major, version.minor, version.patch), (1, 2, 3));
        assert!(ReleaseTag::new("release-1").semver().is_none());
    }

    #[test]
    fn test_prerelease_detection() {
        assert!(ReleaseTag::new("v2.0.0-rc.1").is_prerelease());
        assert!(ReleaseTag::new("1.0.0-alpha").is_prerelease());
        assert!(!ReleaseTag::new("v2.0.0").is_prerelease());
        assert!(!ReleaseTag::new("nightly-2024").is_prerelease());
    }

    #[test]
    fn test_template_render() {
        let template = TagMessageTemplate::default();
        assert_eq!(template.render(&ReleaseTag::new("v1.2.3")), "Release version v1.2.3");
    }

    #[test]
    fn test_template_without_placeholder() {
        let template = TagMessageTemplate::new("Automated release");
        assert_eq!(
            template.render(&ReleaseTag::new("v1.2.3")),
            "Automated release"
        );
    }
}
