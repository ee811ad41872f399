//! Changelog lookup: the release body for a tag comes from its changelog section.

use std::fs;
use std::path::PathBuf;

use regex::Regex;

use crate::domain::ReleaseTag;
use crate::error::{ReleaseError, Result};

/// Source of release notes for a tag
pub trait ChangelogSource {
    /// Release body for `tag`
    ///
    /// # Returns
    /// * `Ok(String)` - The notes for the tag
    /// * `Err` - If the changelog cannot be read or has no entry for the tag
    fn get(&self, tag: &str) -> Result<String>;
}

/// Reads release notes from a Markdown changelog.
///
/// A section starts with a level-2 heading whose first word names the
/// version, optionally in brackets, and runs until the next level-2 heading:
///
/// ```text
/// ## [1.2.0] - 2024-05-01
/// ### Added
/// - something
/// ```
///
/// Both "1.2.0" and "v1.2.0" headings match the tag "v1.2.0".
#[derive(Debug, Clone)]
pub struct ChangelogLoader {
    path: PathBuf,
}

impl ChangelogLoader {
    pub const DEFAULT_PATH: &'static str = "CHANGELOG.md";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        ChangelogLoader { path: path.into() }
    }
}

impl ChangelogSource for ChangelogLoader {
    fn get(&self, tag: &str) -> Result<String> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            ReleaseError::changelog(format!("Cannot read {}: {}", self.path.display(), e))
        })?;

        find_section(&content, tag).ok_or_else(|| {
            ReleaseError::changelog(format!(
                "No entry for '{}' in {}",
                tag,
                self.path.display()
            ))
        })
    }
}

/// Extract the body of the section for `tag` from changelog text
pub fn find_section(content: &str, tag: &str) -> Option<String> {
    let heading = Regex::new(r"^##\s+\[?([^\]\s]+)\]?").ok()?;
    let wanted = ReleaseTag::new(tag);

    let mut body: Option<Vec<&str>> = None;
    for line in content.lines() {
        let is_section_heading = line.starts_with("## ");
        if let Some(lines) = body.as_mut() {
            if is_section_heading {
                break;
            }
            lines.push(line);
        } else if is_section_heading {
            let matches = heading
                .captures(line)
                .map(|c| ReleaseTag::new(&c[1]).version_part() == wanted.version_part())
                .unwrap_or(false);
            if matches {
                body = Some(Vec::new());
            }
        }
    }

    body.map(|lines| lines.join("\n").trim().to_string())
}
