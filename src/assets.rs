//! Build artifact discovery for release uploads.

use std::path::PathBuf;

use log::debug;

use crate::error::{ReleaseError, Result};

/// Enumerates files to attach to a release
pub trait AssetSource {
    /// Paths of the files to upload; an empty list is valid
    fn get_assets(&self) -> Result<Vec<PathBuf>>;
}

/// Collects assets by expanding glob patterns under a base directory.
///
/// `{tag}` inside a pattern is replaced with the release tag, so
/// `dist/app-{tag}-*.tar.gz` picks up only this release's archives.
#[derive(Debug, Clone)]
pub struct AssetCollector {
    base_dir: PathBuf,
    patterns: Vec<String>,
    tag: String,
}

impl AssetCollector {
    pub fn new(base_dir: impl Into<PathBuf>, patterns: Vec<String>, tag: impl Into<String>) -> Self {
        AssetCollector {
            base_dir: base_dir.into(),
            patterns,
            tag: tag.into(),
        }
    }
}

impl AssetSource for AssetCollector {
    fn get_assets(&self) -> Result<Vec<PathBuf>> {
        let mut assets = Vec::new();

        for pattern in &self.patterns {
            let expanded = pattern.replace("{tag}", &self.tag);
            let full = self.base_dir.join(&expanded);
            let full = full.to_string_lossy();

            let paths = glob::glob(&full)
                .map_err(|e| ReleaseError::asset(format!("Invalid pattern '{}': {}", pattern, e)))?;

            for entry in paths {
                let path = entry.map_err(|e| ReleaseError::asset(e.to_string()))?;
                if path.is_file() {
                    assets.push(path);
                }
            }
        }

        assets.sort();
        assets.dedup();
        debug!("collected {} asset(s)", assets.len());

        Ok(assets)
    }
}
