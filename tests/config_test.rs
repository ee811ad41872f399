// tests/config_test.rs
use std::io::Write;
use std::path::PathBuf;

use gh_release::config::{load_config, Config};
use gh_release::github::RepositorySlug;
use tempfile::NamedTempFile;

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.repository.default_branch, "master");
    assert_eq!(config.repository.api_url, "https://api.github.com");
    assert_eq!(config.repository.uploads_url, "https://uploads.github.com");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[changelog]
path = "HISTORY.md"

[assets]
patterns = ["dist/*.zip"]
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.changelog.path, PathBuf::from("HISTORY.md"));
    assert_eq!(config.assets.patterns, vec!["dist/*.zip".to_string()]);
    assert_eq!(config.assets.base_dir, PathBuf::from("."));
    assert_eq!(config.release.tag_message, "Release version {tag}");
}

#[test]
fn test_load_fixture() {
    let config =
        load_config(Some("tests/fixtures/ghrelease.toml")).expect("Failed to load test config");
    assert_eq!(
        config.repository.slug().unwrap(),
        Some(RepositorySlug::new("acme", "widget"))
    );
    assert_eq!(config.repository.default_branch, "main");
    assert_eq!(config.assets.base_dir, PathBuf::from("target/dist"));
    assert_eq!(config.assets.patterns.len(), 2);
    assert_eq!(config.release.tag_message, "widget {tag}");
}

#[test]
fn test_load_missing_explicit_file() {
    let result = load_config(Some("tests/fixtures/does-not-exist.toml"));
    assert!(result.is_err());
}
