use std::fs;

use gh_release::cli::orchestration::{
    execute, release_options, resolve_slug, ReleaseCommand, WorkflowResult,
};
use gh_release::config::Config;
use gh_release::github::{MockCall, MockRepository, RepositorySlug};
use gh_release::release::{CreateOutcome, Removal};
use tempfile::TempDir;

const CHANGELOG: &str = "# Changelog

## [1.3.0] - 2024-06-01
### Added
- release automation

## [1.2.0] - 2024-05-01
- older work
";

/// A project directory with a changelog and two build artifacts
fn project() -> (TempDir, Config) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("CHANGELOG.md"), CHANGELOG).unwrap();
    fs::create_dir(dir.path().join("dist")).unwrap();
    fs::write(dir.path().join("dist/tool-v1.3.0.tar.gz"), b"tarball").unwrap();
    fs::write(dir.path().join("dist/tool-v1.3.0.zip"), b"zip").unwrap();
    fs::write(dir.path().join("dist/tool-v1.2.0.zip"), b"old").unwrap();

    let mut config = Config::default();
    config.changelog.path = dir.path().join("CHANGELOG.md");
    config.assets.base_dir = dir.path().to_path_buf();
    config.assets.patterns = vec!["dist/tool-{tag}.*".to_string()];
    (dir, config)
}

fn mock_repo() -> MockRepository {
    let mut repo = MockRepository::new();
    repo.set_branch_head("master", "9999999");
    repo
}

#[test]
fn test_release_command_tag() {
    let create = ReleaseCommand::Create {
        tag: "v1.3.0".to_string(),
        commit: None,
        dry_run: true,
    };
    let delete = ReleaseCommand::Delete {
        tag: "v1.2.0".to_string(),
    };
    assert_eq!(create.tag(), "v1.3.0");
    assert_eq!(delete.tag(), "v1.2.0");
}

#[test]
fn test_execute_dry_run_uses_changelog() {
    let (_dir, config) = project();
    let repo = mock_repo();
    let command = ReleaseCommand::Create {
        tag: "v1.3.0".to_string(),
        commit: None,
        dry_run: true,
    };

    let result = execute(&command, &repo, &config).unwrap();
    match result {
        WorkflowResult::Created(CreateOutcome::DryRun(params)) => {
            assert_eq!(params.object, "9999999");
            assert_eq!(params.release_message, "### Added\n- release automation");
            assert_eq!(params.tag_message, "Release version v1.3.0");
        }
        other => panic!("expected dry run, got {:?}", other),
    }
    assert_eq!(repo.mutation_count(), 0);
}

#[test]
fn test_execute_publish_uploads_matching_assets() {
    let (_dir, config) = project();
    let repo = mock_repo();
    let command = ReleaseCommand::Create {
        tag: "v1.3.0".to_string(),
        commit: Some("abc1234".to_string()),
        dry_run: false,
    };

    execute(&command, &repo, &config).unwrap();

    let uploads: Vec<String> = repo
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            MockCall::UploadAsset { file_name, .. } => Some(file_name),
            _ => None,
        })
        .collect();
    assert_eq!(uploads, vec!["tool-v1.3.0.tar.gz", "tool-v1.3.0.zip"]);
}

#[test]
fn test_execute_missing_changelog_entry_is_fatal() {
    let (_dir, config) = project();
    let repo = mock_repo();
    let command = ReleaseCommand::Create {
        tag: "v2.0.0".to_string(),
        commit: None,
        dry_run: false,
    };

    let err = execute(&command, &repo, &config).unwrap_err();
    assert!(err.to_string().contains("v2.0.0"));
    assert_eq!(repo.mutation_count(), 0);
}

#[test]
fn test_execute_delete() {
    let (_dir, config) = project();
    let mut repo = mock_repo();
    repo.add_tag("v1.2.0", "8888888");
    repo.add_release("v1.2.0");
    let command = ReleaseCommand::Delete {
        tag: "v1.2.0".to_string(),
    };

    match execute(&command, &repo, &config).unwrap() {
        WorkflowResult::Deleted(outcome) => {
            assert_eq!(outcome.tag, Removal::Deleted);
            assert_eq!(outcome.release, Removal::Deleted);
        }
        other => panic!("expected delete outcome, got {:?}", other),
    }
    assert!(repo.tag_names().is_empty());
    assert!(repo.release_tags().is_empty());
}

#[test]
fn test_resolve_slug_prefers_explicit() {
    let mut config = Config::default();
    config.repository.owner = Some("acme".to_string());
    config.repository.name = Some("widget".to_string());

    let slug = resolve_slug(Some("octocat/hello"), &config).unwrap();
    assert_eq!(slug, RepositorySlug::new("octocat", "hello"));

    let slug = resolve_slug(None, &config).unwrap();
    assert_eq!(slug, RepositorySlug::new("acme", "widget"));
}

#[test]
fn test_resolve_slug_rejects_malformed_explicit() {
    let config = Config::default();
    assert!(resolve_slug(Some("not-a-slug"), &config).is_err());
}

#[test]
fn test_release_options_from_config() {
    let mut config = Config::default();
    config.repository.default_branch = "trunk".to_string();
    config.release.tag_message = "Ship {tag}".to_string();

    let options = release_options(&config);
    assert_eq!(options.default_branch, "trunk");
    assert_eq!(options.tag_message.template, "Ship {tag}");
}
