// tests/git_remote_test.rs
//
// Exercises Git2Repository against a bare repository on disk acting as the
// release remote.
use std::fs;
use std::path::Path;

use git2::Repository as Git2Repo;
use shipit::cli::{run_release_workflow, ReleaseWorkflowArgs, WorkflowResult};
use shipit::config::Config;
use shipit::domain::{CommitCategory, TagPattern, Version};
use shipit::git::{Git2Repository, Repository};
use shipit::publish::MockPublisher;
use tempfile::TempDir;

struct Fixture {
    _remote_dir: TempDir,
    _work_dir: TempDir,
    remote: Git2Repo,
    work: Git2Repo,
    git: Git2Repository,
}

fn fixture() -> Fixture {
    let remote_dir = TempDir::new().unwrap();
    let work_dir = TempDir::new().unwrap();

    let remote = Git2Repo::init_bare(remote_dir.path()).unwrap();
    let work = Git2Repo::init(work_dir.path()).unwrap();
    work.remote("origin", remote_dir.path().to_str().unwrap())
        .unwrap();

    let git = Git2Repository::open(work_dir.path(), "origin").unwrap();
    Fixture {
        _remote_dir: remote_dir,
        _work_dir: work_dir,
        remote,
        work,
        git,
    }
}

fn commit(repo: &Git2Repo, message: &str) -> git2::Oid {
    let file = repo.workdir().unwrap().join("CHANGES");
    let mut content = fs::read_to_string(&file).unwrap_or_default();
    content.push_str(message);
    content.push('\n');
    fs::write(&file, content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new("CHANGES")).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = git2::Signature::now("Test User", "test@example.com").unwrap();

    let parents: Vec<git2::Commit> = repo
        .head()
        .ok()
        .and_then(|h| h.peel_to_commit().ok())
        .into_iter()
        .collect();
    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .unwrap()
}

fn remote_has_tag(remote: &Git2Repo, name: &str) -> bool {
    remote
        .find_reference(&format!("refs/tags/{}", name))
        .is_ok()
}

#[test]
fn test_push_and_delete_remote_tag() {
    let f = fixture();
    commit(&f.work, "feat: first");

    f.git.create_tag("0.1.0").unwrap();
    f.git.push_tag("0.1.0").unwrap();
    assert!(remote_has_tag(&f.remote, "0.1.0"));

    f.git.delete_remote_tag("0.1.0").unwrap();
    assert!(!remote_has_tag(&f.remote, "0.1.0"));
}

#[test]
fn test_latest_tag_uses_version_order() {
    let f = fixture();
    commit(&f.work, "feat: first");

    for tag in ["1.9.0", "1.10.0", "1.2.0"] {
        f.git.create_tag(tag).unwrap();
        f.git.push_tag(tag).unwrap();
    }

    assert_eq!(
        f.git.latest_tag(&TagPattern::default()).unwrap(),
        Some("1.10.0".to_string())
    );
}

#[test]
fn test_latest_tag_on_empty_remote() {
    let f = fixture();
    commit(&f.work, "feat: first");

    assert_eq!(f.git.latest_tag(&TagPattern::default()).unwrap(), None);
}

#[test]
fn test_fetch_tags_brings_remote_tags_local() {
    let f = fixture();
    commit(&f.work, "feat: first");
    f.git.create_tag("1.0.0").unwrap();
    f.git.push_tag("1.0.0").unwrap();
    f.git.delete_local_tag("1.0.0").unwrap();
    assert!(f.work.find_reference("refs/tags/1.0.0").is_err());

    f.git.fetch_tags().unwrap();
    assert!(f.work.find_reference("refs/tags/1.0.0").is_ok());
}

#[test]
fn test_log_since_pushed_release() {
    let f = fixture();
    commit(&f.work, "feat: first");
    f.git.create_tag("1.0.0").unwrap();
    f.git.push_tag("1.0.0").unwrap();
    commit(&f.work, "docs: usage");
    commit(&f.work, "feat(api)!: drop v1 endpoints");

    let latest = f.git.latest_tag(&TagPattern::default()).unwrap();
    let breaking = f.git.log(CommitCategory::Major, latest.as_deref()).unwrap();
    assert_eq!(breaking.len(), 1);
    assert_eq!(breaking[0].subject, "feat(api)!: drop v1 endpoints");
    assert!(f
        .git
        .log(CommitCategory::Minor, latest.as_deref())
        .unwrap()
        .is_empty());
}

#[test]
fn test_release_workflow_end_to_end() {
    let f = fixture();
    commit(&f.work, "feat: first");
    f.git.create_tag("1.2.3").unwrap();
    f.git.push_tag("1.2.3").unwrap();
    commit(&f.work, "fix: handle empty input");

    let publisher = MockPublisher::new();
    let result = run_release_workflow(
        &f.git,
        || Ok(&publisher),
        &Config::default(),
        &ReleaseWorkflowArgs::default(),
    )
    .unwrap();

    match result {
        WorkflowResult::Released { version, tag, .. } => {
            assert_eq!(version, Version::new(1, 2, 4));
            assert_eq!(tag, "1.2.4");
        }
        other => panic!("expected a release, got {:?}", other),
    }
    assert!(remote_has_tag(&f.remote, "1.2.4"));
    assert!(publisher.published()[0]
        .body
        .contains("- fix: handle empty input ("));
}

#[test]
fn test_release_workflow_rolls_back_on_publish_failure() {
    let f = fixture();
    commit(&f.work, "feat: first");
    f.git.create_tag("1.2.3").unwrap();
    f.git.push_tag("1.2.3").unwrap();
    commit(&f.work, "feat: second");

    let publisher = MockPublisher::failing(500);
    let result = run_release_workflow(
        &f.git,
        || Ok(&publisher),
        &Config::default(),
        &ReleaseWorkflowArgs::default(),
    );

    assert!(result.is_err());
    assert!(!remote_has_tag(&f.remote, "1.3.0"));
    assert!(f.work.find_reference("refs/tags/1.3.0").is_err());
    assert!(remote_has_tag(&f.remote, "1.2.3"));
}
