// tests/workflow_test.rs
use shipit::cli::{run_release_workflow, ReleaseWorkflowArgs, WorkflowResult};
use shipit::config::Config;
use shipit::domain::Version;
use shipit::git::mock::{MockCall, MockOperation};
use shipit::git::MockRepository;
use shipit::publish::MockPublisher;
use shipit::ShipitError;

fn release(
    repo: &MockRepository,
    publisher: &MockPublisher,
    config: &Config,
) -> shipit::Result<WorkflowResult> {
    run_release_workflow(
        repo,
        || Ok(publisher),
        config,
        &ReleaseWorkflowArgs::default(),
    )
}

fn released_version(result: WorkflowResult) -> Version {
    match result {
        WorkflowResult::Released { version, .. } => version,
        other => panic!("expected a release, got {:?}", other),
    }
}

#[test]
fn test_feature_after_release_bumps_minor() {
    let repo = MockRepository::new();
    repo.add_release_tag("1.2.3");
    repo.add_commit("feat: add x", "a1b2c3d");
    let publisher = MockPublisher::new();

    let result = release(&repo, &publisher, &Config::default()).unwrap();

    assert_eq!(
        result,
        WorkflowResult::Released {
            version: Version::new(1, 3, 0),
            tag: "1.3.0".to_string(),
            url: "https://example.invalid/releases/tag/1.3.0".to_string(),
        }
    );
    let published = publisher.published();
    assert_eq!(published[0].title, "1.3.0");
    assert_eq!(
        published[0].body,
        "# Version 1.3.0\n\n## Features\n\n- feat: add x (a1b2c3d)\n"
    );
}

#[test]
fn test_breaking_change_bumps_major() {
    let repo = MockRepository::new();
    repo.add_release_tag("1.2.3");
    repo.add_commit("fix: y", "1111111");
    repo.add_commit("feat!: z", "2222222");
    let publisher = MockPublisher::new();

    let result = release(&repo, &publisher, &Config::default()).unwrap();
    assert_eq!(released_version(result), Version::new(2, 0, 0));

    let body = &publisher.published()[0].body;
    let breaking = body.find("## Breaking Changes").unwrap();
    let fixes = body.find("## Bug Fixes").unwrap();
    assert!(breaking < fixes);
}

#[test]
fn test_first_release_starts_at_initial_version() {
    let repo = MockRepository::new();
    repo.add_commit("chore: init", "abcdef1");
    let publisher = MockPublisher::new();

    let result = release(&repo, &publisher, &Config::default()).unwrap();
    assert_eq!(released_version(result), Version::new(0, 1, 0));
    assert!(repo.has_remote_tag("0.1.0"));
}

#[test]
fn test_no_commits_is_a_no_op() {
    let repo = MockRepository::new();
    repo.add_release_tag("1.2.3");
    let publisher = MockPublisher::new();

    let result = release(&repo, &publisher, &Config::default()).unwrap();

    assert_eq!(result, WorkflowResult::NoChanges);
    assert!(repo.calls().is_empty());
    assert!(publisher.published().is_empty());
}

#[test]
fn test_invalid_latest_tag_aborts_before_mutation() {
    let repo = MockRepository::new();
    repo.add_release_tag("banana");
    repo.add_commit("feat: x", "abcdef1");
    let publisher = MockPublisher::new();

    let err = release(&repo, &publisher, &Config::default()).unwrap_err();

    assert!(matches!(err, ShipitError::InvalidPreviousVersion { .. }));
    assert!(repo.calls().is_empty());
}

#[test]
fn test_publish_failure_rolls_back_tags() {
    let repo = MockRepository::new();
    repo.add_release_tag("1.2.3");
    repo.add_commit("fix: y", "abcdef1");
    let publisher = MockPublisher::failing(500);

    let err = release(&repo, &publisher, &Config::default()).unwrap_err();

    assert!(matches!(err, ShipitError::RemoteRelease { status: Some(500), .. }));
    assert_eq!(
        repo.calls(),
        vec![
            MockCall::CreateTag("1.2.4".to_string()),
            MockCall::PushTag("1.2.4".to_string()),
            MockCall::DeleteLocalTag("1.2.4".to_string()),
            MockCall::DeleteRemoteTag("1.2.4".to_string()),
        ]
    );
    assert!(!repo.has_local_tag("1.2.4"));
    assert!(!repo.has_remote_tag("1.2.4"));
}

#[test]
fn test_dry_run_mutates_nothing() {
    let repo = MockRepository::new();
    repo.add_release_tag("0.4.1");
    repo.add_commit("docs: readme", "abcdef1");

    let result = run_release_workflow(
        &repo,
        || -> shipit::Result<MockPublisher> { panic!("dry run must not build a publisher") },
        &Config::default(),
        &ReleaseWorkflowArgs { dry_run: true },
    )
    .unwrap();

    match result {
        WorkflowResult::DryRun { version, notes } => {
            assert_eq!(version, Version::new(0, 5, 0));
            assert!(notes.contains("## Documentation"));
        }
        other => panic!("expected a dry run, got {:?}", other),
    }
    assert!(repo.calls().is_empty());
    assert_eq!(repo.fetch_count(), 0);
}

#[test]
fn test_real_run_fetches_tags_once() {
    let repo = MockRepository::new();
    repo.add_release_tag("0.4.1");
    repo.add_commit("fix: z", "abcdef1");
    let publisher = MockPublisher::new();

    release(&repo, &publisher, &Config::default()).unwrap();
    assert_eq!(repo.fetch_count(), 1);
}

#[test]
fn test_build_metadata_tag_is_released_from() {
    let repo = MockRepository::new();
    repo.add_release_tag("1.2.3+build.5");
    repo.add_commit("fix: y", "abcdef1");
    let publisher = MockPublisher::new();

    let result = release(&repo, &publisher, &Config::default()).unwrap();
    assert_eq!(released_version(result), Version::new(1, 2, 4));
    assert!(repo.has_remote_tag("1.2.4"));
}

#[test]
fn test_prerelease_tag_is_promoted() {
    let repo = MockRepository::new();
    repo.add_release_tag("1.3.0-rc.1");
    repo.add_commit("feat: finish x", "abcdef1");
    let publisher = MockPublisher::new();

    let result = release(&repo, &publisher, &Config::default()).unwrap();
    assert_eq!(released_version(result), Version::new(1, 3, 0));
    assert_eq!(publisher.published()[0].title, "1.3.0");
}

#[test]
fn test_unbumpable_latest_version_fails_without_mutation() {
    let repo = MockRepository::new();
    repo.add_release_tag("18446744073709551615.0.0");
    repo.add_commit("feat!: x", "abcdef1");
    let publisher = MockPublisher::new();

    let err = release(&repo, &publisher, &Config::default()).unwrap_err();

    assert!(matches!(err, ShipitError::InvalidPreviousVersion { .. }));
    assert!(repo.calls().is_empty());
    assert!(publisher.published().is_empty());
}

#[test]
fn test_publisher_error_prevents_tagging() {
    let repo = MockRepository::new();
    repo.add_commit("feat: x", "abcdef1");

    let err = run_release_workflow(
        &repo,
        || -> shipit::Result<MockPublisher> { Err(ShipitError::config("no token")) },
        &Config::default(),
        &ReleaseWorkflowArgs::default(),
    )
    .unwrap_err();

    assert!(matches!(err, ShipitError::Config(_)));
    assert!(repo.calls().is_empty());
}

#[test]
fn test_fetch_failure_only_warns() {
    let repo = MockRepository::new();
    repo.fail_on(MockOperation::FetchTags);
    repo.add_release_tag("2.0.0");
    repo.add_commit("perf: faster", "abcdef1");
    let publisher = MockPublisher::new();

    let result = release(&repo, &publisher, &Config::default()).unwrap();
    assert_eq!(released_version(result), Version::new(2, 0, 1));
}

#[test]
fn test_tag_pattern_from_config() {
    let repo = MockRepository::new();
    repo.add_release_tag("v1.0.0");
    repo.add_commit("feat: x", "abcdef1");
    let publisher = MockPublisher::new();
    let config = Config {
        tag_pattern: "v{version}".to_string(),
        ..Config::default()
    };

    let result = release(&repo, &publisher, &config).unwrap();

    match result {
        WorkflowResult::Released { version, tag, .. } => {
            assert_eq!(version, Version::new(1, 1, 0));
            assert_eq!(tag, "v1.1.0");
        }
        other => panic!("expected a release, got {:?}", other),
    }
    assert_eq!(publisher.published()[0].title, "1.1.0");
}

#[test]
fn test_rollback_failure_needs_manual_cleanup() {
    let repo = MockRepository::new();
    repo.add_release_tag("1.0.0");
    repo.add_commit("fix: y", "abcdef1");
    repo.fail_on(MockOperation::DeleteRemoteTag);
    let publisher = MockPublisher::failing(502);

    let err = release(&repo, &publisher, &Config::default()).unwrap_err();

    assert!(err.needs_manual_cleanup());
    assert!(!repo.has_local_tag("1.0.1"));
    assert!(repo.has_remote_tag("1.0.1"));
}
