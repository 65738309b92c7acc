// tests/engine_test.rs
use git_semver::boundary::BoundaryWarning;
use git_semver::cli::resolve_with;
use git_semver::config::{Config, MainBranchBehavior};
use git_semver::domain::Version;
use git_semver::git::MockRepository;
use git_semver::VersionError;

fn release() -> Config {
    Config::default()
}

fn pre() -> Config {
    Config {
        main_branch_behavior: MainBranchBehavior::Pre,
        ..Config::default()
    }
}

fn version_of(repo: &MockRepository, config: Config) -> String {
    resolve_with(repo, config, None)
        .expect("resolution should succeed")
        .output
        .version
}

#[test]
fn test_release_mode_without_tags() {
    let mut repo = MockRepository::new();

    repo.commit("c1", &[]);
    assert_eq!(version_of(&repo, release()), "1.0.0");

    repo.commit("c2", &["c1"]);
    assert_eq!(version_of(&repo, release()), "1.0.1");
}

#[test]
fn test_release_mode_after_retagging() {
    let mut repo = MockRepository::new();
    repo.linear("c", 2);
    assert_eq!(version_of(&repo, release()), "1.0.1");

    repo.tag_head("2.0.0");
    assert_eq!(version_of(&repo, release()), "2.0.0");

    repo.commit("c3", &["c2"]);
    assert_eq!(version_of(&repo, release()), "2.0.1");
}

#[test]
fn test_pre_mode_lifecycle() {
    let mut repo = MockRepository::new();

    repo.commit("c1", &[]);
    assert_eq!(version_of(&repo, pre()), "1.0.0-pre.0");

    repo.commit("c2", &["c1"]);
    assert_eq!(version_of(&repo, pre()), "1.0.0-pre.1");

    repo.tag_head("1.0.0");
    assert_eq!(version_of(&repo, pre()), "1.0.0");

    repo.commit("c3", &["c2"]);
    assert_eq!(version_of(&repo, pre()), "1.0.1-pre.0");
}

#[test]
fn test_feature_branch_off_tag() {
    let mut repo = MockRepository::new();
    repo.linear("m", 3).tag_head("1.0.5");
    repo.set_branch(Some("feature/foo"));

    repo.commit("f1", &["m3"]);
    let outcome = resolve_with(&repo, release(), None).unwrap();
    assert_eq!(outcome.output.version, "1.0.6-foo.0");
    assert_eq!(outcome.output.prerelease, "foo.0");
    assert!(outcome.output.is_prerelease);

    repo.commit("f2", &["f1"]);
    assert_eq!(version_of(&repo, release()), "1.0.6-foo.1");
}

#[test]
fn test_untagged_feature_branch_targets_next_patch() {
    let mut repo = MockRepository::new();
    repo.linear("c", 1);
    let main_first = resolve_with(&repo, release(), None).unwrap().resolved.version;
    repo.commit("c2", &["c1"]);
    let main_second = resolve_with(&repo, release(), None).unwrap().resolved.version;

    repo.set_branch(Some("feature/foo"));
    repo.commit("f1", &["c2"]);
    let outcome = resolve_with(&repo, release(), None).unwrap();

    assert_eq!(outcome.resolved.commits_since_tag, 3);
    assert_eq!(outcome.output.version, "1.0.1-foo.2");
    let feature = outcome.resolved.version;
    assert!(feature > main_first);
    assert_eq!(feature.core(), main_second);
}

#[test]
fn test_feature_branch_ignores_main_behavior() {
    let mut repo = MockRepository::new();
    repo.linear("m", 1).tag_head("1.0.5");
    repo.set_branch(Some("feature/foo"));
    repo.commit("f1", &["m1"]);

    assert_eq!(version_of(&repo, pre()), "1.0.6-foo.0");
}

#[test]
fn test_feature_branch_without_unique_commits() {
    let mut repo = MockRepository::new();
    repo.linear("m", 2).tag_head("1.0.5");
    repo.set_branch(Some("feature/foo"));

    let outcome = resolve_with(&repo, release(), None).unwrap();
    assert_eq!(outcome.output.version, "1.0.5");
    assert!(!outcome.output.is_prerelease);
    assert!(outcome.warnings.iter().any(|w| matches!(
        w,
        BoundaryWarning::FeatureBranchOnTag { tag, .. } if tag == "1.0.5"
    )));
}

#[test]
fn test_unsanitizable_branch_fails() {
    let mut repo = MockRepository::new();
    repo.linear("c", 1);

    let err = resolve_with(&repo, release(), Some("???")).unwrap_err();
    assert!(matches!(err, VersionError::BranchName { .. }));
}

#[test]
fn test_nearer_of_equal_tags_wins() {
    let mut repo = MockRepository::new();
    repo.linear("c", 4).tag("1.0.0", "c1").tag("1.0.0+retag", "c3");

    let outcome = resolve_with(&repo, pre(), None).unwrap();
    assert_eq!(outcome.resolved.base_tag.as_deref(), Some("1.0.0+retag"));
    assert_eq!(outcome.resolved.commits_since_tag, 1);
    assert_eq!(outcome.output.version, "1.0.1-pre.0");
}

#[test]
fn test_greatest_version_beats_nearest_tag() {
    let mut repo = MockRepository::new();
    repo.linear("c", 3).tag("2.0.0", "c1").tag("1.5.0", "c3");

    let outcome = resolve_with(&repo, release(), None).unwrap();
    assert_eq!(outcome.resolved.base, Version::new(2, 0, 0));
    assert_eq!(outcome.resolved.commits_since_tag, 2);
    assert_eq!(outcome.output.version, "2.0.1");
}

#[test]
fn test_release_beats_prerelease_of_same_core() {
    let mut repo = MockRepository::new();
    repo.linear("c", 3).tag("1.0.0", "c1").tag("1.0.0-rc.4", "c3");

    let outcome = resolve_with(&repo, release(), None).unwrap();
    assert_eq!(outcome.resolved.base_tag.as_deref(), Some("1.0.0"));
}

#[test]
fn test_prerelease_tag_finalizes_to_core() {
    let mut repo = MockRepository::new();
    repo.linear("c", 1).tag_head("2.0.0-rc.1");
    repo.commit("c2", &["c1"]);

    assert_eq!(version_of(&repo, release()), "2.0.0");
    assert_eq!(version_of(&repo, pre()), "2.0.0-pre.0");
}

#[test]
fn test_tags_on_unmerged_branches_are_ignored() {
    let mut repo = MockRepository::new();
    repo.linear("c", 2);
    repo.commit("side", &["c1"]).tag_head("9.9.9");
    repo.checkout("c2");

    let outcome = resolve_with(&repo, release(), None).unwrap();
    assert_eq!(outcome.resolved.base_tag, None);
    assert_eq!(outcome.output.version, "1.0.1");
}

#[test]
fn test_tag_reached_through_merge_parent() {
    // c1 - c2 - c3 - c4 - m (HEAD)
    //        \            /
    //         s1 (2.0.0) -
    let mut repo = MockRepository::new();
    repo.linear("c", 4);
    repo.commit("s1", &["c2"]).tag_head("2.0.0");
    repo.commit("m", &["c4", "s1"]);

    let outcome = resolve_with(&repo, pre(), None).unwrap();
    assert_eq!(outcome.resolved.commits_since_tag, 1);
    assert_eq!(outcome.output.version, "2.0.1-pre.0");
}

#[test]
fn test_tag_prefix() {
    let mut repo = MockRepository::new();
    repo.linear("c", 2).tag("v3.1.0", "c1").tag("4.0.0", "c2");

    let config = Config {
        tag_prefix: "v".to_string(),
        ..Config::default()
    };
    let outcome = resolve_with(&repo, config, None).unwrap();
    assert_eq!(outcome.resolved.base_tag.as_deref(), Some("v3.1.0"));
    assert_eq!(outcome.output.version, "3.1.1");
}

#[test]
fn test_version_prefix_only_affects_full_string() {
    let mut repo = MockRepository::new();
    repo.linear("c", 1).tag_head("1.2.3");

    let config = Config {
        version_prefix: "v".to_string(),
        ..Config::default()
    };
    let outcome = resolve_with(&repo, config, None).unwrap();
    assert_eq!(outcome.output.version, "v1.2.3");
    assert_eq!(outcome.output.major, 1);
    assert_eq!(outcome.output.minor, 2);
    assert_eq!(outcome.output.patch, 3);
}

#[test]
fn test_custom_initial_version() {
    let mut repo = MockRepository::new();
    repo.linear("c", 3);

    let config = Config {
        initial_version: Version::new(0, 1, 0),
        main_branch_behavior: MainBranchBehavior::Pre,
        ..Config::default()
    };
    assert_eq!(version_of(&repo, config), "0.1.0-pre.2");
}

#[test]
fn test_unparsable_tags_are_reported() {
    let mut repo = MockRepository::new();
    repo.linear("c", 2).tag("1.0", "c1").tag("nightly", "c2");

    let outcome = resolve_with(&repo, release(), None).unwrap();
    let ignored: Vec<&str> = outcome
        .warnings
        .iter()
        .filter_map(|w| match w {
            BoundaryWarning::UnparsableTag { tag, .. } => Some(tag.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(ignored, vec!["1.0"]);
    assert!(outcome
        .warnings
        .iter()
        .any(|w| matches!(w, BoundaryWarning::NoVersionTags { .. })));
}

#[test]
fn test_empty_history_fails_regardless_of_config() {
    let repo = MockRepository::new();

    for config in [release(), pre()] {
        let err = resolve_with(&repo, config, None).unwrap_err();
        assert!(matches!(err, VersionError::EmptyHistory { .. }));
    }

    let err = resolve_with(&repo, release(), Some("???")).unwrap_err();
    assert!(matches!(err, VersionError::EmptyHistory { .. }));
}

#[test]
fn test_shallow_history_without_tags_fails() {
    let mut repo = MockRepository::new();
    repo.linear("c", 2).set_shallow(true);

    let err = resolve_with(&repo, release(), None).unwrap_err();
    assert!(matches!(err, VersionError::Repository { .. }));
    assert!(err.to_string().contains("shallow"));
}

#[test]
fn test_shallow_history_with_reachable_tag_resolves() {
    let mut repo = MockRepository::new();
    repo.linear("c", 2).tag("1.4.0", "c1").set_shallow(true);

    assert_eq!(version_of(&repo, release()), "1.4.1");
}

#[test]
fn test_detached_head_needs_branch() {
    let mut repo = MockRepository::new();
    repo.linear("c", 1).set_branch(None);

    let err = resolve_with(&repo, release(), None).unwrap_err();
    assert!(matches!(err, VersionError::Repository { .. }));

    let outcome = resolve_with(&repo, release(), Some("main")).unwrap();
    assert_eq!(outcome.output.version, "1.0.0");
}

#[test]
fn test_output_parses_back_to_resolved_version() {
    let mut repo = MockRepository::new();
    repo.linear("m", 2).tag_head("0.3.9");
    repo.set_branch(Some("feature/Round_Trip"));
    repo.linear("f", 3);

    let config = Config {
        version_prefix: "v".to_string(),
        ..Config::default()
    };
    let outcome = resolve_with(&repo, config, None).unwrap();
    let rendered = outcome.output.version.strip_prefix("v").unwrap();
    assert_eq!(Version::parse(rendered).unwrap(), outcome.resolved.version);
    assert_eq!(rendered, "0.3.10-round-trip.2");
}
