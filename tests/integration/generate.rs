use crate::fixtures::workspace::generated_basics;
use git_attr_fixture::baseline::AttrState;
use git_attr_fixture::fixture::QUERY_PATHS;
use git_attr_fixture_testtools::test_util::MaybePermanentTempDir;
use git_attr_fixture_testtools::test_util::cargo_bin_git_attr_fixture_for_testing;
use git_attr_fixture_testtools::test_util::git_ls_files;
use git_attr_fixture_testtools::test_util::git_rev_parse;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn baseline_has_one_record_per_path() {
    let (_temp_dir, workspace) = generated_basics();
    let records = git_attr_fixture::baseline::read(&workspace.join("baseline")).unwrap();
    let paths: Vec<String> = records.iter().map(|r| r.path.to_string()).collect();
    assert_eq!(paths, QUERY_PATHS);
}

#[test]
fn baseline_records_start_with_the_queried_path() {
    let (_temp_dir, workspace) = generated_basics();
    let content = std::fs::read_to_string(workspace.join("baseline")).unwrap();
    let first_lines: Vec<&str> = content
        .split_terminator("\n\n")
        .map(|record| record.lines().next().unwrap())
        .collect();
    assert_eq!(first_lines, QUERY_PATHS);
}

#[test]
fn attributes_resolve_as_git_does() {
    let (_temp_dir, workspace) = generated_basics();
    let records = git_attr_fixture::baseline::read(&workspace.join("baseline")).unwrap();
    let record = |path: &str| {
        records
            .iter()
            .find(|record| record.path == path)
            .unwrap_or_else(|| panic!("no record for {path:?}"))
    };
    let value = |v: &str| Some(AttrState::Value(v.into()));

    // Quoted pattern with surrounding spaces.
    assert_eq!(record(" d ").get("test").cloned(), value("d"));
    // Leading blanks of a pattern are not part of it, so ` e` only means `e`.
    assert!(record(" e").assignments.is_empty());
    // Patterns without a slash match at any depth.
    assert_eq!(record("f").get("test").cloned(), value("f"));
    assert_eq!(record("a/f").get("test").cloned(), value("f"));
    // A deeper .gitattributes overrides a shallower one.
    assert_eq!(record("a/g").get("test").cloned(), value("a/g"));
    assert_eq!(record("a/b/g").get("test").cloned(), value("a/b/g"));
    assert_eq!(record("a/b/h").get("test").cloned(), value("a/b/h"));
    // Patterns with a slash are relative to their .gitattributes.
    assert_eq!(record("b/g").get("test"), None);
    assert_eq!(record("a/b/d/g").get("test").cloned(), value("a/b/d/*"));
    // The last assignment on a line wins.
    assert_eq!(record("onoff").get("test"), Some(&AttrState::Unset));
    assert_eq!(record("offon").get("test"), Some(&AttrState::Set));
    // The macro sets itself and leaves `test` unspecified.
    assert_eq!(record("no").get("notest"), Some(&AttrState::Set));
    assert_eq!(record("no").get("test"), None);
    assert_eq!(record("a/b/d/yes").get("notest"), Some(&AttrState::Set));
    assert_eq!(record("a/b/d/yes").get("test"), None);
    // Only the external attributes file mentions `global`.
    assert_eq!(record("global").get("test").cloned(), value("global"));
}

#[test]
fn attribute_files_are_committed() {
    let (_temp_dir, workspace) = generated_basics();
    assert_eq!(
        git_ls_files(&workspace),
        [
            ".gitattributes",
            "a/.gitattributes",
            "a/b/.gitattributes",
            "user.attributes",
        ]
    );
    assert!(workspace.join("a/c").is_dir());
    assert!(workspace.join("b").is_dir());
}

#[test]
fn commit_is_reproducible() {
    let (_temp_dir_1, workspace_1) = generated_basics();
    let (_temp_dir_2, workspace_2) = generated_basics();
    assert_eq!(
        git_rev_parse(&workspace_1, "HEAD"),
        git_rev_parse(&workspace_2, "HEAD")
    );
}

#[test]
fn rerun_fails_at_workspace_creation() {
    let (temp_dir, workspace) = generated_basics();
    let baseline_before = std::fs::read(workspace.join("baseline")).unwrap();

    cargo_bin_git_attr_fixture_for_testing()
        .current_dir(&temp_dir)
        .arg("generate")
        .assert()
        .code(1)
        .stdout("")
        .stderr(
            predicate::str::is_match("^ERROR: Workspace \".*/basics\" already exists\n$").unwrap(),
        );

    assert_eq!(
        std::fs::read(workspace.join("baseline")).unwrap(),
        baseline_before
    );
}

#[test]
fn prints_baseline_path() {
    let temp_dir = MaybePermanentTempDir::create();
    std::fs::create_dir(temp_dir.join("sub")).unwrap();
    let expected_baseline = temp_dir
        .canonicalize()
        .unwrap()
        .join("sub/attrs/baseline");

    cargo_bin_git_attr_fixture_for_testing()
        .current_dir(&temp_dir)
        .args(["-C", "sub", "generate", "--workspace", "attrs"])
        .assert()
        .success()
        .stdout(format!("{}\n", expected_baseline.display()))
        .stderr(predicate::str::contains("Wrote 14 records to "));
    assert!(expected_baseline.is_file());
    assert!(!temp_dir.join("basics").exists());
}

#[cfg(unix)]
#[test]
fn failing_git_exit_code_is_passed_through() {
    use std::os::unix::fs::PermissionsExt as _;

    let temp_dir = MaybePermanentTempDir::create();
    let fake_git = temp_dir.join("fake-git");
    std::fs::write(&fake_git, "#!/bin/sh\necho 'fatal: not today' >&2\nexit 7\n").unwrap();
    std::fs::set_permissions(&fake_git, std::fs::Permissions::from_mode(0o755)).unwrap();

    cargo_bin_git_attr_fixture_for_testing()
        .current_dir(&temp_dir)
        .arg("generate")
        .arg("--git")
        .arg(&fake_git)
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Failed to initialize git repository in "))
        .stderr(predicate::str::contains("fatal: not today"));
    // Nothing is cleaned up.
    assert!(temp_dir.join("basics").is_dir());
}
