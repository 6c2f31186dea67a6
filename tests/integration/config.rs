use git_attr_fixture_testtools::test_util::MaybePermanentTempDir;
use git_attr_fixture_testtools::test_util::cargo_bin_git_attr_fixture_for_testing;
use predicates::prelude::*;

#[test]
fn config_file_selects_workspace_and_baseline() {
    let temp_dir = MaybePermanentTempDir::create();
    std::fs::write(
        temp_dir.join("fixture.toml"),
        "workspace = \"attributes\"\nbaseline = \"expected\"\n",
    )
    .unwrap();

    cargo_bin_git_attr_fixture_for_testing()
        .current_dir(&temp_dir)
        .args(["--config", "fixture.toml", "generate"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("/attributes/expected\n"));
    assert!(temp_dir.join("attributes/expected").is_file());

    // The same configuration locates the baseline for the other commands.
    cargo_bin_git_attr_fixture_for_testing()
        .current_dir(&temp_dir)
        .args(["check", "--config", "fixture.toml"])
        .assert()
        .success();
}

#[test]
fn command_line_overrides_config_file() {
    let temp_dir = MaybePermanentTempDir::create();
    std::fs::write(temp_dir.join("fixture.toml"), "workspace = \"from-file\"\n").unwrap();

    cargo_bin_git_attr_fixture_for_testing()
        .current_dir(&temp_dir)
        .args(["--config", "fixture.toml", "generate"])
        .args(["--workspace", "from-flag"])
        .assert()
        .success();
    assert!(temp_dir.join("from-flag/baseline").is_file());
    assert!(!temp_dir.join("from-file").exists());
}

#[test]
fn unknown_config_key_fails() {
    let temp_dir = MaybePermanentTempDir::create();
    std::fs::write(temp_dir.join("fixture.toml"), "workspaces = \"typo\"\n").unwrap();

    cargo_bin_git_attr_fixture_for_testing()
        .current_dir(&temp_dir)
        .args(["--config", "fixture.toml", "generate"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with(
            "ERROR: Failed to parse config file fixture.toml: ",
        ))
        .stderr(predicate::str::contains("unknown field `workspaces`"));
    assert!(!temp_dir.join("basics").exists());
}
