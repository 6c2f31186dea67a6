use crate::fixtures::workspace::generated_basics;
use git_attr_fixture_testtools::test_util::MaybePermanentTempDir;
use git_attr_fixture_testtools::test_util::cargo_bin_git_attr_fixture_for_testing;
use predicates::prelude::*;

const HANDWRITTEN_BASELINE: &str = concat!(
    " d \n",
    " d : test: d\n",
    "\n",
    "a/b/d/yes\n",
    "a/b/d/yes: notest: set\n",
    "\n",
    "onoff\n",
    "onoff: test: unset\n",
    "\n",
    "b/g\n",
    "\n",
);

#[test]
fn dump_explicit_baseline() {
    let temp_dir = MaybePermanentTempDir::create();
    let baseline = temp_dir.join("expected");
    std::fs::write(&baseline, HANDWRITTEN_BASELINE).unwrap();

    let assert = cargo_bin_git_attr_fixture_for_testing()
        .arg("dump")
        .arg(&baseline)
        .assert()
        .success()
        .stderr("");
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    insta::assert_snapshot!(stdout.trim_end(), @r#"
    [
      {
        "path": " d ",
        "attributes": [
          {
            "name": "test",
            "state": "value",
            "value": "d"
          }
        ]
      },
      {
        "path": "a/b/d/yes",
        "attributes": [
          {
            "name": "notest",
            "state": "set"
          }
        ]
      },
      {
        "path": "onoff",
        "attributes": [
          {
            "name": "test",
            "state": "unset"
          }
        ]
      },
      {
        "path": "b/g",
        "attributes": []
      }
    ]
    "#);
}

#[test]
fn dump_defaults_to_workspace_baseline() {
    let (temp_dir, _workspace) = generated_basics();

    cargo_bin_git_attr_fixture_for_testing()
        .current_dir(&temp_dir)
        .arg("dump")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""path": "a/b/g""#))
        .stdout(predicate::str::contains(r#""value": "a/b/d/*""#));
}

#[test]
fn dump_reports_malformed_line() {
    let temp_dir = MaybePermanentTempDir::create();
    let baseline = temp_dir.join("expected");
    std::fs::write(&baseline, "f\nf: test: f\n\ng\nnot a check-attr line\n\n").unwrap();

    cargo_bin_git_attr_fixture_for_testing()
        .arg("dump")
        .arg(&baseline)
        .assert()
        .code(1)
        .stdout("")
        .stderr(format!(
            "ERROR: Failed to parse baseline {}: Line 5: expected '<path>: <attribute>: <info>', got \"not a check-attr line\"\n",
            baseline.display()
        ));
}

#[test]
fn dump_missing_baseline_fails() {
    let temp_dir = MaybePermanentTempDir::create();

    cargo_bin_git_attr_fixture_for_testing()
        .current_dir(&temp_dir)
        .arg("dump")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with(
            "ERROR: Failed to read baseline basics/baseline: ",
        ));
}
