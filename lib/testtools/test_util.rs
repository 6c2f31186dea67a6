use std::ffi::OsStr;
use std::ffi::OsString;
use std::ops::Deref;
use std::path::Path;

#[cfg(windows)]
const NULL_DEVICE: &str = "NUL";
#[cfg(not(windows))]
const NULL_DEVICE: &str = "/dev/null";

/// Like `git_attr_fixture::git::Git::command` but as an
/// [`assert_cmd::Command`] for asserting on the outcome.
pub fn git_command_for_testing(repo: impl AsRef<OsStr>) -> assert_cmd::Command {
    // Inspired by gix-testtools v0.16.1 configure_command().
    let mut command = assert_cmd::Command::new("git");
    command.args([OsStr::new("-C"), repo.as_ref()]);
    apply_git_env(&mut command);
    command
}

/// The `git-attr-fixture` binary with colors and log filtering disabled, so
/// that stderr can be matched literally.
pub fn cargo_bin_git_attr_fixture_for_testing() -> assert_cmd::Command {
    let mut command = assert_cmd::Command::cargo_bin("git-attr-fixture").unwrap();
    command
        .env("NO_COLOR", "1")
        .env_remove("CLICOLOR_FORCE")
        .env_remove("GIT_ATTR_FIXTURE_LOG");
    apply_git_env(&mut command);
    command
}

/// Returns the stdout of `git ls-files` as sorted lines.
pub fn git_ls_files(repo: &Path) -> Vec<String> {
    let output = git_command_for_testing(repo)
        .arg("ls-files")
        .output()
        .expect("git ls-files runs");
    assert!(output.status.success(), "git ls-files failed: {output:?}");
    let mut files: Vec<String> = String::from_utf8(output.stdout)
        .expect("utf-8 file names")
        .lines()
        .map(str::to_owned)
        .collect();
    files.sort();
    files
}

/// Returns the commit id `rev` resolves to.
pub fn git_rev_parse(repo: &Path, rev: &str) -> String {
    let output = git_command_for_testing(repo)
        .args(["rev-parse", rev])
        .output()
        .expect("git rev-parse runs");
    assert!(output.status.success(), "git rev-parse failed: {output:?}");
    String::from_utf8(output.stdout)
        .expect("hex commit id")
        .trim_end()
        .to_owned()
}

fn apply_git_env(command: &mut assert_cmd::Command) {
    // Inspired by gix-testtools v0.16.1 configure_command().
    command
        .env_remove("GIT_DIR")
        .env_remove("GIT_INDEX_FILE")
        .env_remove("GIT_OBJECT_DIRECTORY")
        .env_remove("GIT_ALTERNATE_OBJECT_DIRECTORIES")
        .env_remove("GIT_WORK_TREE")
        .env_remove("GIT_COMMON_DIR")
        .env_remove("GIT_ASKPASS")
        .env_remove("SSH_ASKPASS")
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CONFIG_GLOBAL", NULL_DEVICE)
        .env("GIT_TERMINAL_PROMPT", "false")
        .env("GIT_CONFIG_COUNT", "0");
}

pub enum MaybePermanentTempDir {
    Keep(std::path::PathBuf),
    Discard(tempfile::TempDir),
}

impl MaybePermanentTempDir {
    /// Creates a new temporary directory, that may be kept permanently.
    ///
    /// The thread name is used because rust test sets the thread name to the
    /// test name, so why not use that for test purpose.
    ///
    /// See also [`maybe_keep_tempdir`].
    pub fn create() -> Self {
        let prefix = if let Some(name) = std::thread::current().name() {
            &format!("git_attr_fixture-{}", name.replace("::", "-"))
        } else {
            "git_attr_fixture"
        };
        let tempdir = tempfile::TempDir::with_prefix(prefix)
            .expect("successful temporary directory creation");
        maybe_keep_tempdir(tempdir)
    }

    pub fn path(&self) -> &std::path::Path {
        match self {
            MaybePermanentTempDir::Keep(path) => path,
            MaybePermanentTempDir::Discard(tempdir) => tempdir.path(),
        }
    }
}

impl Deref for MaybePermanentTempDir {
    type Target = std::path::Path;

    fn deref(&self) -> &Self::Target {
        self.path()
    }
}

impl AsRef<std::path::Path> for MaybePermanentTempDir {
    fn as_ref(&self) -> &std::path::Path {
        self.path()
    }
}

impl AsRef<OsStr> for MaybePermanentTempDir {
    fn as_ref(&self) -> &OsStr {
        self.path().as_os_str()
    }
}

impl From<tempfile::TempDir> for MaybePermanentTempDir {
    /// Persist a temporary directory to disk if the environment variable
    /// `GIT_ATTR_FIXTURE_KEEP_TEMP_DIR` is set to `1`,
    ///
    /// # Examples
    ///
    /// See the unit tests.
    fn from(tempdir: tempfile::TempDir) -> Self {
        let keep_var = std::env::var_os("GIT_ATTR_FIXTURE_KEEP_TEMP_DIR");
        maybe_keep_tempdir_impl(tempdir, keep_var)
    }
}

/// Persist a temporary directory to disk if the environment variable
/// `GIT_ATTR_FIXTURE_KEEP_TEMP_DIR` is set to `1`.
///
/// To find the temporary directory, run one test at a time or make it fail and find
/// the path on stderr.
///
/// # Examples
///
/// See the unit tests.
pub fn maybe_keep_tempdir(tempdir: tempfile::TempDir) -> MaybePermanentTempDir {
    MaybePermanentTempDir::from(tempdir)
}

pub(crate) fn maybe_keep_tempdir_impl(
    tempdir: tempfile::TempDir,
    keep_var: Option<OsString>,
) -> MaybePermanentTempDir {
    if keep_var == Some("1".into()) {
        let tempdir = tempdir.keep();
        eprintln!("Keeping temporary directory: {}", tempdir.display());
        MaybePermanentTempDir::Keep(tempdir)
    } else {
        MaybePermanentTempDir::Discard(tempdir)
    }
}
