use crate::util::CommandExtension as _;
use anyhow::Context as _;
use anyhow::Result;
use bstr::BString;
use std::ffi::OsStr;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

#[cfg(windows)]
const NULL_DEVICE: &str = "NUL";
#[cfg(not(windows))]
const NULL_DEVICE: &str = "/dev/null";

/// Author and committer identity used for every commit, so that the fixture
/// gets the same commit id on every run.
pub fn commit_env() -> [(&'static str, &'static str); 6] {
    [
        ("GIT_AUTHOR_NAME", "A Name"),
        ("GIT_AUTHOR_EMAIL", "a@no.example"),
        ("GIT_AUTHOR_DATE", "2023-01-02T03:04:05Z+01:00"),
        ("GIT_COMMITTER_NAME", "C Name"),
        ("GIT_COMMITTER_EMAIL", "c@no.example"),
        ("GIT_COMMITTER_DATE", "2023-06-07T08:09:10Z+01:00"),
    ]
}

/// Isolates a git command from the environment of the caller: no inherited
/// repository location, no system or global configuration, no prompts.
pub fn apply_deterministic_env(command: &mut Command) -> &mut Command {
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
        .env("GIT_CONFIG_COUNT", "0")
        .envs(commit_env())
}

/// Runs git commands against a repository with a deterministic environment.
#[derive(Debug, Clone)]
pub struct Git {
    program: PathBuf,
}

impl Default for Git {
    fn default() -> Self {
        Self::new("git")
    }
}

impl Git {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Git {
            program: program.into(),
        }
    }

    /// Creates a `git -C <repo>` command.
    pub fn command(&self, repo: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.args([OsStr::new("-C"), repo.as_os_str()]);
        apply_deterministic_env(&mut command);
        command
    }

    pub fn init(&self, repo: &Path) -> Result<()> {
        self.command(repo)
            .args(["init", "--quiet", "--initial-branch", "main"])
            .check_success_with_stderr()
            .with_context(|| format!("Failed to initialize git repository in {}", repo.display()))?;
        Ok(())
    }

    /// Stages everything in the worktree, like `git add .`.
    pub fn add_all(&self, repo: &Path) -> Result<()> {
        self.command(repo)
            .args(["add", "."])
            .check_success_with_stderr()
            .context("Failed to stage the workspace")?;
        Ok(())
    }

    pub fn commit(&self, repo: &Path, message: &str) -> Result<()> {
        self.command(repo)
            .args(["commit", "--quiet", "-m", message])
            .check_success_with_stderr()
            .with_context(|| format!("Failed to commit {message:?}"))?;
        Ok(())
    }

    /// Returns the raw output of `git check-attr -a` for `path`, with
    /// `attributes_file` as `core.attributesFile` and the system wide
    /// attributes file disabled.
    pub fn check_attr_all(
        &self,
        repo: &Path,
        attributes_file: &Path,
        path: &str,
    ) -> Result<BString> {
        let mut attributes_file_config = std::ffi::OsString::from("core.attributesFile=");
        attributes_file_config.push(attributes_file);
        let output = self
            .command(repo)
            .arg("-c")
            .arg(attributes_file_config)
            .args(["check-attr", "-a", "--", path])
            .env("GIT_ATTR_NOSYSTEM", "1")
            .check_success_with_stderr()
            .with_context(|| format!("Failed to query attributes of {path:?}"))?;
        Ok(output.stdout.into())
    }
}
