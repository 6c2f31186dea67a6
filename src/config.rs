use anyhow::Context as _;
use anyhow::Result;
use serde::Deserialize;
use std::path::Path;
use std::path::PathBuf;

pub const DEFAULT_WORKSPACE: &str = "basics";
pub const DEFAULT_BASELINE: &str = "baseline";

/// Content of a runner configuration file. All keys are optional.
///
/// ```toml
/// git = "/usr/bin/git"
/// workspace = "basics"
/// baseline = "baseline"
/// ```
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub git: Option<PathBuf>,
    pub workspace: Option<PathBuf>,
    pub baseline: Option<String>,
}

impl ConfigFile {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Settings for one fixture run after merging defaults, the config file and
/// command line overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct RunnerConfig {
    /// Program used for every git invocation.
    pub git: PathBuf,
    /// Workspace directory, relative to the current directory unless absolute.
    pub workspace: PathBuf,
    /// File name of the baseline inside the workspace.
    pub baseline: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            git: PathBuf::from("git"),
            workspace: PathBuf::from(DEFAULT_WORKSPACE),
            baseline: DEFAULT_BASELINE.to_owned(),
        }
    }
}

impl RunnerConfig {
    /// Applies the values present in `file` on top of `self`.
    pub fn with_file(self, file: ConfigFile) -> Self {
        RunnerConfig {
            git: file.git.unwrap_or(self.git),
            workspace: file.workspace.unwrap_or(self.workspace),
            baseline: file.baseline.unwrap_or(self.baseline),
        }
    }

    /// Loads `config_path` if given and merges it with the defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = RunnerConfig::default();
        match config_path {
            Some(path) => Ok(config.with_file(ConfigFile::load(path)?)),
            None => Ok(config),
        }
    }

    pub fn baseline_path(&self) -> PathBuf {
        self.workspace.join(&self.baseline)
    }
}
