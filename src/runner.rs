use crate::baseline::BaselineWriter;
use crate::config::RunnerConfig;
use crate::error::WorkspaceExists;
use crate::fixture;
use crate::git::Git;
use anyhow::Context as _;
use anyhow::Result;
use std::path::Path;
use std::path::PathBuf;

/// Builds the attributes fixture repository and records what git reports for
/// every query path.
///
/// The steps run strictly in order and the first failure aborts the run.
/// Nothing is cleaned up, so a partial workspace and baseline are left on
/// disk for inspection.
#[derive(Debug)]
pub struct FixtureRunner {
    git: Git,
    workspace: PathBuf,
    baseline: PathBuf,
}

impl FixtureRunner {
    /// `workspace` is resolved against the current directory.
    pub fn new(config: &RunnerConfig) -> Result<Self> {
        let workspace = std::path::absolute(&config.workspace).with_context(|| {
            format!("Failed to resolve workspace {}", config.workspace.display())
        })?;
        let baseline = workspace.join(&config.baseline);
        Ok(FixtureRunner {
            git: Git::new(&config.git),
            workspace,
            baseline,
        })
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub fn baseline(&self) -> &Path {
        &self.baseline
    }

    /// Runs all steps and returns the path of the baseline.
    #[tracing::instrument(name = "generate_fixture", skip_all, fields(workspace = %self.workspace.display()))]
    pub fn run(&self) -> Result<&Path> {
        self.create_workspace()?;
        self.write_attribute_files()?;
        self.commit()?;
        self.collect_baseline()?;
        Ok(&self.baseline)
    }

    fn create_workspace(&self) -> Result<()> {
        match std::fs::create_dir(&self.workspace) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(WorkspaceExists(self.workspace.clone()).into());
            }
            Err(err) => {
                return Err(anyhow::Error::new(err).context(format!(
                    "Failed to create workspace {}",
                    self.workspace.display()
                )));
            }
        }
        self.git.init(&self.workspace)?;
        for dir in fixture::DIRECTORIES {
            let path = self.workspace.join(dir);
            std::fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
        }
        log::info!("Initialized workspace {}", self.workspace.display());
        Ok(())
    }

    fn write_attribute_files(&self) -> Result<()> {
        for file in fixture::TRACKED_ATTRIBUTES
            .iter()
            .chain([&fixture::EXTERNAL_ATTRIBUTES])
        {
            file.write_to(&self.workspace)?;
            log::debug!("Wrote {}", file.path);
        }
        Ok(())
    }

    fn commit(&self) -> Result<()> {
        self.git.add_all(&self.workspace)?;
        self.git.commit(&self.workspace, fixture::COMMIT_MESSAGE)?;
        log::info!("Committed the attribute files");
        Ok(())
    }

    fn collect_baseline(&self) -> Result<()> {
        let attributes_file = self.workspace.join(fixture::EXTERNAL_ATTRIBUTES.path);
        let mut writer = BaselineWriter::open_append(&self.baseline)?;
        for path in fixture::QUERY_PATHS {
            let output = self
                .git
                .check_attr_all(&self.workspace, &attributes_file, path)?;
            writer.append(path, &output)?;
        }
        log::info!(
            "Wrote {} records to {}",
            writer.records_written(),
            writer.path().display()
        );
        Ok(())
    }
}
