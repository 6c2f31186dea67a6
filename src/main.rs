mod cli;

use crate::cli::{BaselineArgs, Cli, Commands, Generate};
use anyhow::Context as _;
use anyhow::Result;
use clap::Parser as _;
use git_attr_fixture::baseline;
use git_attr_fixture::config::RunnerConfig;
use git_attr_fixture::fixture;
use git_attr_fixture::runner::FixtureRunner;
use std::path::PathBuf;
use std::process::ExitCode;

fn generate(config: RunnerConfig, args: Generate) -> Result<()> {
    let config = RunnerConfig {
        git: args.git.unwrap_or(config.git),
        workspace: args.workspace.unwrap_or(config.workspace),
        ..config
    };
    let runner = FixtureRunner::new(&config)?;
    let baseline = runner.run()?;
    println!("{}", baseline.display());
    Ok(())
}

fn baseline_path(config: &RunnerConfig, args: BaselineArgs) -> PathBuf {
    args.baseline.unwrap_or_else(|| config.baseline_path())
}

fn dump(config: RunnerConfig, args: BaselineArgs) -> Result<()> {
    let records = baseline::read(&baseline_path(&config, args))?;
    let records: Vec<_> = records.iter().map(baseline::SerdeRecord::from).collect();
    let json = serde_json::to_string_pretty(&records)?;
    println!("{json}");
    Ok(())
}

fn check(config: RunnerConfig, args: BaselineArgs) -> Result<()> {
    let path = baseline_path(&config, args);
    let records = baseline::read(&path)?;
    baseline::verify_paths(&records, &fixture::QUERY_PATHS)
        .with_context(|| format!("Unexpected content in {}", path.display()))?;
    log::info!("{} holds {} records as expected", path.display(), records.len());
    Ok(())
}

fn run(args: Cli) -> Result<()> {
    if let Some(working_directory) = &args.working_directory {
        std::env::set_current_dir(working_directory).with_context(|| {
            format!("Failed to change directory to {}", working_directory.display())
        })?;
    }
    let config = RunnerConfig::load(args.config.as_deref())?;
    match args.command {
        Commands::Generate(generate_args) => generate(config, generate_args),
        Commands::Dump(dump_args) => dump(config, dump_args),
        Commands::Check(check_args) => check(config, check_args),
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();
    if let Err(err) = git_attr_fixture::log::init() {
        git_attr_fixture::log::eprint_warning(&format!("Failed to set up logging: {err:#}"));
    }
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            git_attr_fixture::log::eprint_error(&format!("{err:#}"));
            ExitCode::from(git_attr_fixture::error::exit_code(&err))
        }
    }
}
