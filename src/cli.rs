/** Command line argument definition using subcommands.
 *
 * See also https://jmmv.dev/2013/08/cli-design-putting-flags-to-good-use.html#bad-using-flags-to-select-subcommands.
 */
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const ABOUT: &str = "Generates a git repository exercising .gitattributes resolution.

The fixture is committed and `git check-attr -a` is run for a fixed list of
paths. The results are appended to a baseline file inside the workspace.\
";

#[derive(Parser, Debug)]
#[command(version, about = ABOUT)]
pub struct Cli {
    /// Run as if started in <path> as current working directory.
    #[arg(short = 'C', value_name = "path")]
    pub working_directory: Option<PathBuf>,

    /// Runner configuration file in TOML format.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Creates the workspace, commits the attribute files and records the
    /// baseline.
    Generate(Generate),
    /// Prints a baseline as JSON.
    Dump(BaselineArgs),
    /// Verifies that a baseline holds one record per query path, in order.
    Check(BaselineArgs),
}

#[derive(Args, Debug)]
pub struct Generate {
    /// The directory to create, must not exist.
    #[arg(long)]
    pub workspace: Option<PathBuf>,

    /// The git executable to run.
    #[arg(long)]
    pub git: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct BaselineArgs {
    /// The baseline file, defaults to the baseline in the configured workspace.
    #[arg(id = "baseline")]
    pub baseline: Option<PathBuf>,
}
