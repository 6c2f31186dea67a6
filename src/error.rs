use std::path::PathBuf;

/// An external command, typically git, exited unsuccessfully.
#[derive(thiserror::Error, Debug)]
#[error("{command} failed with {status}{}", stderr_suffix(.stderr))]
pub struct CommandFailed {
    /// The command line, for display purposes only.
    pub command: String,
    pub status: std::process::ExitStatus,
    pub stderr: String,
}

impl CommandFailed {
    /// The exit code of the command, `None` if it was killed by a signal.
    pub fn exit_code(&self) -> Option<i32> {
        self.status.code()
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = crate::util::trim_newline_suffix(stderr);
    if stderr.is_empty() {
        String::new()
    } else {
        format!(":\n{stderr}")
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
#[error("Workspace {0:?} already exists")]
pub struct WorkspaceExists(pub PathBuf);

/// Problems found when reading back a baseline file.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum BaselineError {
    #[error("Line {line_number}: expected '<path>: <attribute>: <info>', got {line:?}")]
    InvalidLine { line_number: usize, line: String },
    #[error("Line {line_number}: invalid attribute name {name:?}")]
    InvalidAttributeName { line_number: usize, name: String },
    #[error("Expected {expected} records, found {actual}")]
    RecordCount { expected: usize, actual: usize },
    #[error("Record {index}: expected path {expected:?}, found {actual:?}")]
    PathMismatch {
        index: usize,
        expected: String,
        actual: String,
    },
}

/// Maps an error to the process exit code.
///
/// A failing external command passes its own exit code through, everything
/// else exits with 1.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CommandFailed>())
        .and_then(CommandFailed::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .filter(|code| *code != 0)
        .unwrap_or(1)
}
