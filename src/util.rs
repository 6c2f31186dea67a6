use crate::error::CommandFailed;
use anyhow::Result;
use itertools::Itertools as _;
use std::process::Command;

/// Formats a command line for logging, quoting arguments that would otherwise
/// be ambiguous.
///
/// ```
/// let mut command = std::process::Command::new("git");
/// command.args(["check-attr", "-a", "--", " d "]);
/// assert_eq!(
///     git_attr_fixture::util::display_cmdline(&command),
///     r#"git check-attr -a -- " d ""#
/// );
/// ```
pub fn display_cmdline(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|arg| {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '"') {
                format!("{arg:?}")
            } else {
                arg.into_owned()
            }
        })
        .join(" ")
}

pub trait CommandExtension {
    fn log_cmdline(&mut self) -> &mut Self;
    /// Runs the command, capturing stdout and stderr, and fails with
    /// [`CommandFailed`] unless the command exits successfully.
    fn check_success_with_stderr(&mut self) -> Result<std::process::Output>;
}

impl CommandExtension for Command {
    fn log_cmdline(&mut self) -> &mut Self {
        log::debug!("Running {}", display_cmdline(self));
        self
    }

    fn check_success_with_stderr(&mut self) -> Result<std::process::Output> {
        self.log_cmdline();
        let output = self.output().map_err(|err| {
            anyhow::Error::new(err).context(format!("Failed to run {}", display_cmdline(self)))
        })?;
        output.check_success_with_stderr(self)?;
        Ok(output)
    }
}

pub trait OutputExtension {
    fn check_success_with_stderr(&self, command: &Command) -> Result<&Self>;
}

impl OutputExtension for std::process::Output {
    /// Checks that the command was successful and otherwise returns an error
    /// with the exit status together with the stderr content.
    fn check_success_with_stderr(&self, command: &Command) -> Result<&Self> {
        if !self.status.success() {
            return Err(CommandFailed {
                command: display_cmdline(command),
                status: self.status,
                stderr: String::from_utf8_lossy(&self.stderr).into_owned(),
            }
            .into());
        }
        Ok(self)
    }
}

/// Removes trailing LF or CRLF from a string.
///
/// # Examples
/// ```
/// use git_attr_fixture::util::trim_newline_suffix;
///
/// assert_eq!(trim_newline_suffix("foo"), "foo");
/// assert_eq!(trim_newline_suffix("foo\n"), "foo");
/// assert_eq!(trim_newline_suffix("foo\r\n"), "foo");
/// assert_eq!(trim_newline_suffix("foo\nbar\n"), "foo\nbar");
/// assert_eq!(trim_newline_suffix("foo\r\nbar\r\n"), "foo\r\nbar");
///
/// assert_eq!(trim_newline_suffix("foo\n\r"), "foo\n\r");
/// ```
pub fn trim_newline_suffix(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}
