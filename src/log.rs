use anyhow::Result;
use colored::Colorize as _;
use std::io::IsTerminal as _;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;

/// Environment variable holding a `tracing` filter directive, e.g. `debug`.
pub const LOG_FILTER_ENV: &str = "GIT_ATTR_FIXTURE_LOG";

const DEFAULT_FILTER: &str = "info";

/// Parses [`LOG_FILTER_ENV`], warning about and ignoring invalid directives.
fn env_filter() -> EnvFilter {
    let Ok(directives) = std::env::var(LOG_FILTER_ENV) else {
        return EnvFilter::new(DEFAULT_FILTER);
    };
    EnvFilter::try_new(&directives).unwrap_or_else(|err| {
        eprint_warning(&format!(
            "Ignoring invalid {LOG_FILTER_ENV} {directives:?}: {err}"
        ));
        EnvFilter::new(DEFAULT_FILTER)
    })
}

/// Routes `log` records and `tracing` events to stderr.
///
/// The filter is read from [`LOG_FILTER_ENV`] and defaults to `info`. An
/// invalid filter is reported and replaced by the default.
pub fn init() -> Result<()> {
    // Convert log messages to tracing events, so that both end up in the same
    // formatter.
    tracing_log::LogTracer::init()?;

    let filter = env_filter();
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(false)
        .with_line_number(false)
        .without_time()
        .with_ansi(std::io::stderr().is_terminal())
        // The only target is "git_attr_fixture", so it is not useful.
        .with_target(false);
    let subscriber = tracing_subscriber::Registry::default()
        .with(filter)
        .with(stderr_layer);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

pub fn eprint_warning(msg: &str) {
    eprintln!("{}: {msg}", "WARNING".yellow().bold());
}

pub fn eprint_error(msg: &str) {
    eprintln!("{}: {msg}", "ERROR".red().bold());
}
