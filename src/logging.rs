//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never mix into the streamed answer on stdout.
//! `RUST_LOG` wins over the `--verbose` flag; without either, logging is off
//! and the transcript stays clean.

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// Calling it more than once is harmless: later calls are ignored.
pub fn init(verbose: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

const fn default_directive(verbose: bool) -> &'static str {
    if verbose { "termchat_cli=debug" } else { "off" }
}
