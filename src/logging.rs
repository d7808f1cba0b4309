//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through `tracing`. `RUST_LOG` wins when set;
//! otherwise the level follows `-v`/`-q`. User-facing progress and results
//! are printed by the commands, not logged.

use tracing_subscriber::EnvFilter;

/// Default filter directive for the given verbosity flags.
pub fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: u8, quiet: bool) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::new(level_for(verbose, quiet)),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
