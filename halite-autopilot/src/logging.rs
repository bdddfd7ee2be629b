use std::env;
use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::filter::EnvFilter;

pub const DEFAULT_LOG_DIRECTIVES: &str = "info";

/// `RUST_LOG`-style directives, or `info` when none are given or they do not
/// parse.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

/// Installs the global subscriber. stdout is reserved for the engine protocol,
/// so events go to stderr or to `log_file`.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let filter = log_filter(env::var("RUST_LOG").ok().as_deref());
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}
