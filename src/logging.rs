//! Logging setup.
//!
//! The dashboard owns the terminal, so interactive runs log to a file;
//! the command-line mode logs to stderr. `RUST_LOG` overrides the level
//! given on the command line.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Returns a fresh log file path in the system temp directory.
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join(format!("secretome-{:08x}.log", rand::random::<u32>()))
}

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Sends log output to `path`, truncating it.
pub fn init_file_logging(path: &Path, default_level: &str) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Cannot create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

/// Sends log output to stderr.
pub fn init_stderr_logging(default_level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
