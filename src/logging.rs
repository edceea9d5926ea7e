//! File-backed tracing setup.
//!
//! The terminal is in raw alternate-screen mode while a game runs, so log
//! lines go to a file instead of stdout/stderr.

use crate::config::LogConfig;
use once_cell::sync::OnceCell;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<PathBuf> = OnceCell::new();

/// Initialize logging once; later calls return the path chosen the first time.
///
/// `RUST_LOG` takes precedence over the configured filter.
pub fn init(config: &LogConfig) -> anyhow::Result<PathBuf> {
    INITIALIZED
        .get_or_try_init(|| -> anyhow::Result<PathBuf> {
            let path = config.file.clone().unwrap_or_else(default_log_path);
            let file = File::create(&path)?;

            let filter = std::env::var("RUST_LOG")
                .map(EnvFilter::new)
                .unwrap_or_else(|_| EnvFilter::new(&config.filter));

            fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .ok();

            Ok(path)
        })
        .cloned()
}

fn default_log_path() -> PathBuf {
    PathBuf::from(format!(
        "reversi_{}.log",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ))
}
