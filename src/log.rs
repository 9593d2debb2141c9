// src/log.rs
// Two sinks: stderr (RUST_LOG, default info) and .store/debug.log (debug and up),
// both stamped with time since start.

use std::fs;
use std::path::Path;

use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::uptime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::consts::{DEBUG_LOG_FILE, STORE_DIR};

/// Install the global subscriber. Keep the guard alive until exit or the
/// file sink drops its tail. Returns `None` when a subscriber already exists.
pub fn init() -> Option<WorkerGuard> {
    init_in(Path::new(STORE_DIR))
}

pub fn init_in(dir: &Path) -> Option<WorkerGuard> {
    let console_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(uptime())
        .with_target(false)
        .with_filter(console_filter);

    // File sink is best effort: no directory, console only.
    let (file, guard) = match fs::create_dir_all(dir) {
        Ok(()) => {
            let appender = tracing_appender::rolling::never(dir, DEBUG_LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_timer(uptime())
                .with_filter(LevelFilter::DEBUG);
            (Some(layer), Some(guard))
        }
        Err(_) => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).try_init().ok()?;
    guard
}
