//! Logging setup and configuration

use anyhow::Result;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use crate::config::Config;

pub const LOG_FILE_PREFIX: &str = "depth-arb.log";

/// Keeps the file writer flushing until dropped.
pub struct LoggingGuard {
    pub _guard: Option<WorkerGuard>,
}

pub fn setup_logging(config: &Config) -> Result<Arc<LoggingGuard>> {
    let (file_layer, guard) = match config.log_dir.as_deref() {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::hourly(dir, LOG_FILE_PREFIX);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_target(true)
                .with_thread_ids(false)
                .with_level(true)
                .with_ansi(false)
                .compact();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_ansi(true)
                .with_level(true),
        )
        .with(file_layer)
        .with(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?)
        .try_init()?;

    Ok(Arc::new(LoggingGuard { _guard: guard }))
}
