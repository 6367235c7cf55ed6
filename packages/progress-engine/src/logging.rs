//! Subscriber setup for hosts embedding the engine.
//!
//! The engine itself only emits `tracing` events; installing a subscriber is
//! left to the host, which can use [`init_tracing`] or bring its own.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ProgressConfig;

const LOG_FILE_PREFIX: &str = "progress.log";
const FALLBACK_LEVEL: &str = "info";

/// Keeps the non-blocking file writer flushing until dropped.
pub struct FileLogGuard {
    _guard: WorkerGuard,
    pub directory: PathBuf,
}

pub fn file_logging_enabled() -> bool {
    std::env::var("PROGRESS_FILE_LOGS")
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

pub fn log_directory() -> PathBuf {
    std::env::var_os("PROGRESS_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Parses a filter directive, falling back to `info` when it is malformed.
pub fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(FALLBACK_LEVEL))
}

pub fn init_from_config(config: &ProgressConfig) -> Option<FileLogGuard> {
    init_tracing(&config.log_level)
}

/// Installs the global subscriber. A second call keeps the first subscriber.
///
/// Returns a guard only when this call installed the file layer.
pub fn init_tracing(log_level: &str) -> Option<FileLogGuard> {
    let stdout_layer = fmt::layer().with_target(true);

    if file_logging_enabled() {
        let directory = log_directory();
        match std::fs::create_dir_all(&directory) {
            Ok(()) => {
                let appender = RollingFileAppender::new(Rotation::DAILY, &directory, LOG_FILE_PREFIX);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file_layer = fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .with_target(true);

                let installed = tracing_subscriber::registry()
                    .with(env_filter(log_level))
                    .with(stdout_layer)
                    .with(file_layer)
                    .try_init()
                    .is_ok();

                return installed.then(|| FileLogGuard {
                    _guard: guard,
                    directory,
                });
            }
            Err(err) => {
                eprintln!("failed to create log directory {}: {err}", directory.display());
            }
        }
    }

    let _ = tracing_subscriber::registry()
        .with(env_filter(log_level))
        .with(stdout_layer)
        .try_init();

    None
}
