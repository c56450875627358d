// SPDX-License-Identifier: GPL-3.0-only

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LoggingConfig, LoggingLevel};

const DEFAULT_LOG_PREFIX: &str = "storage-inventory.log";
const KEEP_DAYS: u64 = 7;
const CRATES: &[&str] = &["storage_inventory", "storage_correlate"];

/// Install the global subscriber. Logs go to stderr so stdout stays clean for
/// the report; a rolling file is added when `log_to_disk` is set.
///
/// The returned guard flushes the file writer on drop; hold it until exit.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    if !config.log_to_disk {
        tracing_subscriber::registry()
            .with(env_filter(config.level))
            .with(stderr_layer)
            .init();
        return None;
    }

    match file_writer(config.log_dir.as_deref()) {
        Ok((writer, guard)) => {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false);

            tracing_subscriber::registry()
                .with(env_filter(config.level))
                .with(stderr_layer)
                .with(file_layer)
                .init();

            Some(guard)
        }
        Err(e) => {
            eprintln!("storage-inventory: failed to initialize file logging: {e}");
            tracing_subscriber::registry()
                .with(env_filter(config.level))
                .with(stderr_layer)
                .init();
            None
        }
    }
}

/// `RUST_LOG` wins; otherwise our crates log at the configured level and
/// everything else at warn.
fn env_filter(level: LoggingLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: LoggingLevel) -> String {
    let mut directives = vec!["warn".to_string()];
    directives.extend(
        CRATES
            .iter()
            .map(|krate| format!("{krate}={}", level.as_directive())),
    );
    directives.join(",")
}

fn file_writer(
    log_dir: Option<&Path>,
) -> std::io::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = log_dir.map(Path::to_path_buf).unwrap_or_else(default_log_dir);
    let prefix = OsString::from(DEFAULT_LOG_PREFIX);

    fs::create_dir_all(&dir)?;
    cleanup_old_logs(&dir, &prefix);

    let appender = tracing_appender::rolling::daily(&dir, &prefix);
    Ok(tracing_appender::non_blocking(appender))
}

fn default_log_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("STORAGE_INVENTORY_LOG_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(xdg_state) = std::env::var_os("XDG_STATE_HOME") {
        return PathBuf::from(xdg_state)
            .join("storage-inventory")
            .join("logs");
    }

    if let Some(home) = std::env::var_os("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("state")
            .join("storage-inventory")
            .join("logs");
    }

    std::env::temp_dir().join("storage-inventory").join("logs")
}

fn cleanup_old_logs(dir: &Path, prefix: &OsString) {
    let cutoff = SystemTime::now().checked_sub(Duration::from_secs(KEEP_DAYS * 24 * 60 * 60));
    let Some(cutoff) = cutoff else { return };

    let prefix = prefix.to_string_lossy();

    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_file() {
            continue;
        }

        // Only touch files created by our rolling appender.
        if !entry.file_name().to_string_lossy().starts_with(prefix.as_ref()) {
            continue;
        }

        let Ok(modified) = entry.metadata().and_then(|m| m.modified()) else {
            continue;
        };
        if modified >= cutoff {
            continue;
        }

        let _ = fs::remove_file(entry.path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_cover_workspace_crates() {
        assert_eq!(
            default_directives(LoggingLevel::Debug),
            "warn,storage_inventory=debug,storage_correlate=debug"
        );
    }

    #[test]
    fn cleanup_ignores_missing_directory() {
        cleanup_old_logs(
            Path::new("/nonexistent/storage-inventory/logs"),
            &OsString::from(DEFAULT_LOG_PREFIX),
        );
    }
}
