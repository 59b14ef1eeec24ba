//! Logging and tracing setup.
//!
//! Human-readable logs go to stderr, filtered by `RUST_LOG` or the
//! quiet/verbose flags. When a log location is known (flag, env var, config,
//! or the platform data directory) a JSONL copy is written there through a
//! non-blocking appender; the returned guard must stay alive for the
//! process lifetime so buffered lines get flushed.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// File name for the rolling JSONL log.
const LOG_FILE_NAME: &str = "alletaal-lint.jsonl";

/// Where file logging should go, resolved from env and config.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// Explicit log file path (`ALLETAAL_LINT_LOG_PATH`).
    pub log_path: Option<PathBuf>,
    /// Log directory (`ALLETAAL_LINT_LOG_DIR`, else config `log_dir`).
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve from environment variables, with the config file's `log_dir`
    /// as fallback.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self {
            log_path: std::env::var_os("ALLETAAL_LINT_LOG_PATH").map(PathBuf::from),
            log_dir: std::env::var_os("ALLETAAL_LINT_LOG_DIR")
                .map(PathBuf::from)
                .or(config_log_dir),
        }
    }

    /// The directory and file name to log to, if any.
    fn log_target(&self) -> Option<(PathBuf, String)> {
        if let Some(ref path) = self.log_path {
            let dir = path.parent().map_or_else(|| PathBuf::from("."), PathBuf::from);
            let file = path
                .file_name()
                .map_or_else(|| LOG_FILE_NAME.to_string(), |n| n.to_string_lossy().into_owned());
            return Some((dir, file));
        }
        if let Some(ref dir) = self.log_dir {
            return Some((dir.clone(), LOG_FILE_NAME.to_string()));
        }
        // Platform default, e.g. ~/.local/share/alletaal-lint/logs
        let data_dir = alletaal_lint_core::config::user_data_local_dir()?;
        Some((data_dir.join("logs").into_std_path_buf(), LOG_FILE_NAME.to_string()))
    }
}

/// Build the log filter from CLI flags and the configured level.
///
/// `RUST_LOG` wins when set; otherwise `--quiet` forces errors only and
/// each `-v` steps the level up from the configured default.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let directive = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::new(directive)
}

/// Install the global subscriber: stderr output plus optional JSONL file.
///
/// Returns the appender guard when file logging is active. File logging
/// failures degrade to stderr-only rather than aborting the command.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match config.log_target() {
        Some((dir, file_name)) if std::fs::create_dir_all(&dir).is_ok() => {
            let appender = tracing_appender::rolling::daily(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to set global subscriber: {e}"))?;

    Ok(guard)
}
