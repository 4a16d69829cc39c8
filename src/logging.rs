//! Logging setup
//!
//! The terminal UI owns stdout, so real logs go to files. Debug mode (or an
//! explicit log file) enables a non-blocking file writer; otherwise warnings
//! and errors reach stderr.

use crate::error::{Result, RiskCheckError};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Prefix of rolling log files inside the log directory
const LOG_FILE_PREFIX: &str = "riskcheck.log";

/// Env var holding a full `EnvFilter` directive, e.g. `riskcheck=trace`
const FILTER_ENV: &str = "RISKCHECK_LOG";

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub debug_mode: bool,
    pub log_dir: PathBuf,
    pub level: String,
    /// Fixed log file; takes precedence over the rolling directory
    pub log_file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self {
            debug_mode: false,
            log_dir: default_log_dir(),
            level: "info".to_string(),
            log_file: None,
        }
    }

    pub fn with_debug_mode(mut self, debug: bool) -> Self {
        self.debug_mode = debug;
        self
    }

    pub fn with_log_dir(mut self, dir: PathBuf) -> Self {
        self.log_dir = dir;
        self
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_log_file(mut self, file: Option<PathBuf>) -> Self {
        self.log_file = file;
        self
    }

    /// True when logs should be written to disk
    pub fn writes_files(&self) -> bool {
        self.debug_mode || self.log_file.is_some()
    }

    /// Configured level, `info` when it does not parse
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::INFO)
    }

    /// Filter directive used when `RISKCHECK_LOG` is unset.
    ///
    /// Debug mode logs at least `debug`. Stderr output never goes below `warn`
    /// since it shares the terminal with the UI.
    pub fn default_directive(&self) -> String {
        let configured = self.level_filter();
        let level = if self.debug_mode {
            configured.max(LevelFilter::DEBUG)
        } else if self.log_file.is_some() {
            configured
        } else {
            configured.min(LevelFilter::WARN)
        };
        format!("error,riskcheck={}", level.to_string().to_lowercase())
    }
}

/// ~/.riskcheck/logs
pub fn default_log_dir() -> PathBuf {
    crate::config::riskcheck_home().join("logs")
}

/// Install the global subscriber.
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes and stops the background writer.
pub fn init_logging(config: LogConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_env(FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    if !config.writes_files() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()
            .map_err(|e| RiskCheckError::Logging {
                message: e.to_string(),
            })?;
        return Ok(None);
    }

    let appender = match &config.log_file {
        Some(file) => {
            let dir = file.parent().unwrap_or_else(|| Path::new("."));
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| LOG_FILE_PREFIX.to_string());
            std::fs::create_dir_all(dir)?;
            tracing_appender::rolling::never(dir, name)
        }
        None => {
            std::fs::create_dir_all(&config.log_dir)?;
            tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX)
        }
    };
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_thread_ids(true),
        )
        .try_init()
        .map_err(|e| RiskCheckError::Logging {
            message: e.to_string(),
        })?;

    tracing::debug!("File logging initialized ({:?})", config.log_dir);
    Ok(Some(guard))
}

/// Delete rolled log files older than `max_age_days`. Returns how many went.
pub fn cleanup_old_logs(log_dir: &Path, max_age_days: u64) -> Result<usize> {
    if !log_dir.exists() {
        return Ok(0);
    }

    let max_age = Duration::from_secs(max_age_days * 24 * 60 * 60);
    let now = SystemTime::now();
    let mut removed = 0;

    for entry in std::fs::read_dir(log_dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_log = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with(LOG_FILE_PREFIX));
        if !is_log || !path.is_file() {
            continue;
        }

        let modified = entry.metadata()?.modified()?;
        let age = now.duration_since(modified).unwrap_or_default();
        if age > max_age {
            std::fs::remove_file(&path)?;
            removed += 1;
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn test_log_config_builder() {
        let config = LogConfig::new()
            .with_debug_mode(true)
            .with_log_dir(PathBuf::from("/tmp/riskcheck-logs"))
            .with_level("warn");
        assert!(config.debug_mode);
        assert!(config.writes_files());
        assert_eq!(config.log_dir, PathBuf::from("/tmp/riskcheck-logs"));
        assert_eq!(config.default_directive(), "error,riskcheck=debug");
    }

    #[test]
    fn test_default_directive() {
        assert_eq!(LogConfig::new().default_directive(), "error,riskcheck=warn");
        assert!(!LogConfig::new().writes_files());

        let with_file = LogConfig::new()
            .with_level("warn")
            .with_log_file(Some(PathBuf::from("/tmp/rc.log")));
        assert!(with_file.writes_files());
        assert_eq!(with_file.default_directive(), "error,riskcheck=warn");
    }

    #[rstest]
    #[case(false, "error", "error,riskcheck=error")]
    #[case(false, "warn", "error,riskcheck=warn")]
    #[case(false, "trace", "error,riskcheck=warn")]
    #[case(true, "info", "error,riskcheck=debug")]
    #[case(true, "trace", "error,riskcheck=trace")]
    #[case(true, "bogus", "error,riskcheck=debug")]
    fn test_level_applies_without_log_file(
        #[case] debug: bool,
        #[case] level: &str,
        #[case] expected: &str,
    ) {
        let config = LogConfig::new().with_debug_mode(debug).with_level(level);
        assert_eq!(config.default_directive(), expected);
    }

    #[test]
    fn test_level_filter_falls_back_to_info() {
        assert_eq!(LogConfig::new().with_level("error").level_filter(), LevelFilter::ERROR);
        assert_eq!(LogConfig::new().with_level("loud").level_filter(), LevelFilter::INFO);
    }

    #[test]
    fn test_default_log_dir() {
        let dir = default_log_dir();
        assert!(dir.ends_with(".riskcheck/logs"));
    }

    #[test]
    fn test_cleanup_missing_dir() {
        let removed = cleanup_old_logs(Path::new("/no/such/riskcheck/logs"), 7).unwrap();
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_cleanup_keeps_recent_and_foreign_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("riskcheck.log.2026-10-19"), "recent").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a log").unwrap();

        let removed = cleanup_old_logs(dir.path(), 7).unwrap();
        assert_eq!(removed, 0);
        assert!(dir.path().join("riskcheck.log.2026-10-19").exists());
        assert!(dir.path().join("notes.txt").exists());
    }
}
