//! Logging system initialization
//!
//! Sets up the global tracing subscriber from [`LoggingConfig`].

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

use crate::config::LoggingConfig;
use crate::errors::{ChoteError, Result};

type BoxedWriter = Box<dyn std::io::Write + Send + Sync>;

/// Initialize logging system based on configuration
///
/// Output goes to stdout unless `logging.file` is set; with
/// `enable_rotation` the file rolls daily and keeps `max_backups` files.
///
/// The returned `WorkerGuard` must be kept alive for the duration of the
/// program so that buffered lines are flushed. Call once, after the
/// configuration has been loaded.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let writer = build_writer(config)?;
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| ChoteError::config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let subscriber_builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(log_file(config).is_none());

    let installed = if config.format == "json" {
        subscriber_builder.json().try_init()
    } else {
        subscriber_builder.try_init()
    };
    installed.map_err(|e| ChoteError::config(format!("Failed to install logger: {}", e)))?;

    Ok(guard)
}

// 空字符串视为未配置
fn log_file(config: &LoggingConfig) -> Option<&str> {
    config.file.as_deref().filter(|f| !f.is_empty())
}

fn build_writer(config: &LoggingConfig) -> Result<BoxedWriter> {
    let Some(log_file) = log_file(config) else {
        return Ok(Box::new(std::io::stdout()));
    };

    if config.enable_rotation {
        let path = Path::new(log_file);
        let dir = path.parent().unwrap_or(Path::new("."));
        let prefix = path
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("chote.log")
            .trim_end_matches(".log")
            .to_string();
        let appender = rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(prefix)
            .filename_suffix("log")
            .max_log_files(config.max_backups as usize)
            .build(dir)
            .map_err(|e| {
                ChoteError::file_operation(format!(
                    "Failed to create rolling log appender in {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        return Ok(Box::new(appender));
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| {
            ChoteError::file_operation(format!("Failed to open log file {}: {}", log_file, e))
        })?;
    Ok(Box::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn logging(file: Option<&str>, enable_rotation: bool) -> LoggingConfig {
        LoggingConfig {
            file: file.map(String::from),
            enable_rotation,
            ..LoggingConfig::default()
        }
    }

    #[test]
    fn test_empty_file_name_means_console() {
        assert!(log_file(&logging(Some(""), false)).is_none());
        assert!(log_file(&logging(None, false)).is_none());
        assert_eq!(log_file(&logging(Some("a.log"), false)), Some("a.log"));
    }

    #[test]
    fn test_build_writer_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chote.log");
        let config = logging(path.to_str(), false);

        let mut writer = build_writer(&config).unwrap();
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_build_writer_unopenable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("chote.log");
        let config = logging(path.to_str(), false);

        let err = build_writer(&config).err().unwrap();
        assert_eq!(err.code(), "E401");
    }
}
