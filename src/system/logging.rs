//! Logging system initialization
//!
//! Builds the global tracing subscriber from the `[logging]` section:
//! stdout, a plain append-only file or a daily rolling file, text or JSON.

use std::io::Write;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::errors::{LinkboardError, Result};

type BoxedWriter = Box<dyn Write + Send + Sync>;

fn open_writer(logging: &LoggingConfig) -> Result<BoxedWriter> {
    let Some(log_file) = logging.file.as_deref().filter(|f| !f.is_empty()) else {
        return Ok(Box::new(std::io::stdout()));
    };
    let path = Path::new(log_file);

    if !logging.enable_rotation {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LinkboardError::file_operation(format!("无法打开日志文件 {}: {}", log_file, e))
            })?;
        return Ok(Box::new(file));
    }

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let prefix = path
        .file_stem()
        .and_then(|f| f.to_str())
        .unwrap_or("linkboard");
    let appender = rolling::Builder::new()
        .rotation(rolling::Rotation::DAILY)
        .filename_prefix(prefix)
        .filename_suffix("log")
        .max_log_files(logging.max_backups.max(1) as usize)
        .build(dir)
        .map_err(|e| {
            LinkboardError::file_operation(format!("无法创建滚动日志 {}: {}", log_file, e))
        })?;
    Ok(Box::new(appender))
}

/// Initialize the global subscriber
///
/// `RUST_LOG` takes precedence over `logging.level`. Call once, after the
/// configuration has been loaded.
///
/// # Returns
/// * `WorkerGuard` - Must be kept alive for the duration of the program
///   to ensure non-blocking log writes are flushed
pub fn init_logging(logging: &LoggingConfig) -> Result<WorkerGuard> {
    let to_console = logging.file.as_deref().is_none_or(str::is_empty);
    let (writer, guard) = tracing_appender::non_blocking(open_writer(logging)?);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(to_console);

    let installed = if logging.format.eq_ignore_ascii_case("json") {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| {
        LinkboardError::file_operation(format!("日志系统初始化失败: {}", e))
    })?;

    Ok(guard)
}
