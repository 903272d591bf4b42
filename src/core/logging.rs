//! Logging setup.
//!
//! JSON logs go to a daily rolling file under the user data directory.
//! `log` macros are bridged into `tracing`. Rolled files from earlier days
//! are gzip-compressed on a background thread at startup.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const APP_DIR: &str = "launchdeck";
const LOG_FILE: &str = "launchdeck.log";

/// Directory the rolling log files are written to.
pub fn log_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR).join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

fn prepare_log_dir() -> PathBuf {
    let log_dir = log_dir();
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Failed to create logs directory: {}", e);
        }
    }
    log_dir
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,launchdeck=debug"))
}

fn finish_init(log_dir: PathBuf) {
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize LogTracer: {}", e);
    }

    let dir = log_dir.clone();
    std::thread::spawn(move || compress_old_logs(&dir));

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE)
    );
}

/// Initialize logging with a pretty stdout layer alongside the file.
///
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init() -> WorkerGuard {
    let log_dir = prepare_log_dir();
    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = env_filter();
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(filter.clone());

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .pretty()
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .init();

    finish_init(log_dir);
    guard
}

/// Initialize logging for the terminal UI: file only, ratatui owns stdout.
pub fn init_tui() -> WorkerGuard {
    let log_dir = prepare_log_dir();
    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter());

    tracing_subscriber::registry().with(file_layer).init();

    finish_init(log_dir);
    guard
}

/// Rolled files look like `launchdeck.log.YYYY-MM-DD`; today's stays open.
fn should_compress(file_name: &str, today_suffix: &str) -> bool {
    file_name
        .strip_prefix(LOG_FILE)
        .and_then(|rest| rest.strip_prefix('.'))
        .is_some_and(|date| !date.is_empty() && date != today_suffix && !date.ends_with(".gz"))
}

fn compress_old_logs(log_dir: &Path) {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();

    let Ok(entries) = fs::read_dir(log_dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, &today_suffix) {
            continue;
        }
        match compress_file(&path) {
            Ok(()) => log::info!("Compressed old log: {:?}", path),
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }
}

fn compress_file(path: &Path) -> io::Result<()> {
    let mut reader = io::BufReader::new(fs::File::open(path)?);

    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let gz_path = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?
        .join(gz_name);

    if gz_path.exists() {
        return Ok(());
    }

    let mut encoder = GzEncoder::new(fs::File::create(&gz_path)?, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn test_should_compress() {
        let today = "2025-03-04";
        assert!(should_compress("launchdeck.log.2025-03-03", today));
        assert!(!should_compress("launchdeck.log.2025-03-04", today));
        assert!(!should_compress("launchdeck.log.2025-03-03.gz", today));
        assert!(!should_compress("launchdeck.log", today));
        assert!(!should_compress("other.log.2025-03-03", today));
    }

    #[test]
    fn test_compress_file_replaces_original() {
        let dir = std::env::temp_dir().join(format!("launchdeck-logs-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("launchdeck.log.2025-01-01");
        fs::write(&path, b"{\"msg\":\"hello\"}\n").unwrap();

        compress_file(&path).unwrap();

        assert!(!path.exists());
        let gz = fs::File::open(dir.join("launchdeck.log.2025-01-01.gz")).unwrap();
        let mut text = String::new();
        GzDecoder::new(gz).read_to_string(&mut text).unwrap();
        assert_eq!(text, "{\"msg\":\"hello\"}\n");

        fs::remove_dir_all(&dir).unwrap();
    }
}
