use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use chrono::Local;

use crate::constants::{LOG_LEVEL_ENV, MAX_LOG_FILES};
use crate::error::{TalkError, TalkResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Error => "ERROR",
        })
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "error" => Ok(Level::Error),
            other => Err(format!("Unknown log level '{}'", other)),
        }
    }
}

struct Logger {
    path: PathBuf,
    min_level: Level,
}

lazy_static::lazy_static! {
    static ref LOGGER: Mutex<Option<Logger>> = Mutex::new(None);
}

pub fn log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("tester-talk")
        .join("logs")
}

/// Starts a new log file for this run. `TESTER_TALK_LOG` sets the minimum
/// level (debug by default).
pub fn init_logging() -> TalkResult<PathBuf> {
    let min_level = std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(Level::Debug);
    init_logging_in(&log_dir(), min_level)
}

pub fn init_logging_in(dir: &Path, min_level: Level) -> TalkResult<PathBuf> {
    fs::create_dir_all(dir)?;
    prune_old_logs(dir, MAX_LOG_FILES.saturating_sub(1));

    let path = dir.join(format!("testertalk-{}.log", Local::now().format("%Y%m%d-%H%M%S")));
    let mut logger = LOGGER
        .lock()
        .map_err(|_| TalkError::StateError("Logger lock poisoned".to_string()))?;
    *logger = Some(Logger {
        path: path.clone(),
        min_level,
    });
    drop(logger);

    log_info(&format!("Logging initialized to: {}", path.display()));
    Ok(path)
}

/// Deletes the oldest `testertalk-*.log` files until at most `keep` remain.
/// Returns how many were removed.
pub fn prune_old_logs(dir: &Path, keep: usize) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };

    // Timestamped names sort chronologically
    let mut logs: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("testertalk-") && n.ends_with(".log"))
        })
        .collect();
    logs.sort();

    let excess = logs.len().saturating_sub(keep);
    logs.iter()
        .take(excess)
        .filter(|path| fs::remove_file(path).is_ok())
        .count()
}

pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        log_panic_info(info);
        default_hook(info);
    }));
}

pub fn log_error(message: &str) {
    log_with_level(Level::Error, message);
}

pub fn log_info(message: &str) {
    log_with_level(Level::Info, message);
}

pub fn log_debug(message: &str) {
    log_with_level(Level::Debug, message);
}

pub fn log_panic_info(info: &std::panic::PanicInfo) {
    let location = info
        .location()
        .map(|l| format!("at {}:{}:{} - ", l.file(), l.line(), l.column()))
        .unwrap_or_default();
    let payload = info
        .payload()
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| info.payload().downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "Unknown panic payload".to_string());

    log_error(&format!("PANIC: {}{}", location, payload));
    log_debug(&format!("Backtrace:\n{}", std::backtrace::Backtrace::capture()));
}

/// Appends one line to the current log file. Nothing goes to stderr while
/// the terminal UI owns the screen.
fn log_with_level(level: Level, message: &str) {
    let path = match LOGGER.lock() {
        Ok(guard) => match guard.as_ref() {
            Some(logger) if level >= logger.min_level => logger.path.clone(),
            _ => return,
        },
        Err(_) => return,
    };

    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let _ = writeln!(file, "[{}] {} - {}", timestamp, level, message);
    }
}

pub fn get_log_file_path() -> Option<PathBuf> {
    LOGGER
        .lock()
        .ok()
        .and_then(|guard| guard.as_ref().map(|l| l.path.clone()))
}
