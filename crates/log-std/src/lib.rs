//! Console or file logger with size-based rotation.
//!
//! Every record becomes one line:
//!
//! ```text
//! [LEVEL][YYYY-MM-DD HH:MM:SS.ffffff][module][thread-id] text /* function */
//! ```
//!
//! Lines are written under a single lock, so concurrent writers never
//! interleave. When the file grows past the size limit it is moved to
//! `<path>.1` (replacing any older backup) and a fresh file is started.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod sink;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

use parking_lot::Mutex;
use proven_log::{Error, LevelSection, Level, Logger, Record, Result, Settings};

use crate::sink::{FileSink, Sink};

/// Size after which the log file is rotated.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100_000_000;

/// Threshold used when none is configured.
pub const DEFAULT_LEVEL: Level = Level::Info;

/// Root of per-module folders when logging to the console.
pub const DEFAULT_LOG_ROOT: &str = "log";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Logger writing to stderr or to a single rotated file.
///
/// One threshold applies to every module.
#[derive(Debug)]
pub struct StdLogger {
    level: AtomicU8,
    log_root: PathBuf,
    sink: Mutex<Sink>,
}

impl StdLogger {
    /// Creates a logger writing to `path`, or to stderr when `path` is
    /// `None` or empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the log directory or file cannot be created, or
    /// the startup banner cannot be written.
    pub fn new(level: Level, path: Option<PathBuf>) -> Result<Self> {
        let sink = match path.filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => Sink::File(FileSink::open(path, DEFAULT_MAX_FILE_SIZE)?),
            None => Sink::Stderr,
        };

        let logger = Self {
            level: AtomicU8::new(level.rank()),
            log_root: PathBuf::from(DEFAULT_LOG_ROOT),
            sink: Mutex::new(sink),
        };
        logger.write_banner()?;
        Ok(logger)
    }

    /// Creates a logger writing to stderr.
    ///
    /// # Errors
    ///
    /// Returns an error if the startup banner cannot be written.
    pub fn stderr(level: Level) -> Result<Self> {
        Self::new(level, None)
    }

    /// Creates a logger appending to the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the log directory or file cannot be created.
    pub fn file(level: Level, path: impl Into<PathBuf>) -> Result<Self> {
        Self::new(level, Some(path.into()))
    }

    /// Sets the size after which the file is rotated.
    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        if let Sink::File(file) = self.sink.get_mut() {
            file.max_size = bytes;
        }
        self
    }

    /// Sets the root of per-module folders used when logging to stderr.
    #[must_use]
    pub fn with_log_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.log_root = root.into();
        self
    }

    /// Current threshold.
    #[must_use]
    pub fn level(&self) -> Level {
        Level::from_rank(self.level.load(Ordering::Relaxed)).unwrap_or(DEFAULT_LEVEL)
    }

    /// Path of the log file, if logging to a file.
    #[must_use]
    pub fn path(&self) -> Option<PathBuf> {
        match &*self.sink.lock() {
            Sink::File(file) => Some(file.path().to_path_buf()),
            Sink::Stderr => None,
        }
    }

    fn write_banner(&self) -> Result<()> {
        let line = format!("[{}] Started.\n", timestamp());
        self.sink.lock().write_line(line.as_bytes())
    }
}

impl Logger for StdLogger {
    #[inline]
    fn is_enabled(&self, _module: &str, level: Level) -> bool {
        level.passes(self.level())
    }

    fn log_folder(&self, module: &str) -> Result<PathBuf> {
        let folder = match self.path() {
            Some(path) => match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            },
            None => self.log_root.join(module),
        };
        ensure_dir(&folder)?;
        Ok(folder)
    }

    fn write(&self, record: &Record<'_>) -> Result<()> {
        let mut sink = self.sink.lock();
        let line = format_line(record);
        sink.write_line(line.as_bytes())
    }

    fn set_level(&self, level: Level) {
        self.level.store(level.rank(), Ordering::Relaxed);
    }

    fn set_levels(&self, settings: &Settings) -> Result<()> {
        let Some(section) = &settings.logging else {
            return Ok(());
        };
        if let LevelSection::Modules(modules) = section {
            if modules.len() > 1 {
                tracing::debug!(
                    entries = modules.len(),
                    "single-threshold logger applies only the first logging entry"
                );
            }
        }
        if let Some(level) = section.first_level() {
            self.set_level(level);
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.sink.lock().flush()
    }
}

fn ensure_dir(folder: &Path) -> Result<()> {
    if !folder.exists() {
        fs::create_dir_all(folder).map_err(|e| Error::Io("error creating log folder", e))?;
    }
    Ok(())
}

fn timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_ID: u64 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
}

/// Process-unique number of the current thread, assigned on its first record.
fn thread_id() -> u64 {
    THREAD_ID.try_with(|id| *id).unwrap_or(0)
}

fn format_line(record: &Record<'_>) -> String {
    format!(
        "[{}][{}][{}][{}] {} /* {} */\n",
        record.level,
        timestamp(),
        record.module,
        thread_id(),
        record.text,
        record.location.function
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proven_log::Location;

    #[test]
    fn test_thread_id_is_stable_per_thread() {
        let here = thread_id();
        assert_eq!(thread_id(), here);

        let other = std::thread::spawn(thread_id).join().unwrap();
        assert_ne!(other, here);
        assert!(here > 0 && other > 0);
    }

    #[test]
    fn test_stderr_logger_default_level() {
        let logger = StdLogger::stderr(DEFAULT_LEVEL).unwrap();
        assert_eq!(logger.level(), Level::Info);
        assert!(logger.path().is_none());
        assert!(logger.is_enabled("any", Level::Info));
        assert!(!logger.is_enabled("any", Level::Debug));
    }

    #[test]
    fn test_line_layout() {
        let record = Record::new(
            "net",
            Level::Warning,
            "peer lost",
            Location::new("src/net.rs", 7, "node::net::poll"),
        );
        let line = format_line(&record);

        assert!(line.starts_with("[WARN]["));
        assert!(line.contains("][net]["));
        assert!(line.ends_with("] peer lost /* node::net::poll */\n"));
    }
}
