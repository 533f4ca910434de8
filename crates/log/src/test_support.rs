//! Test support utilities
//!
//! This module provides a logger that keeps every record in memory.
//! It's only available with the `test-support` feature.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::{Error, Level, LevelSection, Location, Logger, Record, Result, Settings};

/// An owned copy of a written record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRecord {
    /// Module tag
    pub module: String,
    /// Log level
    pub level: Level,
    /// Formatted message
    pub text: String,
    /// Call site
    pub location: Location,
}

#[derive(Debug)]
struct Inner {
    level: RwLock<Level>,
    modules: RwLock<HashMap<String, Level>>,
    records: Mutex<Vec<CapturedRecord>>,
    probes: AtomicUsize,
    folder: Option<PathBuf>,
}

/// A logger that captures all records in memory for testing.
///
/// Clones share the same buffer, so a test can install one clone and inspect
/// another.
#[derive(Debug, Clone)]
pub struct CaptureLogger {
    inner: Arc<Inner>,
}

impl CaptureLogger {
    /// Create a new capture logger accepting every level
    #[must_use]
    pub fn new() -> Self {
        Self::build(Level::Trace, None)
    }

    /// Create with a specific threshold
    #[must_use]
    pub fn with_level(level: Level) -> Self {
        Self::build(level, None)
    }

    /// Create a logger that reports `folder` from [`Logger::log_folder`]
    #[must_use]
    pub fn with_folder(folder: impl Into<PathBuf>) -> Self {
        Self::build(Level::Trace, Some(folder.into()))
    }

    fn build(level: Level, folder: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(Inner {
                level: RwLock::new(level),
                modules: RwLock::new(HashMap::new()),
                records: Mutex::new(Vec::new()),
                probes: AtomicUsize::new(0),
                folder,
            }),
        }
    }

    /// All records written so far
    #[must_use]
    pub fn records(&self) -> Vec<CapturedRecord> {
        self.inner.records.lock().clone()
    }

    /// Texts of all records written so far
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.inner
            .records
            .lock()
            .iter()
            .map(|r| r.text.clone())
            .collect()
    }

    /// Check if any record contains a specific string
    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.inner.records.lock().iter().any(|r| r.text.contains(text))
    }

    /// Number of `is_enabled` calls made against this logger
    #[must_use]
    pub fn probes(&self) -> usize {
        self.inner.probes.load(Ordering::Relaxed)
    }

    /// Clear captured records and the probe counter
    pub fn clear(&self) {
        self.inner.records.lock().clear();
        self.inner.probes.store(0, Ordering::Relaxed);
    }
}

impl Default for CaptureLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for CaptureLogger {
    fn is_enabled(&self, module: &str, level: Level) -> bool {
        self.inner.probes.fetch_add(1, Ordering::Relaxed);
        let threshold = self
            .inner
            .modules
            .read()
            .get(module)
            .copied()
            .unwrap_or_else(|| *self.inner.level.read());
        level.passes(threshold)
    }

    fn log_folder(&self, _module: &str) -> Result<PathBuf> {
        self.inner
            .folder
            .clone()
            .ok_or(Error::LogFolderUnavailable)
    }

    fn write(&self, record: &Record<'_>) -> Result<()> {
        self.inner.records.lock().push(CapturedRecord {
            module: record.module.to_string(),
            level: record.level,
            text: record.text.to_string(),
            location: record.location,
        });
        Ok(())
    }

    fn set_level(&self, level: Level) {
        *self.inner.level.write() = level;
    }

    fn set_levels(&self, settings: &Settings) -> Result<()> {
        match &settings.logging {
            Some(LevelSection::Global(level)) => self.set_level(*level),
            Some(LevelSection::Modules(modules)) => {
                let mut current = self.inner.modules.write();
                for (module, level) in modules {
                    current.insert(module.clone(), *level);
                }
            }
            None => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CurrentLog;

    #[test]
    fn test_macros_reach_scoped_logger() {
        let capture = CaptureLogger::with_level(Level::Info);
        let _guard = CurrentLog::scoped(Arc::new(capture.clone()));

        crate::info!(module: "net", "peer %s joined", "n1");
        crate::debug!(module: "net", "hidden");
        crate::error!("no module tag");

        let records = capture.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].module, "net");
        assert_eq!(records[0].text, "peer n1 joined");
        assert_eq!(records[1].module, module_path!());
        assert_eq!(records[1].level, Level::Error);
        assert_eq!(capture.probes(), 3);
    }

    #[test]
    fn test_module_levels_override_global() {
        let capture = CaptureLogger::with_level(Level::Warning);
        capture
            .set_levels(&Settings::modules([("disk", Level::Trace)]))
            .unwrap();

        assert!(capture.is_enabled("disk", Level::Trace));
        assert!(!capture.is_enabled("net", Level::Info));

        capture.set_levels(&Settings::global(Level::Debug)).unwrap();
        assert!(capture.is_enabled("net", Level::Debug));
    }

    #[test]
    fn test_clear_and_folder() {
        let capture = CaptureLogger::with_folder("/var/log/node");
        let shared = Arc::new(capture.clone());
        crate::trace!(logger: shared, "one");
        assert!(capture.contains("one"));

        capture.clear();
        assert!(capture.texts().is_empty());
        assert_eq!(capture.probes(), 0);
        assert_eq!(
            capture.log_folder("any").unwrap(),
            PathBuf::from("/var/log/node")
        );
        assert!(matches!(
            CaptureLogger::new().log_folder("any"),
            Err(Error::LogFolderUnavailable)
        ));
    }
}
