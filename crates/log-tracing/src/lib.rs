//! Adapter handing records to a `tracing` engine.
//!
//! The engine is a private [`Dispatch`] built from an [`EngineConfig`]: a
//! `tracing-subscriber` registry with one formatting layer per appender.
//! Thresholds are kept here with per-module overrides, so the engine only
//! sees records that already passed the gate.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod config;
mod error;
mod thresholds;

pub use config::{AppenderConfig, EngineConfig};
pub use error::{Error, Result};

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use proven_log::{Level, LevelSection, Logger, Record, Settings};
use tracing::Dispatch;
use tracing::dispatcher;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;

use crate::thresholds::Thresholds;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

struct Engine {
    dispatch: Dispatch,
    files: Vec<PathBuf>,
}

impl Engine {
    fn build(config: &EngineConfig) -> Result<Self> {
        let mut layers: Vec<BoxedLayer> = Vec::with_capacity(config.appenders.len());
        for appender in &config.appenders {
            let layer: BoxedLayer = match appender {
                AppenderConfig::Stderr => fmt::layer().with_writer(io::stderr).boxed(),
                AppenderConfig::Stdout => fmt::layer().with_writer(io::stdout).boxed(),
                AppenderConfig::File { path, append } => {
                    let file = open_appender_file(path, *append)?;
                    fmt::layer()
                        .with_writer(std::sync::Mutex::new(file))
                        .with_ansi(false)
                        .boxed()
                }
            };
            layers.push(layer);
        }

        let subscriber = tracing_subscriber::registry().with(layers);

        Ok(Self {
            dispatch: Dispatch::new(subscriber),
            files: config.file_paths().map(Path::to_path_buf).collect(),
        })
    }
}

fn open_appender_file(path: &Path, append: bool) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::Io("error creating appender folder", e))?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }

    options
        .open(path)
        .map_err(|e| Error::Io("error opening appender file", e))
}

/// Logger backed by a private `tracing` dispatcher.
pub struct TracingLogger {
    engine: Option<Engine>,
    thresholds: RwLock<Thresholds>,
}

impl std::fmt::Debug for TracingLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TracingLogger")
            .field("open", &self.is_open())
            .field("files", &self.engine.as_ref().map(|e| &e.files))
            .field("thresholds", &*self.thresholds.read())
            .finish()
    }
}

impl TracingLogger {
    /// Console output at `level`, plus `file` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its folder cannot be created.
    pub fn new(level: Level, file: Option<PathBuf>) -> Result<Self> {
        Self::from_config(&EngineConfig::basic(level, file))
    }

    /// Builds the engine from an already parsed configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a file appender cannot be opened.
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        let engine = Engine::build(config)?;

        let mut thresholds = Thresholds::new(config.level);
        for (module, level) in &config.modules {
            thresholds.set_module(module.as_str(), *level);
        }

        Ok(Self {
            engine: Some(engine),
            thresholds: RwLock::new(thresholds),
        })
    }

    /// Reads the engine configuration at `path`.
    ///
    /// If `path` is not an existing file the logger is left closed and
    /// never enables anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or a
    /// file appender cannot be opened.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "engine config not found, logging disabled");
            return Ok(Self::closed());
        }

        let config = EngineConfig::from_file(path)?;
        Self::from_config(&config)
    }

    fn closed() -> Self {
        Self {
            engine: None,
            thresholds: RwLock::new(Thresholds::new(Level::Error)),
        }
    }

    /// Whether the engine was configured.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.engine.is_some()
    }

    /// Threshold currently applied to `module`.
    #[must_use]
    pub fn level_for(&self, module: &str) -> Level {
        self.thresholds.read().effective(module)
    }
}

impl Logger for TracingLogger {
    fn is_enabled(&self, module: &str, level: Level) -> bool {
        self.is_open() && level.passes(self.level_for(module))
    }

    fn log_folder(&self, _module: &str) -> proven_log::Result<PathBuf> {
        let first = self
            .engine
            .as_ref()
            .and_then(|engine| engine.files.first())
            .ok_or(proven_log::Error::LogFolderUnavailable)?;

        let absolute = std::path::absolute(first)
            .map_err(|e| proven_log::Error::Io("error resolving appender path", e))?;

        absolute
            .parent()
            .map(Path::to_path_buf)
            .ok_or(proven_log::Error::LogFolderUnavailable)
    }

    fn write(&self, record: &Record<'_>) -> proven_log::Result<()> {
        let Some(engine) = &self.engine else {
            return Ok(());
        };
        if !self.is_enabled(record.module, record.level) {
            return Ok(());
        }

        dispatcher::with_default(&engine.dispatch, || emit(record));
        Ok(())
    }

    fn set_level(&self, level: Level) {
        *self.thresholds.write() = Thresholds::new(level);
    }

    fn set_levels(&self, settings: &Settings) -> proven_log::Result<()> {
        match &settings.logging {
            Some(LevelSection::Modules(modules)) => {
                let mut thresholds = self.thresholds.write();
                for (module, level) in modules {
                    thresholds.set_module(module.as_str(), *level);
                }
            }
            Some(LevelSection::Global(level)) => self.set_level(*level),
            None => {}
        }
        Ok(())
    }
}

fn emit(record: &Record<'_>) {
    let module = record.module;
    let function = record.location.function;
    let file = record.location.file;
    let line = record.location.line;
    let text = record.text;

    macro_rules! event {
        ($level:expr) => {
            tracing::event!(
                target: "proven_log",
                $level,
                module = %module,
                function = %function,
                file = %file,
                line,
                "{}",
                text
            )
        };
    }

    match record.level {
        Level::Error => event!(tracing::Level::ERROR),
        Level::Warning => event!(tracing::Level::WARN),
        Level::Info => event!(tracing::Level::INFO),
        Level::Debug => event!(tracing::Level::DEBUG),
        Level::Trace => event!(tracing::Level::TRACE),
    }
}
