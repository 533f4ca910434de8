use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use proven_log::{Error, Result};

/// Destination of a [`crate::StdLogger`].
#[derive(Debug)]
pub(crate) enum Sink {
    Stderr,
    File(FileSink),
}

impl Sink {
    pub(crate) fn write_line(&mut self, line: &[u8]) -> Result<()> {
        match self {
            Self::Stderr => io::stderr()
                .lock()
                .write_all(line)
                .map_err(|e| Error::Io("error writing to stderr", e)),
            Self::File(file) => file.write_line(line),
        }
    }

    pub(crate) fn flush(&mut self) -> Result<()> {
        match self {
            Self::Stderr => io::stderr()
                .flush()
                .map_err(|e| Error::Io("error flushing stderr", e)),
            Self::File(file) => file.flush(),
        }
    }
}

/// Size-rotated log file with a single `.1` backup.
#[derive(Debug)]
pub(crate) struct FileSink {
    path: PathBuf,
    backup: PathBuf,
    file: Option<File>,
    size: u64,
    pub(crate) max_size: u64,
}

impl FileSink {
    pub(crate) fn open(path: PathBuf, max_size: u64) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| Error::Io("error creating log directory", e))?;
            }
        }

        let file = open_append(&path)?;
        let size = file
            .metadata()
            .map_err(|e| Error::Io("error reading log file metadata", e))?
            .len();

        Ok(Self {
            backup: backup_path(&path),
            path,
            file: Some(file),
            size,
            max_size,
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn write_line(&mut self, line: &[u8]) -> Result<()> {
        if self.file.is_none() {
            self.file = Some(open_append(&self.path)?);
        }
        if let Some(file) = self.file.as_mut() {
            file.write_all(line)
                .map_err(|e| Error::Io("error writing log file", e))?;
        }
        self.size += line.len() as u64;

        if self.size > self.max_size {
            self.rotate()?;
        }
        Ok(())
    }

    fn rotate(&mut self) -> Result<()> {
        // Close before renaming.
        if let Some(mut file) = self.file.take() {
            file.flush()
                .map_err(|e| Error::Io("error flushing log file", e))?;
        }

        if self.backup.exists() {
            fs::remove_file(&self.backup)
                .map_err(|e| Error::Io("error removing old log backup", e))?;
        }
        fs::rename(&self.path, &self.backup)
            .map_err(|e| Error::Io("error backing up log file", e))?;

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| Error::Io("error creating log file", e))?;
        self.file = Some(file);
        self.size = 0;

        tracing::debug!(path = %self.path.display(), "rotated log file");
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.file.as_mut() {
            Some(file) => file
                .flush()
                .map_err(|e| Error::Io("error flushing log file", e)),
            None => Ok(()),
        }
    }
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::Io("error opening log file", e))
}

/// `<path>.1`
pub(crate) fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".1");
    PathBuf::from(name)
}
