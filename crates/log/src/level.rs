//! Severity levels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::Error;

/// Display name used for ranks outside the known range.
pub const UNKNOWN_NAME: &str = "UNKNOWN";

/// Log severity.
///
/// Ordering follows verbosity: `Error` is the least verbose and `Trace` the
/// most. A backend with threshold `t` accepts every level `l` with `l <= t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    /// Error messages
    Error = 0,
    /// Warning messages
    Warning = 1,
    /// General information
    Info = 2,
    /// Debugging information
    Debug = 3,
    /// Verbose debugging information
    Trace = 4,
}

impl Level {
    /// All levels from least to most verbose.
    pub const ALL: [Self; 5] = [
        Self::Error,
        Self::Warning,
        Self::Info,
        Self::Debug,
        Self::Trace,
    ];

    /// Numeric rank of the level.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Level for a numeric rank, if the rank is known.
    #[must_use]
    pub const fn from_rank(rank: u8) -> Option<Self> {
        match rank {
            0 => Some(Self::Error),
            1 => Some(Self::Warning),
            2 => Some(Self::Info),
            3 => Some(Self::Debug),
            4 => Some(Self::Trace),
            _ => None,
        }
    }

    /// Upper-case name written into log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        }
    }

    /// Whether a record at `self` passes a backend configured with `threshold`.
    #[inline]
    #[must_use]
    pub fn passes(self, threshold: Self) -> bool {
        self <= threshold
    }
}

/// Display name for a raw rank, `"UNKNOWN"` when the rank is out of range.
#[must_use]
pub const fn display_name(rank: u8) -> &'static str {
    match Level::from_rank(rank) {
        Some(level) => level.as_str(),
        None => UNKNOWN_NAME,
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ERROR" => Ok(Self::Error),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "INFO" => Ok(Self::Info),
            "DEBUG" => Ok(Self::Debug),
            "TRACE" => Ok(Self::Trace),
            _ => Err(Error::UnknownLevelName(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = Error;

    fn try_from(rank: u8) -> Result<Self, Error> {
        Self::from_rank(rank).ok_or_else(|| Error::UnknownLevelName(rank.to_string()))
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
