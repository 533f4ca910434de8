//! Logging section of application settings.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{Level, Result};

/// Settings tree consumed by [`crate::Logger::set_levels`].
///
/// Only the `logging` key is read; anything else in the tree is ignored, so
/// this can be deserialized straight out of an application's config file.
///
/// ```
/// use proven_log::{Level, LevelSection, Settings};
///
/// let settings = Settings::from_toml_str(r#"
///     [logging]
///     net = "debug"
///     storage = "warning"
/// "#).unwrap();
///
/// let Some(LevelSection::Modules(modules)) = settings.logging else { panic!() };
/// assert_eq!(modules["net"], Level::Debug);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// The `logging` section, if present
    #[serde(default)]
    pub logging: Option<LevelSection>,
}

/// Contents of the `logging` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LevelSection {
    /// `logging = "info"`
    Global(Level),
    /// `[logging]` table of module name to level, in declaration order
    Modules(IndexMap<String, Level>),
}

impl Settings {
    /// Settings with a single global level.
    #[must_use]
    pub const fn global(level: Level) -> Self {
        Self {
            logging: Some(LevelSection::Global(level)),
        }
    }

    /// Settings with one level per module.
    pub fn modules<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = (S, Level)>,
        S: Into<String>,
    {
        Self {
            logging: Some(LevelSection::Modules(
                levels.into_iter().map(|(m, l)| (m.into(), l)).collect(),
            )),
        }
    }

    /// Parses settings from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Settings`] if the text is not valid TOML or a
    /// level name is unknown.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

impl LevelSection {
    /// The level a single-threshold backend applies: the global level, or
    /// the first module entry.
    #[must_use]
    pub fn first_level(&self) -> Option<Level> {
        match self {
            Self::Global(level) => Some(*level),
            Self::Modules(modules) => modules.values().next().copied(),
        }
    }
}
