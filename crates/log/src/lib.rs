//! Level-gated, module-scoped logging facade.
//!
//! Call sites go through the dispatch macros ([`error!`], [`warn!`],
//! [`info!`], [`debug!`], [`trace!`], [`log!`]). Each one asks the current
//! [`Logger`] whether the record is enabled before the message is formatted,
//! then hands a [`Record`] to the backend.
//!
//! Messages use `boost::format` style templates. Arguments can be scalars,
//! sequences, sets or maps:
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! let ports: BTreeMap<_, _> = [("http", 80), ("https", 443)].into_iter().collect();
//! assert_eq!(proven_log::txt!("ports %s", ports), "ports http:80,https:443");
//! assert_eq!(proven_log::txt!("%1% then %2%", "a"), "%1% then %2%");
//! ```
//!
//! Backends live in their own crates (`proven-log-std`, `proven-log-tracing`).
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod arg;
mod error;
mod formatter;
mod holder;
pub mod level;
mod logger;
mod macros;
mod record;
mod settings;
mod template;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use arg::{Arg, Shown, ToArg, Utf16};
pub use error::{Error, Result};
pub use formatter::{MessageFormatter, format};
pub use holder::{CurrentLog, CurrentLogGuard};
pub use level::{Level, display_name};
pub use logger::Logger;
pub use macros::AsLogger;
pub use record::{Location, Record};
pub use settings::{LevelSection, Settings};

#[doc(hidden)]
pub mod __private {
    pub use crate::macros::{AsLogger, dispatch, report};
    pub use crate::record::trim_function_name;
}
