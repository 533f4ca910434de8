//! Level-gated dispatch.
//!
//! Every macro checks [`Logger::is_enabled`] first. Arguments are evaluated
//! and formatted only when the check passes, so a disabled call costs one
//! holder lookup and one `is_enabled` call.
//!
//! ```
//! use proven_log::{info, warn, Level};
//!
//! let peers = vec!["a", "b"];
//! info!("connected to %s", peers);
//! warn!(module: "storage", "disk %1% is %2%%% full", "sda", 93);
//! proven_log::log!(Level::Debug, "no arguments, so 100% is literal");
//! ```

use std::sync::Arc;

use crate::{Level, Location, Logger, Record, Result};

/// Formats a message without logging it.
///
/// ```
/// assert_eq!(proven_log::txt!("%s-%s", 1, "a"), "1-a");
/// assert_eq!(proven_log::txt!("50%"), "50%");
/// ```
#[macro_export]
macro_rules! txt {
    ($template:expr $(,)?) => {
        ::std::string::String::from($template)
    };
    ($template:expr, $($arg:expr),+ $(,)?) => {
        $crate::MessageFormatter::new(::core::convert::AsRef::<str>::as_ref(&$template))
            $(.arg(&$arg))+
            .into_text()
    };
}

/// Logs at a runtime level and returns the result of [`Logger::write`].
///
/// Accepts optional `logger:` and `module:` prefixes. Without `logger:` the
/// [`crate::CurrentLog`] logger is used; without `module:` the module is
/// `module_path!()`.
#[macro_export]
macro_rules! try_log {
    (logger: $logger:expr, module: $module:expr, $level:expr, $($arg:tt)+) => {
        $crate::__private::dispatch(
            $crate::__private::AsLogger::as_logger(&$logger),
            $module,
            $level,
            $crate::location!(),
            || $crate::txt!($($arg)+),
        )
    };
    (logger: $logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::try_log!(logger: $logger, module: module_path!(), $level, $($arg)+)
    };
    (module: $module:expr, $level:expr, $($arg:tt)+) => {
        $crate::__private::dispatch(
            $crate::CurrentLog::get().as_deref(),
            $module,
            $level,
            $crate::location!(),
            || $crate::txt!($($arg)+),
        )
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::try_log!(module: module_path!(), $level, $($arg)+)
    };
}

/// Logs at a runtime level. A failed write is reported and discarded.
#[macro_export]
macro_rules! log {
    ($($tokens:tt)+) => {
        $crate::__private::report($crate::try_log!($($tokens)+))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:ident, logger: $logger:expr, module: $module:expr, $($arg:tt)+) => {
        $crate::log!(logger: $logger, module: $module, $crate::Level::$level, $($arg)+)
    };
    ($level:ident, logger: $logger:expr, $($arg:tt)+) => {
        $crate::log!(logger: $logger, $crate::Level::$level, $($arg)+)
    };
    ($level:ident, module: $module:expr, $($arg:tt)+) => {
        $crate::log!(module: $module, $crate::Level::$level, $($arg)+)
    };
    ($level:ident, $($arg:tt)+) => {
        $crate::log!($crate::Level::$level, $($arg)+)
    };
}

/// Logs an error.
#[macro_export]
macro_rules! error {
    ($($tokens:tt)+) => { $crate::__log_at!(Error, $($tokens)+) };
}

/// Logs a warning.
#[macro_export]
macro_rules! warn {
    ($($tokens:tt)+) => { $crate::__log_at!(Warning, $($tokens)+) };
}

/// Logs info.
#[macro_export]
macro_rules! info {
    ($($tokens:tt)+) => { $crate::__log_at!(Info, $($tokens)+) };
}

/// Logs debug.
#[macro_export]
macro_rules! debug {
    ($($tokens:tt)+) => { $crate::__log_at!(Debug, $($tokens)+) };
}

/// Logs trace.
#[macro_export]
macro_rules! trace {
    ($($tokens:tt)+) => { $crate::__log_at!(Trace, $($tokens)+) };
}

/// Anything the `logger:` macro argument accepts.
pub trait AsLogger {
    /// The logger to dispatch to, if any.
    fn as_logger(&self) -> Option<&dyn Logger>;
}

impl AsLogger for dyn Logger {
    fn as_logger(&self) -> Option<&dyn Logger> {
        Some(self)
    }
}

impl<L: Logger> AsLogger for Arc<L> {
    fn as_logger(&self) -> Option<&dyn Logger> {
        let logger: &dyn Logger = self.as_ref();
        Some(logger)
    }
}

impl AsLogger for Arc<dyn Logger> {
    fn as_logger(&self) -> Option<&dyn Logger> {
        Some(self.as_ref())
    }
}

impl<L: AsLogger + ?Sized> AsLogger for &L {
    fn as_logger(&self) -> Option<&dyn Logger> {
        (**self).as_logger()
    }
}

impl<L: AsLogger> AsLogger for Option<L> {
    fn as_logger(&self) -> Option<&dyn Logger> {
        self.as_ref().and_then(AsLogger::as_logger)
    }
}

/// Gate, format, write.
#[doc(hidden)]
#[inline]
pub fn dispatch<F>(
    logger: Option<&dyn Logger>,
    module: &str,
    level: Level,
    location: Location,
    message: F,
) -> Result<()>
where
    F: FnOnce() -> String,
{
    let Some(logger) = logger else {
        return Ok(());
    };
    if !logger.is_enabled(module, level) {
        return Ok(());
    }

    let text = message();
    logger.write(&Record::new(module, level, &text, location))
}

#[cold]
fn report_failure(error: &crate::Error) {
    tracing::warn!(%error, "failed to write log record");
}

#[doc(hidden)]
#[inline]
pub fn report(result: Result<()>) {
    if let Err(error) = result {
        report_failure(&error);
    }
}
