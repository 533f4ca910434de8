//! Current-logger holder.
//!
//! Each thread has its own active slot. When a thread has no active logger,
//! the process-wide default is used. Both start empty: nothing logs until
//! the application calls [`CurrentLog::set`] or [`CurrentLog::set_default`].

use std::cell::RefCell;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::Logger;

thread_local! {
    static ACTIVE: RefCell<Option<Arc<dyn Logger>>> = const { RefCell::new(None) };
}

static DEFAULT: RwLock<Option<Arc<dyn Logger>>> = parking_lot::const_rwlock(None);

/// Access to the logger used by the dispatch macros.
#[derive(Debug, Clone, Copy)]
pub struct CurrentLog;

impl CurrentLog {
    /// The active logger of this thread, else the default, else `None`.
    #[must_use]
    pub fn get() -> Option<Arc<dyn Logger>> {
        ACTIVE
            .try_with(|active| active.borrow().clone())
            .ok()
            .flatten()
            .or_else(|| DEFAULT.read().clone())
    }

    /// Replaces this thread's active logger, returning the previous one.
    pub fn set(logger: Option<Arc<dyn Logger>>) -> Option<Arc<dyn Logger>> {
        ACTIVE
            .try_with(|active| active.replace(logger))
            .ok()
            .flatten()
    }

    /// Replaces the process-wide default, returning the previous one.
    pub fn set_default(logger: Option<Arc<dyn Logger>>) -> Option<Arc<dyn Logger>> {
        std::mem::replace(&mut *DEFAULT.write(), logger)
    }

    /// Clears this thread's active logger and the default.
    pub fn reset() {
        Self::set(None);
        Self::set_default(None);
    }

    /// Installs `logger` as this thread's active logger until the guard drops.
    #[must_use = "the previous logger is restored when the guard is dropped"]
    pub fn scoped(logger: Arc<dyn Logger>) -> CurrentLogGuard {
        CurrentLogGuard {
            previous: Self::set(Some(logger)),
        }
    }
}

/// Restores the previously active logger on drop.
pub struct CurrentLogGuard {
    previous: Option<Arc<dyn Logger>>,
}

impl Drop for CurrentLogGuard {
    fn drop(&mut self) {
        CurrentLog::set(self.previous.take());
    }
}
