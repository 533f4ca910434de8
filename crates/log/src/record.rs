//! Log record types.

use std::fmt;

use crate::Level;

/// Source location of a logging call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Source file
    pub file: &'static str,
    /// Line number
    pub line: u32,
    /// Enclosing function path
    pub function: &'static str,
}

impl Location {
    /// Creates a location.
    #[must_use]
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} ({})", self.file, self.line, self.function)
    }
}

/// A single log record, handed to [`crate::Logger::write`] and never stored.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    /// Module tag of the emitting subsystem
    pub module: &'a str,
    /// Log level
    pub level: Level,
    /// Formatted message
    pub text: &'a str,
    /// Where the call was made
    pub location: Location,
}

impl<'a> Record<'a> {
    /// Creates a record.
    #[inline]
    #[must_use]
    pub const fn new(module: &'a str, level: Level, text: &'a str, location: Location) -> Self {
        Self {
            module,
            level,
            text,
            location,
        }
    }
}

/// Captures the [`Location`] of the call site.
#[macro_export]
macro_rules! location {
    () => {
        $crate::Location::new(file!(), line!(), $crate::function_name!())
    };
}

/// Path of the enclosing function, without closure suffixes.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        $crate::__private::trim_function_name(__type_name_of(__here))
    }};
}

#[doc(hidden)]
#[must_use]
pub fn trim_function_name(name: &'static str) -> &'static str {
    let mut name = name.strip_suffix("::__here").unwrap_or(name);
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_name_of_enclosing_fn() {
        let name = crate::function_name!();
        assert!(name.ends_with("test_function_name_of_enclosing_fn"), "{name}");
    }

    #[test]
    fn test_function_name_inside_closure() {
        let name = (|| crate::function_name!())();
        assert!(name.ends_with("test_function_name_inside_closure"), "{name}");
    }

    #[test]
    fn test_location_captures_call_site() {
        let location = crate::location!();
        assert_eq!(location.file, file!());
        assert!(location.line > 0);
    }
}
