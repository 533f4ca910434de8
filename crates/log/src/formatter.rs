//! Message formatting.

use std::borrow::Cow;

use crate::template::Template;
use crate::{Arg, ToArg};

/// Builds a message from a template and a list of arguments.
///
/// Arguments are converted to [`Arg`] as they are pushed, so each one is
/// stringified exactly once.
///
/// - With no arguments the template is returned verbatim, `%` included.
/// - With fewer arguments than placeholders, or a malformed template, the
///   raw template is returned.
/// - Extra arguments are ignored.
///
/// ```
/// use proven_log::MessageFormatter;
///
/// let text = MessageFormatter::new("peers: %s").arg(&vec!["a", "b"]).into_text();
/// assert_eq!(text, "peers: a,b");
/// ```
#[derive(Debug, Clone)]
pub struct MessageFormatter<'a> {
    template: &'a str,
    args: Vec<Arg>,
}

impl<'a> MessageFormatter<'a> {
    /// Creates a formatter for `template`.
    #[must_use]
    pub const fn new(template: &'a str) -> Self {
        Self {
            template,
            args: Vec::new(),
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn arg<T: ToArg + ?Sized>(mut self, value: &T) -> Self {
        self.args.push(value.to_arg());
        self
    }

    /// Appends an argument in place.
    pub fn push_arg(&mut self, arg: Arg) {
        self.args.push(arg);
    }

    /// The formatted text.
    #[must_use]
    pub fn text(&self) -> Cow<'a, str> {
        render(self.template, &self.args)
    }

    /// Consumes the formatter, returning the formatted text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text().into_owned()
    }
}

/// Formats `template` with already converted arguments.
#[must_use]
pub fn format(template: &str, args: &[Arg]) -> String {
    render(template, args).into_owned()
}

fn render<'a>(template: &'a str, args: &[Arg]) -> Cow<'a, str> {
    if args.is_empty() {
        return Cow::Borrowed(template);
    }

    match Template::parse(template) {
        Some(parsed) if args.len() >= parsed.required() => Cow::Owned(parsed.render(args)),
        _ => Cow::Borrowed(template),
    }
}
