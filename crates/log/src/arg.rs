//! Pre-stringified formatter arguments.
//!
//! Every argument handed to the formatter is converted once into an [`Arg`],
//! which records how it should be rendered. Sequences and mappings keep their
//! elements as text so rendering never needs the original value again.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::ffi::{OsStr, OsString};
use std::fmt::{self, Write};
use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};

/// A formatter argument tagged with its rendering strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Signed or unsigned integer that fits in 128 bits.
    Int(i128),
    /// Floating point number.
    Float(f64),
    /// Any other scalar, already converted to text.
    Text(String),
    /// Elements of a sequence or set, in iteration order.
    Sequence(Vec<String>),
    /// Key/value pairs of a mapping, in iteration order.
    Mapping(Vec<(String, String)>),
}

impl Arg {
    /// Builds a text argument from any `Display` value.
    pub fn display(value: &(impl fmt::Display + ?Sized)) -> Self {
        Self::Text(stringify(value))
    }

    /// Builds a sequence argument from displayable items.
    pub fn sequence<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        Self::Sequence(items.into_iter().map(|item| stringify(&item)).collect())
    }

    /// Builds a mapping argument from displayable pairs.
    pub fn mapping<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: fmt::Display,
        V: fmt::Display,
    {
        Self::Mapping(
            pairs
                .into_iter()
                .map(|(k, v)| (stringify(&k), stringify(&v)))
                .collect(),
        )
    }

    /// Default rendering, used by `%s` and positional placeholders.
    #[must_use]
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Self::Int(v) => Cow::Owned(v.to_string()),
            Self::Float(v) => Cow::Owned(v.to_string()),
            Self::Text(v) => Cow::Borrowed(v),
            Self::Sequence(items) => Cow::Owned(items.join(",")),
            Self::Mapping(pairs) => {
                let mut out = String::new();
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(k);
                    out.push(':');
                    out.push_str(v);
                }
                Cow::Owned(out)
            }
        }
    }
}

/// Converts a `Display` value to text without panicking.
///
/// A `Display` impl that returns an error leaves whatever it wrote so far.
pub(crate) fn stringify(value: &(impl fmt::Display + ?Sized)) -> String {
    let mut out = String::new();
    let _ = write!(out, "{value}");
    out
}

/// Conversion into a formatter argument.
pub trait ToArg {
    /// Converts `self` into an [`Arg`].
    fn to_arg(&self) -> Arg;
}

impl<T: ToArg + ?Sized> ToArg for &T {
    fn to_arg(&self) -> Arg {
        (**self).to_arg()
    }
}

impl ToArg for Arg {
    fn to_arg(&self) -> Arg {
        self.clone()
    }
}

macro_rules! int_args {
    ($($ty:ty),*) => {
        $(
            impl ToArg for $ty {
                fn to_arg(&self) -> Arg {
                    Arg::Int(i128::from(*self))
                }
            }
        )*
    };
}

int_args!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl ToArg for isize {
    fn to_arg(&self) -> Arg {
        i128::try_from(*self).map_or_else(|_| Arg::display(self), Arg::Int)
    }
}

impl ToArg for usize {
    fn to_arg(&self) -> Arg {
        i128::try_from(*self).map_or_else(|_| Arg::display(self), Arg::Int)
    }
}

impl ToArg for u128 {
    fn to_arg(&self) -> Arg {
        i128::try_from(*self).map_or_else(|_| Arg::display(self), Arg::Int)
    }
}

impl ToArg for f32 {
    fn to_arg(&self) -> Arg {
        Arg::Float(f64::from(*self))
    }
}

impl ToArg for f64 {
    fn to_arg(&self) -> Arg {
        Arg::Float(*self)
    }
}

macro_rules! display_args {
    ($($ty:ty),*) => {
        $(
            impl ToArg for $ty {
                fn to_arg(&self) -> Arg {
                    Arg::display(self)
                }
            }
        )*
    };
}

display_args!(
    bool,
    char,
    str,
    String,
    Cow<'_, str>,
    fmt::Arguments<'_>,
    std::net::IpAddr,
    std::net::SocketAddr
);

impl ToArg for OsStr {
    fn to_arg(&self) -> Arg {
        Arg::Text(self.to_string_lossy().into_owned())
    }
}

impl ToArg for OsString {
    fn to_arg(&self) -> Arg {
        self.as_os_str().to_arg()
    }
}

impl ToArg for Path {
    fn to_arg(&self) -> Arg {
        self.as_os_str().to_arg()
    }
}

impl ToArg for PathBuf {
    fn to_arg(&self) -> Arg {
        self.as_os_str().to_arg()
    }
}

/// UTF-16 text, converted to UTF-8 when used as an argument.
///
/// Unpaired surrogates become U+FFFD.
#[derive(Debug, Clone, Copy)]
pub struct Utf16<'a>(pub &'a [u16]);

impl ToArg for Utf16<'_> {
    fn to_arg(&self) -> Arg {
        Arg::Text(String::from_utf16_lossy(self.0))
    }
}

/// Wraps any `Display` value so it can be passed as a scalar argument.
#[derive(Debug, Clone, Copy)]
pub struct Shown<T>(pub T);

impl<T: fmt::Display> ToArg for Shown<T> {
    fn to_arg(&self) -> Arg {
        Arg::display(&self.0)
    }
}

impl<T: ToArg> ToArg for Option<T> {
    fn to_arg(&self) -> Arg {
        self.as_ref()
            .map_or_else(|| Arg::Text(String::new()), ToArg::to_arg)
    }
}

macro_rules! sequence_args {
    ($($ty:ident),*) => {
        $(
            impl<T: fmt::Display> ToArg for $ty<T> {
                fn to_arg(&self) -> Arg {
                    Arg::sequence(self)
                }
            }
        )*
    };
}

sequence_args!(Vec, VecDeque, LinkedList, BTreeSet);

impl<T: fmt::Display> ToArg for [T] {
    fn to_arg(&self) -> Arg {
        Arg::sequence(self)
    }
}

impl<T: fmt::Display, const N: usize> ToArg for [T; N] {
    fn to_arg(&self) -> Arg {
        Arg::sequence(self)
    }
}

impl<T: fmt::Display, S> ToArg for HashSet<T, S> {
    fn to_arg(&self) -> Arg {
        Arg::sequence(self)
    }
}

impl<T: fmt::Display, S> ToArg for IndexSet<T, S> {
    fn to_arg(&self) -> Arg {
        Arg::sequence(self)
    }
}

impl<K: fmt::Display, V: fmt::Display> ToArg for BTreeMap<K, V> {
    fn to_arg(&self) -> Arg {
        Arg::mapping(self)
    }
}

impl<K: fmt::Display, V: fmt::Display, S> ToArg for HashMap<K, V, S> {
    fn to_arg(&self) -> Arg {
        Arg::mapping(self)
    }
}

impl<K: fmt::Display, V: fmt::Display, S> ToArg for IndexMap<K, V, S> {
    fn to_arg(&self) -> Arg {
        Arg::mapping(self)
    }
}
