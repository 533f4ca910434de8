//! Template parsing and directive rendering.
//!
//! Placeholders follow the `boost::format` family of syntaxes:
//!
//! - `%%` is a literal percent sign
//! - `%N%` refers to argument `N` (1-based)
//! - `%[flags][width][.precision][length]conversion` consumes the next
//!   argument, printf style
//!
//! A template may use positional or sequential placeholders, not both.

use crate::Arg;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Flags {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Directive {
    flags: Flags,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
}

impl Directive {
    const PLAIN: Self = Self {
        flags: Flags {
            left: false,
            plus: false,
            space: false,
            zero: false,
        },
        width: None,
        precision: None,
        conversion: 's',
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece<'a> {
    Literal(&'a str),
    Percent,
    Next(Directive),
    Positional(usize),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Template<'a> {
    pieces: Vec<Piece<'a>>,
    required: usize,
}

const CONVERSIONS: &str = "diouxXeEfFgGaAcsSp";

/// Largest accepted width or precision; anything above is malformed.
const MAX_FIELD: usize = 65_535;
const LENGTH_MODIFIERS: &str = "hlLqjzt";

impl<'a> Template<'a> {
    /// Parses `source`, returning `None` for a malformed template.
    pub(crate) fn parse(source: &'a str) -> Option<Self> {
        let bytes = source.as_bytes();
        let mut pieces = Vec::new();
        let mut literal_start = 0;
        let mut pos = 0;
        let mut sequential = 0usize;
        let mut max_positional = 0usize;

        while pos < bytes.len() {
            if bytes[pos] != b'%' {
                pos += 1;
                continue;
            }
            if literal_start < pos {
                pieces.push(Piece::Literal(&source[literal_start..pos]));
            }

            let (piece, next) = parse_placeholder(bytes, pos + 1)?;
            match piece {
                Piece::Next(_) => sequential += 1,
                Piece::Positional(index) => max_positional = max_positional.max(index),
                Piece::Literal(_) | Piece::Percent => {}
            }
            pieces.push(piece);
            pos = next;
            literal_start = pos;
        }
        if literal_start < bytes.len() {
            pieces.push(Piece::Literal(&source[literal_start..]));
        }

        if sequential > 0 && max_positional > 0 {
            return None;
        }

        Some(Self {
            pieces,
            required: sequential.max(max_positional),
        })
    }

    /// Number of arguments the template needs.
    pub(crate) const fn required(&self) -> usize {
        self.required
    }

    /// Substitutes `args`. The caller guarantees `args.len() >= required`.
    pub(crate) fn render(&self, args: &[Arg]) -> String {
        let mut out = String::new();
        let mut next = 0;

        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Percent => out.push('%'),
                Piece::Next(directive) => {
                    if let Some(arg) = args.get(next) {
                        out.push_str(&apply(directive, arg));
                    }
                    next += 1;
                }
                Piece::Positional(index) => {
                    if let Some(arg) = args.get(index - 1) {
                        out.push_str(&apply(&Directive::PLAIN, arg));
                    }
                }
            }
        }

        out
    }
}

/// Parses what follows a `%` starting at `start`.
///
/// Returns the piece and the index just past it.
fn parse_placeholder(bytes: &[u8], start: usize) -> Option<(Piece<'static>, usize)> {
    let mut pos = start;

    if bytes.get(pos) == Some(&b'%') {
        return Some((Piece::Percent, pos + 1));
    }

    // %N%
    let digits_end = scan_digits(bytes, pos);
    if digits_end > pos && bytes.get(digits_end) == Some(&b'%') && bytes[pos] != b'0' {
        let index = parse_number(&bytes[pos..digits_end])?;
        return Some((Piece::Positional(index), digits_end + 1));
    }

    let mut flags = Flags::default();
    while let Some(&b) = bytes.get(pos) {
        match b {
            b'-' => flags.left = true,
            b'+' => flags.plus = true,
            b' ' => flags.space = true,
            b'0' => flags.zero = true,
            b'#' => {}
            _ => break,
        }
        pos += 1;
    }

    let width_end = scan_digits(bytes, pos);
    let width = if width_end > pos {
        Some(parse_field(&bytes[pos..width_end])?)
    } else {
        None
    };
    pos = width_end;

    let mut precision = None;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        let precision_end = scan_digits(bytes, pos);
        precision = Some(if precision_end > pos {
            parse_field(&bytes[pos..precision_end])?
        } else {
            0
        });
        pos = precision_end;
    }

    while let Some(&b) = bytes.get(pos) {
        if !LENGTH_MODIFIERS.as_bytes().contains(&b) {
            break;
        }
        pos += 1;
    }

    let conversion = char::from(*bytes.get(pos)?);
    if !CONVERSIONS.contains(conversion) {
        return None;
    }

    Some((
        Piece::Next(Directive {
            flags,
            width,
            precision,
            conversion,
        }),
        pos + 1,
    ))
}

fn scan_digits(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    pos
}

fn parse_number(digits: &[u8]) -> Option<usize> {
    std::str::from_utf8(digits).ok()?.parse().ok()
}

fn parse_field(digits: &[u8]) -> Option<usize> {
    parse_number(digits).filter(|n| *n <= MAX_FIELD)
}

/// Renders one argument according to a directive.
fn apply(directive: &Directive, arg: &Arg) -> String {
    let precision = directive.precision;
    let numeric = matches!(arg, Arg::Int(_) | Arg::Float(_));

    #[allow(clippy::cast_precision_loss)]
    let body = match (directive.conversion, arg) {
        ('x', Arg::Int(v)) => signed_radix(*v, |m| format!("{m:x}")),
        ('X', Arg::Int(v)) => signed_radix(*v, |m| format!("{m:X}")),
        ('o', Arg::Int(v)) => signed_radix(*v, |m| format!("{m:o}")),
        ('f' | 'F', Arg::Float(v)) => format!("{:.*}", precision.unwrap_or(6), v),
        ('f' | 'F', Arg::Int(v)) => format!("{:.*}", precision.unwrap_or(6), *v as f64),
        ('e', Arg::Float(v)) => format!("{:.*e}", precision.unwrap_or(6), v),
        ('E', Arg::Float(v)) => format!("{:.*E}", precision.unwrap_or(6), v),
        (_, Arg::Float(v)) if precision.is_some() => {
            format!("{:.*}", precision.unwrap_or_default(), v)
        }
        (_, Arg::Int(_) | Arg::Float(_)) => arg.render().into_owned(),
        (_, _) => {
            let text = arg.render();
            match precision {
                Some(max) => text.chars().take(max).collect(),
                None => text.into_owned(),
            }
        }
    };

    let body = if numeric && !body.starts_with('-') {
        if directive.flags.plus {
            format!("+{body}")
        } else if directive.flags.space {
            format!(" {body}")
        } else {
            body
        }
    } else {
        body
    };

    pad(&body, directive, numeric)
}

fn signed_radix(value: i128, render: impl Fn(u128) -> String) -> String {
    if value < 0 {
        format!("-{}", render(value.unsigned_abs()))
    } else {
        render(value.unsigned_abs())
    }
}

fn pad(body: &str, directive: &Directive, numeric: bool) -> String {
    let len = body.chars().count();
    let Some(width) = directive.width.filter(|w| *w > len) else {
        return body.to_string();
    };
    let fill = width - len;

    if directive.flags.left {
        format!("{body}{}", " ".repeat(fill))
    } else if directive.flags.zero && numeric {
        let sign_len = usize::from(body.starts_with(['-', '+', ' ']));
        let (sign, digits) = body.split_at(sign_len);
        format!("{sign}{}{digits}", "0".repeat(fill))
    } else {
        format!("{}{body}", " ".repeat(fill))
    }
}
