//! printf-style message formatting for the `printf` form of the logging macros.
//!
//! Supported directives follow C: `%[flags][width][.precision][length]conversion`
//! with flags `- + space 0 #`, `*` for width and precision, length modifiers
//! accepted and ignored, and conversions `d i u o x X f F e E g G c s %`.
//! Anything C would leave undefined (missing arguments, a string passed to `%d`,
//! an unknown conversion) is reported as a [`PrintfError`] instead.

use std::iter;

/// Largest width or precision accepted for a single directive.
const MAX_FIELD: usize = 1 << 16;

/// One argument of a printf-style call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrintfArg<'a> {
    Int(i64),
    Uint(u64),
    Float(f64),
    Char(char),
    Bool(bool),
    Str(&'a str),
}

macro_rules! printf_arg_from {
    ($variant:ident as $wide:ty: $($t:ty),+) => {
        $(
            impl From<$t> for PrintfArg<'_> {
                fn from(v: $t) -> Self {
                    PrintfArg::$variant(v as $wide)
                }
            }
        )+
    };
}

printf_arg_from!(Int as i64: i8, i16, i32, i64, isize);
printf_arg_from!(Uint as u64: u8, u16, u32, u64, usize);
printf_arg_from!(Float as f64: f32, f64);

impl From<char> for PrintfArg<'_> {
    fn from(v: char) -> Self {
        PrintfArg::Char(v)
    }
}

impl From<bool> for PrintfArg<'_> {
    fn from(v: bool) -> Self {
        PrintfArg::Bool(v)
    }
}

impl<'a> From<&'a str> for PrintfArg<'a> {
    fn from(v: &'a str) -> Self {
        PrintfArg::Str(v)
    }
}

impl<'a> From<&'a String> for PrintfArg<'a> {
    fn from(v: &'a String) -> Self {
        PrintfArg::Str(v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrintfError {
    #[error("format string ends inside a conversion")]
    Truncated,
    #[error("unsupported conversion '%{0}'")]
    Unsupported(char),
    #[error("missing argument {index}")]
    MissingArgument { index: usize },
    #[error("argument {index} cannot be formatted with '%{conversion}'")]
    Mismatch { index: usize, conversion: char },
    #[error("field width or precision exceeds 65536")]
    FieldTooWide,
}

#[derive(Debug, Default, Clone, Copy)]
struct Spec {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alt: bool,
    width: usize,
    precision: Option<usize>,
}

struct Args<'s, 'a> {
    args: &'s [PrintfArg<'a>],
    next: usize,
}

impl<'a> Args<'_, 'a> {
    fn take(&mut self) -> Result<(usize, PrintfArg<'a>), PrintfError> {
        let index = self.next;
        let arg = self
            .args
            .get(index)
            .copied()
            .ok_or(PrintfError::MissingArgument { index })?;
        self.next += 1;
        Ok((index, arg))
    }

    fn take_count(&mut self) -> Result<i64, PrintfError> {
        match self.take()? {
            (_, PrintfArg::Int(v)) => Ok(v),
            (_, PrintfArg::Uint(v)) => Ok(i64::try_from(v).unwrap_or(i64::MAX)),
            (index, _) => Err(PrintfError::Mismatch {
                index,
                conversion: '*',
            }),
        }
    }
}

/// Formats `fmt` against `args` the way `snprintf` would.
///
/// Extra arguments are ignored, as in C.
///
/// ```rust
/// use relaylog::{PrintfArg, sprintf};
///
/// let out = sprintf("float is : %.2f", &[PrintfArg::from(3.14359)]).unwrap();
/// assert_eq!(out, "float is : 3.14");
/// ```
pub fn sprintf(fmt: &str, args: &[PrintfArg<'_>]) -> Result<String, PrintfError> {
    let mut out = String::with_capacity(fmt.len() + 8 * args.len());
    let mut args = Args { args, next: 0 };
    let mut chars = fmt.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut spec = Spec::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => spec.left = true,
                '+' => spec.plus = true,
                ' ' => spec.space = true,
                '0' => spec.zero = true,
                '#' => spec.alt = true,
                _ => break,
            }
            chars.next();
        }

        if chars.peek() == Some(&'*') {
            chars.next();
            let w = args.take_count()?;
            if w < 0 {
                spec.left = true;
            }
            spec.width = bounded(w.unsigned_abs())?;
        } else {
            spec.width = bounded(read_number(&mut chars))?;
        }

        if chars.peek() == Some(&'.') {
            chars.next();
            if chars.peek() == Some(&'*') {
                chars.next();
                let p = args.take_count()?;
                // A negative precision behaves as if none was given.
                spec.precision = if p < 0 {
                    None
                } else {
                    Some(bounded(p.unsigned_abs())?)
                };
            } else {
                spec.precision = Some(bounded(read_number(&mut chars))?);
            }
        }

        while chars.peek().is_some_and(|c| "hlLqjzt".contains(*c)) {
            chars.next();
        }

        let conversion = chars.next().ok_or(PrintfError::Truncated)?;
        match conversion {
            '%' => out.push('%'),
            'd' | 'i' => {
                let (index, arg) = args.take()?;
                let (negative, magnitude) = signed_parts(arg).ok_or(PrintfError::Mismatch {
                    index,
                    conversion,
                })?;
                let sign = sign_str(negative, &spec);
                write_integer(&mut out, &spec, sign, "", magnitude.to_string(), false);
            }
            'u' | 'o' | 'x' | 'X' => {
                let (index, arg) = args.take()?;
                let value = unsigned_value(arg).ok_or(PrintfError::Mismatch {
                    index,
                    conversion,
                })?;
                let hex_alt = spec.alt && value != 0;
                let (digits, prefix) = match conversion {
                    'o' => (format!("{value:o}"), ""),
                    'x' => (format!("{value:x}"), if hex_alt { "0x" } else { "" }),
                    'X' => (format!("{value:X}"), if hex_alt { "0X" } else { "" }),
                    _ => (value.to_string(), ""),
                };
                let octal_alt = conversion == 'o' && spec.alt;
                write_integer(&mut out, &spec, "", prefix, digits, octal_alt);
            }
            'f' | 'F' | 'e' | 'E' | 'g' | 'G' => {
                let (index, arg) = args.take()?;
                let value = float_value(arg).ok_or(PrintfError::Mismatch {
                    index,
                    conversion,
                })?;
                write_float(&mut out, &spec, conversion, value);
            }
            'c' => {
                let (index, arg) = args.take()?;
                let ch = match arg {
                    PrintfArg::Char(c) => Some(c),
                    PrintfArg::Int(v) => u32::try_from(v).ok().and_then(char::from_u32),
                    PrintfArg::Uint(v) => u32::try_from(v).ok().and_then(char::from_u32),
                    _ => None,
                }
                .ok_or(PrintfError::Mismatch { index, conversion })?;
                pad(&mut out, &spec, ch.encode_utf8(&mut [0; 4]));
            }
            's' => {
                let (index, arg) = args.take()?;
                let text = match arg {
                    PrintfArg::Str(s) => s.to_string(),
                    PrintfArg::Char(c) => c.to_string(),
                    PrintfArg::Bool(b) => b.to_string(),
                    _ => return Err(PrintfError::Mismatch { index, conversion }),
                };
                let text = match spec.precision {
                    Some(p) => text.chars().take(p).collect(),
                    None => text,
                };
                pad(&mut out, &spec, &text);
            }
            other => return Err(PrintfError::Unsupported(other)),
        }
    }

    Ok(out)
}

fn bounded(n: u64) -> Result<usize, PrintfError> {
    usize::try_from(n)
        .ok()
        .filter(|n| *n <= MAX_FIELD)
        .ok_or(PrintfError::FieldTooWide)
}

fn read_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> u64 {
    let mut n: u64 = 0;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        n = n.saturating_mul(10).saturating_add(u64::from(d));
        chars.next();
    }
    n
}

fn signed_parts(arg: PrintfArg<'_>) -> Option<(bool, u64)> {
    match arg {
        PrintfArg::Int(v) => Some((v < 0, v.unsigned_abs())),
        PrintfArg::Uint(v) => Some((false, v)),
        PrintfArg::Char(c) => Some((false, u64::from(u32::from(c)))),
        PrintfArg::Bool(b) => Some((false, u64::from(b))),
        PrintfArg::Float(_) | PrintfArg::Str(_) => None,
    }
}

fn unsigned_value(arg: PrintfArg<'_>) -> Option<u64> {
    match arg {
        // Two's complement reinterpretation, as C does for negative values.
        PrintfArg::Int(v) => Some(v as u64),
        PrintfArg::Uint(v) => Some(v),
        PrintfArg::Char(c) => Some(u64::from(u32::from(c))),
        PrintfArg::Bool(b) => Some(u64::from(b)),
        PrintfArg::Float(_) | PrintfArg::Str(_) => None,
    }
}

fn float_value(arg: PrintfArg<'_>) -> Option<f64> {
    match arg {
        PrintfArg::Float(v) => Some(v),
        PrintfArg::Int(v) => Some(v as f64),
        PrintfArg::Uint(v) => Some(v as f64),
        PrintfArg::Char(_) | PrintfArg::Bool(_) | PrintfArg::Str(_) => None,
    }
}

fn sign_str(negative: bool, spec: &Spec) -> &'static str {
    if negative {
        "-"
    } else if spec.plus {
        "+"
    } else if spec.space {
        " "
    } else {
        ""
    }
}

fn write_integer(
    out: &mut String,
    spec: &Spec,
    sign: &str,
    prefix: &str,
    digits: String,
    octal_alt: bool,
) {
    let digits = match spec.precision {
        Some(0) if digits == "0" => String::new(),
        Some(p) if digits.len() < p => format!("{digits:0>p$}"),
        _ => digits,
    };
    // `#o` guarantees the first digit is a zero.
    let prefix = if octal_alt && !digits.starts_with('0') {
        "0"
    } else {
        prefix
    };
    // Precision disables the zero flag for integers.
    let zero = spec.zero && !spec.left && spec.precision.is_none();
    write_numeric(out, spec, zero, sign, prefix, &digits);
}

fn write_float(out: &mut String, spec: &Spec, conversion: char, value: f64) {
    let upper = conversion.is_ascii_uppercase();
    let negative = value.is_sign_negative() && !value.is_nan();
    let sign = sign_str(negative, spec);
    let abs = value.abs();

    if !abs.is_finite() {
        let word = match (abs.is_nan(), upper) {
            (true, false) => "nan",
            (true, true) => "NAN",
            (false, false) => "inf",
            (false, true) => "INF",
        };
        write_numeric(out, spec, false, sign, "", word);
        return;
    }

    let precision = spec.precision.unwrap_or(6);
    let mut body = match conversion.to_ascii_lowercase() {
        'f' => {
            let mut s = format!("{abs:.precision$}");
            if spec.alt && precision == 0 {
                s.push('.');
            }
            s
        }
        'e' => {
            let s = exponential(abs, precision);
            if spec.alt && precision == 0 {
                s.replacen('e', ".e", 1)
            } else {
                s
            }
        }
        _ => general(abs, precision, spec.alt),
    };
    if upper {
        body.make_ascii_uppercase();
    }

    let zero = spec.zero && !spec.left;
    write_numeric(out, spec, zero, sign, "", &body);
}

/// `%e` body: mantissa with `precision` decimals, exponent signed with at least two digits.
fn exponential(abs: f64, precision: usize) -> String {
    let raw = format!("{abs:.precision$e}");
    let (mantissa, exp) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
}

fn general(abs: f64, precision: usize, alt: bool) -> String {
    let p = precision.max(1);
    let sci = format!("{abs:.prec$e}", prec = p - 1);
    let exp: i64 = sci
        .split_once('e')
        .and_then(|(_, e)| e.parse().ok())
        .unwrap_or(0);

    let (mut mantissa, suffix) = if exp < -4 || exp >= p as i64 {
        let s = exponential(abs, p - 1);
        match s.split_once('e') {
            Some((m, e)) => (m.to_string(), format!("e{e}")),
            None => (s, String::new()),
        }
    } else {
        let decimals = (p as i64 - 1 - exp).max(0) as usize;
        (format!("{abs:.decimals$}"), String::new())
    };

    if !alt && mantissa.contains('.') {
        let kept = mantissa.trim_end_matches('0').trim_end_matches('.').len();
        mantissa.truncate(kept);
    }
    mantissa + &suffix
}

fn write_numeric(out: &mut String, spec: &Spec, zero: bool, sign: &str, prefix: &str, body: &str) {
    let len = sign.len() + prefix.len() + body.chars().count();
    let fill = spec.width.saturating_sub(len);
    if spec.left {
        out.push_str(sign);
        out.push_str(prefix);
        out.push_str(body);
        out.extend(iter::repeat_n(' ', fill));
    } else if zero {
        out.push_str(sign);
        out.push_str(prefix);
        out.extend(iter::repeat_n('0', fill));
        out.push_str(body);
    } else {
        out.extend(iter::repeat_n(' ', fill));
        out.push_str(sign);
        out.push_str(prefix);
        out.push_str(body);
    }
}

fn pad(out: &mut String, spec: &Spec, body: &str) {
    let fill = spec.width.saturating_sub(body.chars().count());
    if spec.left {
        out.push_str(body);
        out.extend(iter::repeat_n(' ', fill));
    } else {
        out.extend(iter::repeat_n(' ', fill));
        out.push_str(body);
    }
}
