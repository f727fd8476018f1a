//! Complex literals: `1+2i`, `-3.5j`, `1/2-i`, `2@0.5` (polar).

use crate::complex::polar_parts;
use crate::settings;
use crate::{Complex, Error, Result, Value};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use rhizome_tower_scalar::Scalar;

const DIGITS: &str = r"(?:[0-9](?:_[0-9]|[0-9])*)";

fn numerator() -> String {
    format!(r"(?:{DIGITS}?\.)?{DIGITS}(?:[eE][-+]?{DIGITS})?")
}

/// Unsigned scalar literal, optionally with a `/denominator`.
fn unsigned_number() -> String {
    format!(r"{}(?:/{DIGITS})?", numerator())
}

fn number() -> String {
    format!(r"[-+]?{}", unsigned_number())
}

/// `abs@arg`
static POLAR: Lazy<Regex> = Lazy::new(|| {
    let n = number();
    Regex::new(&format!(r"\A\s*({n})@({n})\s*")).expect("polar literal pattern")
});

/// `±coefficient i`, the coefficient defaulting to 1.
static IMAGINARY: Lazy<Regex> = Lazy::new(|| {
    let n = number();
    Regex::new(&format!(r"\A\s*([-+])?({n})?[iIjJ]\s*")).expect("imaginary literal pattern")
});

/// `real` or `real±coefficient i`.
static RECTANGULAR: Lazy<Regex> = Lazy::new(|| {
    let n = number();
    let u = unsigned_number();
    Regex::new(&format!(r"\A\s*({n})(([-+])({u})?[iIjJ])?\s*"))
        .expect("rectangular literal pattern")
});

// ============================================================================
// Parsing
// ============================================================================

/// Reads a complex literal from the start of `s`, returning the value and the
/// unread tail.
///
/// Leading and trailing whitespace around the literal is consumed. If no
/// literal starts the string the value is `None` and the tail is all of `s`.
/// Fails only when a matched component is itself unusable, such as a `/0`
/// denominator.
pub fn parse(s: &str) -> Result<(Option<Value>, &str)> {
    if let Some(caps) = POLAR.captures(s) {
        log::trace!("complex literal {s:?} matched polar form");
        let abs = scalar(&caps, 1)?;
        let arg = scalar(&caps, 2)?;
        let value = polar_parts(&abs, &arg, &settings::current());
        return Ok((Some(value), tail(s, &caps)));
    }

    if let Some(caps) = IMAGINARY.captures(s) {
        log::trace!("complex literal {s:?} matched imaginary form");
        let coefficient = match caps.get(2) {
            Some(m) => m.as_str().parse::<Scalar>()?,
            None => Scalar::from(1),
        };
        // the sign multiplies the coefficient's own, so --2i reads as 2i
        let imag = match caps.get(1).map(|m| m.as_str()) {
            Some("-") => -coefficient,
            _ => coefficient,
        };
        let value = Complex::canonicalize(Value::from(0), Value::Scalar(imag));
        return Ok((Some(value), tail(s, &caps)));
    }

    if let Some(caps) = RECTANGULAR.captures(s) {
        log::trace!("complex literal {s:?} matched rectangular form");
        let real = scalar(&caps, 1)?;
        let imag = if caps.get(2).is_none() {
            Scalar::from(0)
        } else {
            let coefficient = match caps.get(4) {
                Some(m) => m.as_str().parse::<Scalar>()?,
                None => Scalar::from(1),
            };
            match caps.get(3).map(|m| m.as_str()) {
                Some("-") => -coefficient,
                _ => coefficient,
            }
        };
        let value = Complex::canonicalize(Value::Scalar(real), Value::Scalar(imag));
        return Ok((Some(value), tail(s, &caps)));
    }

    Ok((None, s))
}

/// Parses the whole of `s` as a complex literal.
pub fn parse_strict(s: &str) -> Result<Value> {
    match parse(s)? {
        (Some(value), "") => Ok(value),
        _ => Err(Error::Argument(format!(
            "invalid value for convert(): {s:?}"
        ))),
    }
}

/// Lenient conversion: the leading literal of `s`, or `0+0i` if there is
/// none. Trailing text is ignored.
pub fn to_c(s: &str) -> Result<Value> {
    match parse(s)? {
        (Some(value), _) => Ok(value),
        (None, _) => Ok(Complex::canonicalize(Value::from(0), Value::from(0))),
    }
}

fn scalar(caps: &Captures<'_>, group: usize) -> Result<Scalar> {
    let text = caps.get(group).map_or("", |m| m.as_str());
    Ok(text.parse::<Scalar>()?)
}

fn tail<'a>(s: &'a str, caps: &Captures<'_>) -> &'a str {
    caps.get(0).map_or(s, |m| &s[m.end()..])
}
