//! Scalar literals.
//!
//! Digits may be grouped with single underscores (`1_000`). Rational literals
//! accept a decimal or exponent numerator, which is read exactly:
//! `1.5/3` is `1/2`.

use crate::{divided_by_zero, Error, Result, Scalar};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use std::str::FromStr;

/// Largest decimal exponent accepted in an exact literal.
const MAX_EXACT_EXPONENT: i64 = 100_000;

impl FromStr for Scalar {
    type Err = Error;

    /// Picks the kind from the literal's shape: a `/` makes a rational, a
    /// `.`, `e` or `E` makes a float, anything else is an integer.
    fn from_str(s: &str) -> Result<Scalar> {
        if s.contains('/') {
            parse_rational(s)
        } else if s.contains(['.', 'e', 'E']) {
            parse_float(s)
        } else {
            parse_integer(s)
        }
    }
}

pub fn parse_integer(s: &str) -> Result<Scalar> {
    let (negative, body) = split_sign(s);
    let digits = strip_separators(body).ok_or_else(|| invalid(s))?;
    let n = BigInt::from_str(&digits).map_err(|_| invalid(s))?;
    Ok(Scalar::from(if negative { -n } else { n }))
}

pub fn parse_float(s: &str) -> Result<Scalar> {
    let (negative, body) = split_sign(s);
    let decimal = Decimal::parse(body).ok_or_else(|| invalid(s))?;
    let text = decimal.to_plain_string();
    let f: f64 = text.parse().map_err(|_| invalid(s))?;
    Ok(Scalar::Float(if negative { -f } else { f }))
}

pub fn parse_rational(s: &str) -> Result<Scalar> {
    let (numer, denom) = match s.split_once('/') {
        Some((n, d)) => (n, Some(d)),
        None => (s, None),
    };
    let (negative, body) = split_sign(numer);
    let mut value = Decimal::parse(body)
        .ok_or_else(|| invalid(s))?
        .exact()
        .ok_or_else(|| invalid(s))?;
    if negative {
        value = -value;
    }
    if let Some(denom) = denom {
        let digits = strip_separators(denom).ok_or_else(|| invalid(s))?;
        let d = BigInt::from_str(&digits).map_err(|_| invalid(s))?;
        if d.is_zero() {
            return Err(divided_by_zero());
        }
        value /= BigRational::from_integer(d);
    }
    Ok(Scalar::Rational(value))
}

// ============================================================================
// Pieces
// ============================================================================

fn invalid(s: &str) -> Error {
    Error::InvalidLiteral(s.to_string())
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

/// Removes `_` separators from a run of ASCII digits. Each separator must sit
/// between two digits.
fn strip_separators(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return None;
    }
    let mut out = String::with_capacity(s.len());
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'0'..=b'9' => out.push(b as char),
            b'_' => {
                let before = i > 0 && bytes[i - 1].is_ascii_digit();
                let after = bytes.get(i + 1).is_some_and(u8::is_ascii_digit);
                if !(before && after) {
                    return None;
                }
            }
            _ => return None,
        }
    }
    Some(out)
}

/// Unsigned decimal literal `[int].frac[e±exp]` split into digit runs.
struct Decimal {
    int: String,
    frac: String,
    exp: i64,
}

impl Decimal {
    fn parse(s: &str) -> Option<Decimal> {
        let (mantissa, exp) = match s.find(['e', 'E']) {
            Some(at) => (&s[..at], Some(&s[at + 1..])),
            None => (s, None),
        };
        let (int, frac) = match mantissa.split_once('.') {
            Some((int, frac)) => {
                let int = if int.is_empty() {
                    String::new()
                } else {
                    strip_separators(int)?
                };
                (int, strip_separators(frac)?)
            }
            None => (strip_separators(mantissa)?, String::new()),
        };
        let exp = match exp {
            Some(e) => {
                let (negative, digits) = split_sign(e);
                let digits = strip_separators(digits)?;
                // saturate: huge exponents are handled by the caller
                let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX / 2);
                if negative {
                    -magnitude
                } else {
                    magnitude
                }
            }
            None => 0,
        };
        Some(Decimal { int, frac, exp })
    }

    fn to_plain_string(&self) -> String {
        let int = if self.int.is_empty() { "0" } else { &self.int };
        let frac = if self.frac.is_empty() { "0" } else { &self.frac };
        format!("{int}.{frac}e{}", self.exp)
    }

    /// Exact value, or `None` when the exponent is too large to expand.
    fn exact(&self) -> Option<BigRational> {
        let digits = format!("{}{}", self.int, self.frac);
        let mantissa = BigInt::from_str(&digits).ok()?;
        let scale = self.exp.checked_sub(self.frac.len() as i64)?;
        if scale.abs() > MAX_EXACT_EXPONENT {
            return if mantissa.is_zero() {
                Some(BigRational::zero())
            } else {
                None
            };
        }
        let power = BigInt::from(10).pow(scale.unsigned_abs() as u32);
        let mantissa = BigRational::from_integer(mantissa);
        Some(if scale >= 0 {
            mantissa * BigRational::from_integer(power)
        } else {
            mantissa / BigRational::from_integer(power)
        })
    }
}
