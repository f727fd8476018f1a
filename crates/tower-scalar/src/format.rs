//! Textual forms of scalars.

use crate::Scalar;
use std::fmt;

/// Formats a float with the shortest digits that read back to the same value.
///
/// The result always carries a fractional part (`1.0`). Decimal exponents
/// below -4 or from 16 up switch to `d.ddde±XX`.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if f == 0.0 {
        return if f.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // `{:e}` gives the shortest round-trip mantissa, e.g. "-1.2345e3"
    let sci = format!("{:e}", f.abs());
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let sign = if f < 0.0 { "-" } else { "" };

    if (-4..16).contains(&exponent) {
        let point = exponent + 1;
        let body = if point <= 0 {
            format!("0.{}{}", "0".repeat((-point) as usize), digits)
        } else if digits.len() <= point as usize {
            format!("{}{}.0", digits, "0".repeat(point as usize - digits.len()))
        } else {
            let (int, frac) = digits.split_at(point as usize);
            format!("{int}.{frac}")
        };
        format!("{sign}{body}")
    } else {
        let (lead, rest) = digits.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        format!("{sign}{lead}.{rest}e{exp_sign}{:02}", exponent.abs())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Big(n) => write!(f, "{n}"),
            Scalar::Rational(r) => write!(f, "{}/{}", r.numer(), r.denom()),
            Scalar::Float(x) => f.write_str(&format_float(*x)),
        }
    }
}

impl Scalar {
    /// Debugging form: rationals are parenthesized, everything else prints as
    /// with `Display`.
    pub fn inspect(&self) -> String {
        match self {
            Scalar::Rational(_) => format!("({self})"),
            other => other.to_string(),
        }
    }
}
