//! Real transcendental functions. Results are always floats.

use crate::{Error, Result, Scalar};

pub fn hypot(a: &Scalar, b: &Scalar) -> Scalar {
    Scalar::Float(a.to_f64().hypot(b.to_f64()))
}

/// Angle of the point `(x, y)`, in `(-π, π]`.
pub fn atan2(y: &Scalar, x: &Scalar) -> Scalar {
    Scalar::Float(y.to_f64().atan2(x.to_f64()))
}

pub fn cos(x: &Scalar) -> Scalar {
    Scalar::Float(x.to_f64().cos())
}

pub fn sin(x: &Scalar) -> Scalar {
    Scalar::Float(x.to_f64().sin())
}

pub fn cosh(x: &Scalar) -> Scalar {
    Scalar::Float(x.to_f64().cosh())
}

pub fn sinh(x: &Scalar) -> Scalar {
    Scalar::Float(x.to_f64().sinh())
}

pub fn exp(x: &Scalar) -> Scalar {
    Scalar::Float(x.to_f64().exp())
}

/// Square root. Negative arguments are outside the real domain.
pub fn sqrt(x: &Scalar) -> Result<Scalar> {
    if x.is_negative() {
        return Err(domain("sqrt", x));
    }
    Ok(Scalar::Float(x.to_f64().sqrt()))
}

/// Natural logarithm. Negative arguments are outside the real domain.
pub fn log(x: &Scalar) -> Result<Scalar> {
    if x.is_negative() {
        return Err(domain("log", x));
    }
    Ok(Scalar::Float(x.to_f64().ln()))
}

fn domain(func: &str, x: &Scalar) -> Error {
    Error::Domain(format!(
        "Numerical argument is out of domain - \"{func}\" ({x})"
    ))
}
