//! `convert`: building a complex from strings, numbers and user objects.

use crate::{not_a_real, parse_strict, Complex, Error, Result, Value, I};
use rhizome_tower_scalar::Scalar;
use std::fmt;

/// User-defined conversion to a complex value.
///
/// Implement this for host objects that [`convert`] should accept on their
/// own.
pub trait ToComplex {
    fn to_c(&self) -> Result<Value>;

    /// Name used in error messages.
    fn type_name(&self) -> &str {
        "Object"
    }
}

/// An argument to [`convert`] or [`Complex::coerce`].
pub enum Operand<'a> {
    Nil,
    /// A complex literal, parsed strictly.
    Str(&'a str),
    Num(Value),
    Object(&'a dyn ToComplex),
}

impl Operand<'_> {
    /// Name used in error messages: `nil`, `String`, a scalar kind,
    /// `Complex`, or the object's own name.
    pub(crate) fn type_name(&self) -> String {
        match self {
            Operand::Nil => "nil".to_string(),
            Operand::Str(_) => "String".to_string(),
            Operand::Num(v) => v.type_name(),
            Operand::Object(obj) => obj.type_name().to_string(),
        }
    }
}

impl fmt::Debug for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Nil => f.write_str("Nil"),
            Operand::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Operand::Num(v) => f.debug_tuple("Num").field(v).finish(),
            Operand::Object(obj) => f.debug_tuple("Object").field(&obj.type_name()).finish(),
        }
    }
}

impl<'a> From<&'a str> for Operand<'a> {
    fn from(s: &'a str) -> Self {
        Operand::Str(s)
    }
}

impl From<Value> for Operand<'_> {
    fn from(v: Value) -> Self {
        Operand::Num(v)
    }
}

impl From<Complex> for Operand<'_> {
    fn from(c: Complex) -> Self {
        Operand::Num(Value::Complex(c))
    }
}

impl From<Scalar> for Operand<'_> {
    fn from(s: Scalar) -> Self {
        Operand::Num(Value::Scalar(s))
    }
}

impl From<i64> for Operand<'_> {
    fn from(n: i64) -> Self {
        Operand::Num(Value::from(n))
    }
}

impl From<f64> for Operand<'_> {
    fn from(f: f64) -> Self {
        Operand::Num(Value::from(f))
    }
}

// ============================================================================
// Convert
// ============================================================================

/// An operand after strings are parsed and nil is rejected.
enum Arg<'a> {
    Num(Value),
    Object(&'a dyn ToComplex),
}

impl<'a> Arg<'a> {
    fn resolve(op: Operand<'a>) -> Result<Arg<'a>> {
        let value = match op {
            Operand::Nil => return Err(cant_convert_nil()),
            Operand::Object(obj) => return Ok(Arg::Object(obj)),
            Operand::Str(s) => parse_strict(s)?,
            Operand::Num(v) => v,
        };
        // a complex with an exact-zero imaginary part stands for its real part
        Ok(Arg::Num(match value {
            Value::Complex(z) if z.imag().is_exact() && num_traits::Zero::is_zero(z.imag()) => {
                Value::Scalar(z.into_parts().0)
            }
            other => other,
        }))
    }

    fn is_exact_zero(&self) -> bool {
        matches!(self, Arg::Num(v) if v.is_exact_zero())
    }

    fn into_value(self) -> Result<Value> {
        match self {
            Arg::Num(v) => Ok(v),
            Arg::Object(_) => Err(not_a_real()),
        }
    }
}

fn cant_convert_nil() -> Error {
    Error::Type("can't convert nil into Complex".to_string())
}

/// Builds a complex from one or two operands.
///
/// Strings are parsed as complex literals and must be read completely.
/// `convert(a, Some(b))` is `a + b·i`, where either side may itself be
/// complex. A lone [`Operand::Object`] converts through its
/// [`ToComplex`] impl.
///
/// ```
/// use rhizome_tower_complex::{convert, Operand};
///
/// let z = convert(Operand::Str("1+2i"), Some(Operand::from(3))).unwrap();
/// assert_eq!(z.to_string(), "1+5i");
/// ```
pub fn convert(a: Operand<'_>, b: Option<Operand<'_>>) -> Result<Value> {
    if matches!(a, Operand::Nil) || matches!(b, Some(Operand::Nil)) {
        return Err(cant_convert_nil());
    }
    let a = Arg::resolve(a)?;
    let b = b.map(Arg::resolve).transpose()?;

    match (a, b) {
        (Arg::Num(a @ Value::Complex(_)), b) if b.as_ref().map_or(true, Arg::is_exact_zero) => {
            Ok(a)
        }
        (Arg::Object(obj), None) => {
            log::debug!("converting {} through its to_c", obj.type_name());
            match obj.to_c()? {
                z @ Value::Complex(_) => Ok(z),
                other => Err(Error::Type(format!(
                    "can't convert {0} to Complex ({0}#to_c gives {1})",
                    obj.type_name(),
                    other.type_name()
                ))),
            }
        }
        (Arg::Num(a), None) => Complex::rect(a, 0),
        (Arg::Num(a), Some(Arg::Num(b))) if !a.is_real() || !b.is_real() => {
            Ok(&a + &(&b * &Value::from(I)))
        }
        (a, Some(b)) => Complex::rect(a.into_value()?, b.into_value()?),
    }
}
